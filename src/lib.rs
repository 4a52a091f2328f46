//! modreq - Go module requirement checker library
//!
//! This library checks the resolved modules of a Go project against
//! requirement documents fetched from one or more locations:
//! - Local files (file://)
//! - Web servers (http://, https://)
//! - Remote hosts over SSH (ssh://)
//!
//! Each document lists modules that must be at a given version and
//! versions that are banned.

pub mod check;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod requirements;
pub mod source;
