//! Core domain models for modreq
//!
//! This module contains the fundamental types used throughout the application:
//! - Requirement specifications with required and banned version rules
//! - Module records reported by the module inventory
//! - Verdicts and findings produced by the compliance check
//! - Per-source reports and the overall run result

mod finding;
mod module;
mod report;
mod requirement;

pub use finding::{Finding, RuleKind, Verdict};
pub use module::{ModuleRecord, ModuleUpdate};
pub use report::{RunResult, SourceReport, ViolationFlags, FATAL_EXIT_CODE};
pub use requirement::{RequirementSpec, VersionRule};
