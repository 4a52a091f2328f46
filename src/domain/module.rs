//! Resolved module records
//!
//! Field names follow the objects printed by `go list -m -u -json`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Newer version reported for a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleUpdate {
    /// Newest known version
    #[serde(rename = "Version")]
    pub version: String,
}

/// A module resolved for the current project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Module path
    #[serde(rename = "Path")]
    pub path: String,
    /// Currently resolved version (empty for the main module)
    #[serde(rename = "Version", default)]
    pub version: String,
    /// Present iff a newer version than `version` exists
    #[serde(rename = "Update", default, skip_serializing_if = "Option::is_none")]
    pub update: Option<ModuleUpdate>,
    /// Whether this is the main module of the project
    #[serde(rename = "Main", default, skip_serializing_if = "std::ops::Not::not")]
    pub main: bool,
}

impl ModuleRecord {
    /// Creates a module record with no update available
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            update: None,
            main: false,
        }
    }

    /// Marks a newer version as available (builder pattern)
    pub fn with_update(mut self, version: impl Into<String>) -> Self {
        self.update = Some(ModuleUpdate {
            version: version.into(),
        });
        self
    }

    /// Returns the newer version if one exists
    pub fn update_available(&self) -> Option<&str> {
        self.update.as_ref().map(|u| u.version.as_str())
    }

    /// Returns true if no newer version is known
    pub fn is_latest(&self) -> bool {
        self.update.is_none()
    }
}

impl fmt::Display for ModuleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.update_available() {
            Some(newer) => write!(f, "{}@{} (update: {})", self.path, self.version, newer),
            None => write!(f, "{}@{}", self.path, self.version),
        }
    }
}
