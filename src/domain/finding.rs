//! Verdicts and findings produced by the compliance check

use super::{ModuleRecord, VersionRule};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one rule applied to one module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The module satisfies the rule
    Met,
    /// The module breaks the rule
    Violated,
}

impl Verdict {
    /// Maps a boolean "rule satisfied" outcome to a verdict
    pub fn from_met(met: bool) -> Self {
        if met {
            Verdict::Met
        } else {
            Verdict::Violated
        }
    }

    /// Returns true for `Violated`
    pub fn is_violated(&self) -> bool {
        matches!(self, Verdict::Violated)
    }
}

/// Which half of the requirements document a rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Version the module must satisfy
    Required,
    /// Version the module must not satisfy
    Banned,
}

impl RuleKind {
    /// Returns the label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Banned => "banned",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One evaluated (module, rule) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule kind
    pub kind: RuleKind,
    /// Module path
    pub module: String,
    /// Resolved module version
    pub version: String,
    /// Newer version, if one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
    /// Rule that was applied
    pub rule: VersionRule,
    /// Outcome
    pub verdict: Verdict,
}

impl Finding {
    /// Creates a finding for a module and rule
    pub fn new(kind: RuleKind, module: &ModuleRecord, rule: &VersionRule, verdict: Verdict) -> Self {
        Self {
            kind,
            module: module.path.clone(),
            version: module.version.clone(),
            update: module.update_available().map(str::to_string),
            rule: rule.clone(),
            verdict,
        }
    }

    /// Returns true if the rule was violated
    pub fn is_violated(&self) -> bool {
        self.verdict.is_violated()
    }
}
