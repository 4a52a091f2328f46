//! Verdicts for a single rule applied to a single module
//!
//! The `latest` sentinel reads differently in each section: a required
//! `latest` is met when no update exists, while a banned `latest` is
//! violated when no update exists.

use crate::domain::{ModuleRecord, Verdict, VersionRule};
use crate::error::RuleError;
use regex::Regex;

/// Compiles a rule pattern
pub fn compile_pattern(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|e| RuleError::invalid_pattern(pattern, e.to_string()))
}

/// Verdict of a required rule
pub fn required_verdict(rule: &VersionRule, module: &ModuleRecord) -> Result<Verdict, RuleError> {
    let met = match rule {
        VersionRule::Latest => module.is_latest(),
        VersionRule::Pattern(pattern) => compile_pattern(pattern)?.is_match(&module.version),
    };
    Ok(Verdict::from_met(met))
}

/// Verdict of a banned rule
pub fn banned_verdict(rule: &VersionRule, module: &ModuleRecord) -> Result<Verdict, RuleError> {
    let banned = match rule {
        VersionRule::Latest => module.is_latest(),
        VersionRule::Pattern(pattern) => compile_pattern(pattern)?.is_match(&module.version),
    };
    Ok(Verdict::from_met(!banned))
}
