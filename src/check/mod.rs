//! Compliance evaluation of module versions against requirement rules
//!
//! This module provides:
//! - Version rule matching (`latest` sentinel and regular expressions)
//! - The evaluator that turns a spec and an inventory into findings
//! - Explicit accumulation of violation flags across sources

mod rule;

pub use rule::{banned_verdict, compile_pattern, required_verdict};

use crate::domain::{Finding, ModuleRecord, RequirementSpec, RuleKind, ViolationFlags};
use crate::error::RuleError;

/// Findings and flags after evaluating one requirements source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Required findings in inventory order, then banned findings
    pub findings: Vec<Finding>,
    /// Flags passed in, with any new violations raised
    pub flags: ViolationFlags,
}

/// Evaluates `spec` against `modules`, starting from the accumulated `flags`
///
/// Flags that are already raised stay raised. A pattern that fails to
/// compile aborts the evaluation.
pub fn evaluate(
    spec: &RequirementSpec,
    modules: &[ModuleRecord],
    flags: ViolationFlags,
) -> Result<Evaluation, RuleError> {
    let mut findings = Vec::new();
    let mut flags = flags;

    for module in modules {
        let Some(rule) = spec.required_rule(&module.path) else {
            continue;
        };
        let verdict = required_verdict(rule, module)?;
        if verdict.is_violated() {
            flags.required = true;
        }
        findings.push(Finding::new(RuleKind::Required, module, rule, verdict));
    }

    for module in modules {
        for rule in spec.banned_rules(&module.path) {
            let verdict = banned_verdict(rule, module)?;
            if verdict.is_violated() {
                flags.banned = true;
            }
            findings.push(Finding::new(RuleKind::Banned, module, rule, verdict));
        }
    }

    Ok(Evaluation { findings, flags })
}
