//! Run result types
//!
//! Exit codes are additive: `1` for a required violation, `2` for a banned
//! violation, `3` for both. Each flag is raised at most once per run.

use super::Finding;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exit code contributed by a required-rule violation
pub const REQUIRED_VIOLATION_CODE: i32 = 1;

/// Exit code contributed by a banned-rule violation
pub const BANNED_VIOLATION_CODE: i32 = 2;

/// Status of a run aborted by a transport, parse, rule or inventory error
pub const FATAL_EXIT_CODE: i32 = -1;

/// Sticky violation flags accumulated across all sources of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationFlags {
    /// Some required rule was violated
    pub required: bool,
    /// Some banned rule was violated
    pub banned: bool,
}

impl ViolationFlags {
    /// Creates cleared flags
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the policy exit code (0..=3)
    pub fn exit_code(&self) -> i32 {
        let mut code = 0;
        if self.required {
            code += REQUIRED_VIOLATION_CODE;
        }
        if self.banned {
            code += BANNED_VIOLATION_CODE;
        }
        code
    }

    /// Returns true if no flag is raised
    pub fn is_compliant(&self) -> bool {
        !self.required && !self.banned
    }
}

/// Findings for a single requirements source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    /// Location the requirements were fetched from
    pub location: String,
    /// Findings in report order
    pub findings: Vec<Finding>,
}

impl SourceReport {
    /// Creates a report for a location
    pub fn new(location: impl Into<String>, findings: Vec<Finding>) -> Self {
        Self {
            location: location.into(),
            findings,
        }
    }

    /// Returns the violated findings
    pub fn violations(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_violated())
    }

    /// Returns the number of violated findings
    pub fn violation_count(&self) -> usize {
        self.violations().count()
    }
}

/// Result of checking every requirements source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// When the check ran
    pub checked_at: DateTime<Utc>,
    /// Per-source reports in input order
    pub reports: Vec<SourceReport>,
    /// Accumulated violation flags
    pub flags: ViolationFlags,
}

impl RunResult {
    /// Creates a run result
    pub fn new(reports: Vec<SourceReport>, flags: ViolationFlags) -> Self {
        Self {
            checked_at: Utc::now(),
            reports,
            flags,
        }
    }

    /// Returns the process exit code for this run
    pub fn exit_code(&self) -> i32 {
        self.flags.exit_code()
    }

    /// Returns true if every source and module complied
    pub fn is_compliant(&self) -> bool {
        self.flags.is_compliant()
    }

    /// Returns the total number of findings across all sources
    pub fn finding_count(&self) -> usize {
        self.reports.iter().map(|r| r.findings.len()).sum()
    }

    /// Returns the total number of violations across all sources
    pub fn violation_count(&self) -> usize {
        self.reports.iter().map(SourceReport::violation_count).sum()
    }
}
