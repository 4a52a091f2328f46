//! JSON output formatter for machine processing

use crate::domain::{Finding, RunResult, SourceReport};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// RFC 3339 timestamp of the run
    checked_at: String,
    /// Whether every source and module complied
    compliant: bool,
    /// Policy exit code (0..=3)
    exit_code: i32,
    /// Per-source results
    sources: Vec<JsonSource<'a>>,
}

/// JSON representation of one requirements source
#[derive(Serialize)]
struct JsonSource<'a> {
    location: &'a str,
    violations: usize,
    findings: &'a [Finding],
}

impl<'a> From<&'a SourceReport> for JsonSource<'a> {
    fn from(report: &'a SourceReport) -> Self {
        Self {
            location: &report.location,
            violations: report.violation_count(),
            findings: &report.findings,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &RunResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            checked_at: result.checked_at.to_rfc3339(),
            compliant: result.is_compliant(),
            exit_code: result.exit_code(),
            sources: result.reports.iter().map(JsonSource::from).collect(),
        };
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
