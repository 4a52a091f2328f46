//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One line per finding with a check or cross mark
//! - Versions, rules and available updates in verbose mode
//! - Semantic version drift of available updates (major/minor/patch)
//! - A final overall line

use crate::domain::{Finding, RunResult, SourceReport};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use semver::Version;
use std::io::Write;

const CHECK: &str = "✅";
const CROSS: &str = "❎";

/// How far the resolved version trails the newest one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drift {
    /// Major version behind
    Major,
    /// Minor version behind
    Minor,
    /// Patch version behind
    Patch,
    /// Only pre-release or build metadata differ
    Prerelease,
    /// Either version is not semver
    Unknown,
}

impl Drift {
    /// Determine the drift between the current and newest versions
    pub fn between(current: &str, newest: &str) -> Self {
        let parse = |v: &str| Version::parse(v.strip_prefix('v').unwrap_or(v)).ok();

        match (parse(current), parse(newest)) {
            (Some(current), Some(newest)) => {
                if current.major != newest.major {
                    Drift::Major
                } else if current.minor != newest.minor {
                    Drift::Minor
                } else if current.patch != newest.patch {
                    Drift::Patch
                } else {
                    Drift::Prerelease
                }
            }
            _ => Drift::Unknown,
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            Drift::Major => "major",
            Drift::Minor => "minor",
            Drift::Patch => "patch",
            Drift::Prerelease => "pre-release",
            Drift::Unknown => "?",
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            Drift::Major => self.label().red().bold().to_string(),
            Drift::Minor => self.label().yellow().to_string(),
            Drift::Patch => self.label().green().to_string(),
            Drift::Prerelease | Drift::Unknown => self.label().dimmed().to_string(),
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn mark(&self, ok: bool) -> String {
        match (ok, self.color) {
            (true, true) => CHECK.green().to_string(),
            (false, true) => CROSS.red().to_string(),
            (true, false) => CHECK.to_string(),
            (false, false) => CROSS.to_string(),
        }
    }

    fn format_finding(&self, finding: &Finding, writer: &mut dyn Write) -> std::io::Result<()> {
        // Pads "banned:" to the width of "required:"
        let label = format!("{}:", finding.kind.label());
        let mark = self.mark(!finding.is_violated());

        if self.verbosity != Verbosity::Verbose {
            return writeln!(writer, "{:<9} {} {}", label, finding.module, mark);
        }

        let update = match &finding.update {
            Some(newest) => {
                let drift = Drift::between(&finding.version, newest);
                let drift_label = if self.color {
                    drift.colored_label()
                } else {
                    drift.label().to_string()
                };
                format!(" (update: {} [{}])", newest, drift_label)
            }
            None => String::new(),
        };
        let rule = if self.color {
            format!("[rule: {}]", finding.rule).dimmed().to_string()
        } else {
            format!("[rule: {}]", finding.rule)
        };

        writeln!(
            writer,
            "{:<9} {} {}{} {} {}",
            label, finding.module, finding.version, update, rule, mark
        )
    }

    fn format_report(&self, report: &SourceReport, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "checking requirements: {}", report.location)?;
        if self.verbosity == Verbosity::Verbose && report.findings.is_empty() {
            writeln!(writer, "  no listed modules are in use")?;
        }
        for finding in &report.findings {
            self.format_finding(finding, writer)?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &RunResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Quiet {
            for report in &result.reports {
                self.format_report(report, writer)?;
            }
        }

        writeln!(writer, "{:<9} {}", "all:", self.mark(result.is_compliant()))?;

        if self.verbosity == Verbosity::Verbose {
            writeln!(
                writer,
                "{} findings, {} violations, exit code {}",
                result.finding_count(),
                result.violation_count(),
                result.exit_code()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModuleRecord, RuleKind, Verdict, VersionRule, ViolationFlags};

    fn sample_result() -> RunResult {
        let errors = ModuleRecord::new("github.com/pkg/errors", "v0.9.1");
        let text = ModuleRecord::new("golang.org/x/text", "v0.3.0").with_update("v0.14.0");
        let findings = vec![
            Finding::new(RuleKind::Required, &errors, &VersionRule::Latest, Verdict::Met),
            Finding::new(
                RuleKind::Required,
                &text,
                &VersionRule::Latest,
                Verdict::Violated,
            ),
            Finding::new(
                RuleKind::Banned,
                &errors,
                &VersionRule::parse(r"^v1\."),
                Verdict::Met,
            ),
        ];
        RunResult::new(
            vec![SourceReport::new("file:///src/app/.gomodreq.yml", findings)],
            ViolationFlags {
                required: true,
                banned: false,
            },
        )
    }

    fn render(verbosity: Verbosity) -> String {
        let formatter = TextFormatter::with_color(verbosity, false);
        let mut out = Vec::new();
        formatter.format(&sample_result(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_drift() {
        assert_eq!(Drift::between("v1.2.3", "v2.0.0"), Drift::Major);
        assert_eq!(Drift::between("v0.3.0", "v0.14.0"), Drift::Minor);
        assert_eq!(Drift::between("v1.2.3", "v1.2.4"), Drift::Patch);
        assert_eq!(Drift::between("v1.2.3-rc.1", "v1.2.3"), Drift::Prerelease);
        assert_eq!(Drift::between("v1.2", "v1.3"), Drift::Unknown);
        assert_eq!(
            Drift::between("v0.0.0-20210101000000-abcdef123456", "v0.1.0"),
            Drift::Minor
        );
    }

    #[test]
    fn test_normal_output() {
        let output = render(Verbosity::Normal);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "checking requirements: file:///src/app/.gomodreq.yml",
                "required: github.com/pkg/errors ✅",
                "required: golang.org/x/text ❎",
                "banned:   github.com/pkg/errors ✅",
                "all:      ❎",
            ]
        );
    }

    #[test]
    fn test_quiet_output() {
        assert_eq!(render(Verbosity::Quiet), "all:      ❎\n");
    }

    #[test]
    fn test_verbose_output() {
        let output = render(Verbosity::Verbose);
        assert!(output.contains(
            "required: golang.org/x/text v0.3.0 (update: v0.14.0 [minor]) [rule: latest] ❎"
        ));
        assert!(output.contains("banned:   github.com/pkg/errors v0.9.1 [rule: ^v1\\.] ✅"));
        assert!(output.contains("3 findings, 1 violations, exit code 1"));
    }

    #[test]
    fn test_verbose_empty_report() {
        let result = RunResult::new(
            vec![SourceReport::new("file:///a.yml", Vec::new())],
            ViolationFlags::new(),
        );
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let mut out = Vec::new();
        formatter.format(&result, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("no listed modules are in use"));
        assert!(output.contains("all:      ✅"));
    }
}
