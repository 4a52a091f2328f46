//! Requirement specification types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Rule value that compares against update availability instead of a pattern
const LATEST: &str = "latest";

/// A single version rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VersionRule {
    /// The `latest` sentinel
    Latest,
    /// Regular expression matched against the resolved version
    Pattern(String),
}

impl VersionRule {
    /// Parses a rule string; anything other than `latest` is a pattern
    pub fn parse(rule: impl Into<String>) -> Self {
        let rule = rule.into();
        if rule == LATEST {
            VersionRule::Latest
        } else {
            VersionRule::Pattern(rule)
        }
    }

    /// Returns true for the `latest` sentinel
    pub fn is_latest(&self) -> bool {
        matches!(self, VersionRule::Latest)
    }

    /// Returns the rule as written in the requirements document
    pub fn as_str(&self) -> &str {
        match self {
            VersionRule::Latest => LATEST,
            VersionRule::Pattern(pattern) => pattern,
        }
    }
}

impl From<String> for VersionRule {
    fn from(rule: String) -> Self {
        VersionRule::parse(rule)
    }
}

impl From<&str> for VersionRule {
    fn from(rule: &str) -> Self {
        VersionRule::parse(rule)
    }
}

impl From<VersionRule> for String {
    fn from(rule: VersionRule) -> Self {
        match rule {
            VersionRule::Latest => LATEST.to_string(),
            VersionRule::Pattern(pattern) => pattern,
        }
    }
}

impl fmt::Display for VersionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Required and banned version rules for one requirements source
///
/// Modules absent from both maps are never evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequirementSpec {
    /// Module path to the rule its version must satisfy
    pub required: BTreeMap<String, VersionRule>,
    /// Module path to rules its version must not satisfy
    pub banned: BTreeMap<String, Vec<VersionRule>>,
}

impl RequirementSpec {
    /// Creates an empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required rule (builder pattern)
    pub fn with_required(mut self, path: impl Into<String>, rule: impl Into<VersionRule>) -> Self {
        self.required.insert(path.into(), rule.into());
        self
    }

    /// Appends a banned rule (builder pattern)
    pub fn with_banned(mut self, path: impl Into<String>, rule: impl Into<VersionRule>) -> Self {
        self.banned.entry(path.into()).or_default().push(rule.into());
        self
    }

    /// Returns the required rule for a module path
    pub fn required_rule(&self, path: &str) -> Option<&VersionRule> {
        self.required.get(path)
    }

    /// Returns the banned rules for a module path (empty if none)
    pub fn banned_rules(&self, path: &str) -> &[VersionRule] {
        self.banned.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns true if the spec carries no rules at all
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.banned.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_latest() {
        assert_eq!(VersionRule::parse("latest"), VersionRule::Latest);
        assert!(VersionRule::parse("latest").is_latest());
    }

    #[test]
    fn test_parse_pattern() {
        let rule = VersionRule::parse(r"^v1\.2\.");
        assert_eq!(rule, VersionRule::Pattern(r"^v1\.2\.".to_string()));
        assert!(!rule.is_latest());
    }

    #[test]
    fn test_latest_is_case_sensitive() {
        assert_eq!(
            VersionRule::parse("Latest"),
            VersionRule::Pattern("Latest".to_string())
        );
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(VersionRule::Latest.to_string(), "latest");
        assert_eq!(VersionRule::parse("^v0\\.").to_string(), "^v0\\.");
    }

    #[test]
    fn test_spec_builders() {
        let spec = RequirementSpec::new()
            .with_required("github.com/pkg/errors", "latest")
            .with_banned("github.com/gogo/protobuf", "^v1\\.0\\.")
            .with_banned("github.com/gogo/protobuf", "latest");

        assert_eq!(
            spec.required_rule("github.com/pkg/errors"),
            Some(&VersionRule::Latest)
        );
        assert_eq!(spec.banned_rules("github.com/gogo/protobuf").len(), 2);
        assert!(spec.banned_rules("github.com/unknown/mod").is_empty());
        assert!(spec.required_rule("github.com/unknown/mod").is_none());
    }

    #[test]
    fn test_spec_is_empty() {
        assert!(RequirementSpec::new().is_empty());
        assert!(!RequirementSpec::new()
            .with_required("golang.org/x/text", "latest")
            .is_empty());
    }

    #[test]
    fn test_rule_serializes_as_string() {
        let json = serde_json::to_string(&VersionRule::Latest).unwrap();
        assert_eq!(json, "\"latest\"");
        let parsed: VersionRule = serde_json::from_str("\"^v2\"").unwrap();
        assert_eq!(parsed, VersionRule::Pattern("^v2".to_string()));
    }
}
