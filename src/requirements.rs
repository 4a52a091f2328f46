//! Requirements document loader
//!
//! Decodes the YAML requirements document:
//!
//! ```yaml
//! required:
//!   github.com/pkg/errors: "^v0\\.9\\."
//!   golang.org/x/text: latest
//! banned:
//!   github.com/gogo/protobuf:
//!     - "^v1\\.[0-2]\\."
//! ```
//!
//! Both sections are optional and unknown top-level keys are ignored.

use crate::domain::{RequirementSpec, VersionRule};
use crate::error::SpecError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw document shape; `null` sections decode as absent
#[derive(Debug, Default, Deserialize)]
struct RequirementsDocument {
    #[serde(default)]
    required: Option<BTreeMap<String, VersionRule>>,
    #[serde(default)]
    banned: Option<BTreeMap<String, Option<Vec<VersionRule>>>>,
}

impl From<RequirementsDocument> for RequirementSpec {
    fn from(doc: RequirementsDocument) -> Self {
        RequirementSpec {
            required: doc.required.unwrap_or_default(),
            banned: doc
                .banned
                .unwrap_or_default()
                .into_iter()
                .map(|(path, rules)| (path, rules.unwrap_or_default()))
                .collect(),
        }
    }
}

/// Decodes requirements bytes fetched from `location`
pub fn load_spec(data: &[u8], location: &str) -> Result<RequirementSpec, SpecError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| SpecError::parse(location, format!("invalid UTF-8: {}", e)))?;

    if text.trim().is_empty() {
        return Ok(RequirementSpec::new());
    }

    // Only the first document counts; later ones are ignored.
    let Some(document) = serde_yaml::Deserializer::from_str(text).next() else {
        return Ok(RequirementSpec::new());
    };
    let doc = Option::<RequirementsDocument>::deserialize(document)
        .map_err(|e| SpecError::parse(location, e.to_string()))?;

    Ok(doc.unwrap_or_default().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCATION: &str = "file:///project/.gomodreq.yml";

    #[test]
    fn test_load_full_document() {
        let yaml = r#"
required:
  github.com/pkg/errors: "^v0\\.9\\."
  golang.org/x/text: latest
banned:
  github.com/gogo/protobuf:
    - "^v1\\.[0-2]\\."
    - latest
"#;
        let spec = load_spec(yaml.as_bytes(), LOCATION).unwrap();
        assert_eq!(spec.required.len(), 2);
        assert_eq!(
            spec.required_rule("github.com/pkg/errors"),
            Some(&VersionRule::Pattern(r"^v0\.9\.".to_string()))
        );
        assert_eq!(
            spec.required_rule("golang.org/x/text"),
            Some(&VersionRule::Latest)
        );
        assert_eq!(
            spec.banned_rules("github.com/gogo/protobuf"),
            &[
                VersionRule::Pattern(r"^v1\.[0-2]\.".to_string()),
                VersionRule::Latest
            ]
        );
    }

    #[test]
    fn test_load_required_only() {
        let yaml = "required:\n  golang.org/x/net: latest\n";
        let spec = load_spec(yaml.as_bytes(), LOCATION).unwrap();
        assert_eq!(spec.required.len(), 1);
        assert!(spec.banned.is_empty());
    }

    #[test]
    fn test_load_empty_document() {
        assert!(load_spec(b"", LOCATION).unwrap().is_empty());
        assert!(load_spec(b"  \n\n", LOCATION).unwrap().is_empty());
    }

    #[test]
    fn test_load_null_sections() {
        let yaml = "required:\nbanned:\n  golang.org/x/net:\n";
        let spec = load_spec(yaml.as_bytes(), LOCATION).unwrap();
        assert!(spec.required.is_empty());
        assert!(spec.banned_rules("golang.org/x/net").is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let yaml = "version: 2\nowners: [platform]\nrequired:\n  golang.org/x/net: latest\n";
        let spec = load_spec(yaml.as_bytes(), LOCATION).unwrap();
        assert_eq!(spec.required.len(), 1);
    }

    #[test]
    fn test_malformed_document_reports_location() {
        let yaml = "required:\n  - not\n  - a\n  - mapping\n";
        let err = load_spec(yaml.as_bytes(), LOCATION).unwrap_err();
        let SpecError::Parse { location, .. } = err;
        assert_eq!(location, LOCATION);
    }

    #[test]
    fn test_banned_must_be_list() {
        let yaml = "banned:\n  golang.org/x/net: \"^v0\\\\.\"\n";
        assert!(load_spec(yaml.as_bytes(), LOCATION).is_err());
    }

    #[test]
    fn test_invalid_utf8() {
        let err = load_spec(&[0xff, 0xfe, 0x00], LOCATION).unwrap_err();
        assert!(err.to_string().contains("invalid UTF-8"));
    }

    #[test]
    fn test_trailing_document_separator() {
        let yaml = "required:\n  golang.org/x/net: latest\n---\n";
        let spec = load_spec(yaml.as_bytes(), LOCATION).unwrap();
        assert_eq!(spec.required.len(), 1);
    }

    #[test]
    fn test_later_documents_ignored() {
        let yaml = "required:\n  golang.org/x/net: latest\n---\nbanned:\n  golang.org/x/text: [latest]\n";
        let spec = load_spec(yaml.as_bytes(), LOCATION).unwrap();
        assert_eq!(spec.required.len(), 1);
        assert!(spec.banned.is_empty());
    }

    #[test]
    fn test_separator_only_document() {
        let spec = load_spec(b"---\n", LOCATION).unwrap();
        assert!(spec.is_empty());
    }
}
