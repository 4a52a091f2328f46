//! Module inventory resolution
//!
//! The inventory is the list of modules resolved for the project together
//! with the newest version known upstream. It comes from
//! `go list -m -u -json all`, from a file holding that output, or from
//! memory.

use crate::domain::ModuleRecord;
use crate::error::InventoryError;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// Go toolchain executable
const GO_PROGRAM: &str = "go";

/// Arguments passed to `go` to list modules with update information
const GO_LIST_ARGS: [&str; 5] = ["list", "-m", "-u", "-json", "all"];

/// Trait for module inventory providers
#[async_trait]
pub trait ModuleInventory: Send + Sync {
    /// Short description used in logs and progress messages
    fn describe(&self) -> String;

    /// Resolves the module list
    async fn modules(&self) -> Result<Vec<ModuleRecord>, InventoryError>;
}

/// Runs `go list` in a project directory
#[derive(Debug, Clone)]
pub struct GoListInventory {
    dir: PathBuf,
}

impl GoListInventory {
    /// Creates an inventory for the Go project in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn command_line(&self) -> String {
        format!("{} {}", GO_PROGRAM, GO_LIST_ARGS.join(" "))
    }
}

#[async_trait]
impl ModuleInventory for GoListInventory {
    fn describe(&self) -> String {
        format!("{} in {}", self.command_line(), self.dir.display())
    }

    async fn modules(&self) -> Result<Vec<ModuleRecord>, InventoryError> {
        debug!(dir = %self.dir.display(), "resolving modules with go list");
        let output = Command::new(GO_PROGRAM)
            .args(GO_LIST_ARGS)
            .current_dir(&self.dir)
            .output()
            .await
            .map_err(|e| InventoryError::Spawn {
                command: self.command_line(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(InventoryError::CommandFailed {
                command: self.command_line(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_modules(&output.stdout, &self.command_line())
    }
}

/// Reads modules from a file written by `go list -m -u -json all`
#[derive(Debug, Clone)]
pub struct FileInventory {
    path: PathBuf,
}

impl FileInventory {
    /// Creates an inventory backed by a JSON file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ModuleInventory for FileInventory {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn modules(&self) -> Result<Vec<ModuleRecord>, InventoryError> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| InventoryError::Read {
                path: self.path.clone(),
                source: e,
            })?;
        parse_modules(&data, &self.describe())
    }
}

/// In-memory inventory
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    modules: Vec<ModuleRecord>,
}

impl StaticInventory {
    /// Creates an inventory from a module list
    pub fn new(modules: Vec<ModuleRecord>) -> Self {
        Self { modules }
    }
}

#[async_trait]
impl ModuleInventory for StaticInventory {
    fn describe(&self) -> String {
        format!("{} static modules", self.modules.len())
    }

    async fn modules(&self) -> Result<Vec<ModuleRecord>, InventoryError> {
        Ok(self.modules.clone())
    }
}

/// Parses `go list -json` output
///
/// Accepts either a stream of concatenated JSON objects or a JSON array.
pub fn parse_modules(data: &[u8], origin: &str) -> Result<Vec<ModuleRecord>, InventoryError> {
    let trimmed = data.trim_ascii_start();
    if trimmed.first() == Some(&b'[') {
        return serde_json::from_slice(trimmed)
            .map_err(|e| InventoryError::decode(origin, e.to_string()));
    }

    serde_json::Deserializer::from_slice(data)
        .into_iter::<ModuleRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| InventoryError::decode(origin, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GO_LIST_OUTPUT: &str = r#"{
	"Path": "example.com/app",
	"Main": true,
	"Dir": "/src/app",
	"GoMod": "/src/app/go.mod",
	"GoVersion": "1.21"
}
{
	"Path": "github.com/pkg/errors",
	"Version": "v0.9.1",
	"Time": "2020-01-14T19:47:44Z",
	"Indirect": true
}
{
	"Path": "golang.org/x/text",
	"Version": "v0.3.0",
	"Time": "2017-12-14T13:08:43Z",
	"Update": {
		"Path": "golang.org/x/text",
		"Version": "v0.14.0",
		"Time": "2023-10-11T22:09:25Z"
	}
}
"#;

    #[test]
    fn test_parse_stream() {
        let modules = parse_modules(GO_LIST_OUTPUT.as_bytes(), "go list").unwrap();
        assert_eq!(modules.len(), 3);
        assert!(modules[0].main);
        assert_eq!(modules[1].path, "github.com/pkg/errors");
        assert!(modules[1].is_latest());
        assert_eq!(modules[2].update_available(), Some("v0.14.0"));
    }

    #[test]
    fn test_parse_array() {
        let json = r#"  [{"Path": "github.com/pkg/errors", "Version": "v0.9.1"}]"#;
        let modules = parse_modules(json.as_bytes(), "inventory.json").unwrap();
        assert_eq!(modules, vec![ModuleRecord::new("github.com/pkg/errors", "v0.9.1")]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_modules(b"", "go list").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse_modules(b"{\"Path\": ", "go list").unwrap_err();
        assert!(matches!(err, InventoryError::Decode { .. }));
        assert!(err.to_string().contains("go list"));
    }

    #[tokio::test]
    async fn test_file_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modules.json");
        std::fs::write(&path, GO_LIST_OUTPUT).unwrap();

        let inventory = FileInventory::new(&path);
        assert_eq!(inventory.describe(), path.display().to_string());
        let modules = inventory.modules().await.unwrap();
        assert_eq!(modules.len(), 3);
    }

    #[tokio::test]
    async fn test_file_inventory_missing() {
        let inventory = FileInventory::new("/nonexistent/modules.json");
        let err = inventory.modules().await.unwrap_err();
        assert!(matches!(err, InventoryError::Read { .. }));
    }

    #[tokio::test]
    async fn test_static_inventory() {
        let inventory = StaticInventory::new(vec![ModuleRecord::new("example.com/a", "v1.0.0")]);
        assert_eq!(inventory.describe(), "1 static modules");
        assert_eq!(inventory.modules().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_go_list_missing_dir() {
        let inventory = GoListInventory::new("/nonexistent/modreq-project");
        let err = inventory.modules().await.unwrap_err();
        assert!(matches!(err, InventoryError::Spawn { .. }));
    }

    #[test]
    fn test_go_list_describe() {
        let inventory = GoListInventory::new("/src/app");
        assert_eq!(inventory.describe(), "go list -m -u -json all in /src/app");
    }
}
