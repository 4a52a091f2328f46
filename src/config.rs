//! Run configuration built from CLI arguments

use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::inventory::{FileInventory, GoListInventory, ModuleInventory};
use crate::output::OutputConfig;
use crate::source::{HostKeyPolicy, SourceOptions};
use std::path::{Path, PathBuf};
use url::Url;

/// Requirements file checked when no location is given
pub const DEFAULT_REQUIREMENTS_FILE: &str = ".gomodreq.yml";

/// Where the module inventory comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventorySource {
    /// Run `go list` in a project directory
    GoList(PathBuf),
    /// Read a saved `go list` dump
    File(PathBuf),
}

impl InventorySource {
    /// Builds the inventory provider
    pub fn build(&self) -> Box<dyn ModuleInventory> {
        match self {
            InventorySource::GoList(dir) => Box::new(GoListInventory::new(dir)),
            InventorySource::File(path) => Box::new(FileInventory::new(path)),
        }
    }
}

/// Everything a run needs
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Requirement locations in processing order
    pub locations: Vec<String>,
    /// Directory relative paths are resolved against
    pub base_dir: PathBuf,
    /// Module inventory provider
    pub inventory: InventorySource,
    /// Transport options
    pub source_options: SourceOptions,
    /// Output options
    pub output: OutputConfig,
}

impl CheckConfig {
    /// Creates a configuration from CLI arguments and the current directory
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::CurrentDir { source: e })?;
        Ok(Self::from_cli_in(args, &cwd))
    }

    /// Creates a configuration from CLI arguments with an explicit current directory
    pub fn from_cli_in(args: &CliArgs, cwd: &Path) -> Self {
        let locations = if args.locations.is_empty() {
            vec![default_location(cwd)]
        } else {
            args.locations.clone()
        };

        let inventory = match &args.inventory {
            Some(path) => InventorySource::File(cwd.join(path)),
            None => InventorySource::GoList(cwd.join(&args.dir)),
        };

        let host_key_policy = if args.strict_host_keys {
            HostKeyPolicy::KnownHosts
        } else {
            HostKeyPolicy::AcceptAny
        };

        Self {
            locations,
            base_dir: cwd.to_path_buf(),
            inventory,
            source_options: SourceOptions::default().with_host_key_policy(host_key_policy),
            output: OutputConfig::from_cli(args.json, args.verbose, args.quiet, !args.no_color),
        }
    }
}

/// Returns `file://<dir>/.gomodreq.yml`
pub fn default_location(dir: &Path) -> String {
    let path = dir.join(DEFAULT_REQUIREMENTS_FILE);
    Url::from_file_path(&path)
        .map(String::from)
        .unwrap_or_else(|()| format!("file://{}", path.display()))
}
