//! CLI argument parsing module for modreq

use clap::Parser;
use std::path::PathBuf;

/// Go module requirement checker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "modreq",
    version,
    about = "Check resolved Go modules against required and banned version rules"
)]
pub struct CliArgs {
    /// Requirement locations: file://, http(s)://, ssh:// URIs or paths
    /// (default: file://<cwd>/.gomodreq.yml)
    pub locations: Vec<String>,

    /// Go project directory used to resolve modules
    #[arg(short = 'C', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Read the module inventory from a `go list -m -u -json all` dump
    #[arg(long, value_name = "FILE")]
    pub inventory: Option<PathBuf>,

    /// Verify ssh host keys against ~/.ssh/known_hosts
    #[arg(long)]
    pub strict_host_keys: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable quiet mode - only the final result line
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
