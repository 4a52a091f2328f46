//! Check orchestrator coordinating the whole run
//!
//! This module provides:
//! - Workflow coordination: resolve locations → inventory → fetch → parse → evaluate
//! - Sequential processing of requirement sources in input order
//! - Explicit accumulation of violation flags across sources
//! - Abort on the first transport, parse, rule or inventory error

use crate::check::evaluate;
use crate::config::CheckConfig;
use crate::domain::{ModuleRecord, RequirementSpec, RunResult, SourceReport, ViolationFlags};
use crate::error::AppError;
use crate::inventory::ModuleInventory;
use crate::progress::Progress;
use crate::requirements::load_spec;
use crate::source::{parse_location, Source};
use tracing::{debug, info};

/// Orchestrator for the check workflow
pub struct Orchestrator {
    /// Run configuration
    config: CheckConfig,
    /// Module inventory provider
    inventory: Box<dyn ModuleInventory>,
}

impl Orchestrator {
    /// Create a new orchestrator using the configured inventory
    pub fn new(config: CheckConfig) -> Self {
        let inventory = config.inventory.build();
        Self { config, inventory }
    }

    /// Create an orchestrator with a custom inventory (for testing)
    pub fn with_inventory(config: CheckConfig, inventory: Box<dyn ModuleInventory>) -> Self {
        Self { config, inventory }
    }

    /// Run the check workflow
    pub async fn run(&self) -> Result<RunResult, AppError> {
        self.run_with_progress(self.config.output.show_progress()).await
    }

    /// Run the check workflow with optional progress display
    pub async fn run_with_progress(&self, show_progress: bool) -> Result<RunResult, AppError> {
        let mut progress = Progress::new(show_progress);

        // Step 1: Resolve every location before any I/O
        let sources = self.resolve_sources()?;

        // Step 2: Resolve the module inventory once
        progress.spinner(&format!("Resolving modules ({})...", self.inventory.describe()));
        let modules = self.inventory.modules().await?;
        progress.finish_and_clear();
        debug!(count = modules.len(), "resolved modules");

        // Step 3: Fetch, parse and evaluate each source in order
        let mut flags = ViolationFlags::new();
        let mut reports = Vec::with_capacity(sources.len());

        for (location, source) in sources {
            info!(location = %location, "checking requirements");

            progress.spinner(&format!("Fetching {}...", location));
            let spec = self.load(&location, &source).await;
            progress.finish_and_clear();
            let spec = spec?;

            let (report, updated) = check_source(&location, &spec, &modules, flags)?;
            flags = updated;
            reports.push(report);
        }

        Ok(RunResult::new(reports, flags))
    }

    /// Parses and dispatches every configured location
    fn resolve_sources(&self) -> Result<Vec<(String, Source)>, AppError> {
        self.config
            .locations
            .iter()
            .map(|location| {
                let uri = parse_location(location, &self.config.base_dir)?;
                let source = Source::resolve(uri, &self.config.source_options)?;
                Ok((location.clone(), source))
            })
            .collect()
    }

    /// Fetches and decodes one requirements source
    async fn load(&self, location: &str, source: &Source) -> Result<RequirementSpec, AppError> {
        let data = source.fetch().await?;
        debug!(location, uri = %source.uri(), bytes = data.len(), "fetched requirements");
        let spec = load_spec(&data, location)?;
        if spec.is_empty() {
            debug!(location, "requirements document lists no rules");
        }
        Ok(spec)
    }
}

/// Evaluates one source and returns its report with the updated flags
pub fn check_source(
    location: &str,
    spec: &RequirementSpec,
    modules: &[ModuleRecord],
    flags: ViolationFlags,
) -> Result<(SourceReport, ViolationFlags), AppError> {
    let evaluation = evaluate(spec, modules, flags)?;
    Ok((
        SourceReport::new(location, evaluation.findings),
        evaluation.flags,
    ))
}
