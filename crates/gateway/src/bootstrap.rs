//! AppState construction shared by `serve` and the one-shot CLI commands.

use std::sync::Arc;

use anyhow::Context;

use pl_domain::config::{Config, ConfigSeverity};
use pl_providers::build_provider;

use crate::project_store::{JsonProjectStore, ProjectStore};
use crate::service::{AnalysisService, ContextPipeline};
use crate::state::AppState;

/// Log every config issue and fail if any of them is an error.
pub fn check_config(config: &Config) -> anyhow::Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    let error_count = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    if error_count > 0 {
        anyhow::bail!("config validation failed with {error_count} error(s)");
    }
    Ok(())
}

/// Everything up to the prompt, without a provider. Used by `--dry-run`.
pub fn build_pipeline(config: &Config) -> anyhow::Result<ContextPipeline> {
    check_config(config)?;
    Ok(ContextPipeline::from_config(config, project_store(config)))
}

/// Validate config, build the provider handle and return a fully-wired
/// [`AppState`].
pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    check_config(&config)?;

    // ── Project store ────────────────────────────────────────────────
    let store = project_store(&config);
    tracing::info!(path = %config.projects.path.display(), "project store ready");

    // ── LLM provider ─────────────────────────────────────────────────
    let provider = build_provider(&config.llm).context("initializing LLM provider")?;

    let pipeline = ContextPipeline::from_config(&config, store);
    tracing::info!(
        skip_dirs = config.scan.skip_dirs.len(),
        skip_extensions = config.scan.skip_extensions.len(),
        "context pipeline ready"
    );

    Ok(AppState {
        config,
        service: Arc::new(AnalysisService::new(pipeline, provider)),
    })
}

fn project_store(config: &Config) -> Arc<dyn ProjectStore> {
    Arc::new(JsonProjectStore::new(config.projects.path.clone()))
}
