//! Provider construction.
//!
//! Builds the single configured model invoker once at startup. The handle is
//! passed explicitly to whoever needs it; nothing is stored globally.

use crate::google::GoogleProvider;
use crate::traits::LlmProvider;
use pl_domain::config::LlmConfig;
use pl_domain::error::{Error, Result};
use std::sync::Arc;
use std::time::Duration;

/// Instantiate the provider described by `[llm.provider]`.
pub fn build_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
    let pc = &config.provider;
    if pc.base_url.trim().is_empty() {
        return Err(Error::Config("llm.provider.base_url must not be empty".into()));
    }

    let timeout = Duration::from_millis(config.default_timeout_ms.max(1));
    let provider = GoogleProvider::from_config(pc, timeout)?;

    tracing::info!(
        provider_id = %pc.id,
        default_model = %pc.default_model,
        timeout_ms = config.default_timeout_ms,
        "registered LLM provider"
    );

    Ok(Arc::new(provider))
}
