use std::sync::Arc;

use pl_domain::config::Config;

use crate::service::AnalysisService;

/// Shared application state passed to all API handlers.
///
/// Built once per process. Requests share no mutable state; each handler
/// drives its own walk, assembly and provider call.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: Arc<AnalysisService>,
}
