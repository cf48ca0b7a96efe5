use serde::Serialize;

/// Structured trace events emitted across all ProjectLens crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    TreeWalked {
        root: String,
        files_included: usize,
        files_analyzable: usize,
        files_skipped_binary: usize,
        entries_skipped_filtered: usize,
        errors: usize,
        duration_ms: u64,
    },
    TraversalEntryFailed {
        path: String,
        kind: String,
        message: String,
    },
    ContextBuilt {
        mode: String,
        prompt_chars: usize,
        files_included: usize,
        files_truncated: usize,
        files_placeholder: usize,
        files_excluded: usize,
    },
    ProjectLoaded {
        project_id: String,
        files: usize,
    },
    LlmRequest {
        provider: String,
        model: String,
        duration_ms: u64,
        prompt_tokens: Option<u32>,
        completion_tokens: Option<u32>,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "pl_event");
    }
}
