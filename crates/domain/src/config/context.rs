use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Context budget caps
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Per-mode character caps and size exclusions applied while assembling
/// prompts. Caps count characters, not model tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    #[serde(default = "d_90000")]
    pub single_file_max_chars: usize,
    #[serde(default = "d_20000")]
    pub project_summary_max_chars: usize,
    #[serde(default = "d_15000")]
    pub query_max_chars: usize,
    /// Files at or above this many bytes are left out of query prompts.
    #[serde(default = "d_500000")]
    pub query_exclude_bytes: Option<u64>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            single_file_max_chars: 90_000,
            project_summary_max_chars: 20_000,
            query_max_chars: 15_000,
            query_exclude_bytes: Some(500_000),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_90000() -> usize {
    90_000
}
fn d_20000() -> usize {
    20_000
}
fn d_15000() -> usize {
    15_000
}
fn d_500000() -> Option<u64> {
    Some(500_000)
}
