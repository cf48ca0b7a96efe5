use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LLM provider
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// HTTP timeout for a single generation call.
    #[serde(default = "d_120000u")]
    pub default_timeout_ms: u64,
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: 120_000,
            provider: ProviderConfig::default(),
        }
    }
}

/// The generative-text provider used for every request.
///
/// Only the Gemini `generateContent` API is wired up; `id` is what shows up
/// in logs and provider error messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "d_provider_id")]
    pub id: String,
    #[serde(default = "d_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Used when a request does not name a model.
    #[serde(default = "d_model")]
    pub default_model: String,
    #[serde(default = "d_temperature")]
    pub temperature: Option<f32>,
    #[serde(default = "d_max_output_tokens")]
    pub max_output_tokens: Option<u32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            id: d_provider_id(),
            base_url: d_base_url(),
            auth: AuthConfig::default(),
            default_model: d_model(),
            temperature: d_temperature(),
            max_output_tokens: d_max_output_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Env var containing the key.
    #[serde(default = "d_key_env")]
    pub env: Option<String>,
    /// Direct key (for config-only setups; prefer env).
    #[serde(default)]
    pub key: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            env: d_key_env(),
            key: None,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_120000u() -> u64 {
    120_000
}
fn d_provider_id() -> String {
    "google".into()
}
fn d_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn d_model() -> String {
    "gemini-2.5-flash".into()
}
fn d_temperature() -> Option<f32> {
    Some(0.7)
}
fn d_max_output_tokens() -> Option<u32> {
    Some(65_536)
}
fn d_key_env() -> Option<String> {
    Some("GEMINI_API_KEY".into())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
