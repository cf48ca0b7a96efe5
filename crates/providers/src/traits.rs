use pl_domain::error::Result;
use serde::Serialize;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request / Response types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A single-prompt text generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// The fully assembled prompt, sent as one user turn.
    pub prompt: String,
    /// Model identifier override. When `None`, the provider uses its default.
    pub model: Option<String>,
    /// Sampling temperature. `None` lets the provider choose.
    pub temperature: Option<f32>,
    /// Maximum tokens in the response. `None` lets the provider choose.
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

/// Token accounting reported by the provider, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The raw text result of one generation call.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub text: String,
    /// The model that actually produced the response.
    pub model: String,
    pub usage: Option<Usage>,
    /// Normalized stop reason ("stop", "length", ...).
    pub finish_reason: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Core provider trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The model invoker boundary.
///
/// Implementations send exactly one request per call and never retry;
/// provider failures come back as [`pl_domain::Error::Provider`].
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the prompt and wait for the full response.
    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse>;

    /// A unique identifier for this provider instance.
    fn provider_id(&self) -> &str;

    /// Model used when a request carries no override.
    fn default_model(&self) -> &str;
}
