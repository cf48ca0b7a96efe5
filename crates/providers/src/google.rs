//! Google Gemini adapter.
//!
//! Implements the Gemini `generateContent` API for single-turn text prompts.
//! Auth is via an API key passed as a query parameter (`key={api_key}`).

use crate::traits::{GenerateRequest, GenerateResponse, LlmProvider, Usage};
use crate::util::{from_reqwest, redact_url_key, resolve_api_key};
use pl_domain::config::{AuthConfig, ProviderConfig};
use pl_domain::error::{Error, Result};
use serde_json::Value;
use std::time::Duration;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An LLM provider adapter for the Google Gemini API.
pub struct GoogleProvider {
    id: String,
    base_url: String,
    auth: AuthConfig,
    default_model: String,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
    client: reqwest::Client,
}

impl GoogleProvider {
    /// Create a new provider from the deserialized provider config.
    ///
    /// The API key is resolved per request, so a missing key surfaces as an
    /// auth error on the first call rather than at startup.
    pub fn from_config(cfg: &ProviderConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            id: cfg.id.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            auth: cfg.auth.clone(),
            default_model: cfg.default_model.clone(),
            temperature: cfg.temperature,
            max_output_tokens: cfg.max_output_tokens,
            client,
        })
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn generate_url(&self, model: &str, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, api_key
        )
    }

    fn resolve_model(&self, req: &GenerateRequest) -> String {
        req.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.default_model)
            .to_string()
    }

    fn build_body(&self, req: &GenerateRequest) -> Value {
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": req.prompt}],
            }],
        });

        let mut gen_config = serde_json::json!({});
        if let Some(temp) = req.temperature.or(self.temperature) {
            gen_config["temperature"] = serde_json::json!(temp);
        }
        if let Some(max) = req.max_output_tokens.or(self.max_output_tokens) {
            gen_config["maxOutputTokens"] = serde_json::json!(max);
        }
        if gen_config.as_object().is_some_and(|o| !o.is_empty()) {
            body["generationConfig"] = gen_config;
        }

        body
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Response deserialization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn parse_gemini_response(provider: &str, body: &Value, model: &str) -> Result<GenerateResponse> {
    let candidate = body
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .ok_or_else(|| Error::Provider {
            provider: provider.into(),
            message: blocked_reason(body)
                .map(|r| format!("prompt blocked: {r}"))
                .unwrap_or_else(|| "no candidates in response".into()),
        })?;

    let text: String = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|v| v.as_str()))
                .collect()
        })
        .unwrap_or_default();

    let finish_reason = candidate
        .get("finishReason")
        .and_then(|v| v.as_str())
        .map(|s| match s {
            "STOP" => "stop".to_string(),
            "MAX_TOKENS" => "length".to_string(),
            other => other.to_lowercase(),
        });

    let usage = body.get("usageMetadata").and_then(parse_gemini_usage);

    let model = body
        .get("modelVersion")
        .and_then(|v| v.as_str())
        .unwrap_or(model)
        .to_string();

    Ok(GenerateResponse {
        text,
        model,
        usage,
        finish_reason,
    })
}

fn parse_gemini_usage(v: &Value) -> Option<Usage> {
    let prompt = v.get("promptTokenCount")?.as_u64()? as u32;
    let completion = v
        .get("candidatesTokenCount")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;
    let total = v
        .get("totalTokenCount")
        .and_then(|v| v.as_u64())
        .unwrap_or((prompt + completion) as u64) as u32;
    Some(Usage {
        prompt_tokens: prompt,
        completion_tokens: completion,
        total_tokens: total,
    })
}

fn blocked_reason(body: &Value) -> Option<&str> {
    body.get("promptFeedback")?.get("blockReason")?.as_str()
}

/// Human-readable failure for a non-2xx reply: the API's `error.message`
/// when the body is the usual error envelope, otherwise the raw body.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string());

    if detail.is_empty() {
        format!(
            "HTTP {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("request failed")
        )
    } else {
        format!("HTTP {} - {}", status.as_u16(), detail)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
impl LlmProvider for GoogleProvider {
    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse> {
        let model = self.resolve_model(req);
        let api_key = resolve_api_key(&self.auth)?;
        let url = self.generate_url(&model, &api_key);
        let body = self.build_body(req);

        tracing::debug!(
            provider = %self.id,
            url = %redact_url_key(&url),
            prompt_chars = req.prompt.len(),
            "google generate request"
        );

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(Error::Provider {
                provider: self.id.clone(),
                message: error_message(status, &resp_text),
            });
        }

        let resp_json: Value = serde_json::from_str(&resp_text)?;
        parse_gemini_response(&self.id, &resp_json, &model)
    }

    fn provider_id(&self) -> &str {
        &self.id
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
