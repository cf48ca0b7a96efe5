#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use pl_domain::config::Config;
use pl_domain::error::{Error, Result};
use pl_domain::FileRecord;
use pl_gateway::project_store::{JsonProjectStore, StoredProject};
use pl_gateway::service::{AnalysisService, ContextPipeline};
use pl_gateway::state::AppState;
use pl_providers::{GenerateRequest, GenerateResponse, LlmProvider, Usage};

/// Fake provider that records every request and answers from a script.
pub struct RecordingProvider {
    calls: Mutex<Vec<GenerateRequest>>,
    fail_with: Option<String>,
}

impl RecordingProvider {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_with: None,
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<GenerateRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_prompt(&self) -> String {
        self.calls
            .lock()
            .last()
            .map(|r| r.prompt.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmProvider for RecordingProvider {
    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse> {
        self.calls.lock().push(req.clone());
        if let Some(ref message) = self.fail_with {
            return Err(Error::Provider {
                provider: "recording".into(),
                message: message.clone(),
            });
        }
        Ok(GenerateResponse {
            text: "stub answer".into(),
            model: req.model.clone().unwrap_or_else(|| "stub-model".into()),
            usage: Some(Usage {
                prompt_tokens: 1,
                completion_tokens: 1,
                total_tokens: 2,
            }),
            finish_reason: Some("stop".into()),
        })
    }

    fn provider_id(&self) -> &str {
        "recording"
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }
}

/// Service wired to the default config, a JSON store under `projects_dir`
/// and the given fake provider.
pub fn service(projects_dir: &Path, provider: Arc<RecordingProvider>) -> AnalysisService {
    let config = Config::default();
    let store = Arc::new(JsonProjectStore::new(projects_dir));
    AnalysisService::new(ContextPipeline::from_config(&config, store), provider)
}

pub fn app_state(projects_dir: &Path, provider: Arc<RecordingProvider>) -> AppState {
    AppState {
        config: Arc::new(Config::default()),
        service: Arc::new(service(projects_dir, provider)),
    }
}

pub fn write(root: &Path, rel: &str, contents: impl AsRef<[u8]>) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

pub fn text_record(rel: &str, content: &str) -> FileRecord {
    FileRecord {
        name: rel.rsplit('/').next().unwrap_or(rel).to_string(),
        relative_path: rel.to_string(),
        declared_type: "text/plain".into(),
        size_bytes: content.len() as u64,
        content: Some(content.to_string()),
    }
}

pub fn contentless_record(rel: &str, declared_type: &str) -> FileRecord {
    FileRecord {
        name: rel.rsplit('/').next().unwrap_or(rel).to_string(),
        relative_path: rel.to_string(),
        declared_type: declared_type.into(),
        size_bytes: 128,
        content: None,
    }
}

pub async fn save_project(projects_dir: &Path, id: &str, name: &str, files: Vec<FileRecord>) {
    JsonProjectStore::new(projects_dir)
        .save(&StoredProject {
            id: id.into(),
            name: name.into(),
            description: None,
            files,
        })
        .await
        .unwrap();
}
