//! Request pipeline: validate → walk or load → assemble → invoke.
//!
//! [`ContextPipeline`] does everything up to the final prompt and never
//! touches the provider, which is what `--dry-run` uses. [`AnalysisService`]
//! wraps it with the model invoker.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use pl_contextpack::{
    AssembledContext, AssemblyMode, ContextAssembler, ContextBudgets, ContextReport, FilterPolicy,
    TraversalSummary, TreeWalker,
};
use pl_domain::config::Config;
use pl_domain::error::{Error, Result};
use pl_domain::trace::TraceEvent;
use pl_domain::FileRecord;
use pl_providers::{GenerateRequest, LlmProvider};

use crate::project_store::{ProjectStore, StoredProject};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Outcome types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A prompt ready to send, plus the bookkeeping that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedPrompt {
    pub mode: AssemblyMode,
    pub prompt: String,
    /// Records with text content that were handed to the assembler.
    pub files_analyzed: usize,
    /// Records whose content actually reached the prompt.
    pub files_included: usize,
    /// Present for directory-backed requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traversal: Option<TraversalSummary>,
    pub context: ContextReport,
}

/// Result of one analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub files_analyzed: usize,
    pub files_included: usize,
    pub text: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traversal: Option<TraversalSummary>,
    pub context: ContextReport,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Context pipeline (no provider)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct ContextPipeline {
    walker: TreeWalker,
    assembler: ContextAssembler,
    store: Arc<dyn ProjectStore>,
}

impl ContextPipeline {
    pub fn new(policy: FilterPolicy, budgets: ContextBudgets, store: Arc<dyn ProjectStore>) -> Self {
        Self {
            walker: TreeWalker::new(policy),
            assembler: ContextAssembler::new(budgets),
            store,
        }
    }

    pub fn from_config(config: &Config, store: Arc<dyn ProjectStore>) -> Self {
        Self::new(
            FilterPolicy::from_config(&config.scan),
            ContextBudgets::from_config(&config.context),
            store,
        )
    }

    // ── Directory-backed ───────────────────────────────────────────

    pub async fn prepare_directory_summary(&self, directory_path: &str) -> Result<PreparedPrompt> {
        let root = require_field(directory_path, "directory path is required")?;
        ensure_directory(root).await?;

        let (records, summary) = self.walk_analyzable(root).await?;
        let ctx = self.assembler.project_summary(&records);
        Ok(prepared(AssemblyMode::ProjectSummary, ctx, summary.files_analyzable, Some(summary)))
    }

    pub async fn prepare_directory_query(
        &self,
        directory_path: &str,
        query: &str,
    ) -> Result<PreparedPrompt> {
        let root = require_field(directory_path, "directory path is required")?;
        let query = require_field(query, "query is required")?;
        ensure_directory(root).await?;

        let (records, summary) = self.walk_analyzable(root).await?;
        let project_name = project_name_for(Path::new(root)).await;
        let ctx = self.assembler.contextual_query(&records, query, &project_name);
        Ok(prepared(AssemblyMode::ContextualQuery, ctx, summary.files_analyzable, Some(summary)))
    }

    /// Analyze one file on disk, outside of any project or filter policy.
    pub async fn prepare_file(&self, file_path: &str) -> Result<PreparedPrompt> {
        let path = Path::new(require_field(file_path, "file path is required")?);
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|_| Error::NotFound(format!("file not found or not accessible: {}", path.display())))?;
        if meta.is_dir() {
            return Err(Error::InvalidInput(format!(
                "{} is a directory; use directory analysis instead",
                path.display()
            )));
        }

        let root = path.parent().unwrap_or_else(|| Path::new(""));
        let content = pl_contextpack::loader::load_text(path).await.into_text();
        let record = FileRecord::from_path(root, path, meta.len(), content);
        if !record.has_content() {
            return Err(Error::InvalidInput(
                "file content is not available or not text".into(),
            ));
        }

        let ctx = self.assembler.single_file(&record);
        Ok(prepared(AssemblyMode::SingleFile, ctx, 1, None))
    }

    // ── Project-backed ─────────────────────────────────────────────

    pub async fn prepare_project_summary(&self, project_id: &str) -> Result<PreparedPrompt> {
        let project = self.load_project(project_id).await?;
        if project.files.is_empty() {
            return Err(Error::EmptyResult("no files to analyze".into()));
        }
        let files = project.analyzable_files();
        if files.is_empty() {
            return Err(Error::EmptyResult("no analyzable text files found".into()));
        }

        let ctx = self.assembler.project_summary(&files);
        Ok(prepared(AssemblyMode::ProjectSummary, ctx, files.len(), None))
    }

    pub async fn prepare_project_query(&self, project_id: &str, query: &str) -> Result<PreparedPrompt> {
        let query = require_field(query, "query is required")?;
        let project = self.load_project(project_id).await?;
        if project.files.is_empty() {
            return Err(Error::EmptyResult("no files to analyze".into()));
        }

        let files = project.analyzable_files();
        let ctx = self.assembler.contextual_query(&files, query, &project.name);
        Ok(prepared(AssemblyMode::ContextualQuery, ctx, files.len(), None))
    }

    pub async fn prepare_project_file(
        &self,
        project_id: &str,
        relative_path: &str,
    ) -> Result<PreparedPrompt> {
        let relative_path = require_field(relative_path, "file path is required")?;
        let project = self.load_project(project_id).await?;
        let file = project
            .find_file(relative_path)
            .ok_or_else(|| Error::NotFound(format!("file not found: {relative_path}")))?;
        if !file.has_content() {
            return Err(Error::InvalidInput(
                "file content is not available or not text".into(),
            ));
        }

        let ctx = self.assembler.single_file(file);
        Ok(prepared(AssemblyMode::SingleFile, ctx, 1, None))
    }

    // ── Internal helpers ───────────────────────────────────────────

    /// Walk `root` and fail early when nothing is worth sending.
    async fn walk_analyzable(&self, root: &str) -> Result<(Vec<FileRecord>, TraversalSummary)> {
        let report = self.walker.walk(Path::new(root)).await;
        let summary = report.summary();
        if report.is_empty() || summary.files_analyzable == 0 {
            return Err(Error::EmptyResult(
                "no analyzable files found in directory".into(),
            ));
        }
        Ok((report.included, summary))
    }

    async fn load_project(&self, project_id: &str) -> Result<StoredProject> {
        let project_id = require_field(project_id, "project id is required")?;
        self.store
            .load(project_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("project not found: {project_id}")))
    }
}

fn prepared(
    mode: AssemblyMode,
    ctx: AssembledContext,
    files_analyzed: usize,
    traversal: Option<TraversalSummary>,
) -> PreparedPrompt {
    PreparedPrompt {
        mode,
        prompt: ctx.prompt,
        files_analyzed,
        files_included: ctx.included_count,
        traversal,
        context: ctx.report,
    }
}

fn require_field<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(message.into()));
    }
    Ok(trimmed)
}

async fn ensure_directory(root: &str) -> Result<()> {
    let meta = tokio::fs::metadata(root)
        .await
        .map_err(|_| Error::NotFound(format!("directory not found or not accessible: {root}")))?;
    if !meta.is_dir() {
        return Err(Error::NotADirectory(format!("path is not a directory: {root}")));
    }
    Ok(())
}

/// Base name of the root, used to name the project in query prompts.
pub async fn project_name_for(root: &Path) -> String {
    if let Some(name) = root.file_name() {
        return name.to_string_lossy().into_owned();
    }
    // `.`, `..` and `/` have no file name of their own.
    match tokio::fs::canonicalize(root).await {
        Ok(resolved) => resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string()),
        Err(_) => root.display().to_string(),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Analysis service
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The full request pipeline, ending in exactly one provider call.
pub struct AnalysisService {
    pipeline: ContextPipeline,
    provider: Arc<dyn LlmProvider>,
}

impl AnalysisService {
    pub fn new(pipeline: ContextPipeline, provider: Arc<dyn LlmProvider>) -> Self {
        Self { pipeline, provider }
    }

    pub fn pipeline(&self) -> &ContextPipeline {
        &self.pipeline
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    pub async fn analyze_directory(
        &self,
        directory_path: &str,
        model: Option<String>,
    ) -> Result<AnalysisOutcome> {
        tracing::info!(directory = %directory_path, "directory analysis requested");
        let prepared = self.pipeline.prepare_directory_summary(directory_path).await?;
        self.invoke(prepared, model).await
    }

    pub async fn query_directory(
        &self,
        directory_path: &str,
        query: &str,
        model: Option<String>,
    ) -> Result<AnalysisOutcome> {
        tracing::info!(directory = %directory_path, "directory query requested");
        let prepared = self.pipeline.prepare_directory_query(directory_path, query).await?;
        self.invoke(prepared, model).await
    }

    pub async fn analyze_file(&self, file_path: &str, model: Option<String>) -> Result<AnalysisOutcome> {
        tracing::info!(file = %file_path, "file analysis requested");
        let prepared = self.pipeline.prepare_file(file_path).await?;
        self.invoke(prepared, model).await
    }

    pub async fn analyze_project(&self, project_id: &str, model: Option<String>) -> Result<AnalysisOutcome> {
        tracing::info!(project_id = %project_id, "project analysis requested");
        let prepared = self.pipeline.prepare_project_summary(project_id).await?;
        self.invoke(prepared, model).await
    }

    pub async fn query_project(
        &self,
        project_id: &str,
        query: &str,
        model: Option<String>,
    ) -> Result<AnalysisOutcome> {
        tracing::info!(project_id = %project_id, "project query requested");
        let prepared = self.pipeline.prepare_project_query(project_id, query).await?;
        self.invoke(prepared, model).await
    }

    pub async fn analyze_project_file(
        &self,
        project_id: &str,
        relative_path: &str,
        model: Option<String>,
    ) -> Result<AnalysisOutcome> {
        tracing::info!(project_id = %project_id, path = %relative_path, "stored file analysis requested");
        let prepared = self.pipeline.prepare_project_file(project_id, relative_path).await?;
        self.invoke(prepared, model).await
    }

    /// Send the prepared prompt. One call, no retry.
    async fn invoke(&self, prepared: PreparedPrompt, model: Option<String>) -> Result<AnalysisOutcome> {
        let model = model.filter(|m| !m.trim().is_empty());
        let requested = model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string());
        let req = GenerateRequest::new(prepared.prompt).with_model(model);

        let start = Instant::now();
        let resp = match self.provider.generate(&req).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(
                    provider = %self.provider.provider_id(),
                    model = %requested,
                    error = %e,
                    "model call failed"
                );
                return Err(e);
            }
        };

        TraceEvent::LlmRequest {
            provider: self.provider.provider_id().to_string(),
            model: resp.model.clone(),
            duration_ms: start.elapsed().as_millis() as u64,
            prompt_tokens: resp.usage.map(|u| u.prompt_tokens),
            completion_tokens: resp.usage.map(|u| u.completion_tokens),
        }
        .emit();

        tracing::info!(
            mode = prepared.mode.as_str(),
            files_analyzed = prepared.files_analyzed,
            files_included = prepared.files_included,
            "analysis complete"
        );

        Ok(AnalysisOutcome {
            files_analyzed: prepared.files_analyzed,
            files_included: prepared.files_included,
            text: resp.text,
            model: resp.model,
            traversal: prepared.traversal,
            context: prepared.context,
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_field_trims() {
        assert_eq!(require_field("  /tmp  ", "x").unwrap(), "/tmp");
        let err = require_field("   ", "query is required").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(ref m) if m == "query is required"));
    }

    #[tokio::test]
    async fn project_name_is_the_base_name() {
        assert_eq!(project_name_for(Path::new("/home/me/my-app")).await, "my-app");
        assert_eq!(project_name_for(Path::new("/home/me/my-app/")).await, "my-app");
    }

    #[tokio::test]
    async fn project_name_resolves_dot_components() {
        let dir = tempfile::TempDir::new().unwrap();
        let inner = dir.path().join("inner");
        std::fs::create_dir(&inner).unwrap();

        let name = project_name_for(&inner.join("..")).await;
        let expected = dir.path().file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(name, expected);
    }

    #[tokio::test]
    async fn ensure_directory_distinguishes_missing_and_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(ensure_directory(dir.path().to_str().unwrap()).await.is_ok());
        let err = ensure_directory(file.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
        let missing = dir.path().join("missing");
        let err = ensure_directory(missing.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
