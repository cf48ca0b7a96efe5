//! One-shot analysis commands (`analyze`, `query`, `file`, `project ...`).
//!
//! Runs the same pipeline as the HTTP server for a single request, prints
//! the model's answer to stdout and exits. With `--dry-run` the provider is
//! never built; the assembled prompt is printed instead.

use std::sync::Arc;

use anyhow::Context;

use pl_domain::config::Config;

use crate::bootstrap;
use crate::cli::OutputArgs;
use crate::service::{AnalysisOutcome, AnalysisService, ContextPipeline, PreparedPrompt};

/// What a one-shot command targets.
#[derive(Debug, Clone)]
pub enum Target {
    Directory { path: String },
    DirectoryQuery { path: String, question: String },
    File { path: String },
    Project { id: String },
    ProjectQuery { id: String, question: String },
    ProjectFile { id: String, path: String },
}

impl Target {
    fn describe(&self) -> String {
        match self {
            Target::Directory { path } => format!("analyzing directory {path}"),
            Target::DirectoryQuery { path, .. } => format!("querying directory {path}"),
            Target::File { path } => format!("analyzing file {path}"),
            Target::Project { id } => format!("analyzing project {id}"),
            Target::ProjectQuery { id, .. } => format!("querying project {id}"),
            Target::ProjectFile { id, path } => format!("analyzing {path} in project {id}"),
        }
    }
}

/// Execute one request and print the result.
pub async fn run(config: Arc<Config>, target: Target, output: OutputArgs) -> anyhow::Result<()> {
    let what = target.describe();

    if output.dry_run {
        let pipeline = bootstrap::build_pipeline(&config)?;
        let prepared = prepare(&pipeline, &target).await.context(what)?;
        return print_prepared(&prepared, output.json);
    }

    let state = bootstrap::build_app_state(config)?;
    let outcome = execute(&state.service, &target, output.model)
        .await
        .context(what)?;
    print_outcome(&outcome, output.json)
}

async fn prepare(pipeline: &ContextPipeline, target: &Target) -> pl_domain::Result<PreparedPrompt> {
    match target {
        Target::Directory { path } => pipeline.prepare_directory_summary(path).await,
        Target::DirectoryQuery { path, question } => {
            pipeline.prepare_directory_query(path, question).await
        }
        Target::File { path } => pipeline.prepare_file(path).await,
        Target::Project { id } => pipeline.prepare_project_summary(id).await,
        Target::ProjectQuery { id, question } => pipeline.prepare_project_query(id, question).await,
        Target::ProjectFile { id, path } => pipeline.prepare_project_file(id, path).await,
    }
}

async fn execute(
    service: &AnalysisService,
    target: &Target,
    model: Option<String>,
) -> pl_domain::Result<AnalysisOutcome> {
    match target {
        Target::Directory { path } => service.analyze_directory(path, model).await,
        Target::DirectoryQuery { path, question } => {
            service.query_directory(path, question, model).await
        }
        Target::File { path } => service.analyze_file(path, model).await,
        Target::Project { id } => service.analyze_project(id, model).await,
        Target::ProjectQuery { id, question } => service.query_project(id, question, model).await,
        Target::ProjectFile { id, path } => service.analyze_project_file(id, path, model).await,
    }
}

fn print_prepared(prepared: &PreparedPrompt, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(prepared).context("serializing prompt")?;
        println!("{out}");
    } else {
        println!("{}", prepared.prompt);
        eprintln!(
            "[dry run] mode={} files_analyzed={} files_included={} prompt_chars={}",
            prepared.mode.as_str(),
            prepared.files_analyzed,
            prepared.files_included,
            prepared.context.prompt_chars,
        );
    }
    Ok(())
}

fn print_outcome(outcome: &AnalysisOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(outcome).context("serializing result")?;
        println!("{out}");
    } else {
        println!("{}", outcome.text);
        eprintln!(
            "[{}] files_analyzed={} files_included={}",
            outcome.model, outcome.files_analyzed, outcome.files_included
        );
    }
    Ok(())
}
