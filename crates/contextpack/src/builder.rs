use pl_domain::trace::TraceEvent;
use pl_domain::FileRecord;

use crate::budget::{AssemblyMode, ContextBudget, ContextBudgets};
use crate::injection;
use crate::report::{ContextReport, FileOutcome, FileReport};
use crate::truncation;

/// What to build a prompt for.
#[derive(Debug, Clone, Copy)]
pub enum AssemblyRequest<'a> {
    SingleFile {
        file: &'a FileRecord,
    },
    ProjectSummary {
        files: &'a [FileRecord],
    },
    ContextualQuery {
        files: &'a [FileRecord],
        query: &'a str,
        project_name: &'a str,
    },
}

impl AssemblyRequest<'_> {
    pub fn mode(&self) -> AssemblyMode {
        match self {
            AssemblyRequest::SingleFile { .. } => AssemblyMode::SingleFile,
            AssemblyRequest::ProjectSummary { .. } => AssemblyMode::ProjectSummary,
            AssemblyRequest::ContextualQuery { .. } => AssemblyMode::ContextualQuery,
        }
    }
}

/// A finished prompt, ready for the model invoker as-is.
#[derive(Debug, Clone)]
pub struct AssembledContext {
    pub prompt: String,
    /// Files whose content (possibly truncated) made it into the prompt.
    pub included_count: usize,
    pub report: ContextReport,
}

/// Per-file budget decision.
struct Fragment<'f> {
    outcome: FileOutcome,
    /// Present for `Included` / `Truncated`.
    content: Option<&'f str>,
}

/// Deterministic prompt builder.
///
/// Pure: takes already-loaded file records and returns the assembled prompt
/// plus a report. No I/O, no provider access.
#[derive(Debug, Clone, Default)]
pub struct ContextAssembler {
    budgets: ContextBudgets,
}

impl ContextAssembler {
    pub fn new(budgets: ContextBudgets) -> Self {
        Self { budgets }
    }

    pub fn budgets(&self) -> &ContextBudgets {
        &self.budgets
    }

    pub fn single_file(&self, file: &FileRecord) -> AssembledContext {
        self.assemble(AssemblyRequest::SingleFile { file })
    }

    pub fn project_summary(&self, files: &[FileRecord]) -> AssembledContext {
        self.assemble(AssemblyRequest::ProjectSummary { files })
    }

    pub fn contextual_query(
        &self,
        files: &[FileRecord],
        query: &str,
        project_name: &str,
    ) -> AssembledContext {
        self.assemble(AssemblyRequest::ContextualQuery {
            files,
            query,
            project_name,
        })
    }

    /// Build the prompt for `request`.
    ///
    /// Files are visited in the given order. Excluded files leave no trace in
    /// the prompt; files without content get a header and a placeholder but
    /// are not counted.
    pub fn assemble(&self, request: AssemblyRequest<'_>) -> AssembledContext {
        let mode = request.mode();
        let budget = self.budgets.for_mode(mode);
        let mut reports = Vec::new();
        let mut included_count = 0usize;

        let prompt = match request {
            AssemblyRequest::SingleFile { file } => {
                let fragment = apply_budget(&budget, file);
                included_count += usize::from(fragment.outcome.contributes_content());
                reports.push(file_report(file, &fragment));
                if fragment.outcome.is_excluded() {
                    String::new()
                } else {
                    injection::format_single_file_prompt(
                        &file.name,
                        &file.relative_path,
                        fragment.content.unwrap_or(injection::CONTENT_UNAVAILABLE),
                    )
                }
            }
            AssemblyRequest::ProjectSummary { files } => {
                let mut prompt = injection::format_summary_preamble();
                for file in files {
                    let fragment = apply_budget(&budget, file);
                    reports.push(file_report(file, &fragment));
                    match (fragment.outcome, fragment.content) {
                        (o, _) if o.is_excluded() => {}
                        (_, Some(content)) => {
                            prompt.push_str(&injection::format_summary_section(&file.name, content));
                            included_count += 1;
                        }
                        (_, None) => {
                            prompt.push_str(&injection::format_summary_placeholder(&file.name));
                        }
                    }
                }
                prompt
            }
            AssemblyRequest::ContextualQuery {
                files,
                query,
                project_name,
            } => {
                let mut prompt = injection::format_query_preamble(project_name, query);
                for file in files {
                    let fragment = apply_budget(&budget, file);
                    reports.push(file_report(file, &fragment));
                    match (fragment.outcome, fragment.content) {
                        (o, _) if o.is_excluded() => {}
                        (_, Some(content)) => {
                            prompt.push_str(&injection::format_query_section(
                                &file.name,
                                &file.relative_path,
                                content,
                            ));
                            included_count += 1;
                        }
                        (_, None) => {
                            prompt.push_str(&injection::format_query_placeholder(
                                &file.name,
                                &file.relative_path,
                            ));
                        }
                    }
                }
                prompt.push_str(&injection::format_query_instructions(included_count));
                prompt
            }
        };

        let report = ContextReport {
            mode,
            files: reports,
            included_count,
            prompt_chars: prompt.chars().count(),
        };

        TraceEvent::ContextBuilt {
            mode: mode.as_str().to_string(),
            prompt_chars: report.prompt_chars,
            files_included: included_count,
            files_truncated: report.count(FileOutcome::Truncated),
            files_placeholder: report.count(FileOutcome::Placeholder),
            files_excluded: report.excluded_count(),
        }
        .emit();

        AssembledContext {
            prompt,
            included_count,
            report,
        }
    }
}

/// Image check, then size threshold, then truncation.
fn apply_budget<'f>(budget: &ContextBudget, file: &'f FileRecord) -> Fragment<'f> {
    if budget.skip_image_types && file.is_image() {
        return Fragment {
            outcome: FileOutcome::ExcludedImage,
            content: None,
        };
    }
    if let Some(threshold) = budget.hard_exclusion_bytes {
        if file.size_bytes >= threshold {
            return Fragment {
                outcome: FileOutcome::ExcludedSize,
                content: None,
            };
        }
    }
    match file.content.as_deref() {
        Some(raw) => {
            let (kept, truncated) = truncation::truncate_chars(raw, budget.per_file_char_cap);
            Fragment {
                outcome: if truncated {
                    FileOutcome::Truncated
                } else {
                    FileOutcome::Included
                },
                content: Some(kept),
            }
        }
        None => Fragment {
            outcome: FileOutcome::Placeholder,
            content: None,
        },
    }
}

fn file_report(file: &FileRecord, fragment: &Fragment<'_>) -> FileReport {
    FileReport {
        relative_path: file.relative_path.clone(),
        size_bytes: file.size_bytes,
        raw_chars: file.content.as_deref().map(|c| c.chars().count()).unwrap_or(0),
        injected_chars: fragment.content.map(|c| c.chars().count()).unwrap_or(0),
        outcome: fragment.outcome,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
