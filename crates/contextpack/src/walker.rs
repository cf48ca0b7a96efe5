//! Recursive, filtered traversal of a directory tree.
//!
//! The walk is sequential and depth-first: one directory listing or file read
//! is in flight at a time. Entries within a directory are visited in name
//! order, so an unchanged tree yields the same records in the same order,
//! but callers should only rely on the *set* of relative paths.
//!
//! Failures below the root never abort the walk. An unreadable subdirectory
//! contributes zero entries and an entry in [`TraversalReport::errors`]; an
//! unreadable or binary file still yields a [`FileRecord`], just without
//! content.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use pl_domain::file::{declared_type_for, extension_of, is_image_type};
use pl_domain::trace::TraceEvent;
use pl_domain::FileRecord;

use crate::filter::FilterPolicy;
use crate::loader::{self, LoadOutcome};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Report types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalErrorKind {
    ListDirectory,
    Metadata,
    ReadFile,
}

/// A failure absorbed during traversal.
#[derive(Debug, Clone, Serialize)]
pub struct TraversalError {
    /// Root-relative path (`""` for the root itself).
    pub path: String,
    pub kind: TraversalErrorKind,
    pub message: String,
}

/// Everything one walk produced. Built per request and never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TraversalReport {
    pub root: PathBuf,
    /// Every file that passed filtering, in visit order.
    pub included: Vec<FileRecord>,
    /// Files that were read but are not valid UTF-8.
    pub skipped_binary: Vec<String>,
    /// Directories pruned and files dropped by the filter policy.
    pub skipped_filtered: Vec<String>,
    pub errors: Vec<TraversalError>,
}

/// Counts-only view of a [`TraversalReport`], for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraversalSummary {
    pub files_included: usize,
    pub files_analyzable: usize,
    pub skipped_binary: usize,
    pub skipped_filtered: usize,
    pub errors: usize,
}

impl TraversalReport {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ..Default::default()
        }
    }

    /// Files whose text content was loaded.
    pub fn analyzable_count(&self) -> usize {
        self.included.iter().filter(|f| f.has_content()).count()
    }

    pub fn relative_paths(&self) -> BTreeSet<String> {
        self.included.iter().map(|f| f.relative_path.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    pub fn summary(&self) -> TraversalSummary {
        TraversalSummary {
            files_included: self.included.len(),
            files_analyzable: self.analyzable_count(),
            skipped_binary: self.skipped_binary.len(),
            skipped_filtered: self.skipped_filtered.len(),
            errors: self.errors.len(),
        }
    }

    fn record_error(&mut self, path: String, kind: TraversalErrorKind, err: &std::io::Error) {
        tracing::warn!(path = %path, kind = ?kind, error = %err, "traversal entry failed, continuing");
        TraceEvent::TraversalEntryFailed {
            path: path.clone(),
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
        .emit();
        self.errors.push(TraversalError {
            path,
            kind,
            message: err.to_string(),
        });
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Walker
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
    /// Symlinks, sockets, devices: neither followed nor read.
    Other,
}

struct Entry {
    path: PathBuf,
    name: String,
    kind: EntryKind,
}

/// Filtered depth-first walker. Holds no per-walk state, so one instance can
/// serve any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct TreeWalker {
    policy: FilterPolicy,
    /// Directories whose listing fails as if permission were denied.
    #[cfg(test)]
    unlistable: Vec<PathBuf>,
}

impl TreeWalker {
    pub fn new(policy: FilterPolicy) -> Self {
        Self {
            policy,
            #[cfg(test)]
            unlistable: Vec::new(),
        }
    }

    pub fn policy(&self) -> &FilterPolicy {
        &self.policy
    }

    /// Walk `root` with no depth, count, or size limit.
    pub async fn walk(&self, root: &Path) -> TraversalReport {
        let started = Instant::now();
        let mut report = TraversalReport::new(root);

        // Each frame is the not-yet-visited remainder of one directory, so
        // pushing a subdirectory's entries descends before visiting siblings.
        let mut stack: Vec<std::vec::IntoIter<Entry>> = Vec::new();
        if let Some(entries) = self.list_dir(root, root, &mut report).await {
            stack.push(entries.into_iter());
        }

        while let Some(frame) = stack.last_mut() {
            let Some(entry) = frame.next() else {
                stack.pop();
                continue;
            };

            match entry.kind {
                EntryKind::Dir => {
                    if self.policy.is_skipped_directory(&entry.name) {
                        tracing::debug!(dir = %entry.path.display(), "pruned by filter");
                        report.skipped_filtered.push(relative(root, &entry.path));
                        continue;
                    }
                    if let Some(children) = self.list_dir(root, &entry.path, &mut report).await {
                        stack.push(children.into_iter());
                    }
                }
                EntryKind::File => self.visit_file(root, &entry, &mut report).await,
                EntryKind::Other => {
                    tracing::debug!(path = %entry.path.display(), "not a regular file or directory, ignored");
                }
            }
        }

        let summary = report.summary();
        TraceEvent::TreeWalked {
            root: root.display().to_string(),
            files_included: summary.files_included,
            files_analyzable: summary.files_analyzable,
            files_skipped_binary: summary.skipped_binary,
            entries_skipped_filtered: summary.skipped_filtered,
            errors: summary.errors,
            duration_ms: started.elapsed().as_millis() as u64,
        }
        .emit();

        report
    }

    async fn visit_file(&self, root: &Path, entry: &Entry, report: &mut TraversalReport) {
        if let Some(ext) = extension_of(&entry.name) {
            if self.policy.is_skipped_extension(&ext) {
                report.skipped_filtered.push(relative(root, &entry.path));
                return;
            }
        }

        let size_bytes = match tokio::fs::metadata(&entry.path).await {
            Ok(meta) => meta.len(),
            Err(e) => {
                report.record_error(relative(root, &entry.path), TraversalErrorKind::Metadata, &e);
                0
            }
        };

        let content = if is_image_type(declared_type_for(&entry.name)) {
            None
        } else {
            match loader::load_text(&entry.path).await {
                LoadOutcome::Text(text) => Some(text),
                LoadOutcome::NotText => {
                    report.skipped_binary.push(relative(root, &entry.path));
                    None
                }
                LoadOutcome::Failed(e) => {
                    report.record_error(relative(root, &entry.path), TraversalErrorKind::ReadFile, &e);
                    None
                }
            }
        };

        report
            .included
            .push(FileRecord::from_path(root, &entry.path, size_bytes, content));
    }

    /// List one directory, sorted by name. Returns `None` (and records the
    /// error) when the listing itself fails.
    async fn list_dir(
        &self,
        root: &Path,
        dir: &Path,
        report: &mut TraversalReport,
    ) -> Option<Vec<Entry>> {
        let mut read_dir = match self.open_dir(dir).await {
            Ok(rd) => rd,
            Err(e) => {
                report.record_error(relative(root, dir), TraversalErrorKind::ListDirectory, &e);
                return None;
            }
        };

        let mut entries = Vec::new();
        loop {
            let dir_entry = match read_dir.next_entry().await {
                Ok(Some(de)) => de,
                Ok(None) => break,
                Err(e) => {
                    report.record_error(relative(root, dir), TraversalErrorKind::ListDirectory, &e);
                    return None;
                }
            };
            let path = dir_entry.path();
            let kind = match dir_entry.file_type().await {
                Ok(ft) if ft.is_dir() => EntryKind::Dir,
                Ok(ft) if ft.is_file() => EntryKind::File,
                Ok(_) => EntryKind::Other,
                Err(e) => {
                    report.record_error(relative(root, &path), TraversalErrorKind::Metadata, &e);
                    continue;
                }
            };
            entries.push(Entry {
                name: dir_entry.file_name().to_string_lossy().into_owned(),
                path,
                kind,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Some(entries)
    }
}

impl TreeWalker {
    async fn open_dir(&self, dir: &Path) -> std::io::Result<tokio::fs::ReadDir> {
        #[cfg(test)]
        {
            if self.unlistable.iter().any(|p| p == dir) {
                return Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
            }
        }
        tokio::fs::read_dir(dir).await
    }
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
