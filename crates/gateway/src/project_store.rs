//! Read-only access to previously stored projects.
//!
//! Each project is one JSON document at `<projects.path>/<id>.json` holding
//! its metadata and file records (content already decoded at upload time).
//! Project-backed requests skip the tree walker and assemble straight from
//! these records.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pl_domain::error::{Error, Result};
use pl_domain::trace::TraceEvent;
use pl_domain::FileRecord;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Stored project
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProject {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

impl StoredProject {
    /// Files with decoded text content. Image records never count, even
    /// when a document carries content for them.
    pub fn analyzable_files(&self) -> Vec<FileRecord> {
        self.files
            .iter()
            .filter(|f| f.has_content() && !f.is_image())
            .cloned()
            .collect()
    }

    /// Drop any content stored against an image record.
    fn strip_image_content(&mut self) {
        for file in self.files.iter_mut().filter(|f| f.is_image()) {
            if file.content.take().is_some() {
                tracing::debug!(path = %file.relative_path, "ignoring stored content of image record");
            }
        }
    }

    pub fn find_file(&self, relative_path: &str) -> Option<&FileRecord> {
        let wanted = relative_path.trim_start_matches("./").replace('\\', "/");
        self.files.iter().find(|f| f.relative_path == wanted)
    }
}

/// Source of stored projects.
#[async_trait::async_trait]
pub trait ProjectStore: Send + Sync {
    /// `Ok(None)` when no project has this id.
    async fn load(&self, project_id: &str) -> Result<Option<StoredProject>>;
}

/// True when `id` is non-empty and only uses `[A-Za-z0-9_-]`.
pub fn is_valid_project_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// JSON directory store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One `<id>.json` file per project under a root directory.
pub struct JsonProjectStore {
    root: PathBuf,
}

impl JsonProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, project_id: &str) -> Result<PathBuf> {
        if !is_valid_project_id(project_id) {
            return Err(Error::InvalidInput(format!(
                "invalid project id {project_id:?}: use letters, digits, '-' or '_'"
            )));
        }
        Ok(self.root.join(format!("{project_id}.json")))
    }

    /// Write (or replace) a project document.
    pub async fn save(&self, project: &StoredProject) -> Result<()> {
        let path = self.document_path(&project.id)?;
        tokio::fs::create_dir_all(&self.root).await?;
        let json = serde_json::to_string_pretty(project)?;
        tokio::fs::write(&path, json).await?;
        tracing::debug!(project_id = %project.id, path = %path.display(), "project saved");
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProjectStore for JsonProjectStore {
    async fn load(&self, project_id: &str) -> Result<Option<StoredProject>> {
        let path = self.document_path(project_id)?;
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Io(e)),
        };

        let mut project: StoredProject = serde_json::from_str(&raw)?;
        if project.id.is_empty() {
            project.id = project_id.to_string();
        }
        project.strip_image_content();

        TraceEvent::ProjectLoaded {
            project_id: project.id.clone(),
            files: project.files.len(),
        }
        .emit();

        Ok(Some(project))
    }
}
