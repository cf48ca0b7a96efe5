use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Stored projects
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsConfig {
    /// Directory holding one `<project_id>.json` file per stored project.
    #[serde(default = "d_projects_path")]
    pub path: PathBuf,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            path: d_projects_path(),
        }
    }
}

fn d_projects_path() -> PathBuf {
    PathBuf::from("./data/projects")
}
