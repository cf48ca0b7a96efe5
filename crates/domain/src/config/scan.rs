use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tree scanning filters
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Directory names and file extensions excluded during traversal.
///
/// Directory names match a single path segment exactly (case-sensitive).
/// Extensions are compared lower-cased with a leading dot; entries written
/// as `"PNG"` or `".Png"` are normalized when the filter policy is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "d_skip_dirs")]
    pub skip_dirs: Vec<String>,
    #[serde(default = "d_skip_extensions")]
    pub skip_extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            skip_dirs: d_skip_dirs(),
            skip_extensions: d_skip_extensions(),
        }
    }
}

pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".next",
    "dist",
    "build",
    ".cache",
    "coverage",
    "__pycache__",
    ".venv",
    "venv",
    ".idea",
    ".vscode",
];

pub const DEFAULT_SKIP_EXTENSIONS: &[&str] = &[
    // images
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".ico", ".svg",
    // video
    ".mp4", ".avi", ".mov", ".wmv", ".flv",
    // audio
    ".mp3", ".wav", ".ogg", ".flac",
    // archives
    ".zip", ".tar", ".gz", ".rar", ".7z",
    // native binaries
    ".exe", ".dll", ".so", ".dylib",
    // office documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx",
];

fn d_skip_dirs() -> Vec<String> {
    DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect()
}
fn d_skip_extensions() -> Vec<String> {
    DEFAULT_SKIP_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}
