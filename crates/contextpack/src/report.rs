use serde::{Deserialize, Serialize};

use crate::budget::AssemblyMode;

/// What happened to one file during assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// Content emitted in full.
    Included,
    /// Content emitted, cut to the per-file cap.
    Truncated,
    /// Header emitted with a "content not available" marker.
    Placeholder,
    /// Dropped: image-family type in a mode that skips images.
    ExcludedImage,
    /// Dropped: at or above the mode's hard size threshold.
    ExcludedSize,
}

impl FileOutcome {
    /// Counted towards `included_count` (content actually reached the prompt).
    pub fn contributes_content(&self) -> bool {
        matches!(self, FileOutcome::Included | FileOutcome::Truncated)
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, FileOutcome::ExcludedImage | FileOutcome::ExcludedSize)
    }
}

/// Per-file entry within a context report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub relative_path: String,
    pub size_bytes: u64,
    pub raw_chars: usize,
    pub injected_chars: usize,
    pub outcome: FileOutcome,
}

/// Machine-readable account of one prompt assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextReport {
    pub mode: AssemblyMode,
    pub files: Vec<FileReport>,
    pub included_count: usize,
    pub prompt_chars: usize,
}

impl ContextReport {
    pub fn count(&self, outcome: FileOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }

    pub fn excluded_count(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_excluded()).count()
    }
}
