use std::path::Path;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// File record
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One traversed or stored file, with optional loaded text content.
///
/// Records come from two places: the tree walker (live filesystem) and the
/// project store (previously persisted uploads). Both feed the same context
/// assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Base file name, e.g. `main.rs`.
    pub name: String,
    /// Path relative to the traversal root, always `/`-separated.
    pub relative_path: String,
    /// MIME-like classification, e.g. `text/plain` or `image/webp`.
    pub declared_type: String,
    pub size_bytes: u64,
    /// `None` when the file is binary, unreadable, an image, or not loaded.
    #[serde(default)]
    pub content: Option<String>,
}

impl FileRecord {
    /// Build a record for a file found under `root`, classifying it by
    /// extension. Image-family content is dropped to keep the record valid.
    pub fn from_path(root: &Path, path: &Path, size_bytes: u64, content: Option<String>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative_path = normalize_relative(root, path);
        let declared_type = declared_type_for(&name).to_string();
        let content = if is_image_type(&declared_type) {
            None
        } else {
            content
        };
        Self {
            name,
            relative_path,
            declared_type,
            size_bytes,
            content,
        }
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn is_image(&self) -> bool {
        is_image_type(&self.declared_type)
    }
}

/// True when `declared_type` belongs to the image family (`image/*`).
pub fn is_image_type(declared_type: &str) -> bool {
    declared_type.starts_with("image")
}

/// Lower-cased, dot-prefixed extension of a file name (`"Main.RS"` → `".rs"`).
///
/// Dotfiles without a further extension (`.env`) have no extension, matching
/// the usual path-extension semantics.
pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Classify a file name into a MIME-like type string.
pub fn declared_type_for(name: &str) -> &'static str {
    let Some(ext) = extension_of(name) else {
        return "text/plain";
    };
    match ext.as_str() {
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".bmp" => "image/bmp",
        ".ico" => "image/x-icon",
        ".svg" => "image/svg+xml",
        ".webp" => "image/webp",
        ".tif" | ".tiff" => "image/tiff",
        ".avif" => "image/avif",
        ".heic" => "image/heic",
        ".json" => "application/json",
        ".xml" => "application/xml",
        ".md" | ".markdown" => "text/markdown",
        ".html" | ".htm" => "text/html",
        ".css" => "text/css",
        ".js" | ".mjs" | ".cjs" => "text/javascript",
        _ => "text/plain",
    }
}

/// `root`-relative path with `/` separators regardless of platform.
fn normalize_relative(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extension_is_lowercased_and_dotted() {
        assert_eq!(extension_of("Photo.PNG").as_deref(), Some(".png"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some(".gz"));
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of(".env"), None);
    }

    #[test]
    fn declared_types() {
        assert_eq!(declared_type_for("a.webp"), "image/webp");
        assert_eq!(declared_type_for("README.md"), "text/markdown");
        assert_eq!(declared_type_for("lib.rs"), "text/plain");
        assert_eq!(declared_type_for("Dockerfile"), "text/plain");
    }

    #[test]
    fn from_path_normalizes_relative_path() {
        let root = PathBuf::from("/srv/project");
        let path = root.join("src").join("nested").join("mod.rs");
        let rec = FileRecord::from_path(&root, &path, 12, Some("fn x() {}".into()));
        assert_eq!(rec.name, "mod.rs");
        assert_eq!(rec.relative_path, "src/nested/mod.rs");
        assert_eq!(rec.declared_type, "text/plain");
        assert!(rec.has_content());
    }

    #[test]
    fn image_records_never_carry_content() {
        let root = PathBuf::from("/srv/project");
        let path = root.join("logo.webp");
        let rec = FileRecord::from_path(&root, &path, 4, Some("RIFF".into()));
        assert!(rec.is_image());
        assert!(rec.content.is_none());
    }

    #[test]
    fn deserializes_without_content_field() {
        let json = r#"{
            "name": "a.txt",
            "relative_path": "docs/a.txt",
            "declared_type": "text/plain",
            "size_bytes": 5
        }"#;
        let rec: FileRecord = serde_json::from_str(json).unwrap();
        assert!(rec.content.is_none());
        assert_eq!(rec.relative_path, "docs/a.txt");
    }
}
