use std::path::Path;

/// Result of trying to read one file as text.
#[derive(Debug)]
pub enum LoadOutcome {
    Text(String),
    /// Read succeeded but the bytes are not valid UTF-8.
    NotText,
    /// Open or read failed (permissions, file vanished, I/O error).
    Failed(std::io::Error),
}

impl LoadOutcome {
    pub fn into_text(self) -> Option<String> {
        match self {
            LoadOutcome::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Read the whole file and decode it as UTF-8.
///
/// Never returns an error: failures are reported through [`LoadOutcome`] so
/// the walker can emit a contentless record and keep going.
pub async fn load_text(path: &Path) -> LoadOutcome {
    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) => return LoadOutcome::Failed(e),
    };
    match String::from_utf8(bytes) {
        Ok(text) => LoadOutcome::Text(text),
        Err(_) => LoadOutcome::NotText,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn utf8_file_loads_in_full() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "héllo\nwörld").unwrap();

        let text = load_text(&path).await.into_text();
        assert_eq!(text.as_deref(), Some("héllo\nwörld"));
    }

    #[tokio::test]
    async fn binary_file_is_not_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0x89, b'P', b'N', b'G', 0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(load_text(&path).await, LoadOutcome::NotText));
    }

    #[tokio::test]
    async fn missing_file_fails_without_panicking() {
        let dir = TempDir::new().unwrap();
        let outcome = load_text(&dir.path().join("gone.txt")).await;
        match outcome {
            LoadOutcome::Failed(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_file_is_empty_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();
        assert_eq!(load_text(&path).await.into_text().as_deref(), Some(""));
    }
}
