use std::collections::HashSet;

use pl_domain::config::ScanConfig;

/// Exact-match exclusion rules applied at every level of a traversal.
///
/// No globbing: a directory named `node_modules` is pruned wherever it
/// appears, `node_modules_old` is not.
#[derive(Debug, Clone, Default)]
pub struct FilterPolicy {
    skip_directory_names: HashSet<String>,
    /// Lower-cased, dot-prefixed.
    skip_extensions: HashSet<String>,
}

impl FilterPolicy {
    pub fn new<D, E>(skip_directory_names: D, skip_extensions: E) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            skip_directory_names: skip_directory_names.into_iter().map(Into::into).collect(),
            skip_extensions: skip_extensions
                .into_iter()
                .filter_map(|e| normalize_extension(e.as_ref()))
                .collect(),
        }
    }

    pub fn from_config(cfg: &ScanConfig) -> Self {
        Self::new(cfg.skip_dirs.iter().cloned(), cfg.skip_extensions.iter())
    }

    /// Exact, case-sensitive membership test on a single path segment.
    pub fn is_skipped_directory(&self, name: &str) -> bool {
        self.skip_directory_names.contains(name)
    }

    /// Membership test on a lower-cased extension including its dot.
    pub fn is_skipped_extension(&self, extension_lowercased: &str) -> bool {
        self.skip_extensions.contains(extension_lowercased)
    }
}

impl From<&ScanConfig> for FilterPolicy {
    fn from(cfg: &ScanConfig) -> Self {
        Self::from_config(cfg)
    }
}

/// `"PNG"`, `".Png"` and `" .png "` all become `".png"`; blanks are dropped.
fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_lowercase()))
}
