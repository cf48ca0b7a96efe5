use serde::{Deserialize, Serialize};

use pl_domain::config::ContextConfig;

/// The three request shapes the assembler can build a prompt for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyMode {
    /// Analyze one file.
    SingleFile,
    /// Describe a whole project.
    ProjectSummary,
    /// Answer a question with project files as context.
    ContextualQuery,
}

impl AssemblyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssemblyMode::SingleFile => "single_file",
            AssemblyMode::ProjectSummary => "project_summary",
            AssemblyMode::ContextualQuery => "contextual_query",
        }
    }
}

/// Size policy for one mode. Budgets are character counts, a rough stand-in
/// for the provider's token limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBudget {
    pub per_file_char_cap: usize,
    /// Files with `size_bytes >= threshold` are dropped, not truncated.
    pub hard_exclusion_bytes: Option<u64>,
    pub skip_image_types: bool,
}

impl ContextBudget {
    pub const SINGLE_FILE: ContextBudget = ContextBudget {
        per_file_char_cap: 90_000,
        hard_exclusion_bytes: None,
        skip_image_types: false,
    };

    pub const PROJECT_SUMMARY: ContextBudget = ContextBudget {
        per_file_char_cap: 20_000,
        hard_exclusion_bytes: None,
        skip_image_types: true,
    };

    pub const CONTEXTUAL_QUERY: ContextBudget = ContextBudget {
        per_file_char_cap: 15_000,
        hard_exclusion_bytes: Some(500_000),
        skip_image_types: true,
    };
}

/// One budget per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBudgets {
    pub single_file: ContextBudget,
    pub project_summary: ContextBudget,
    pub contextual_query: ContextBudget,
}

impl Default for ContextBudgets {
    fn default() -> Self {
        Self {
            single_file: ContextBudget::SINGLE_FILE,
            project_summary: ContextBudget::PROJECT_SUMMARY,
            contextual_query: ContextBudget::CONTEXTUAL_QUERY,
        }
    }
}

impl ContextBudgets {
    /// Caps and thresholds come from config; which modes skip images does not.
    pub fn from_config(cfg: &ContextConfig) -> Self {
        Self {
            single_file: ContextBudget {
                per_file_char_cap: cfg.single_file_max_chars,
                ..ContextBudget::SINGLE_FILE
            },
            project_summary: ContextBudget {
                per_file_char_cap: cfg.project_summary_max_chars,
                ..ContextBudget::PROJECT_SUMMARY
            },
            contextual_query: ContextBudget {
                per_file_char_cap: cfg.query_max_chars,
                hard_exclusion_bytes: cfg.query_exclude_bytes,
                ..ContextBudget::CONTEXTUAL_QUERY
            },
        }
    }

    pub fn for_mode(&self, mode: AssemblyMode) -> ContextBudget {
        match mode {
            AssemblyMode::SingleFile => self.single_file,
            AssemblyMode::ProjectSummary => self.project_summary,
            AssemblyMode::ContextualQuery => self.contextual_query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_reproduces_named_budgets() {
        let budgets = ContextBudgets::from_config(&ContextConfig::default());
        assert_eq!(budgets, ContextBudgets::default());
    }

    #[test]
    fn only_query_mode_has_a_size_exclusion() {
        let b = ContextBudgets::default();
        assert_eq!(b.for_mode(AssemblyMode::SingleFile).hard_exclusion_bytes, None);
        assert_eq!(b.for_mode(AssemblyMode::ProjectSummary).hard_exclusion_bytes, None);
        assert_eq!(
            b.for_mode(AssemblyMode::ContextualQuery).hard_exclusion_bytes,
            Some(500_000)
        );
        assert!(!b.for_mode(AssemblyMode::SingleFile).skip_image_types);
    }

    #[test]
    fn config_overrides_caps() {
        let cfg = ContextConfig {
            query_max_chars: 1_000,
            query_exclude_bytes: Some(2_048),
            ..Default::default()
        };
        let q = ContextBudgets::from_config(&cfg).contextual_query;
        assert_eq!(q.per_file_char_cap, 1_000);
        assert_eq!(q.hard_exclusion_bytes, Some(2_048));
        assert!(q.skip_image_types);
    }
}
