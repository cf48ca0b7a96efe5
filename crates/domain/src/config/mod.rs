mod context;
mod llm;
mod observability;
mod projects;
mod scan;
mod server;

pub use context::*;
pub use llm::*;
pub use observability::*;
pub use projects::*;
pub use scan::*;
pub use server::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub projects: ProjectsConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "server.port".into(),
                message: "port must be greater than 0".into(),
            });
        }

        if self.server.host.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "server.host".into(),
                message: "host must not be empty".into(),
            });
        }

        // A zero cap would send every file as an empty fragment.
        for (field, value) in [
            ("context.single_file_max_chars", self.context.single_file_max_chars),
            ("context.project_summary_max_chars", self.context.project_summary_max_chars),
            ("context.query_max_chars", self.context.query_max_chars),
        ] {
            if value == 0 {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: field.into(),
                    message: "character cap must be greater than 0".into(),
                });
            }
        }

        if self.context.query_exclude_bytes == Some(0) {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "context.query_exclude_bytes".into(),
                message: "exclusion threshold of 0 would drop every file".into(),
            });
        }

        for ext in &self.scan.skip_extensions {
            if ext.trim().trim_start_matches('.').is_empty() {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Warning,
                    field: "scan.skip_extensions".into(),
                    message: format!("ignoring empty extension entry {ext:?}"),
                });
            }
        }

        let provider = &self.llm.provider;
        if provider.id.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "llm.provider.id".into(),
                message: "provider id must not be empty".into(),
            });
        }
        if provider.base_url.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "llm.provider.base_url".into(),
                message: "provider base_url must not be empty".into(),
            });
        }
        if provider.auth.key.is_none() {
            match &provider.auth.env {
                Some(var) if std::env::var(var).map(|v| v.is_empty()).unwrap_or(true) => {
                    errors.push(ConfigError {
                        severity: ConfigSeverity::Warning,
                        field: "llm.provider.auth.env".into(),
                        message: format!(
                            "environment variable '{var}' is not set; model calls will fail"
                        ),
                    });
                }
                Some(_) => {}
                None => {
                    errors.push(ConfigError {
                        severity: ConfigSeverity::Warning,
                        field: "llm.provider.auth".into(),
                        message: "no API key source configured".into(),
                    });
                }
            }
        }

        if self.server.cors.allowed_origins.len() == 1
            && self.server.cors.allowed_origins[0] == "*"
        {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "server.cors.allowed_origins".into(),
                message: "wildcard \"*\" allows all origins (not recommended for production)".into(),
            });
        }

        errors
    }
}
