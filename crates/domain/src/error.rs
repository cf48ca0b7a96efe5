/// Shared error type used across all ProjectLens crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("provider {provider}: {message}")]
    Provider { provider: String, message: String },

    /// A required request field (path, query) is missing or blank.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested path, project, or file does not exist or is not accessible.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Nothing survived filtering, so there is nothing to send to the model.
    #[error("{0}")]
    EmptyResult(String),

    #[error("config: {0}")]
    Config(String),

    #[error("auth: {0}")]
    Auth(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for failures that happen before any filesystem traversal or
    /// provider call: bad input, missing roots, or nothing to analyze.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_)
                | Error::NotFound(_)
                | Error::NotADirectory(_)
                | Error::EmptyResult(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_display_includes_provider_and_message() {
        let err = Error::Provider {
            provider: "google".into(),
            message: "HTTP 429 - quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "provider google: HTTP 429 - quota exceeded");
    }

    #[test]
    fn empty_result_displays_bare_message() {
        let err = Error::EmptyResult("no analyzable files found in directory".into());
        assert_eq!(err.to_string(), "no analyzable files found in directory");
    }

    #[test]
    fn client_error_classification() {
        assert!(Error::InvalidInput("query is required".into()).is_client_error());
        assert!(Error::NotADirectory("/etc/hosts".into()).is_client_error());
        assert!(!Error::Timeout("30s".into()).is_client_error());
        assert!(!Error::Provider {
            provider: "google".into(),
            message: "boom".into()
        }
        .is_client_error());
    }
}
