//! Error types for the GitLab client
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! Argument validation errors are raised before any request is sent;
//! HTTP failures are passed through with their status and body.

use thiserror::Error;

/// The main error type for the GitLab client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Argument / Configuration Errors
    // ============================================================================
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Invalid SHA-1 '{value}': {message}")]
    InvalidSha1 { value: String, message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Enumeration
    // ============================================================================
    #[error("Operation cancelled")]
    Cancelled,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid SHA-1 error
    pub fn invalid_sha1(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSha1 {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Whether this error is the cancellation signal of a lazy enumeration
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the server answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 404, .. })
    }

    /// Whether this error was raised locally, before any request was sent
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the GitLab client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_argument("per_page", "must be between 1 and 100");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'per_page': must be between 1 and 100"
        );

        let err = Error::config("missing base_url");
        assert_eq!(err.to_string(), "Configuration error: missing base_url");

        let err = Error::http_status(404, "404 Project Not Found");
        assert_eq!(err.to_string(), "HTTP 404: 404 Project Not Found");

        assert_eq!(Error::Cancelled.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_predicates() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::http_status(500, "").is_cancelled());

        assert!(Error::http_status(404, "").is_not_found());
        assert!(!Error::http_status(403, "").is_not_found());

        assert!(Error::invalid_argument("scope", "unknown").is_invalid_argument());
        assert!(!Error::config("x").is_invalid_argument());
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::http_status(409, "conflict").status(), Some(409));
        assert_eq!(Error::Cancelled.status(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
