//! Error types for the LTV Boost crates.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias using the LTV Boost error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for everything around the calculators.
///
/// The calculators themselves are total and never return this type; it is
/// produced by input validation, configuration loading and the suggestion
/// board.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input or request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input failed a range or presence check
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an error with additional context.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this is a not-found error, looking through context wrappers.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::WithContext { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) | Self::Validation(_) | Self::Json(_) => 400,
            Self::WithContext { source, .. } => source.status_code(),
            _ => 500,
        }
    }
}

/// Extension trait for adding context to any error type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(Error::NotFound("suggestion".into()).status_code(), 404);
        assert_eq!(Error::InvalidInput("aov".into()).status_code(), 400);
        assert_eq!(Error::Config("bad".into()).status_code(), 500);

        let validation = ValidationError::NotPositive {
            field: "aov".into(),
            value: 0.0,
        };
        assert_eq!(Error::from(validation).status_code(), 400);
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::NotFound("suggestion abc".into());
        let with_ctx = err.with_context("toggling suggestion");
        assert!(matches!(with_ctx, Error::WithContext { .. }));
        assert!(with_ctx.is_not_found());
        assert_eq!(with_ctx.status_code(), 404);
        assert_eq!(
            with_ctx.to_string(),
            "toggling suggestion: Not found: suggestion abc"
        );
    }

    #[test]
    fn test_result_ext_context() {
        let parsed: std::result::Result<u32, serde_json::Error> = serde_json::from_str("nope");
        let err = parsed.context("reading plan").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().starts_with("reading plan: JSON error"));
    }
}
