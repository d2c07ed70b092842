//! Error types shared across LiftForm crates.

use std::path::PathBuf;

/// Top-level error type for LiftForm operations.
#[derive(Debug, thiserror::Error)]
pub enum LiftformError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using LiftformError.
pub type LiftformResult<T> = Result<T, LiftformError>;

impl LiftformError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LiftformError::config("bad window").to_string(),
            "Configuration error: bad window"
        );
        assert_eq!(
            LiftformError::file_not_found("/tmp/missing.jsonl").to_string(),
            "File not found: /tmp/missing.jsonl"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> LiftformResult<String> {
            let content = std::fs::read_to_string("/nonexistent/liftform/frames.jsonl")?;
            Ok(content)
        }
        assert!(matches!(read(), Err(LiftformError::Io(_))));
    }
}
