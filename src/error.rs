//! Error types for repo-autoconfig

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for repo-autoconfig operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by host-supplied collaborators
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for repo-autoconfig
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read resource '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Resource '{0}' is not valid UTF-8")]
    InvalidUtf8(PathBuf),

    #[error("Invalid resource pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // -------------------------------------------------------------------------
    // Property Errors
    // -------------------------------------------------------------------------
    #[error("Failed to parse property source '{source_name}': {reason}")]
    Parse { source_name: String, reason: String },

    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    // -------------------------------------------------------------------------
    // Registration Errors
    // -------------------------------------------------------------------------
    #[error("Repository registration failed: {0}")]
    Registration(#[source] BoxError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_culprit() {
        let read = Error::FileRead {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(read.to_string().contains("missing.txt"));

        let mismatch = Error::TypeMismatch {
            key: "mybatis.table-generator.allocation-size".into(),
            expected: "i32".into(),
            actual: "\"ten\"".into(),
        };
        assert!(mismatch.to_string().contains("allocation-size"));
    }
}
