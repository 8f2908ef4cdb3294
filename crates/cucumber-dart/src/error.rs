//! Semantic error types for the command line tool.
//!
//! Configuration problems are kept distinct from input failures so the binary
//! can report them with a different exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring the tool or loading its inputs.
#[derive(Debug, Error)]
pub enum ToolError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// A `.feature` file is not valid Gherkin.
    #[error("failed to parse feature file {path}: {source}")]
    FeatureParse {
        /// Feature file that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        source: gherkin::ParseError,
    },
}

impl ToolError {
    /// Whether the error stems from configuration rather than input.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_error_displays_message() {
        let error = ToolError::InvalidConfig("unknown log level".to_string());
        assert_eq!(error.to_string(), "invalid configuration: unknown log level");
        assert!(error.is_config());
    }

    #[test]
    fn read_error_names_path() {
        let error = ToolError::Read {
            path: PathBuf::from("steps/missing.dart"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let message = error.to_string();
        assert!(message.contains("steps/missing.dart"));
        assert!(message.contains("file not found"));
        assert!(!error.is_config());
    }
}
