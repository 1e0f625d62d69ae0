//! Error types for the Absence Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while parsing, normalizing and
//! syncing absence data.

use thiserror::Error;

/// The main error type for the Absence Engine.
///
/// Validation problems are not errors: they are collected as strings on a
/// [`ValidationResult`](crate::processing::ValidationResult). This type covers
/// the failures that stop a row, a source, or a configuration load.
///
/// # Example
///
/// ```
/// use absence_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/sync.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/sync.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is not usable.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// A raw row could not be turned into a record.
    #[error("Row {index} could not be extracted: {message}")]
    RowExtraction {
        /// Zero-based position of the row in its batch.
        index: usize,
        /// A description of the extraction failure.
        message: String,
    },

    /// A sync source could not be read.
    #[error("Failed to read source '{source_name}' from '{path}': {message}")]
    SourceRead {
        /// The configured name of the source.
        source_name: String,
        /// The input path.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// A sync source was read but its contents are not in the expected shape.
    #[error("Failed to parse source '{source_name}': {message}")]
    SourceParse {
        /// The configured name of the source.
        source_name: String,
        /// A description of the parse failure.
        message: String,
    },

    /// An output file could not be written.
    #[error("Failed to write output '{path}': {message}")]
    OutputWrite {
        /// The output path.
        path: String,
        /// A description of the write failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/sync.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/sync.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_row_extraction_displays_index_and_message() {
        let error = EngineError::RowExtraction {
            index: 4,
            message: "expected an object or array, found a number".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Row 4 could not be extracted: expected an object or array, found a number"
        );
    }

    #[test]
    fn test_source_read_displays_source_and_path() {
        let error = EngineError::SourceRead {
            source_name: "absenteeism".to_string(),
            path: "data/absenteeism.json".to_string(),
            message: "No such file or directory".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read source 'absenteeism' from 'data/absenteeism.json': No such file or directory"
        );
    }

    #[test]
    fn test_output_write_displays_path() {
        let error = EngineError::OutputWrite {
            path: "out/leave.json".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to write output 'out/leave.json': permission denied"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_config() -> EngineResult<()> {
            Err(EngineError::InvalidConfig {
                message: "no sources".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_config()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
