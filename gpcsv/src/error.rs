//! All error types for the gpcsv crate.
//!
//! These are returned from every fallible operation: reading, importing and plural rule parsing.
//! Import failures never return a partial collection.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("file unavailable `{}`: {reason}", .path.display())]
    FileUnavailable { path: PathBuf, reason: String },

    #[error("input contains no rows")]
    NoRows,

    #[error("invalid column headers found ({})", .0.join(", "))]
    HeaderMismatch(Vec<String>),

    #[error("row {row} has {found} columns, but the file header has {expected}")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("invalid plural expression: {0}")]
    InvalidPluralExpression(String),

    #[error("unknown locale `{0}`")]
    UnknownLocale(String),

    #[error("unknown schema mode `{0}`")]
    UnknownMode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new file-unavailable error for `path`.
    pub fn file_unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::FileUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new plural expression error.
    pub fn invalid_expression(message: impl Into<String>) -> Self {
        Error::InvalidPluralExpression(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_file_unavailable_error() {
        let error = Error::file_unavailable("missing.csv", "not found");
        assert_eq!(error.to_string(), "file unavailable `missing.csv`: not found");
    }

    #[test]
    fn test_header_mismatch_lists_labels() {
        let error = Error::HeaderMismatch(vec!["Foo".to_string(), "Bar".to_string()]);
        assert_eq!(error.to_string(), "invalid column headers found (Foo, Bar)");
    }

    #[test]
    fn test_column_count_mismatch_error() {
        let error = Error::ColumnCountMismatch {
            row: 3,
            expected: 6,
            found: 5,
        };
        assert_eq!(
            error.to_string(),
            "row 3 has 5 columns, but the file header has 6"
        );
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::from(json_error);
        assert!(error.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_invalid_expression_error() {
        let error = Error::invalid_expression("unexpected token `)`");
        assert_eq!(
            error.to_string(),
            "invalid plural expression: unexpected token `)`"
        );
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            Error::UnknownLocale("test".to_string()),
            Error::UnknownMode("test".to_string()),
            Error::InvalidPluralExpression("test".to_string()),
            Error::HeaderMismatch(vec!["test".to_string()]),
        ];

        for error in errors {
            let display = format!("{}", error);
            assert!(!display.is_empty());
            assert!(display.contains("test"));
        }
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownLocale("xx".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownLocale"));
        assert!(debug.contains("xx"));
    }
}
