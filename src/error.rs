use std::path::PathBuf;
use thiserror::Error;

use crate::models::ConfigError;

/// Main error type for colsplit
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("max line must not be less than 1 (got {0})")]
    InvalidLineLimit(usize),

    #[error("selected column must not be less than 1 (got {0})")]
    InvalidColumn(usize),

    #[error("Failed to open input file {0}: {1}")]
    InputOpen(PathBuf, std::io::Error),

    #[error("Input file {0} contains no CSV records")]
    EmptyInput(PathBuf),

    #[error("column {column} is greater than the total column count ({fields}) of {path}")]
    ColumnOutOfRange {
        path: PathBuf,
        column: usize,
        fields: usize,
    },

    #[error("Failed to parse {0}: {1}")]
    Parse(PathBuf, csv::Error),

    #[error("Record {record} of {path} has {fields} field(s), column {column} is out of range")]
    RowTooShort {
        path: PathBuf,
        record: usize,
        column: usize,
        fields: usize,
    },

    #[error("Failed to create output file {0}: {1}")]
    OutputCreate(PathBuf, std::io::Error),

    #[error("Failed to write output file {0}: {1}")]
    OutputWrite(PathBuf, String),

    #[error("Failed to render report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SplitError {
    /// Hint shown after the error message, if one would help the user
    pub fn hint(&self) -> Option<String> {
        match self {
            SplitError::InvalidColumn(_) => {
                Some("Columns are 1-based: use --column 1 for the first column".to_string())
            }
            SplitError::ColumnOutOfRange { fields, .. } => {
                Some(format!("Pick a column between 1 and {}", fields))
            }
            SplitError::RowTooShort { .. } => Some(
                "Rows with a varying number of fields are only accepted with [csv] flexible = true; fix or drop the short rows"
                    .to_string(),
            ),
            SplitError::Parse(..) => Some("No output files were written".to_string()),
            _ => None,
        }
    }

    /// Format error with its hint for display
    pub fn display_with_hint(&self) -> String {
        match self.hint() {
            Some(hint) => format!("Error: {}\n\nHint: {}", self, hint),
            None => format!("Error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_out_of_range_message() {
        let error = SplitError::ColumnOutOfRange {
            path: PathBuf::from("data.csv"),
            column: 4,
            fields: 2,
        };
        let message = error.to_string();
        assert!(message.contains("column 4"));
        assert!(message.contains("(2)"));
        assert!(message.contains("data.csv"));
    }

    #[test]
    fn test_display_with_hint() {
        let error = SplitError::ColumnOutOfRange {
            path: PathBuf::from("data.csv"),
            column: 4,
            fields: 2,
        };
        let display = error.display_with_hint();
        assert!(display.starts_with("Error: column 4"));
        assert!(display.contains("Hint: Pick a column between 1 and 2"));
    }

    #[test]
    fn test_display_without_hint() {
        let error = SplitError::InvalidLineLimit(0);
        assert!(error.hint().is_none());
        assert_eq!(
            error.display_with_hint(),
            "Error: max line must not be less than 1 (got 0)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let error: SplitError = io.into();
        assert!(matches!(error, SplitError::Io(_)));
        assert!(error.to_string().contains("disk on fire"));
    }
}
