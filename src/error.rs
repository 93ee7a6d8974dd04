use thiserror::Error;

/// Custom error types for IGC parsing
#[derive(Debug, Error)]
pub enum IgcError {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A fixed-width field held non-numeric or out-of-range content
    #[error("Invalid {field} field: {value:?}")]
    InvalidField { field: &'static str, value: String },
    /// Record shorter than its fixed column layout
    #[error("Record too short: expected at least {expected} characters, got {actual}")]
    TooShort { expected: usize, actual: usize },
    /// Hemisphere letter other than N/S/E/W
    #[error("Invalid hemisphere: {0:?}")]
    InvalidHemisphere(char),
    /// HHMMSS outside the valid time-of-day range
    #[error("Invalid time of day: {0:?}")]
    InvalidTime(String),
    /// Malformed record reported with its 1-based line number
    #[error("Line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: Box<IgcError>,
    },
}

impl IgcError {
    pub(crate) fn invalid_field(field: &'static str, value: &str) -> Self {
        IgcError::InvalidField {
            field,
            value: value.to_string(),
        }
    }

    /// Attach a line number to a record-level error
    pub fn at_line(self, line: usize) -> Self {
        IgcError::Malformed {
            line,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, IgcError>;
