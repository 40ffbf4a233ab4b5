//! Error types for the row layer.
//!
//! Errors at this level are tokenizer- and transport-focused. Semantic errors
//! like "unknown column" or "wrong type" belong in the column layer.

/// Errors produced by a row codec.
#[derive(thiserror::Error, Debug)]
pub enum RowError {
    /// Underlying byte source or sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tokenizer could not make sense of a row.
    #[error("malformed row at line {line}: {message}")]
    Malformed { line: u64, message: String },

    /// A field was not valid UTF-8.
    #[error("invalid UTF-8 in row at line {line}")]
    Utf8 { line: u64 },

    /// A codec option cannot be expressed by the tokenizer.
    #[error("invalid option {name}: {value:?}")]
    InvalidOption { name: &'static str, value: char },

    /// Any other codec-specific failure.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl RowError {
    /// Wrap an arbitrary error as a codec failure.
    pub fn other(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RowError::Other(e.into())
    }
}

impl From<csv::Error> for RowError {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map(|p| p.line()).unwrap_or(0);
        match e.into_kind() {
            csv::ErrorKind::Io(io) => RowError::Io(io),
            csv::ErrorKind::Utf8 { .. } => RowError::Utf8 { line },
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => RowError::Malformed {
                line,
                message: format!("expected {} fields, found {}", expected_len, len),
            },
            other => RowError::Malformed {
                line,
                message: format!("{:?}", other),
            },
        }
    }
}
