//! Error types for the command-line front end.

use std::io;

use thiserror::Error;

/// Errors from the `read` and `write` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Csv(#[from] csvhandler::Error),

    #[error(transparent)]
    Row(#[from] csvhandler_row::RowError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: invalid JSON: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: csvhandler::Error,
    },

    #[error("invalid default '{0}', expected column=value")]
    InvalidDefault(String),
}

impl CliError {
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(io::Error) -> Self {
        let context = context.into();
        move |source| CliError::Io { context, source }
    }
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;
