//! Error types for the column layer.

use csvhandler_row::RowError;

use crate::format::FormatError;
use crate::record::Record;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while addressing, converting or moving records.
///
/// End of stream is not in here: `Reader::read` reports it as `Ok(None)`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A header repeats a column name.
    #[error("key '{name}' already exists")]
    DuplicateKey { name: String },

    /// Lookup of a column that is not in the mapping.
    #[error("unknown key '{name}'")]
    UnknownKey { name: String },

    /// The header points past the end of the row values.
    #[error("index {index} of key '{name}' is out of range")]
    IndexOutOfRange { name: String, index: usize },

    /// A typed accessor could not parse the field.
    #[error("key '{name}' has the wrong type: {source}")]
    WrongType {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A row did not have as many fields as the header.
    ///
    /// The record is still built from whatever fields were present.
    #[error("wrong number of fields: expected {expected}, found {found}")]
    FieldCount {
        expected: usize,
        found: usize,
        record: Box<Record>,
    },

    /// The header had to be read from the source, but the source was empty.
    #[error("cannot read header line: source is empty")]
    MissingHeader,

    /// A formatter failed on the value of a column.
    #[error("cannot format key '{name}': {source}")]
    Format {
        name: String,
        #[source]
        source: FormatError,
    },

    /// The row codec failed.
    #[error("{context}: {source}")]
    Row {
        context: &'static str,
        #[source]
        source: RowError,
    },

    /// A destination writer failed.
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Another thread panicked while holding the reader or writer lock.
    #[error("lock poisoned by a panicking thread")]
    Poisoned,

    /// JSON input could not be turned into a record.
    #[error("invalid JSON record: {message}")]
    Json { message: String },
}

impl Error {
    pub(crate) fn unknown_key(name: &str) -> Self {
        Error::UnknownKey {
            name: name.to_string(),
        }
    }

    pub(crate) fn wrong_type(
        name: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::WrongType {
            name: name.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn row(context: &'static str) -> impl FnOnce(RowError) -> Self {
        move |source| Error::Row { context, source }
    }

    /// The best-effort record carried by a `FieldCount` error.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Error::FieldCount { record, .. } => Some(*record),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn duplicate_key_display() {
        let e = Error::DuplicateKey {
            name: "first_name".to_string(),
        };
        assert_eq!(format!("{}", e), "key 'first_name' already exists");
    }

    #[test]
    fn unknown_key_display() {
        let e = Error::unknown_key("age");
        assert_eq!(format!("{}", e), "unknown key 'age'");
        assert!(StdError::source(&e).is_none());
    }

    #[test]
    fn wrong_type_keeps_source() {
        let parse_err = "abc".parse::<i64>().unwrap_err();
        let e = Error::wrong_type("age", parse_err);
        let display = format!("{}", e);
        assert!(display.contains("age"));
        assert!(display.contains("invalid digit"));
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn row_error_context() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let e = Error::row("cannot write record")(RowError::Io(io));
        let display = format!("{}", e);
        assert!(display.starts_with("cannot write record"));
        assert!(display.contains("disk full"));
    }

    #[test]
    fn into_record_only_for_field_count() {
        assert!(Error::MissingHeader.into_record().is_none());

        let header = std::sync::Arc::new(crate::Header::new(["a", "b"]).unwrap());
        let record = Record::new(header, vec!["1".to_string()]);
        let e = Error::FieldCount {
            expected: 2,
            found: 1,
            record: Box::new(record.clone()),
        };
        assert_eq!(e.into_record(), Some(record));
    }
}
