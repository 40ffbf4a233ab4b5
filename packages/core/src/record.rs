//! The read-side Record - one row addressed by column name.

use std::io;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta};

use crate::duration::parse_duration;
use crate::{Error, Header, Result};

/// One row of fields, addressed by column name.
///
/// Records produced by the same `Reader` share its header; each owns its own
/// values. A record is immutable once built.
///
/// ```rust
/// use std::sync::Arc;
/// use csvhandler::{Header, Record};
///
/// let header = Arc::new(Header::new(["first_name", "age"]).unwrap());
/// let record = Record::new(header, vec!["Holly".into(), "27".into()]);
///
/// assert_eq!(record.get("first_name").unwrap(), "Holly");
/// assert_eq!(record.get_i64("age").unwrap(), 27);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    header: Arc<Header>,
    values: Vec<String>,
}

impl Record {
    pub fn new(header: Arc<Header>, values: Vec<String>) -> Self {
        Self { header, values }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Raw field values in row order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of fields in the row (may differ from the header length for
    /// records carried by a `FieldCount` error).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(name, value)` pairs in header order, skipping names past the end of
    /// the row.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Raw string value of a column.
    ///
    /// # Errors
    ///
    /// * `UnknownKey` - the name is not in the header.
    /// * `IndexOutOfRange` - the header points past the end of this row.
    pub fn get(&self, name: &str) -> Result<&str> {
        let index = self
            .header
            .position(name)
            .ok_or_else(|| Error::unknown_key(name))?;
        self.values
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| Error::IndexOutOfRange {
                name: name.to_string(),
                index,
            })
    }

    /// Parse a column with `FromStr`, reporting failures as `WrongType`.
    pub fn get_parsed<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.get(name)?
            .parse()
            .map_err(|e| Error::wrong_type(name, e))
    }

    /// Boolean column: exactly `true` or `false`.
    pub fn get_bool(&self, name: &str) -> Result<bool> {
        self.get_parsed(name)
    }

    /// Platform-sized integer column.
    pub fn get_int(&self, name: &str) -> Result<isize> {
        self.get_parsed(name)
    }

    pub fn get_i64(&self, name: &str) -> Result<i64> {
        self.get_parsed(name)
    }

    pub fn get_f64(&self, name: &str) -> Result<f64> {
        self.get_parsed(name)
    }

    /// Timestamp column parsed with a chrono `strftime` layout.
    ///
    /// Layouts without an offset are read as UTC; date-only layouts give
    /// midnight UTC.
    pub fn get_time(&self, layout: &str, name: &str) -> Result<DateTime<FixedOffset>> {
        let raw = self.get(name)?;
        let with_offset = match DateTime::parse_from_str(raw, layout) {
            Ok(t) => return Ok(t),
            Err(e) => e,
        };
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Ok(naive.and_utc().fixed_offset());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, layout) {
            return Ok(date.and_time(Default::default()).and_utc().fixed_offset());
        }
        Err(Error::wrong_type(name, with_offset))
    }

    /// Duration column in the compact `12m10s` grammar.
    pub fn get_duration(&self, name: &str) -> Result<TimeDelta> {
        parse_duration(self.get(name)?).map_err(|e| Error::wrong_type(name, e))
    }

    /// Write `name='value'` pairs separated by spaces, then a newline.
    ///
    /// Stops at the first unknown column or failed write; whatever was
    /// written before stays written.
    pub fn print_columns<W, S>(&self, dest: &mut W, names: &[S]) -> Result<()>
    where
        W: io::Write + ?Sized,
        S: AsRef<str>,
    {
        let io_err = |source| Error::Io {
            context: "cannot write columns",
            source,
        };
        for (i, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let value = self.get(name)?;
            let separator = if i == 0 { "" } else { " " };
            write!(dest, "{}{}='{}'", separator, name, value).map_err(io_err)?;
        }
        writeln!(dest).map_err(io_err)
    }
}
