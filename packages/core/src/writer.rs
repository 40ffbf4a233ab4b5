//! Writer - named records in, rows out.

use std::collections::HashMap;
use std::sync::Mutex;

use csvhandler_row::RowWriter;

use crate::write_record::Field;
use crate::{Error, Formatter, Header, Result, Value, WriteRecord};

const DEFAULT_EMPTY_VALUE: &str = "";

/// Writes `WriteRecord`s as rows, in the column order of a fixed header.
///
/// For every column, the text written is resolved in this order:
///
/// 1. the record's own value, rendered by its own formatter if it has one;
/// 2. otherwise the column default (`set_default`), rendered by the
///    default's formatter if it has one;
/// 3. otherwise the empty value (`set_empty_value`, `""` unless changed).
///
/// Values without a formatter are rendered by `Formatter::default_formatter`.
/// A column formatter (`set_formatter`) is then applied on top of that
/// output, whichever of the three it came from.
///
/// ```rust
/// use csvhandler::{Formatter, Writer, WriteRecord};
/// use csvhandler_row::{CsvOptions, CsvRowWriter};
///
/// let rows = CsvRowWriter::new(Vec::new(), &CsvOptions::default()).unwrap();
/// let mut writer = Writer::new(rows, ["name", "age"]).unwrap();
/// writer.set_default("age", 18);
/// writer.set_formatter("name", vec![Formatter::string("Mr. {}")]);
///
/// let mut record = WriteRecord::new();
/// record.set_formatted("name", "John", vec![Formatter::string("{} Jr.")]);
/// writer.write_header().unwrap();
/// writer.write(&record).unwrap();
///
/// let out = writer.into_inner().unwrap().into_inner().unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "name,age\nMr. John Jr.,18\n");
/// ```
#[derive(Debug)]
pub struct Writer<W> {
    rows: Mutex<W>,
    header: Header,
    defaults: HashMap<String, Field>,
    formatters: HashMap<String, Formatter>,
    empty_value: String,
}

impl<W: RowWriter> Writer<W> {
    /// Create a writer for the given columns.
    ///
    /// An empty header is allowed: no header line is written and every row
    /// is empty.
    pub fn new<I, S>(rows: W, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header = Header::new(names)?;
        log::debug!("writer header has {} columns", header.len());
        Ok(Self {
            rows: Mutex::new(rows),
            header,
            defaults: HashMap::new(),
            formatters: HashMap::new(),
            empty_value: DEFAULT_EMPTY_VALUE.to_string(),
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Value used for a column when neither the record nor a default has one.
    pub fn empty_value(&self) -> &str {
        &self.empty_value
    }

    pub fn set_empty_value(&mut self, value: impl Into<String>) {
        self.empty_value = value.into();
    }

    /// Fallback value for a column missing from a record.
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.set_default_formatted(name, value, None::<Formatter>);
    }

    /// Fallback value for a column missing from a record, rendered by the
    /// given formatters.
    pub fn set_default_formatted(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        formatters: impl IntoIterator<Item = Formatter>,
    ) {
        self.defaults
            .insert(name.into(), Field::new(value, formatters));
    }

    /// Formatters applied to every value written to a column, after the
    /// value's own formatting.
    ///
    /// Passing no formatters leaves any previous column formatter in place.
    pub fn set_formatter(
        &mut self,
        name: impl Into<String>,
        formatters: impl IntoIterator<Item = Formatter>,
    ) {
        if let Some(formatter) = Formatter::compose(formatters) {
            self.formatters.insert(name.into(), formatter);
        }
    }

    /// Resolve the text of one column for a record.
    pub fn format_field(&self, record: &WriteRecord, column: &str) -> Result<String> {
        let fallback;
        let (value, formatter) = if let Some(field) = record.field(column) {
            (&field.value, field.formatter.as_ref())
        } else if let Some(field) = self.defaults.get(column) {
            (&field.value, field.formatter.as_ref())
        } else {
            fallback = Value::String(self.empty_value.clone());
            (&fallback, None)
        };

        let format_err = |source| Error::Format {
            name: column.to_string(),
            source,
        };
        let text = match formatter {
            Some(f) => f.format(value),
            None => Formatter::default_formatter().format(value),
        }
        .map_err(format_err)?;

        match self.formatters.get(column) {
            Some(column_formatter) => column_formatter
                .format(&Value::String(text))
                .map_err(format_err),
            None => Ok(text),
        }
    }

    /// Write the header line and flush.
    ///
    /// Nothing is written when the header is empty, but the flush still
    /// happens.
    pub fn write_header(&self) -> Result<()> {
        const CONTEXT: &str = "cannot write header line";
        let mut rows = self.rows.lock().map_err(|_| Error::Poisoned)?;
        if !self.header.is_empty() {
            log::debug!("writing header line");
            rows.write_row(self.header.names())
                .map_err(Error::row(CONTEXT))?;
        }
        rows.flush().map_err(Error::row(CONTEXT))
    }

    /// Write one record as a row and flush.
    ///
    /// Columns are resolved in header order; the first formatting failure
    /// aborts before anything is written. Fields not in the header are
    /// ignored.
    pub fn write(&self, record: &WriteRecord) -> Result<()> {
        const CONTEXT: &str = "cannot write record";
        if log::log_enabled!(log::Level::Trace) {
            for (name, _) in record.iter().filter(|(name, _)| !self.header.contains(name)) {
                log::trace!("ignoring field '{}' outside the header", name);
            }
        }
        let row = self
            .header
            .iter()
            .map(|column| self.format_field(record, column))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = self.rows.lock().map_err(|_| Error::Poisoned)?;
        rows.write_row(&row).map_err(Error::row(CONTEXT))?;
        log::trace!("wrote row of {} fields", row.len());
        rows.flush().map_err(Error::row(CONTEXT))
    }

    /// Write records in order, stopping at the first failure, then flush.
    pub fn write_all<'a>(&self, records: impl IntoIterator<Item = &'a WriteRecord>) -> Result<()> {
        let mut count = 0usize;
        for record in records {
            self.write(record)?;
            count += 1;
        }
        log::debug!("wrote {} records", count);

        let mut rows = self.rows.lock().map_err(|_| Error::Poisoned)?;
        rows.flush().map_err(Error::row("cannot flush"))
    }

    /// Consume the writer, returning the row sink.
    pub fn into_inner(self) -> Result<W> {
        self.rows.into_inner().map_err(|_| Error::Poisoned)
    }
}
