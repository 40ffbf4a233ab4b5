//! The `read` and `write` commands.
//!
//! Both commands work on plain `io` handles so they can be driven from files,
//! standard streams or in-memory buffers alike.

use std::io::{BufRead, Read, Write};
use std::sync::Arc;

use csvhandler::{Error, Formatter, Header, Reader, Record, WriteRecord, Writer};
use csvhandler_row::{CsvOptions, CsvRowReader, CsvRowWriter};

use crate::error::{CliError, Result};

/// Options for `read`.
#[derive(Clone, Debug, Default)]
pub struct ReadOptions {
    /// Columns to print, in order; all header columns when `None`.
    pub columns: Option<Vec<String>>,
    /// Explicit header; the first row is the header when `None`.
    pub header: Option<Vec<String>>,
    /// Print JSON lines instead of `name='value'` pairs.
    pub json: bool,
    pub csv: CsvOptions,
}

/// Options for `write`.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    pub header: Vec<String>,
    /// Column defaults as `(column, value)` pairs.
    pub defaults: Vec<(String, String)>,
    /// Columns rendered in upper case.
    pub upper: Vec<String>,
    /// Emit the header line before the records.
    pub header_line: bool,
    pub csv: CsvOptions,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            header: Vec::new(),
            defaults: Vec::new(),
            upper: Vec::new(),
            header_line: true,
            csv: CsvOptions::default(),
        }
    }
}

/// Parse a `column=value` default.
pub fn parse_default(spec: &str) -> Result<(String, String)> {
    spec.split_once('=')
        .filter(|(column, _)| !column.is_empty())
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .ok_or_else(|| CliError::InvalidDefault(spec.to_string()))
}

/// Print every record of `input` to `out`, returning how many were printed.
///
/// Rows with the wrong number of fields are skipped with a warning.
pub fn read<R, W>(input: R, out: &mut W, options: &ReadOptions) -> Result<usize>
where
    R: Read + Send,
    W: Write,
{
    let rows = CsvRowReader::new(input, &options.csv)?;
    let reader = match &options.header {
        Some(names) => Reader::with_header(rows, names.iter().cloned())?,
        None => Reader::new(rows)?,
    };
    let columns = match &options.columns {
        Some(columns) => columns.clone(),
        None => reader.header().names().to_vec(),
    };
    let selected = match (&options.columns, options.json) {
        (Some(columns), true) => Some(Arc::new(Header::new(columns.iter().cloned())?)),
        _ => None,
    };

    let mut count = 0;
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e @ Error::FieldCount { .. }) => {
                log::warn!("skipping record: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if options.json {
            let record = match &selected {
                Some(header) => project(&record, header)?,
                None => record,
            };
            let line = serde_json::to_string(&record).map_err(|source| CliError::Io {
                context: "cannot encode record".to_string(),
                source: source.into(),
            })?;
            writeln!(out, "{}", line).map_err(CliError::io("cannot write output"))?;
        } else {
            record.print_columns(out, columns.as_slice())?;
        }
        count += 1;
    }

    log::debug!("printed {} records", count);
    Ok(count)
}

/// The columns of `header`, taken from `record`, as a record of their own.
fn project(record: &Record, header: &Arc<Header>) -> Result<Record> {
    let values = header
        .iter()
        .map(|name| record.get(name).map(str::to_string))
        .collect::<csvhandler::Result<Vec<_>>>()?;
    Ok(Record::new(Arc::clone(header), values))
}

/// Read one JSON object per line from `input` and write it as a CSV row to
/// `out`, returning how many records were written.
///
/// Blank lines are ignored. The first bad line aborts; rows written before it
/// stay written.
pub fn write<R, W>(input: R, out: &mut W, options: &WriteOptions) -> Result<usize>
where
    R: BufRead,
    W: Write + Send,
{
    let rows = CsvRowWriter::new(out, &options.csv)?;
    let mut writer = Writer::new(rows, options.header.iter().cloned())?;
    for (column, value) in &options.defaults {
        writer.set_default(column.clone(), value.clone());
    }
    for column in &options.upper {
        writer.set_formatter(
            column.clone(),
            [Formatter::infallible(|v| v.to_string().to_uppercase())],
        );
    }

    if options.header_line {
        writer.write_header()?;
    }

    let mut count = 0;
    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(CliError::io("cannot read input"))?;
        if line.trim().is_empty() {
            continue;
        }
        let json = serde_json::from_str(&line).map_err(|source| CliError::Json {
            line: line_number,
            source,
        })?;
        WriteRecord::from_json(json)
            .and_then(|record| writer.write(&record))
            .map_err(|source| CliError::Record {
                line: line_number,
                source,
            })?;
        count += 1;
    }

    writer.into_inner()?.into_inner()?;
    log::debug!("wrote {} records", count);
    Ok(count)
}
