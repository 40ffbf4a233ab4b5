//! csvhandler: Column-Addressed Records
//!
//! This layer adds column names to the plain rows of `csvhandler-row`:
//! - `Header`: Ordered, duplicate-free column names
//! - `Record`: One row read back, with typed getters by column name
//! - `WriteRecord`: Column name to `Value` mapping for output
//! - `Formatter`: Composable value-to-string rendering
//! - `Reader` / `Writer`: Thread-safe record streams over a row codec
//!
//! # Example
//!
//! ```rust
//! use csvhandler::{Formatter, Reader, WriteRecord, Writer};
//! use csvhandler_row::{CsvOptions, CsvRowReader, CsvRowWriter};
//!
//! let options = CsvOptions::default();
//! let mut writer = Writer::new(CsvRowWriter::new(Vec::new(), &options)?, ["name", "age"])?;
//! writer.set_default("age", 18);
//! writer.set_formatter("name", vec![Formatter::infallible(|v| v.to_string().to_uppercase())]);
//! writer.write_header()?;
//!
//! let mut holly = WriteRecord::new();
//! holly.set("name", "Holly");
//! writer.write(&holly)?;
//!
//! let bytes = writer.into_inner()?.into_inner()?;
//! assert_eq!(String::from_utf8(bytes.clone()).unwrap(), "name,age\nHOLLY,18\n");
//!
//! let reader = Reader::new(CsvRowReader::new(bytes.as_slice(), &options)?)?;
//! let record = reader.read()?.unwrap();
//! assert_eq!(record.get_int("age")?, 18);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod duration;
mod error;
mod format;
mod header;
mod json;
mod reader;
mod record;
mod value;
mod write_record;
mod writer;

pub use duration::{format_duration, parse_duration, DurationError};
pub use error::{Error, Result};
pub use format::{FormatError, Formatter};
pub use header::Header;
pub use json::json_to_value;
pub use reader::{Reader, Records};
pub use record::Record;
pub use value::{Opaque, Value};
pub use write_record::{Field, WriteRecord};
pub use writer::Writer;

// Re-export row codec types for convenience
pub use csvhandler_row::{
    CsvOptions, CsvRowReader, CsvRowWriter, MemoryRows, Row, RowError, RowReader, RowWriter,
    Terminator,
};
