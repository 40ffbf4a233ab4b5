//! csvhandler-row: Row-Level Codec Traits
//!
//! This is the narrow waist below the column layer. Everything at this level
//! is an ordered sequence of string fields - no header, no column names, no
//! type conversion.
//!
//! Use this layer for:
//! - Plugging a delimited-text tokenizer underneath `csvhandler`
//! - Feeding rows from memory in tests and demos
//! - Controlling delimiter, quote and terminator through `CsvOptions`
//!
//! # Example
//!
//! ```rust
//! use csvhandler_row::{CsvOptions, CsvRowReader, RowReader};
//!
//! let data = "first_name;age\nHolly;27\n";
//! let options = CsvOptions::default().with_delimiter(';');
//! let mut rows = CsvRowReader::new(data.as_bytes(), &options).unwrap();
//!
//! assert_eq!(rows.read_row().unwrap(), Some(vec!["first_name".to_string(), "age".to_string()]));
//! assert_eq!(rows.read_row().unwrap(), Some(vec!["Holly".to_string(), "27".to_string()]));
//! assert_eq!(rows.read_row().unwrap(), None);
//! ```

mod csv_rows;
mod error;
mod memory;
mod options;
mod traits;

pub use csv_rows::{CsvRowReader, CsvRowWriter};
pub use error::RowError;
pub use memory::MemoryRows;
pub use options::{CsvOptions, Terminator};
pub use traits::{Row, RowReader, RowWriter};

/// Convenience function to create an owned row from string slices.
pub fn row_from_strs(fields: &[&str]) -> Row {
    fields.iter().map(|f| f.to_string()).collect()
}
