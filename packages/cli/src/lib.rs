//! # csvhandler-cli
//!
//! Command-line front end for `csvhandler`.
//!
//! ## Usage
//!
//! ```bash
//! # Print every record of a file
//! csvhandler read people.csv
//!
//! # Print two columns as JSON lines, reading from stdin
//! cat people.csv | csvhandler read - --columns first_name,age --json
//!
//! # Turn JSON lines into CSV
//! echo '{"first_name":"Holly"}' | csvhandler write --header first_name,age --default age=18
//! ```

pub mod commands;
mod error;

pub use commands::{parse_default, read, write, ReadOptions, WriteOptions};
pub use error::{CliError, Result};
