//! Tokenizer options for the CSV row codec.

use serde::Deserialize;

use crate::RowError;

/// Record terminator used when writing.
///
/// Reading always accepts `\n`, `\r` and `\r\n`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminator {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
}

/// Options handed to the `csv` tokenizer.
///
/// Can be deserialized from a configuration file; missing fields fall back
/// to their defaults.
///
/// ```rust
/// use csvhandler_row::{CsvOptions, Terminator};
///
/// let options = CsvOptions::default()
///     .with_delimiter(';')
///     .with_terminator(Terminator::Crlf);
/// assert_eq!(options.delimiter, ';');
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field delimiter. Defaults to `,`.
    pub delimiter: char,
    /// Quote character. Defaults to `"`.
    pub quote: char,
    /// Terminator used when writing.
    pub terminator: Terminator,
    /// Trim leading and trailing whitespace of every field when reading.
    pub trim: bool,
    /// Lines starting with this character are skipped when reading.
    pub comment: Option<char>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            terminator: Terminator::Lf,
            trim: false,
            comment: None,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_comment(mut self, comment: Option<char>) -> Self {
        self.comment = comment;
        self
    }

    /// Build a `csv::ReaderBuilder` from these options.
    ///
    /// The reader never treats the first row as a header and accepts rows of
    /// any length: both concerns belong to the column layer.
    pub fn reader_builder(&self) -> Result<csv::ReaderBuilder, RowError> {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(ascii("delimiter", self.delimiter)?)
            .quote(ascii("quote", self.quote)?)
            .terminator(csv::Terminator::CRLF)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            });
        if let Some(comment) = self.comment {
            builder.comment(Some(ascii("comment", comment)?));
        }
        Ok(builder)
    }

    /// Build a `csv::WriterBuilder` from these options.
    pub fn writer_builder(&self) -> Result<csv::WriterBuilder, RowError> {
        let mut builder = csv::WriterBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(ascii("delimiter", self.delimiter)?)
            .quote(ascii("quote", self.quote)?)
            .terminator(match self.terminator {
                Terminator::Lf => csv::Terminator::Any(b'\n'),
                Terminator::Crlf => csv::Terminator::CRLF,
            });
        Ok(builder)
    }
}

fn ascii(name: &'static str, value: char) -> Result<u8, RowError> {
    if value.is_ascii() {
        Ok(value as u8)
    } else {
        Err(RowError::InvalidOption { name, value })
    }
}
