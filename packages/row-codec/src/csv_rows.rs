//! Row codec backed by the `csv` crate.

use std::io;

use crate::{CsvOptions, Row, RowError, RowReader, RowWriter};

/// Reads rows from any `io::Read` through a `csv::Reader`.
pub struct CsvRowReader<R> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
}

impl<R: io::Read> CsvRowReader<R> {
    /// Create a row reader with the given tokenizer options.
    pub fn new(source: R, options: &CsvOptions) -> Result<Self, RowError> {
        Ok(Self::from_csv(options.reader_builder()?.from_reader(source)))
    }

    /// Wrap an already configured `csv::Reader`.
    ///
    /// The reader should be configured with `has_headers(false)`, otherwise
    /// the first row is swallowed by the tokenizer.
    pub fn from_csv(reader: csv::Reader<R>) -> Self {
        Self {
            reader,
            record: csv::StringRecord::new(),
        }
    }

    /// Consume this row reader, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: io::Read + Send> RowReader for CsvRowReader<R> {
    fn read_row(&mut self) -> Result<Option<Row>, RowError> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        Ok(Some(self.record.iter().map(str::to_string).collect()))
    }
}

/// Writes rows to any `io::Write` through a `csv::Writer`.
pub struct CsvRowWriter<W: io::Write> {
    writer: csv::Writer<W>,
}

impl<W: io::Write> CsvRowWriter<W> {
    /// Create a row writer with the given tokenizer options.
    pub fn new(sink: W, options: &CsvOptions) -> Result<Self, RowError> {
        Ok(Self::from_csv(options.writer_builder()?.from_writer(sink)))
    }

    /// Wrap an already configured `csv::Writer`.
    pub fn from_csv(writer: csv::Writer<W>) -> Self {
        Self { writer }
    }

    /// Flush and consume this row writer, returning the underlying sink.
    pub fn into_inner(self) -> Result<W, RowError> {
        self.writer
            .into_inner()
            .map_err(|e| RowError::Io(io::Error::new(e.error().kind(), e.error().to_string())))
    }
}

impl<W: io::Write + Send> RowWriter for CsvRowWriter<W> {
    fn write_row(&mut self, row: &[String]) -> Result<(), RowError> {
        self.writer.write_record(row)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RowError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{row_from_strs, Terminator};

    struct FailingSink;

    impl io::Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "write error"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "flush error"))
        }
    }

    #[test]
    fn reads_rows_until_end_of_stream() {
        let data = "first_name,last_name\nHolly,Franklin\n";
        let mut rows = CsvRowReader::new(data.as_bytes(), &CsvOptions::default()).unwrap();

        assert_eq!(
            rows.read_row().unwrap(),
            Some(row_from_strs(&["first_name", "last_name"]))
        );
        assert_eq!(
            rows.read_row().unwrap(),
            Some(row_from_strs(&["Holly", "Franklin"]))
        );
        assert_eq!(rows.read_row().unwrap(), None);
    }

    #[test]
    fn rows_of_any_length_are_returned() {
        let data = "a,b\nc\n";
        let mut rows = CsvRowReader::new(data.as_bytes(), &CsvOptions::default()).unwrap();

        assert_eq!(rows.read_row().unwrap().unwrap().len(), 2);
        assert_eq!(rows.read_row().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn empty_source_is_end_of_stream() {
        let mut rows = CsvRowReader::new(&b""[..], &CsvOptions::default()).unwrap();
        assert_eq!(rows.read_row().unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let data: &[u8] = b"ok\n\xff\xfe\n";
        let mut rows = CsvRowReader::new(data, &CsvOptions::default()).unwrap();

        assert!(rows.read_row().unwrap().is_some());
        assert!(matches!(rows.read_row(), Err(RowError::Utf8 { .. })));
    }

    #[test]
    fn comments_and_trim() {
        let data = "# skipped\n a , b \n";
        let options = CsvOptions::default()
            .with_comment(Some('#'))
            .with_trim(true);
        let mut rows = CsvRowReader::new(data.as_bytes(), &options).unwrap();

        assert_eq!(rows.read_row().unwrap(), Some(row_from_strs(&["a", "b"])));
    }

    #[test]
    fn writes_with_delimiter_and_quotes() {
        let options = CsvOptions::default().with_delimiter(';');
        let mut rows = CsvRowWriter::new(Vec::new(), &options).unwrap();

        rows.write_row(&row_from_strs(&["John", "Smith; Jr.", "20"]))
            .unwrap();
        rows.flush().unwrap();

        let out = String::from_utf8(rows.into_inner().unwrap()).unwrap();
        assert_eq!(out, "John;\"Smith; Jr.\";20\n");
    }

    #[test]
    fn writes_crlf_terminator() {
        let options = CsvOptions::default().with_terminator(Terminator::Crlf);
        let mut rows = CsvRowWriter::new(Vec::new(), &options).unwrap();

        rows.write_row(&row_from_strs(&["a", "b"])).unwrap();

        let out = String::from_utf8(rows.into_inner().unwrap()).unwrap();
        assert_eq!(out, "a,b\r\n");
    }

    #[test]
    fn flush_surfaces_sink_errors() {
        let mut rows = CsvRowWriter::new(FailingSink, &CsvOptions::default()).unwrap();

        // Buffered, so the failure only shows up on flush.
        rows.write_row(&row_from_strs(&["a"])).unwrap();
        assert!(matches!(rows.flush(), Err(RowError::Io(_))));
    }
}
