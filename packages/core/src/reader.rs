//! Reader - rows in, named records out.

use std::sync::{Arc, Mutex};

use csvhandler_row::RowReader;

use crate::{Error, Header, Record, Result};

/// Reads rows from a `RowReader` and hands them out as `Record`s.
///
/// The header is fixed at construction. Reads are serialized on an internal
/// lock, so a `Reader` can be shared between threads; each row is decoded by
/// exactly one `read` call.
///
/// ```rust
/// use csvhandler::Reader;
/// use csvhandler_row::{CsvOptions, CsvRowReader};
///
/// let data = "first_name,age\nHolly,27\nGiacobo,41\n";
/// let rows = CsvRowReader::new(data.as_bytes(), &CsvOptions::default()).unwrap();
/// let reader = Reader::new(rows).unwrap();
///
/// let holly = reader.read().unwrap().unwrap();
/// assert_eq!(holly.get("first_name").unwrap(), "Holly");
/// assert_eq!(holly.get_i64("age").unwrap(), 27);
///
/// assert_eq!(reader.read_all().unwrap().len(), 1);
/// assert!(reader.read().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct Reader<R> {
    rows: Mutex<R>,
    header: Arc<Header>,
}

impl<R: RowReader> Reader<R> {
    /// Create a reader whose header is the first row of `rows`.
    ///
    /// # Errors
    ///
    /// * `MissingHeader` - `rows` is empty.
    /// * `Row` - the first row could not be read.
    /// * `DuplicateKey` - the first row repeats a name.
    pub fn new(mut rows: R) -> Result<Self> {
        let names = rows
            .read_row()
            .map_err(Error::row("cannot read header line"))?
            .ok_or(Error::MissingHeader)?;
        Self::build(rows, Header::new(names)?)
    }

    /// Create a reader with an explicit header; no row is consumed.
    pub fn with_header<I, S>(rows: R, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(rows, Header::new(names)?)
    }

    fn build(rows: R, header: Header) -> Result<Self> {
        log::debug!("reader header has {} columns", header.len());
        Ok(Self {
            rows: Mutex::new(rows),
            header: Arc::new(header),
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Read the next record.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` - the next record.
    /// * `Ok(None)` - end of stream.
    /// * `Err(FieldCount { record, .. })` - the row had the wrong number of
    ///   fields; `record` holds what was read and the reader stays usable.
    /// * `Err(_)` - any other failure of the row codec.
    pub fn read(&self) -> Result<Option<Record>> {
        let row = {
            let mut rows = self.rows.lock().map_err(|_| Error::Poisoned)?;
            rows.read_row().map_err(Error::row("cannot read record"))?
        };
        let Some(values) = row else {
            return Ok(None);
        };

        let expected = self.header.len();
        let found = values.len();
        let record = Record::new(Arc::clone(&self.header), values);
        if found != expected {
            log::trace!("row has {} fields, header has {}", found, expected);
            return Err(Error::FieldCount {
                expected,
                found,
                record: Box::new(record),
            });
        }
        Ok(Some(record))
    }

    /// Read every remaining record.
    ///
    /// End of stream is the normal way out; any error discards what was
    /// read so far.
    pub fn read_all(&self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.read()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Iterate over the remaining records.
    ///
    /// `FieldCount` errors are yielded and iteration continues; any other
    /// error is yielded once and ends the iteration.
    pub fn records(&self) -> Records<'_, R> {
        Records {
            reader: self,
            done: false,
        }
    }

    /// Consume the reader, returning the row source.
    pub fn into_inner(self) -> Result<R> {
        self.rows.into_inner().map_err(|_| Error::Poisoned)
    }
}

/// Iterator returned by `Reader::records`.
pub struct Records<'a, R> {
    reader: &'a Reader<R>,
    done: bool,
}

impl<R: RowReader> Iterator for Records<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e @ Error::FieldCount { .. }) => Some(Err(e)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvhandler_row::{row_from_strs, MemoryRows, Row, RowError};

    struct FailingRows;

    impl RowReader for FailingRows {
        fn read_row(&mut self) -> std::result::Result<Option<Row>, RowError> {
            Err(RowError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "read error",
            )))
        }
    }

    fn people() -> MemoryRows {
        MemoryRows::from_rows(vec![
            row_from_strs(&["first_name", "last_name"]),
            row_from_strs(&["Holly", "Franklin"]),
            row_from_strs(&["Giacobo", "Bardell"]),
        ])
    }

    #[test]
    fn header_from_first_row() {
        let reader = Reader::new(people()).unwrap();
        assert_eq!(reader.header().len(), 2);

        let record = reader.read().unwrap().unwrap();
        assert_eq!(record.get("last_name").unwrap(), "Franklin");
    }

    #[test]
    fn explicit_header_consumes_nothing() {
        let reader = Reader::with_header(people(), ["a", "b"]).unwrap();
        let first = reader.read().unwrap().unwrap();
        assert_eq!(first.get("a").unwrap(), "first_name");
    }

    #[test]
    fn read_error_at_header() {
        assert!(matches!(
            Reader::new(FailingRows),
            Err(Error::Row {
                context: "cannot read header line",
                ..
            })
        ));
    }

    #[test]
    fn duplicate_key_in_first_row() {
        let rows = MemoryRows::from_rows(vec![row_from_strs(&["first_name", "first_name"])]);
        assert!(matches!(
            Reader::new(rows),
            Err(Error::DuplicateKey { name }) if name == "first_name"
        ));
    }

    #[test]
    fn duplicate_key_in_explicit_header() {
        assert!(matches!(
            Reader::with_header(MemoryRows::new(), ["x", "y", "x"]),
            Err(Error::DuplicateKey { name }) if name == "x"
        ));
    }

    #[test]
    fn empty_source_without_header_fails() {
        assert!(matches!(
            Reader::new(MemoryRows::new()),
            Err(Error::MissingHeader)
        ));
    }

    #[test]
    fn empty_source_with_header_reads_nothing() {
        let reader = Reader::with_header(MemoryRows::new(), ["a"]).unwrap();
        assert!(reader.read_all().unwrap().is_empty());
        assert!(reader.read().unwrap().is_none());
    }

    #[test]
    fn end_of_stream_is_none() {
        let reader = Reader::new(people()).unwrap();
        assert!(reader.read().unwrap().is_some());
        assert!(reader.read().unwrap().is_some());
        assert!(reader.read().unwrap().is_none());
        assert!(reader.read().unwrap().is_none());
    }

    #[test]
    fn field_count_mismatch_carries_record() {
        let rows = MemoryRows::from_rows(vec![
            row_from_strs(&["a", "b", "c"]),
            row_from_strs(&["1", "2"]),
            row_from_strs(&["4", "5", "6"]),
        ]);
        let reader = Reader::new(rows).unwrap();

        let err = reader.read().unwrap_err();
        assert!(matches!(
            err,
            Error::FieldCount {
                expected: 3,
                found: 2,
                ..
            }
        ));
        let partial = err.into_record().unwrap();
        assert_eq!(partial.get("b").unwrap(), "2");
        assert!(matches!(partial.get("c"), Err(Error::IndexOutOfRange { .. })));

        // The reader is still usable afterwards.
        let next = reader.read().unwrap().unwrap();
        assert_eq!(next.get("c").unwrap(), "6");
    }

    #[test]
    fn read_all_collects_in_order() {
        let reader = Reader::new(people()).unwrap();
        let names: Vec<String> = reader
            .read_all()
            .unwrap()
            .iter()
            .map(|r| r.get("first_name").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Holly", "Giacobo"]);
    }

    #[test]
    fn read_all_aborts_on_error() {
        let reader = Reader::with_header(FailingRows, ["a"]).unwrap();
        assert!(matches!(
            reader.read_all(),
            Err(Error::Row {
                context: "cannot read record",
                ..
            })
        ));
    }

    #[test]
    fn records_iterator_stops_after_fatal_error() {
        let reader = Reader::with_header(FailingRows, ["a"]).unwrap();
        let items: Vec<_> = reader.records().collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn records_iterator_continues_past_field_count() {
        let rows = MemoryRows::from_rows(vec![
            row_from_strs(&["a", "b"]),
            row_from_strs(&["1"]),
            row_from_strs(&["2", "3"]),
        ]);
        let reader = Reader::new(rows).unwrap();
        let items: Vec<_> = reader.records().collect();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Err(Error::FieldCount { .. })));
        assert_eq!(items[1].as_ref().unwrap().get("b").unwrap(), "3");
    }

    #[test]
    fn records_share_header() {
        let reader = Reader::new(people()).unwrap();
        let records = reader.read_all().unwrap();
        assert!(std::ptr::eq(records[0].header(), records[1].header()));
    }

    #[test]
    fn into_inner_returns_source() {
        let reader = Reader::new(people()).unwrap();
        reader.read().unwrap();
        let mut rows = reader.into_inner().unwrap();
        assert_eq!(
            rows.read_row().unwrap(),
            Some(row_from_strs(&["Giacobo", "Bardell"]))
        );
    }
}
