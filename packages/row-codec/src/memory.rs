//! In-memory row source and sink.

use std::collections::VecDeque;

use crate::{Row, RowError, RowReader, RowWriter};

/// Rows held in memory.
///
/// Reading pops from a queue of pending rows; writing appends to a list of
/// written rows. Handy for tests and for feeding rows produced elsewhere.
#[derive(Clone, Debug, Default)]
pub struct MemoryRows {
    pending: VecDeque<Row>,
    written: Vec<Row>,
    flushes: usize,
}

impl MemoryRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source that yields the given rows in order.
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            pending: rows.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Queue one more row for reading.
    pub fn push(&mut self, row: Row) {
        self.pending.push_back(row);
    }

    /// Rows written so far.
    pub fn written(&self) -> &[Row] {
        &self.written
    }

    /// Number of times `flush` was called.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn into_written(self) -> Vec<Row> {
        self.written
    }
}

impl RowReader for MemoryRows {
    fn read_row(&mut self) -> Result<Option<Row>, RowError> {
        Ok(self.pending.pop_front())
    }
}

impl RowWriter for MemoryRows {
    fn write_row(&mut self, row: &[String]) -> Result<(), RowError> {
        self.written.push(row.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RowError> {
        self.flushes += 1;
        Ok(())
    }
}
