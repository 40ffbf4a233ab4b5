//! Core traits for the row layer.

use crate::RowError;

/// An owned row - an ordered sequence of string fields.
///
/// No validation is performed on the fields and no meaning is attached to
/// their positions at this level.
pub type Row = Vec<String>;

/// Read rows one at a time.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn RowReader>`.
pub trait RowReader: Send {
    /// Read the next row.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(row))` - The next row.
    /// * `Ok(None)` - End of stream (not an error condition).
    /// * `Err(RowError)` - A malformed row or a transport error.
    fn read_row(&mut self) -> Result<Option<Row>, RowError>;
}

/// Write rows one at a time.
///
/// Implementations may buffer; `flush` must surface any error that was
/// deferred by buffering.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn RowWriter>`.
pub trait RowWriter: Send {
    /// Write one row.
    fn write_row(&mut self, row: &[String]) -> Result<(), RowError>;

    /// Flush buffered rows to the underlying sink.
    fn flush(&mut self) -> Result<(), RowError>;
}

// Blanket implementations for references and boxes

impl<T: RowReader + ?Sized> RowReader for &mut T {
    fn read_row(&mut self) -> Result<Option<Row>, RowError> {
        (*self).read_row()
    }
}

impl<T: RowWriter + ?Sized> RowWriter for &mut T {
    fn write_row(&mut self, row: &[String]) -> Result<(), RowError> {
        (*self).write_row(row)
    }

    fn flush(&mut self) -> Result<(), RowError> {
        (*self).flush()
    }
}

impl<T: RowReader + ?Sized> RowReader for Box<T> {
    fn read_row(&mut self) -> Result<Option<Row>, RowError> {
        self.as_mut().read_row()
    }
}

impl<T: RowWriter + ?Sized> RowWriter for Box<T> {
    fn write_row(&mut self, row: &[String]) -> Result<(), RowError> {
        self.as_mut().write_row(row)
    }

    fn flush(&mut self) -> Result<(), RowError> {
        self.as_mut().flush()
    }
}
