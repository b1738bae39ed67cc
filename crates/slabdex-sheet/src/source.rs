//! Row source and sink traits.
//!
//! These traits are the seam between domain code and whatever actually
//! holds the sheet: a remote spreadsheet API, a local snapshot directory,
//! or an in-memory fixture. They are async and object-safe so callers
//! can hold a `Arc<dyn TabStore>` regardless of the backend.

use crate::error::Result;
use crate::range::RangeRef;
use crate::row::Row;
use async_trait::async_trait;

/// Read access to a tabular store.
///
/// Implementations return everything within the requested range
/// verbatim, in sheet order, including rows with missing trailing cells.
/// No filtering happens at this layer.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Fetch all rows within `range`.
    ///
    /// A tab that does not exist reads as empty rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store is unreachable or holds
    /// data the implementation cannot decode.
    async fn fetch_rows(&self, range: &RangeRef) -> Result<Vec<Row>>;
}

/// Append access to a tabular store.
#[async_trait]
pub trait RowSink: Send + Sync {
    /// Append `row` after the last row of `tab`, creating the tab if it
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store rejects the write.
    async fn append_row(&self, tab: &str, row: Row) -> Result<()>;
}

/// Combined read and append access to a tabular store.
///
/// Blanket-implemented for every type that provides both halves, so a
/// single trait object can serve readers and writers alike.
pub trait TabStore: RowSource + RowSink {}

impl<T: RowSource + RowSink> TabStore for T {}
