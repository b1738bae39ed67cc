//! Fetch-then-filter search pipeline.
//!
//! One request, one pipeline: validate the query, fetch the configured
//! range from the row source, run the engine over the locally-owned
//! copy of the rows. Nothing is cached between requests and nothing is
//! written, so concurrent searches are fully independent.

use crate::engine::{self, ResultSet, SearchQuery};
use crate::error::{Error, Result};
use slabdex_sheet::{RangeRef, RowSource};
use std::sync::Arc;

/// Search service over a configured row source and data range.
pub struct SearchService {
    source: Arc<dyn RowSource>,
    range: RangeRef,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("range", &self.range)
            .field("source", &"<dyn RowSource>")
            .finish()
    }
}

impl SearchService {
    /// Create a service reading `range` from `source`.
    pub fn new(source: Arc<dyn RowSource>, range: RangeRef) -> Self {
        Self { source, range }
    }

    /// Run one search request end to end.
    ///
    /// The query is validated before the row source is contacted; a
    /// blank block number never reaches the backing store. Rows are
    /// re-fetched on every call.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidQuery`] when the block number is missing/blank
    /// - [`Error::DataUnavailable`] when the source fetch fails
    pub async fn search(&self, query: &SearchQuery) -> Result<ResultSet> {
        if query.block_no.trim().is_empty() {
            return Err(Error::InvalidQuery("Block number is required".to_string()));
        }

        tracing::debug!(block_no = %query.block_no, range = %self.range, "running sheet search");
        let rows = self.source.fetch_rows(&self.range).await?;
        tracing::debug!(rows = rows.len(), "fetched rows from source");

        let results = engine::search(&rows, query);
        tracing::debug!(
            matches = results.len(),
            fields = results.active_fields().len(),
            "search complete"
        );
        Ok(results)
    }
}
