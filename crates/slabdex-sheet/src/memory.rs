//! In-memory tab store.
//!
//! Backs tests and embedded usage where no snapshot directory or remote
//! store is available.

use crate::error::Result;
use crate::range::RangeRef;
use crate::row::Row;
use crate::source::{RowSink, RowSource};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Ephemeral tab store backed by a map of tab name to rows.
///
/// # Example
///
/// ```
/// use slabdex_sheet::{MemorySource, Row, RowSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> slabdex_sheet::Result<()> {
/// let source = MemorySource::new().with_tab(
///     "Data",
///     vec![Row::from(vec!["B1", "P1", "10"])],
/// );
/// let rows = source.fetch_rows(&"Data!A1:C".parse()?).await?;
/// assert_eq!(rows.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemorySource {
    tabs: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemorySource {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper that seeds a tab with rows.
    #[must_use]
    pub fn with_tab(mut self, tab: impl Into<String>, rows: Vec<Row>) -> Self {
        self.tabs.get_mut().insert(tab.into(), rows);
        self
    }

    /// Replace the contents of a tab.
    pub async fn set_tab(&self, tab: impl Into<String>, rows: Vec<Row>) {
        self.tabs.write().await.insert(tab.into(), rows);
    }
}

#[async_trait]
impl RowSource for MemorySource {
    async fn fetch_rows(&self, range: &RangeRef) -> Result<Vec<Row>> {
        let tabs = self.tabs.read().await;
        let rows = tabs.get(range.tab()).map(Vec::as_slice).unwrap_or(&[]);
        Ok(range.window(rows))
    }
}

#[async_trait]
impl RowSink for MemorySource {
    async fn append_row(&self, tab: &str, row: Row) -> Result<()> {
        self.tabs
            .write()
            .await
            .entry(tab.to_string())
            .or_default()
            .push(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_tab_reads_as_empty() {
        let source = MemorySource::new();
        let rows = source.fetch_rows(&"Ghost!A1:B".parse().unwrap()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn appended_rows_are_visible_to_fetches() {
        let source = MemorySource::new();
        source
            .append_row("Data", Row::from(vec!["B1", "P1"]))
            .await
            .unwrap();
        source
            .append_row("Data", Row::from(vec!["B2", "P2"]))
            .await
            .unwrap();

        let rows = source.fetch_rows(&"Data!A1:B".parse().unwrap()).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cell(0), Some("B2"));
    }

    #[tokio::test]
    async fn fetch_applies_the_range_window() {
        let source = MemorySource::new().with_tab(
            "Data",
            vec![
                Row::from(vec!["header", "row"]),
                Row::from(vec!["B1", "P1", "10"]),
            ],
        );
        let rows = source.fetch_rows(&"Data!A2:B".parse().unwrap()).await.unwrap();
        assert_eq!(rows, vec![Row::from(vec!["B1", "P1"])]);
    }
}
