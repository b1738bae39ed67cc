//! Raw spreadsheet rows.

use serde::{Deserialize, Serialize};

/// An ordered sequence of string cells read from a tabular store.
///
/// Rows come back exactly as the store holds them: a row may stop short
/// of the full column span when its trailing cells were never filled in.
/// Accessors treat absent cells as missing rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub Vec<String>);

impl Row {
    /// Create a row from its cells.
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    /// Returns the cell at `index`, or `None` when the row stops short.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Number of cells present in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the row has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<&str>> for Row {
    fn from(cells: Vec<&str>) -> Self {
        cells.into_iter().collect()
    }
}
