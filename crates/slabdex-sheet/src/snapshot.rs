//! JSONL snapshot tab store.
//!
//! A snapshot directory holds one file per sheet tab (`<Tab>.jsonl`).
//! Each line is a JSON array of string cells, one sheet row per line:
//!
//! ```text
//! ["B1","P1","10","","G"]
//! ["B1","P2","10","N",""]
//! ```
//!
//! A missing tab file reads as an empty tab; a malformed line is an
//! error with the offending line number for context.

use crate::error::{Error, Result};
use crate::range::RangeRef;
use crate::row::Row;
use crate::source::{RowSink, RowSource};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// File-backed tab store reading one JSONL snapshot per tab.
#[derive(Debug, Clone)]
pub struct JsonlTabSource {
    dir: PathBuf,
}

impl JsonlTabSource {
    /// Create a store over the given snapshot directory.
    ///
    /// The directory is not touched until the first read or append.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the snapshot file backing `tab`.
    #[must_use]
    pub fn tab_path(&self, tab: &str) -> PathBuf {
        self.dir.join(format!("{tab}.jsonl"))
    }

    /// Read every row of a tab, before any range windowing.
    async fn load_tab(&self, tab: &str) -> Result<Vec<Row>> {
        let path = self.tab_path(tab);
        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(tab, path = %path.display(), "tab snapshot missing, reading as empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut rows = Vec::new();
        let mut lines = BufReader::new(file).lines();
        let mut line_number = 0usize;
        while let Some(line) = lines.next_line().await? {
            line_number += 1;
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<String> =
                serde_json::from_str(&line).map_err(|err| Error::InvalidFormat {
                    tab: tab.to_string(),
                    line: line_number,
                    reason: err.to_string(),
                })?;
            rows.push(Row::new(cells));
        }
        tracing::debug!(tab, rows = rows.len(), "loaded tab snapshot");
        Ok(rows)
    }
}

#[async_trait]
impl RowSource for JsonlTabSource {
    async fn fetch_rows(&self, range: &RangeRef) -> Result<Vec<Row>> {
        let rows = self.load_tab(range.tab()).await?;
        Ok(range.window(&rows))
    }
}

#[async_trait]
impl RowSink for JsonlTabSource {
    async fn append_row(&self, tab: &str, row: Row) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.tab_path(tab))
            .await?;
        let mut line = serde_json::to_string(&row)?;
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        tracing::debug!(tab, cells = row.len(), "appended row to tab snapshot");
        Ok(())
    }
}
