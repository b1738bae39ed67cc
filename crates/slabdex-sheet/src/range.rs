//! A1-notation range references.
//!
//! Ranges name a tab plus a rectangular cell window, the way spreadsheet
//! APIs address data: `Data!A2:W` means "tab `Data`, columns A through W,
//! row 2 to the end of the tab". The end cell may carry a row number to
//! close the window (`Data!A2:W100`).

use crate::error::{Error, Result};
use crate::row::Row;
use std::fmt;
use std::str::FromStr;

/// A parsed A1-notation range reference.
///
/// Column and row bounds are stored 0-based and inclusive; `end_row` is
/// `None` for open-ended ranges that run to the end of the tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRef {
    tab: String,
    start_col: usize,
    start_row: usize,
    end_col: usize,
    end_row: Option<usize>,
}

impl RangeRef {
    /// The tab this range addresses.
    #[must_use]
    pub fn tab(&self) -> &str {
        &self.tab
    }

    /// Number of columns the range spans.
    #[must_use]
    pub fn width(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    /// Apply the range window to a full tab's rows.
    ///
    /// Rows outside the row window are dropped; each surviving row is
    /// narrowed to the column window. Cells are *not* padded out to the
    /// window width — a row that stops short stays short.
    #[must_use]
    pub fn window(&self, tab_rows: &[Row]) -> Vec<Row> {
        let end = match self.end_row {
            Some(end) => end.min(tab_rows.len().saturating_sub(1)),
            None => tab_rows.len().saturating_sub(1),
        };
        if tab_rows.is_empty() || self.start_row > end {
            return Vec::new();
        }
        tab_rows[self.start_row..=end]
            .iter()
            .map(|row| {
                let last = self.end_col.min(row.len().saturating_sub(1));
                if row.is_empty() || self.start_col > last {
                    Row::default()
                } else {
                    Row::new(row.0[self.start_col..=last].to_vec())
                }
            })
            .collect()
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!{}{}:{}",
            self.tab,
            col_name(self.start_col),
            self.start_row + 1,
            col_name(self.end_col),
        )?;
        if let Some(end_row) = self.end_row {
            write!(f, "{}", end_row + 1)?;
        }
        Ok(())
    }
}

impl FromStr for RangeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::MalformedRange(s.to_string());

        let (tab, cells) = s.split_once('!').ok_or_else(malformed)?;
        if tab.is_empty() {
            return Err(malformed());
        }
        let (start, end) = cells.split_once(':').ok_or_else(malformed)?;

        let (start_col, start_row) = parse_cell(start).ok_or_else(malformed)?;
        let start_row = start_row.ok_or_else(malformed)?;
        let (end_col, end_row) = parse_cell(end).ok_or_else(malformed)?;

        if end_col < start_col {
            return Err(malformed());
        }
        if let Some(end_row) = end_row
            && end_row < start_row
        {
            return Err(malformed());
        }

        Ok(Self {
            tab: tab.to_string(),
            start_col,
            start_row,
            end_col,
            end_row,
        })
    }
}

/// Parse a cell reference like `A2` or a bare column like `W`.
///
/// Returns the 0-based column index and, when present, the 0-based row.
fn parse_cell(cell: &str) -> Option<(usize, Option<usize>)> {
    let letters_len = cell.chars().take_while(char::is_ascii_alphabetic).count();
    if letters_len == 0 {
        return None;
    }
    let (letters, digits) = cell.split_at(letters_len);

    let mut col: usize = 0;
    for c in letters.chars() {
        col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    let col = col - 1;

    if digits.is_empty() {
        return Some((col, None));
    }
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((col, Some(row - 1)))
}

fn col_name(mut index: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name
}
