//! Fixed column schema for the inventory sheet.
//!
//! The `Data` tab carries 23 positional columns, A through W. This table
//! is the single source of truth for row-to-record mapping and for the
//! mandatory minimum field set, so tracking a new attribute is a
//! one-line change here.

/// One column of the inventory sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Zero-based position within the fetched range.
    pub index: usize,
    /// Field name used in serialized records.
    pub name: &'static str,
    /// Whether the field is always emitted, even when empty across the
    /// whole result set.
    pub mandatory: bool,
}

/// Number of tracked columns.
pub const COLUMN_COUNT: usize = 23;

/// Position of the primary-key column (`blockNo`).
pub const BLOCK_NO: usize = 0;

/// Position of the `partNo` column.
pub const PART_NO: usize = 1;

/// Position of the `thickness` column.
pub const THICKNESS: usize = 2;

/// The inventory schema, in sheet column order.
pub const COLUMNS: [Column; COLUMN_COUNT] = [
    Column { index: 0, name: "blockNo", mandatory: true },
    Column { index: 1, name: "partNo", mandatory: true },
    Column { index: 2, name: "thickness", mandatory: true },
    Column { index: 3, name: "nos", mandatory: false },
    Column { index: 4, name: "grinding", mandatory: false },
    Column { index: 5, name: "netting", mandatory: false },
    Column { index: 6, name: "epoxy", mandatory: false },
    Column { index: 7, name: "polished", mandatory: false },
    Column { index: 8, name: "leather", mandatory: false },
    Column { index: 9, name: "lapotra", mandatory: false },
    Column { index: 10, name: "honed", mandatory: false },
    Column { index: 11, name: "shot", mandatory: false },
    Column { index: 12, name: "polR", mandatory: false },
    Column { index: 13, name: "bal", mandatory: false },
    Column { index: 14, name: "bSP", mandatory: false },
    Column { index: 15, name: "edge", mandatory: false },
    Column { index: 16, name: "meas", mandatory: false },
    Column { index: 17, name: "lCm", mandatory: false },
    Column { index: 18, name: "hCm", mandatory: false },
    Column { index: 19, name: "status", mandatory: false },
    Column { index: 20, name: "date", mandatory: false },
    Column { index: 21, name: "color1", mandatory: false },
    Column { index: 22, name: "color2", mandatory: false },
];

/// Look up a column by its serialized field name.
#[must_use]
pub fn column_by_name(name: &str) -> Option<&'static Column> {
    COLUMNS.iter().find(|column| column.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn indexes_match_positions() {
        for (position, column) in COLUMNS.iter().enumerate() {
            assert_eq!(column.index, position, "column {} out of place", column.name);
        }
    }

    #[test]
    fn field_names_are_unique() {
        let names: HashSet<_> = COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), COLUMN_COUNT);
    }

    #[test]
    fn mandatory_set_is_the_three_identifying_fields() {
        let mandatory: Vec<_> = COLUMNS.iter().filter(|c| c.mandatory).map(|c| c.name).collect();
        assert_eq!(mandatory, vec!["blockNo", "partNo", "thickness"]);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(column_by_name("color2").map(|c| c.index), Some(22));
        assert!(column_by_name("nope").is_none());
    }
}
