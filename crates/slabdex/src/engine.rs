//! The filter-project engine.
//!
//! Given raw sheet rows and a query, the engine produces the records
//! that match and decides which fields the response carries. It runs in
//! two explicit passes:
//!
//! 1. **Filter and materialize**: drop rows without a block number,
//!    keep rows matching every supplied key (case-insensitively), and
//!    map each survivor positionally into a full [`Record`] with one
//!    value per schema column (missing cells become empty strings).
//! 2. **Prune**: compute the active field set — the mandatory fields
//!    plus every field that is non-blank in at least one record — and
//!    project all records down to it when serializing.
//!
//! Pruning is computed over the *entire* result set, not per record: a
//! field with data in any one matching row stays present (as an empty
//! string where absent) in every record of the response, and a field
//! blank everywhere is dropped from every record outright. Record shape
//! therefore varies per response. That is observable product behavior
//! and must not be "fixed" into a static shape.

use crate::schema::{BLOCK_NO, COLUMN_COUNT, COLUMNS, PART_NO, THICKNESS, column_by_name};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use slabdex_sheet::Row;

/// A search query: required block number plus optional narrowing keys.
///
/// Absent secondary keys impose no constraint. All matching is
/// case-insensitive, but matched values are emitted verbatim from the
/// sheet, never normalized to the query's casing.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Block number to match (required, case-insensitive).
    pub block_no: String,
    /// Optional part number to narrow by.
    pub part_no: Option<String>,
    /// Optional thickness to narrow by.
    pub thickness: Option<String>,
}

impl SearchQuery {
    /// Create a query matching a block number alone.
    pub fn new(block_no: impl Into<String>) -> Self {
        Self {
            block_no: block_no.into(),
            ..Self::default()
        }
    }

    /// Narrow the query by part number.
    #[must_use]
    pub fn with_part_no(mut self, part_no: impl Into<String>) -> Self {
        self.part_no = Some(part_no.into());
        self
    }

    /// Narrow the query by thickness.
    #[must_use]
    pub fn with_thickness(mut self, thickness: impl Into<String>) -> Self {
        self.thickness = Some(thickness.into());
        self
    }
}

/// A fully materialized record: one value per schema column, in column
/// order. Cells the source row never had are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: Vec<String>,
}

impl Record {
    fn from_row(row: &Row) -> Self {
        let values = COLUMNS
            .iter()
            .map(|column| row.cell(column.index).unwrap_or_default().to_string())
            .collect();
        Self { values }
    }

    /// Value of the field with the given name, if it is a schema field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        column_by_name(name).map(|column| self.values[column.index].as_str())
    }

    fn value(&self, index: usize) -> &str {
        &self.values[index]
    }
}

/// The outcome of a search: matching records in source order, plus the
/// active field set they are projected down to when serialized.
#[derive(Debug, Clone)]
pub struct ResultSet {
    records: Vec<Record>,
    active: [bool; COLUMN_COUNT],
}

impl ResultSet {
    /// Records that matched, in the order they appear in the sheet.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of matching records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the named field survives projection for this result set.
    #[must_use]
    pub fn is_active(&self, name: &str) -> bool {
        column_by_name(name).is_some_and(|column| self.active[column.index])
    }

    /// Names of the fields that survive projection, in column order.
    #[must_use]
    pub fn active_fields(&self) -> Vec<&'static str> {
        COLUMNS
            .iter()
            .filter(|column| self.active[column.index])
            .map(|column| column.name)
            .collect()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in &self.records {
            seq.serialize_element(&Projected {
                record,
                active: &self.active,
            })?;
        }
        seq.end()
    }
}

/// One record narrowed to the result set's active fields. Inactive
/// fields are absent from the output object, not blanked.
struct Projected<'a> {
    record: &'a Record,
    active: &'a [bool; COLUMN_COUNT],
}

impl Serialize for Projected<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.active.iter().filter(|a| **a).count();
        let mut map = serializer.serialize_map(Some(len))?;
        for column in &COLUMNS {
            if self.active[column.index] {
                map.serialize_entry(column.name, self.record.value(column.index))?;
            }
        }
        map.end()
    }
}

/// Case-folded equality, matching the sheet's loose data entry habits.
fn eq_fold(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Whether a row survives the filter pass.
///
/// A row with no block number is not data, regardless of the query.
fn matches(row: &Row, query: &SearchQuery) -> bool {
    let Some(block_no) = row.cell(BLOCK_NO).filter(|cell| !cell.is_empty()) else {
        return false;
    };
    if !eq_fold(block_no, &query.block_no) {
        return false;
    }
    let secondary = [
        (PART_NO, query.part_no.as_deref()),
        (THICKNESS, query.thickness.as_deref()),
    ];
    secondary.iter().all(|(index, wanted)| match wanted {
        None => true,
        Some(wanted) => eq_fold(row.cell(*index).unwrap_or_default(), wanted),
    })
}

/// Run the filter-project pipeline over `rows`.
///
/// Empty input and zero matches both produce an empty [`ResultSet`];
/// the engine itself never fails.
#[must_use]
pub fn search(rows: &[Row], query: &SearchQuery) -> ResultSet {
    // Pass one: filter and materialize full records in source order.
    let records: Vec<Record> = rows
        .iter()
        .filter(|row| matches(row, query))
        .map(Record::from_row)
        .collect();

    // Pass two: a field is active when mandatory or non-blank somewhere.
    let mut active = [false; COLUMN_COUNT];
    for column in &COLUMNS {
        if column.mandatory {
            active[column.index] = true;
        }
    }
    for record in &records {
        for column in &COLUMNS {
            if !active[column.index] && !record.value(column.index).trim().is_empty() {
                active[column.index] = true;
            }
        }
    }

    ResultSet { records, active }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    fn row(cells: &[&str]) -> Row {
        cells.iter().copied().collect()
    }

    fn as_json(results: &ResultSet) -> Value {
        serde_json::to_value(results).unwrap()
    }

    #[test]
    fn empty_input_yields_empty_results() {
        let results = search(&[], &SearchQuery::new("B1"));
        assert!(results.is_empty());
    }

    #[test]
    fn no_match_yields_empty_results() {
        let rows = vec![row(&["B2", "P1", "10"])];
        let results = search(&rows, &SearchQuery::new("B1"));
        assert!(results.is_empty());
    }

    #[test]
    fn rows_without_a_block_number_are_never_data() {
        let rows = vec![
            row(&["", "P1", "10"]),
            row(&[]),
            row(&["B1", "P1", "10"]),
        ];
        let results = search(&rows, &SearchQuery::new("B1"));
        assert_eq!(results.len(), 1);
        assert_eq!(results.records()[0].get("partNo"), Some("P1"));
    }

    #[rstest]
    #[case("A1", "a1")]
    #[case("a1", "A1")]
    #[case("bL-7", "Bl-7")]
    fn matching_is_case_insensitive(#[case] stored: &str, #[case] queried: &str) {
        let rows = vec![row(&[stored, "P1", "10"])];
        let results = search(&rows, &SearchQuery::new(queried));
        assert_eq!(results.len(), 1);
        // The stored value is emitted verbatim, not the query's casing.
        assert_eq!(results.records()[0].get("blockNo"), Some(stored));
    }

    #[test]
    fn supplied_secondary_keys_constrain() {
        let rows = vec![
            row(&["B1", "P1", "10"]),
            row(&["B1", "P2", "10"]),
            row(&["B1", "P2", "20"]),
        ];

        let by_part = search(&rows, &SearchQuery::new("b1").with_part_no("p2"));
        assert_eq!(by_part.len(), 2);

        let by_both = search(
            &rows,
            &SearchQuery::new("b1").with_part_no("p2").with_thickness("20"),
        );
        assert_eq!(by_both.len(), 1);
        assert_eq!(by_both.records()[0].get("thickness"), Some("20"));
    }

    #[test]
    fn absent_secondary_keys_impose_no_constraint() {
        let rows = vec![row(&["B1", "P1", "10"]), row(&["B1", "P2", "20"])];
        let results = search(&rows, &SearchQuery::new("B1"));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn secondary_key_matching_nothing_among_block_matches_is_empty() {
        let rows = vec![row(&["B1", "P1", "10"]), row(&["B1", "P2", "10"])];
        let results = search(&rows, &SearchQuery::new("B1").with_part_no("P9"));
        assert!(results.is_empty());
    }

    #[test]
    fn result_order_follows_source_order() {
        let rows = vec![
            row(&["B1", "P3", "30"]),
            row(&["B2", "xx", "xx"]),
            row(&["B1", "P1", "10"]),
            row(&["B1", "P2", "20"]),
        ];
        let results = search(&rows, &SearchQuery::new("B1"));
        let parts: Vec<_> = results
            .records()
            .iter()
            .map(|r| r.get("partNo").unwrap().to_string())
            .collect();
        assert_eq!(parts, vec!["P3", "P1", "P2"]);
    }

    #[test]
    fn missing_trailing_cells_become_empty_strings() {
        let rows = vec![row(&["B1", "P1"])];
        let results = search(&rows, &SearchQuery::new("B1"));
        let record = &results.records()[0];
        assert_eq!(record.get("thickness"), Some(""));
        assert_eq!(record.get("color2"), Some(""));
    }

    #[test]
    fn fields_blank_everywhere_are_dropped_from_the_output() {
        let rows = vec![row(&["B1", "P1", "10", "", "G"])];
        let results = search(&rows, &SearchQuery::new("B1"));

        assert!(results.is_active("grinding"));
        assert!(!results.is_active("nos"));
        assert!(!results.is_active("color2"));

        let json = as_json(&results);
        let record = json[0].as_object().unwrap();
        assert!(record.contains_key("grinding"));
        assert!(!record.contains_key("nos"));
        assert!(!record.contains_key("color2"));
    }

    #[test]
    fn a_field_active_anywhere_is_present_everywhere() {
        // First row has grinding only, second has nos only. Both fields
        // must appear in both output records, empty where absent.
        let rows = vec![row(&["B1", "P1", "10", "", "G"]), row(&["B1", "P2", "10", "N", ""])];
        let results = search(&rows, &SearchQuery::new("b1"));
        assert_eq!(results.len(), 2);

        let json = as_json(&results);
        for record in json.as_array().unwrap() {
            let record = record.as_object().unwrap();
            assert!(record.contains_key("blockNo"));
            assert!(record.contains_key("partNo"));
            assert!(record.contains_key("thickness"));
            assert!(record.contains_key("nos"));
            assert!(record.contains_key("grinding"));
        }
        assert_eq!(json[0]["nos"], "");
        assert_eq!(json[0]["grinding"], "G");
        assert_eq!(json[1]["nos"], "N");
        assert_eq!(json[1]["grinding"], "");
    }

    #[test]
    fn whitespace_only_cells_do_not_activate_a_field() {
        let rows = vec![row(&["B1", "P1", "10", "   "])];
        let results = search(&rows, &SearchQuery::new("B1"));
        assert!(!results.is_active("nos"));
    }

    #[test]
    fn mandatory_fields_survive_even_when_blank_everywhere() {
        let rows = vec![row(&["B1"])];
        let results = search(&rows, &SearchQuery::new("B1"));
        let json = as_json(&results);
        let record = json[0].as_object().unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(record["blockNo"], "B1");
        assert_eq!(record["partNo"], "");
        assert_eq!(record["thickness"], "");
    }

    #[test]
    fn empty_query_matches_no_rows() {
        // Rows need a block number to be data, and an empty query never
        // equals a non-empty cell.
        let rows = vec![row(&["B1", "P1", "10"]), row(&["", "P2", "10"])];
        let results = search(&rows, &SearchQuery::new(""));
        assert!(results.is_empty());
    }
}
