//! Integration tests for the JSONL snapshot tab store.

use slabdex_sheet::{Error, JsonlTabSource, RangeRef, Row, RowSink, RowSource};
use tempfile::tempdir;

fn range(s: &str) -> RangeRef {
    s.parse().unwrap()
}

#[tokio::test]
async fn fetch_reads_rows_in_file_order() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("Data.jsonl"),
        "[\"B1\",\"P1\",\"10\"]\n[\"B2\",\"P2\",\"20\"]\n",
    )
    .unwrap();

    let source = JsonlTabSource::new(dir.path());
    let rows = source.fetch_rows(&range("Data!A1:C")).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].cell(0), Some("B1"));
    assert_eq!(rows[1].cell(0), Some("B2"));
}

#[tokio::test]
async fn fetch_applies_row_and_column_windows() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("Data.jsonl"),
        "[\"ID\",\"Part\",\"Thickness\"]\n[\"B1\",\"P1\",\"10\",\"spill\"]\n",
    )
    .unwrap();

    let source = JsonlTabSource::new(dir.path());
    let rows = source.fetch_rows(&range("Data!A2:C")).await.unwrap();

    assert_eq!(rows, vec![Row::from(vec!["B1", "P1", "10"])]);
}

#[tokio::test]
async fn missing_tab_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let source = JsonlTabSource::new(dir.path());

    let rows = source.fetch_rows(&range("Nope!A1:C")).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn short_rows_survive_verbatim() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("Data.jsonl"), "[\"B1\"]\n").unwrap();

    let source = JsonlTabSource::new(dir.path());
    let rows = source.fetch_rows(&range("Data!A1:W")).await.unwrap();

    assert_eq!(rows, vec![Row::from(vec!["B1"])]);
}

#[tokio::test]
async fn blank_lines_are_skipped() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("Data.jsonl"), "[\"B1\"]\n\n[\"B2\"]\n").unwrap();

    let source = JsonlTabSource::new(dir.path());
    let rows = source.fetch_rows(&range("Data!A1:A")).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn malformed_line_reports_its_position() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("Data.jsonl"),
        "[\"B1\"]\n{\"not\":\"an array\"}\n",
    )
    .unwrap();

    let source = JsonlTabSource::new(dir.path());
    let err = source.fetch_rows(&range("Data!A1:A")).await.unwrap_err();

    match err {
        Error::InvalidFormat { tab, line, .. } => {
            assert_eq!(tab, "Data");
            assert_eq!(line, 2);
        }
        other => panic!("expected InvalidFormat, got: {other}"),
    }
}

#[tokio::test]
async fn append_creates_the_tab_and_is_readable_back() {
    let dir = tempdir().unwrap();
    let source = JsonlTabSource::new(dir.path().join("sheets"));

    source
        .append_row("User", Row::from(vec!["1", "alice", "digest", "a@x.io"]))
        .await
        .unwrap();
    source
        .append_row("User", Row::from(vec!["2", "bob", "digest", "b@x.io"]))
        .await
        .unwrap();

    let rows = source.fetch_rows(&range("User!A1:D")).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].cell(1), Some("alice"));
    assert_eq!(rows[1].cell(1), Some("bob"));
}
