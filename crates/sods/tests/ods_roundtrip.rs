//! End-to-end tests for ODS roundtrip (create -> save -> load -> verify cells)

use sods::prelude::*;
use std::io::{Cursor, Write};

use pretty_assertions::assert_eq;

fn demo_table() -> Table {
    let mut table = Table::new(12, 12);

    table.update_range("A1", |c| c.text("Hello")).unwrap();
    table
        .update_range("A1:G2", |c| c.background_color("#00ff00"))
        .unwrap();
    table
        .update_range("A2", |c| c.text("123.40").number(123.4))
        .unwrap();
    table
        .update_range("B2", |c| {
            c.text("2010-01-01")
                .value_type(ValueType::Date)
                .date_value(Some("2010-01-01"))
        })
        .unwrap();
    table
        .update_range("A3:D3", |c| c.border_top("1pt solid #ff0000"))
        .unwrap();
    table.update_range("C3", |c| c.text("Sum of cells:")).unwrap();
    table
        .update_range("D3", |c| {
            c.text("=SUM(C5:C8)")
                .formula(Some("=SUM(C5:C8)"))
                .value_type(ValueType::Float)
                .value(Some("10"))
        })
        .unwrap();
    table
        .update_range("C5:C8", |c| c.text("2.5").number(2.5))
        .unwrap();
    table
        .update_range("E5", |c| c.text("  spaced\tout\nlines  & <tags>"))
        .unwrap();
    table.update_range("F5", |c| c.text("TRUE").boolean(true)).unwrap();
    table
}

fn roundtrip(table: &mut Table) -> Table {
    let mut buf = Cursor::new(Vec::new());
    OdsWriter::write(table, &mut buf, &OdsWriteOptions::default()).unwrap();

    buf.set_position(0);
    let mut loaded = Table::default();
    OdsReader::read(buf, &mut loaded, &OdsReadOptions::default()).unwrap();
    loaded
}

/// Every cell in the saved extent comes back unchanged
#[test]
fn test_roundtrip_identity() {
    let mut table = demo_table();
    let loaded = roundtrip(&mut table);

    for row in 1..table.row_count() {
        for col in 1..table.col_count() {
            assert_eq!(
                loaded.cell_at(row, col),
                table.cell_at(row, col),
                "cell {}{}",
                column_name(col),
                row
            );
        }
    }
}

#[test]
fn test_roundtrip_values() {
    let mut table = demo_table();
    let loaded = roundtrip(&mut table);

    let a2 = loaded.cell("A2").unwrap();
    assert_eq!(a2.text(), "123.40");
    assert_eq!(a2.value(), Some("123.4"));
    assert_eq!(a2.value_type(), ValueType::Float);

    let b2 = loaded.cell("B2").unwrap();
    assert_eq!(b2.value_type(), ValueType::Date);
    assert_eq!(b2.date_value(), Some("2010-01-01"));
    assert_eq!(b2.value(), None);

    let d3 = loaded.cell("D3").unwrap();
    assert_eq!(d3.formula(), Some("=SUM(C5:C8)"));
    assert_eq!(d3.value(), Some("10"));

    let f5 = loaded.cell("F5").unwrap();
    assert_eq!(f5.value_type(), ValueType::Boolean);
    assert_eq!(f5.value(), Some("true"));
}

#[test]
fn test_roundtrip_text_whitespace_and_markup() {
    let mut table = demo_table();
    let loaded = roundtrip(&mut table);
    assert_eq!(
        loaded.cell("E5").unwrap().text(),
        "  spaced\tout\nlines  & <tags>"
    );
}

#[test]
fn test_shorthand_formula_promotion() {
    let mut table = Table::new(3, 3);
    table.update_range("A1", |c| c.text("!SUM(A1:A2)")).unwrap();
    let loaded = roundtrip(&mut table);

    let cell = loaded.cell("A1").unwrap();
    assert_eq!(cell.formula(), Some("!SUM(A1:A2)"));
    assert_eq!(cell.value_type(), ValueType::Float);
}

#[test]
fn test_unset_cells_load_as_defaults() {
    let mut table = demo_table();
    let loaded = roundtrip(&mut table);

    let k11 = loaded.cell("K11").unwrap();
    assert_eq!(k11, Cell::default());
    assert_eq!(k11.font_family(), "Arial");
    assert_eq!(k11.border_top(), "none");
}

#[test]
fn test_explicit_extent_limits_saved_cells() {
    let mut table = demo_table();
    let mut buf = Cursor::new(Vec::new());
    let options = OdsWriteOptions::default().with_extent(3, 3);
    OdsWriter::write(&mut table, &mut buf, &options).unwrap();

    buf.set_position(0);
    let mut loaded = Table::default();
    OdsReader::read(buf, &mut loaded, &OdsReadOptions::default()).unwrap();

    assert_eq!(loaded.len(), 4);
    assert_eq!(loaded.cell("A1").unwrap().text(), "Hello");
    assert!(loaded.get(3, 1).is_none());
}

#[test]
fn test_save_and_open_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.ods");

    let mut table = demo_table();
    table.save(&path).unwrap();

    let loaded = Table::open(&path).unwrap();
    assert_eq!(loaded.cell("A1").unwrap(), table.cell("A1").unwrap());
    assert_eq!(loaded.row_count(), 12);
    assert_eq!(loaded.col_count(), 12);
}

#[test]
fn test_save_with_extent_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.ods");

    let mut table = demo_table();
    table.save_with_extent(&path, 2, 2).unwrap();

    let loaded = Table::open(&path).unwrap();
    assert_eq!(loaded.len(), 1);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mut table = demo_table();
    assert!(matches!(
        table.save(dir.path().join("sample.xlsx")),
        Err(OdsError::InvalidFormat(_))
    ));
    assert!(matches!(
        Table::open(dir.path().join("sample.csv")),
        Err(OdsError::InvalidFormat(_))
    ));
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Table::open(dir.path().join("missing.ods")),
        Err(OdsError::Io(_))
    ));
}

#[test]
fn test_open_reports_missing_style() {
    let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0">
<office:body><office:spreadsheet><table:table table:name="Sheet1">
<table:table-row><table:table-cell table:style-name="ce9"><text:p>x</text:p></table:table-cell></table:table-row>
</table:table></office:spreadsheet></office:body></office:document-content>"#;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ods");
    let mut zip = zip::ZipWriter::new(std::fs::File::create(&path).unwrap());
    let stored = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(b"application/vnd.oasis.opendocument.spreadsheet")
        .unwrap();
    zip.start_file("content.xml", stored).unwrap();
    zip.write_all(content.as_bytes()).unwrap();
    zip.finish().unwrap();

    match Table::open(&path) {
        Err(OdsError::MissingStyle(name)) => assert_eq!(name, "ce9"),
        other => panic!("expected a missing style error, got {:?}", other.map(|t| t.len())),
    }
}
