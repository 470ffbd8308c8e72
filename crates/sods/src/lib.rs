//! # sods
//!
//! Load and save spreadsheet grids as ODS (OpenDocument Spreadsheet) files.
//!
//! A grid is a sparse table of [`Cell`]s addressed by 1-based row and
//! column. Each cell carries its text, typed value, formula, font, colors,
//! borders and one optional conditional format. Saving writes one ODS
//! table; loading reads the first table of an ODS file back.
//!
//! ## Example
//!
//! ```rust
//! use sods::prelude::*;
//!
//! let mut table = Table::new(12, 12);
//! table.update_range("A1", |c| c.text("Hello")).unwrap();
//! table.update_range("A1:G2", |c| c.background_color("#00ff00")).unwrap();
//! table.update_range("A2", |c| c.text("123.40").number(123.4)).unwrap();
//! table
//!     .update_range("D2", |c| {
//!         c.condition(Some("cell-content()<=100"))
//!             .condition_color("#00ff00")
//!             .condition_background_color("#ff0000")
//!     })
//!     .unwrap();
//!
//! // Save to file
//! // table.save("sample.ods").unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use sods_core::{
    column_name,
    Cell,
    CellAddress,
    CellBuilder,
    CellRange,
    // Style identity
    ConditionalKey,
    DataStyleKind,
    // Error types
    Error,
    // Grid contract and storage
    Grid,
    Result,
    StyleKey,
    Table,
    ValueType,

    MAX_COLS,
    MAX_ROWS,
};

// Re-export I/O types
pub use sods_ods::{
    OdsDocument, OdsError, OdsReadOptions, OdsReader, OdsResult, OdsWriteOptions, OdsWriter,
    StyleCache,
};

use std::path::Path;

/// Extension trait for Table to add file I/O
///
/// Failures keep their [`OdsError`] kind, so an unreadable package, a
/// reference to an undefined style and an I/O error stay distinguishable.
pub trait TableExt: Sized {
    /// Open a table from an ODS file
    fn open<P: AsRef<Path>>(path: P) -> OdsResult<Self>;

    /// Save the table's whole extent to an ODS file
    fn save<P: AsRef<Path>>(&mut self, path: P) -> OdsResult<()>;

    /// Save rows `1..rows` and columns `1..cols` to an ODS file
    fn save_with_extent<P: AsRef<Path>>(&mut self, path: P, rows: u32, cols: u32)
        -> OdsResult<()>;
}

impl TableExt for Table {
    fn open<P: AsRef<Path>>(path: P) -> OdsResult<Table> {
        let path = path.as_ref();
        check_extension(path)?;

        let mut table = Table::default();
        OdsReader::read_file(path, &mut table, &OdsReadOptions::default())?;
        Ok(table)
    }

    fn save<P: AsRef<Path>>(&mut self, path: P) -> OdsResult<()> {
        write_table(self, path.as_ref(), &OdsWriteOptions::default())
    }

    fn save_with_extent<P: AsRef<Path>>(
        &mut self,
        path: P,
        rows: u32,
        cols: u32,
    ) -> OdsResult<()> {
        write_table(
            self,
            path.as_ref(),
            &OdsWriteOptions::default().with_extent(rows, cols),
        )
    }
}

fn write_table(table: &mut Table, path: &Path, options: &OdsWriteOptions) -> OdsResult<()> {
    check_extension(path)?;
    OdsWriter::write_file(table, path, options)
}

fn check_extension(path: &Path) -> OdsResult<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("ods") => Ok(()),
        _ => Err(OdsError::InvalidFormat(format!(
            "Unsupported file format: {}",
            path.display()
        ))),
    }
}
