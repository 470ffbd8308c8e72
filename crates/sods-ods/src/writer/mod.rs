//! ODS writer

use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use sods_core::cell::{DEFAULT_COLOR, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, INLINE_FORMULA_PREFIX};
use sods_core::{Cell, DataStyleKind, Grid, StyleKey, ValueType};

use crate::document::{
    CellStyle, ColumnStyle, DataStyle, OdsDocument, StyleSheet, TableCell, TableColumn, TableRow,
    TextProperties,
};
use crate::error::OdsResult;
use crate::options::OdsWriteOptions;
use crate::package;
use crate::styles::{StyleCache, DATE_DATA_STYLE, NUMBER_DATA_STYLE};

/// Column style shared by every column
const COLUMN_STYLE: &str = "co1";
/// Common style columns fall back to
const DEFAULT_CELL_STYLE: &str = "Default";
/// Namespace marker written in front of formulas
const FORMULA_NAMESPACE: &str = "of:";

/// ODS file writer
pub struct OdsWriter;

impl OdsWriter {
    /// Write a grid to a file path
    ///
    /// The whole package is built in memory first; the file is only created
    /// once serialization has succeeded.
    pub fn write_file<G, P>(grid: &mut G, path: P, options: &OdsWriteOptions) -> OdsResult<()>
    where
        G: Grid + ?Sized,
        P: AsRef<Path>,
    {
        let mut buffer = Cursor::new(Vec::new());
        Self::write(grid, &mut buffer, options)?;
        fs::write(path, buffer.into_inner())?;
        Ok(())
    }

    /// Write a grid to a writer
    pub fn write<G, W>(grid: &mut G, writer: W, options: &OdsWriteOptions) -> OdsResult<()>
    where
        G: Grid + ?Sized,
        W: Write + Seek,
    {
        let mut cache = StyleCache::new();
        let doc = Self::build_document(grid, options, &mut cache);
        package::write_package(writer, &doc)?;
        Ok(())
    }

    /// Build the document for `grid` without serializing it
    ///
    /// Cells `1..rows` × `1..cols` are visited in row-major order. `cache` is
    /// reset first, so after the call it holds exactly the styles of this
    /// document.
    pub fn build_document<G>(
        grid: &mut G,
        options: &OdsWriteOptions,
        cache: &mut StyleCache,
    ) -> OdsDocument
    where
        G: Grid + ?Sized,
    {
        let rows = options.row_extent.unwrap_or_else(|| grid.row_count());
        let cols = options.col_extent.unwrap_or_else(|| grid.col_count());
        grid.update_table(rows, cols);
        cache.reset(&options.table_name);

        let mut doc = OdsDocument::new(options.table_name.as_str());
        add_default_styles(&mut doc.styles, options);

        for _ in 1..cols {
            doc.columns.push(TableColumn {
                style_name: Some(COLUMN_STYLE.to_string()),
                default_cell_style_name: Some(DEFAULT_CELL_STYLE.to_string()),
            });
        }

        for row in 1..rows {
            let mut table_row = TableRow::default();
            for col in 1..cols {
                let cell = grid.cell_at(row, col);
                let name = format!("{}{}", grid.encode_column_name(col), row);

                let data_style = DataStyleKind::for_cell(&cell);
                let key = StyleKey::with_data_style(&cell, data_style);
                let style_name = cache.intern(&mut doc.styles, &cell, &name, data_style, key);

                table_row.cells.push(table_cell(&cell, &name, style_name));
            }
            doc.rows.push(table_row);
        }

        log::debug!(
            "built table {:?}: {} rows, {} columns, {} cell styles",
            options.table_name,
            rows.saturating_sub(1),
            cols.saturating_sub(1),
            cache.len()
        );
        doc
    }
}

fn add_default_styles(styles: &mut StyleSheet, options: &OdsWriteOptions) {
    styles.add_column_style(ColumnStyle {
        name: COLUMN_STYLE.to_string(),
        width: options.column_width.clone(),
    });

    let mut default = CellStyle::new(DEFAULT_CELL_STYLE);
    default.text_properties = Some(TextProperties {
        color: Some(DEFAULT_COLOR.to_string()),
        font_size: Some(DEFAULT_FONT_SIZE.to_string()),
        font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
    });
    styles.add_common(default);

    styles.add_data_style(DataStyle::Number {
        name: NUMBER_DATA_STYLE.to_string(),
        decimal_places: 2,
        min_integer_digits: 1,
        grouping: true,
    });
    styles.add_data_style(DataStyle::Date {
        name: DATE_DATA_STYLE.to_string(),
    });
}

/// Document cell for one grid cell
///
/// A formula cell keeps its computed value next to the formula. Formulas
/// that do not start with `=` are not written as formulas at all; the cell
/// is saved by its value type like any other.
fn table_cell(cell: &Cell, name: &str, style_name: String) -> TableCell {
    let value_type = cell.value_type();
    let mut out = TableCell {
        value_type: Some(value_type.as_str().to_string()),
        style_name: Some(style_name),
        text: Some(cell.text().to_string()),
        ..Default::default()
    };

    if let Some(formula) = cell.spreadsheet_formula() {
        out.formula = Some(format!("{}{}", FORMULA_NAMESPACE, formula));
        match value_type {
            ValueType::Date => out.date_value = cell.date_value().map(str::to_string),
            ValueType::Boolean => {
                out.value = cell.value().map(str::to_string);
                out.boolean_value = cell.value().map(str::to_string);
            }
            ValueType::Float | ValueType::String => out.value = cell.value().map(str::to_string),
        }
        return out;
    }

    if let Some(formula) = cell.formula() {
        if !formula.starts_with(INLINE_FORMULA_PREFIX) {
            log::debug!(
                "{}: formula {:?} does not start with '=', saving the cell without it",
                name,
                formula
            );
        }
    }

    match value_type {
        ValueType::Date => out.date_value = cell.date_value().map(str::to_string),
        ValueType::Float => out.value = cell.value().map(str::to_string),
        ValueType::Boolean => out.boolean_value = cell.value().map(str::to_string),
        ValueType::String => {}
    }
    out
}
