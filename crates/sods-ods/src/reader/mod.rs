//! ODS reader

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use sods_core::cell::{validate_date, DEFAULT_BACKGROUND};
use sods_core::{Cell, CellBuilder, Grid, ValueType, MAX_COLS};

use crate::document::{parse_document, CellStyle, OdsDocument, StyleSheet, TableCell};
use crate::error::{OdsError, OdsResult};
use crate::normalize::{clean_formula, length_to_points, normalize_value_type, strip_formula_namespace};
use crate::options::OdsReadOptions;
use crate::package;

/// ODS file reader
pub struct OdsReader;

impl OdsReader {
    /// Read an ODS file into `grid`
    pub fn read_file<P, G>(path: P, grid: &mut G, options: &OdsReadOptions) -> OdsResult<()>
    where
        P: AsRef<Path>,
        G: Grid + ?Sized,
    {
        let file = File::open(path)?;
        Self::read(BufReader::new(file), grid, options)
    }

    /// Read an ODS package from a reader into `grid`
    ///
    /// Every cell is resolved before the first one is stored; when the
    /// document is unreadable or references an undefined style, `grid` is
    /// left as it was.
    pub fn read<R, G>(reader: R, grid: &mut G, options: &OdsReadOptions) -> OdsResult<()>
    where
        R: Read + Seek,
        G: Grid + ?Sized,
    {
        let doc = Self::read_document(reader)?;
        let cells = Self::resolve_cells(&doc, options)?;
        log::debug!(
            "read table {:?}: {} rows, {} cells",
            doc.table_name,
            doc.rows.len(),
            cells.len()
        );

        for (row, col, cell) in cells {
            grid.set_cell_at(row, col, cell);
        }
        Ok(())
    }

    /// Read the document tree of an ODS package
    pub fn read_document<R: Read + Seek>(reader: R) -> OdsResult<OdsDocument> {
        let parts = package::read_package(reader)?;
        parse_document(parts.styles.as_deref(), &parts.content)
    }

    /// Turn the table of `doc` into `(row, col, cell)` triples, 1-based
    ///
    /// Each row element counts as one row; row repetition is not expanded.
    /// A cell repeated `k` times yields `k` equal cells in consecutive
    /// columns, up to [`OdsReadOptions::max_columns`] or [`MAX_COLS`].
    pub fn resolve_cells(
        doc: &OdsDocument,
        options: &OdsReadOptions,
    ) -> OdsResult<Vec<(u32, u32, Cell)>> {
        let mut cells = Vec::new();
        let limit = options.max_columns.map_or(MAX_COLS, |max| max.min(MAX_COLS));

        for (i, row) in (1u32..).zip(&doc.rows) {
            let mut j = 1u32;
            for element in &row.cells {
                let repeat = repeat_count(element);
                let count = if j > limit {
                    0
                } else {
                    repeat.min(limit - j + 1)
                };

                if count > 0 {
                    let cell = Self::resolve_cell(element, &doc.styles)?;
                    for offset in 0..count {
                        cells.push((i, j + offset, cell.clone()));
                    }
                }
                j = j.saturating_add(repeat);
            }
        }

        Ok(cells)
    }

    /// Build the cell described by one document cell
    pub fn resolve_cell(element: &TableCell, styles: &StyleSheet) -> OdsResult<Cell> {
        let mut value_type = normalize_value_type(element.value_type.as_deref());
        let mut date_value = element.date_value.clone();
        let mut value = match value_type {
            ValueType::Boolean => element.boolean_value.clone().or_else(|| element.value.clone()),
            _ => element.value.clone(),
        };

        if value_type == ValueType::Date {
            match date_value.as_deref().map(validate_date) {
                Some(Ok(())) => {}
                Some(Err(_)) | None => {
                    log::warn!(
                        "date cell with date value {:?} read as string",
                        date_value
                    );
                    value_type = ValueType::String;
                    date_value = None;
                }
            }
        }
        if value_type == ValueType::Date && value.is_some() {
            log::warn!("dropping value {:?} of a date cell", value);
            value = None;
        }
        if value_type != ValueType::Date && date_value.is_some() {
            log::warn!("dropping date value {:?} of a {} cell", date_value, value_type);
            date_value = None;
        }

        let formula = element
            .formula
            .as_deref()
            .map(strip_formula_namespace)
            .and_then(clean_formula);

        let mut builder = Cell::builder()
            .text(element.text.clone().unwrap_or_default())
            .value_type(value_type)
            .value(value)
            .date_value(date_value)
            .formula(formula);

        if let Some(name) = &element.style_name {
            let style = styles
                .style(name)
                .ok_or_else(|| OdsError::MissingStyle(name.clone()))?;
            builder = apply_style(builder, style, styles)?;
        }

        Ok(builder.build()?)
    }
}

fn repeat_count(element: &TableCell) -> u32 {
    match element.repeat_count() {
        Some(n) => n,
        None => {
            if let Some(raw) = &element.columns_repeated {
                log::debug!("unusable column repeat count {:?}, using 1", raw);
            }
            1
        }
    }
}

/// Copy the properties of `style` onto `builder`
///
/// Properties the style does not define keep the builder's values. A
/// conditional map pulls its colors from the style it applies.
fn apply_style(
    mut builder: CellBuilder,
    style: &CellStyle,
    styles: &StyleSheet,
) -> OdsResult<CellBuilder> {
    if let Some(text) = &style.text_properties {
        if let Some(color) = &text.color {
            builder = builder.color(color.as_str());
        }
        if let Some(size) = text.font_size.as_deref().and_then(length_to_points) {
            builder = builder.font_size(size);
        }
        if let Some(family) = &text.font_family {
            builder = builder.font_family(family.as_str());
        }
    }

    if let Some(props) = &style.cell_properties {
        if let Some(background) = &props.background_color {
            builder = builder.background_color(fill(background));
        }
        if let Some(border) = props.top().and_then(length_to_points) {
            builder = builder.border_top(border);
        }
        if let Some(border) = props.bottom().and_then(length_to_points) {
            builder = builder.border_bottom(border);
        }
        if let Some(border) = props.left().and_then(length_to_points) {
            builder = builder.border_left(border);
        }
        if let Some(border) = props.right().and_then(length_to_points) {
            builder = builder.border_right(border);
        }
    }

    if let Some(map) = &style.map {
        let nested = styles
            .style(&map.apply_style_name)
            .ok_or_else(|| OdsError::MissingStyle(map.apply_style_name.clone()))?;

        builder = builder.condition(clean_formula(&map.condition));
        if let Some(color) = nested.text_properties.as_ref().and_then(|t| t.color.as_deref()) {
            builder = builder.condition_color(color);
        }
        if let Some(background) = nested
            .cell_properties
            .as_ref()
            .and_then(|p| p.background_color.as_deref())
        {
            builder = builder.condition_background_color(fill(background));
        }
    }

    Ok(builder)
}

/// Grid background for an ODS background color
///
/// `transparent` is what office suites write for an unfilled cell.
fn fill(color: &str) -> &str {
    if color.eq_ignore_ascii_case("transparent") {
        DEFAULT_BACKGROUND
    } else {
        color
    }
}
