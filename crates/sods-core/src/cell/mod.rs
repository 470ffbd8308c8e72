//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Cell`] and [`CellBuilder`] - A cell's value and appearance
//! - [`ValueType`] - The type of value a cell holds
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")

mod address;
mod data;
mod value;

pub use address::{column_index, column_name, CellAddress, CellRange};
pub use data::{
    validate_date, Cell, CellBuilder, DEFAULT_BACKGROUND, DEFAULT_COLOR, DEFAULT_FONT_FAMILY,
    DEFAULT_FONT_SIZE, INLINE_FORMULA_PREFIX, NO_BORDER,
};
pub use value::ValueType;
