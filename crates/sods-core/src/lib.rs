//! # sods-core
//!
//! Core data structures for the sods spreadsheet library.
//!
//! This crate provides the fundamental types used throughout sods:
//! - [`Cell`] - One grid position's value, formula and styling
//! - [`StyleKey`] - The attributes that decide style sharing on save
//! - [`Grid`] - The cell storage contract readers and writers work against
//! - [`Table`] - An in-memory [`Grid`]
//!
//! ## Example
//!
//! ```rust
//! use sods_core::{Cell, Grid, Table};
//!
//! let mut table = Table::new(12, 12);
//!
//! let cell = Cell::builder().text("Hello").color("#ff0000").build().unwrap();
//! table.set_cell("A1", cell).unwrap();
//!
//! assert_eq!(table.cell_at(1, 1).text(), "Hello");
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod style;
pub mod table;

// Re-exports for convenience
pub use cell::{column_name, Cell, CellAddress, CellBuilder, CellRange, ValueType};
pub use error::{Error, Result};
pub use grid::Grid;
pub use style::{ConditionalKey, DataStyleKind, StyleKey};
pub use table::Table;

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u32 = 16_384;
