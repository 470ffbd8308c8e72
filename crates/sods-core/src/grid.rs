//! The grid collaborator consumed by readers and writers

use crate::cell::{column_name, Cell};

/// Cell storage addressed by 1-based row and column
///
/// `row_count` and `col_count` are exclusive upper bounds: a grid with
/// `row_count() == 3` holds rows 1 and 2. Writers visit
/// `1..row_count` × `1..col_count`.
pub trait Grid {
    /// The cell at `(row, col)`; unset positions read as a default cell
    fn cell_at(&self, row: u32, col: u32) -> Cell;

    /// Replace the cell at `(row, col)`
    fn set_cell_at(&mut self, row: u32, col: u32, cell: Cell);

    /// Column letters for a 1-based column (1 → "A", 27 → "AA")
    fn encode_column_name(&self, col: u32) -> String {
        column_name(col)
    }

    /// Refresh hook called before a save covering `rows` × `cols`
    fn update_table(&mut self, _rows: u32, _cols: u32) {}

    /// Exclusive upper bound of used rows
    fn row_count(&self) -> u32;

    /// Exclusive upper bound of used columns
    fn col_count(&self) -> u32;
}
