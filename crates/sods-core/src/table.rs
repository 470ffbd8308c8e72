//! In-memory grid

use ahash::AHashMap;

use crate::cell::{Cell, CellAddress, CellBuilder, CellRange};
use crate::error::Result;
use crate::grid::Grid;

/// A sparse single-sheet grid
///
/// Only cells that have been set are stored; every other position reads as
/// [`Cell::default()`].
///
/// # Example
///
/// ```rust
/// use sods_core::{Grid, Table};
///
/// let mut table = Table::new(12, 12);
/// table
///     .update_range("A1:G2", |c| c.background_color("#00ff00"))
///     .unwrap();
/// table.update_range("A2", |c| c.text("123.4").number(123.4)).unwrap();
///
/// assert_eq!(table.cell("B1").unwrap().background_color(), "#00ff00");
/// assert_eq!(table.cell_at(2, 1).value(), Some("123.4"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    cells: AHashMap<(u32, u32), Cell>,
    row_count: u32,
    col_count: u32,
}

impl Table {
    /// Create an empty table covering rows `1..row_count` and columns `1..col_count`
    pub fn new(row_count: u32, col_count: u32) -> Self {
        Self {
            cells: AHashMap::new(),
            row_count,
            col_count,
        }
    }

    /// Stored cell at `(row, col)`, if one was set
    pub fn get(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Cell by A1 address
    pub fn cell(&self, address: &str) -> Result<Cell> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Replace a cell by A1 address
    pub fn set_cell(&mut self, address: &str, cell: Cell) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_at(addr.row, addr.col, cell);
        Ok(())
    }

    /// Rebuild every cell in `range` through `f`
    ///
    /// All cells are rebuilt before any is stored, so a validation error
    /// leaves the table unchanged.
    pub fn update_range<F>(&mut self, range: &str, mut f: F) -> Result<()>
    where
        F: FnMut(CellBuilder) -> CellBuilder,
    {
        let range = CellRange::parse(range)?;
        let updated = range
            .cells()
            .map(|addr| {
                let cell = f(self.cell_at(addr.row, addr.col).to_builder()).build()?;
                Ok((addr, cell))
            })
            .collect::<Result<Vec<_>>>()?;

        for (addr, cell) in updated {
            self.set_cell_at(addr.row, addr.col, cell);
        }
        Ok(())
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        let mut keys: Vec<_> = self.cells.keys().copied().collect();
        keys.sort_unstable();
        keys.into_iter()
            .filter_map(move |(row, col)| self.cells.get(&(row, col)).map(|c| (row, col, c)))
    }
}

impl Grid for Table {
    fn cell_at(&self, row: u32, col: u32) -> Cell {
        self.cells.get(&(row, col)).cloned().unwrap_or_default()
    }

    fn set_cell_at(&mut self, row: u32, col: u32, cell: Cell) {
        self.row_count = self.row_count.max(row.saturating_add(1));
        self.col_count = self.col_count.max(col.saturating_add(1));
        self.cells.insert((row, col), cell);
    }

    fn update_table(&mut self, rows: u32, cols: u32) {
        self.row_count = self.row_count.max(rows);
        self.col_count = self.col_count.max(cols);
    }

    fn row_count(&self) -> u32 {
        self.row_count
    }

    fn col_count(&self) -> u32 {
        self.col_count
    }
}
