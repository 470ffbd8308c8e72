//! ODS options

/// Options for reading ODS files
#[derive(Debug, Clone, Default)]
pub struct OdsReadOptions {
    /// Stop expanding repeated cells past this column (default: no limit)
    ///
    /// Office suites pad rows with one cell repeated up to the sheet's last
    /// column; a limit keeps such padding out of the grid. Expansion never
    /// goes past [`sods_core::MAX_COLS`], with or without a limit.
    pub max_columns: Option<u32>,
}

/// Options for writing ODS files
#[derive(Debug, Clone)]
pub struct OdsWriteOptions {
    /// Exclusive row bound to save (default: the grid's row count)
    pub row_extent: Option<u32>,
    /// Exclusive column bound to save (default: the grid's column count)
    pub col_extent: Option<u32>,
    /// Name of the single table (default: "Sheet1")
    pub table_name: String,
    /// Width of every column (default: "2.8cm")
    pub column_width: String,
}

impl Default for OdsWriteOptions {
    fn default() -> Self {
        Self {
            row_extent: None,
            col_extent: None,
            table_name: "Sheet1".to_string(),
            column_width: "2.8cm".to_string(),
        }
    }
}

impl OdsWriteOptions {
    /// Save exactly `rows` × `cols` (both exclusive, 1-based)
    pub fn with_extent(mut self, rows: u32, cols: u32) -> Self {
        self.row_extent = Some(rows);
        self.col_extent = Some(cols);
        self
    }
}
