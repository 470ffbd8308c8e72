//! Prelude module - common imports for sods users
//!
//! ```rust
//! use sods::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellAddress,
    CellBuilder,
    CellRange,
    ValueType,
    column_name,

    // Error types
    Error,
    Result,
    OdsError,
    OdsResult,

    // Main types
    Grid,
    Table,
    // Extension traits
    TableExt,

    // I/O types
    OdsReadOptions,
    OdsReader,
    OdsWriteOptions,
    OdsWriter,
};
