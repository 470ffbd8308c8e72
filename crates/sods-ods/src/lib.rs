//! # sods-ods
//!
//! ODS (OpenDocument Spreadsheet) reader and writer for sods.
//!
//! A save visits every cell of the grid's extent, gives each distinct
//! appearance one named style and writes a single-table package. A load
//! reads the first table back into a grid, resolving each cell's style
//! into plain cell attributes.
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use sods_core::{Grid, Table};
//! use sods_ods::{OdsReadOptions, OdsReader, OdsWriteOptions, OdsWriter};
//!
//! let mut table = Table::new(3, 3);
//! table.update_range("A1:B2", |c| c.background_color("#00ff00")).unwrap();
//!
//! let mut buf = Cursor::new(Vec::new());
//! OdsWriter::write(&mut table, &mut buf, &OdsWriteOptions::default()).unwrap();
//!
//! let mut loaded = Table::default();
//! buf.set_position(0);
//! OdsReader::read(buf, &mut loaded, &OdsReadOptions::default()).unwrap();
//! assert_eq!(loaded.cell_at(2, 2).background_color(), "#00ff00");
//! ```

pub mod document;
pub mod error;
pub mod normalize;
pub mod options;
pub mod reader;
pub mod styles;
pub mod writer;

mod package;

pub use document::OdsDocument;
pub use error::{OdsError, OdsResult};
pub use options::{OdsReadOptions, OdsWriteOptions};
pub use reader::OdsReader;
pub use styles::StyleCache;
pub use writer::OdsWriter;
