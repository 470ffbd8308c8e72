//! Typed OpenDocument spreadsheet tree
//!
//! Only the parts of an ODS package this crate reads or writes are modeled:
//! one table with its columns, rows and cells, and the named styles those
//! cells reference. Every attribute is an `Option`; interpreting a missing
//! or malformed value is up to the reader.

mod parse;
mod serialize;

pub(crate) use parse::parse_document;
pub(crate) use serialize::{content_xml, manifest_xml, meta_xml, styles_xml};

use ahash::AHashMap;

/// MIME type of an ODS package
pub const ODS_MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

/// Style family of cell styles
pub const CELL_FAMILY: &str = "table-cell";

/// An in-memory spreadsheet document
#[derive(Debug, Clone, Default)]
pub struct OdsDocument {
    /// Name of the table
    pub table_name: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
    pub styles: StyleSheet,
}

impl OdsDocument {
    /// Create an empty document with one table named `table_name`
    pub fn new<S: Into<String>>(table_name: S) -> Self {
        Self {
            table_name: table_name.into(),
            ..Default::default()
        }
    }
}

/// `table:table-column`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableColumn {
    pub style_name: Option<String>,
    pub default_cell_style_name: Option<String>,
}

/// `table:table-row`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// `table:table-cell` (or `table:covered-table-cell`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    /// `office:value-type`
    pub value_type: Option<String>,
    /// `table:formula`, namespace marker included
    pub formula: Option<String>,
    /// `office:value`
    pub value: Option<String>,
    /// `office:date-value`
    pub date_value: Option<String>,
    /// `office:boolean-value`
    pub boolean_value: Option<String>,
    /// `table:style-name`
    pub style_name: Option<String>,
    /// `table:number-columns-repeated`, as written
    pub columns_repeated: Option<String>,
    /// Text of the first paragraph, unescaped
    pub text: Option<String>,
}

impl TableCell {
    /// Parsed repeat count; `None` when absent or not a positive integer
    pub fn repeat_count(&self) -> Option<u32> {
        self.columns_repeated
            .as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
    }
}

/// `style:style`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyle {
    pub name: String,
    pub family: Option<String>,
    /// `style:data-style-name`
    pub data_style_name: Option<String>,
    pub text_properties: Option<TextProperties>,
    pub cell_properties: Option<CellProperties>,
    /// First `style:map` of the style
    pub map: Option<StyleMap>,
}

impl CellStyle {
    /// Create a cell style with no properties
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            family: Some(CELL_FAMILY.to_string()),
            ..Default::default()
        }
    }
}

/// `style:text-properties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextProperties {
    /// `fo:color`
    pub color: Option<String>,
    /// `fo:font-size`
    pub font_size: Option<String>,
    /// `fo:font-family`, or `style:font-name` when no family is given
    pub font_family: Option<String>,
}

/// `style:table-cell-properties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellProperties {
    /// `fo:background-color`
    pub background_color: Option<String>,
    /// `fo:border`, applying to every edge without its own value
    pub border: Option<String>,
    pub border_top: Option<String>,
    pub border_bottom: Option<String>,
    pub border_left: Option<String>,
    pub border_right: Option<String>,
}

impl CellProperties {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn top(&self) -> Option<&str> {
        self.border_top.as_deref().or(self.border.as_deref())
    }

    pub fn bottom(&self) -> Option<&str> {
        self.border_bottom.as_deref().or(self.border.as_deref())
    }

    pub fn left(&self) -> Option<&str> {
        self.border_left.as_deref().or(self.border.as_deref())
    }

    pub fn right(&self) -> Option<&str> {
        self.border_right.as_deref().or(self.border.as_deref())
    }
}

/// `style:map`: apply another style while `condition` holds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    /// `style:condition`
    pub condition: String,
    /// `style:apply-style-name`
    pub apply_style_name: String,
    /// `style:base-cell-address`
    pub base_cell_address: Option<String>,
}

/// Number display styles referenced through `style:data-style-name`
#[derive(Debug, Clone, PartialEq)]
pub enum DataStyle {
    /// `number:number-style`
    Number {
        name: String,
        decimal_places: u8,
        min_integer_digits: u8,
        grouping: bool,
    },
    /// `number:date-style` in long year-month-day form
    Date { name: String },
}

/// Automatic `table-column` style
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStyle {
    pub name: String,
    /// `style:column-width`
    pub width: String,
}

#[derive(Debug, Clone, Copy)]
enum StyleSlot {
    Common(usize),
    Automatic(usize),
}

/// All named styles of a document
///
/// Common styles live in `styles.xml`, automatic styles in `content.xml`.
/// Lookups by name search both; when a name is defined twice, the style
/// added last wins.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    common: Vec<CellStyle>,
    automatic: Vec<CellStyle>,
    data_styles: Vec<DataStyle>,
    column_styles: Vec<ColumnStyle>,
    index: AHashMap<String, StyleSlot>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a common (named, user-visible) style
    pub fn add_common(&mut self, style: CellStyle) {
        self.index
            .insert(style.name.clone(), StyleSlot::Common(self.common.len()));
        self.common.push(style);
    }

    /// Add an automatic style
    pub fn add_automatic(&mut self, style: CellStyle) {
        self.index
            .insert(style.name.clone(), StyleSlot::Automatic(self.automatic.len()));
        self.automatic.push(style);
    }

    pub fn add_data_style(&mut self, style: DataStyle) {
        self.data_styles.push(style);
    }

    pub fn add_column_style(&mut self, style: ColumnStyle) {
        self.column_styles.push(style);
    }

    /// Find a style by name
    pub fn style(&self, name: &str) -> Option<&CellStyle> {
        match self.index.get(name)? {
            StyleSlot::Common(i) => self.common.get(*i),
            StyleSlot::Automatic(i) => self.automatic.get(*i),
        }
    }

    pub fn common(&self) -> &[CellStyle] {
        &self.common
    }

    pub fn automatic(&self) -> &[CellStyle] {
        &self.automatic
    }

    pub fn data_styles(&self) -> &[DataStyle] {
        &self.data_styles
    }

    pub fn column_styles(&self) -> &[ColumnStyle] {
        &self.column_styles
    }

    /// Number of cell styles, common and automatic
    pub fn len(&self) -> usize {
        self.common.len() + self.automatic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_count() {
        let mut cell = TableCell::default();
        assert_eq!(cell.repeat_count(), None);
        cell.columns_repeated = Some("3".into());
        assert_eq!(cell.repeat_count(), Some(3));
        cell.columns_repeated = Some("x".into());
        assert_eq!(cell.repeat_count(), None);
        cell.columns_repeated = Some("0".into());
        assert_eq!(cell.repeat_count(), None);
    }

    #[test]
    fn test_style_lookup() {
        let mut sheet = StyleSheet::new();
        sheet.add_common(CellStyle::new("cnsA1"));
        sheet.add_automatic(CellStyle::new("A1"));

        assert_eq!(sheet.style("A1").map(|s| s.name.as_str()), Some("A1"));
        assert_eq!(sheet.style("cnsA1").map(|s| s.name.as_str()), Some("cnsA1"));
        assert!(sheet.style("B1").is_none());
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn test_border_shorthand() {
        let props = CellProperties {
            border: Some("1pt solid #000000".into()),
            border_left: Some("none".into()),
            ..Default::default()
        };
        assert_eq!(props.top(), Some("1pt solid #000000"));
        assert_eq!(props.left(), Some("none"));
        assert!(!props.is_empty());
        assert!(CellProperties::default().is_empty());
    }
}
