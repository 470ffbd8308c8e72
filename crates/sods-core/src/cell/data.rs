//! The cell model: one grid position's value and appearance
//!
//! [`Cell`] is an immutable value object. Every attribute has a default, so
//! a fresh cell is fully specified; cells are created and changed through
//! [`CellBuilder`], which refuses inconsistent combinations.

use chrono::{NaiveDate, NaiveDateTime};

use super::ValueType;
use crate::error::{Error, Result};

/// Default font family
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
/// Default font size
pub const DEFAULT_FONT_SIZE: &str = "12pt";
/// Default text color
pub const DEFAULT_COLOR: &str = "#000000";
/// Background value meaning "no fill"
pub const DEFAULT_BACKGROUND: &str = "default";
/// Border value meaning "no border"
pub const NO_BORDER: &str = "none";

/// Prefix marking inline formula shorthand in a cell's text
pub const INLINE_FORMULA_PREFIX: char = '!';

/// Complete state of one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cell {
    text: String,
    value: Option<String>,
    value_type: ValueType,
    formula: Option<String>,
    date_value: Option<String>,
    font_family: String,
    font_size: String,
    color: String,
    background_color: String,
    border_top: String,
    border_bottom: String,
    border_left: String,
    border_right: String,
    condition: Option<String>,
    condition_color: String,
    condition_background_color: String,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            text: String::new(),
            value: None,
            value_type: ValueType::default(),
            formula: None,
            date_value: None,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
            color: DEFAULT_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND.to_string(),
            border_top: NO_BORDER.to_string(),
            border_bottom: NO_BORDER.to_string(),
            border_left: NO_BORDER.to_string(),
            border_right: NO_BORDER.to_string(),
            condition: None,
            condition_color: DEFAULT_COLOR.to_string(),
            condition_background_color: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl Cell {
    /// Create a default cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a cell from defaults
    pub fn builder() -> CellBuilder {
        CellBuilder::default()
    }

    /// Start building a modified copy of this cell
    pub fn to_builder(&self) -> CellBuilder {
        CellBuilder { cell: self.clone() }
    }

    /// Display text (unescaped)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw value payload (numeric string for float cells)
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Formula text, if any
    pub fn formula(&self) -> Option<&str> {
        self.formula.as_deref()
    }

    /// The formula, if it is a spreadsheet formula (starts with `=`)
    ///
    /// Inline shorthand formulas (`!...`) and other text stored in the
    /// formula slot return `None`.
    pub fn spreadsheet_formula(&self) -> Option<&str> {
        self.formula.as_deref().filter(|f| f.starts_with('='))
    }

    /// ISO date string; only set for date cells
    pub fn date_value(&self) -> Option<&str> {
        self.date_value.as_deref()
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> &str {
        &self.font_size
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Background color, `"default"` for no fill
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn border_top(&self) -> &str {
        &self.border_top
    }

    pub fn border_bottom(&self) -> &str {
        &self.border_bottom
    }

    pub fn border_left(&self) -> &str {
        &self.border_left
    }

    pub fn border_right(&self) -> &str {
        &self.border_right
    }

    /// Conditional formatting expression over the cell's own content
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    pub fn condition_color(&self) -> &str {
        &self.condition_color
    }

    pub fn condition_background_color(&self) -> &str {
        &self.condition_background_color
    }
}

/// Builder for [`Cell`]
///
/// `build()` enforces:
/// - a date cell has a `date_value` and no `value`;
/// - a non-date cell has no `date_value`;
/// - a `date_value` is an ISO date (`2010-01-01`) or date-time
///   (`2010-01-01T10:30:00`).
///
/// Text starting with `!` is inline formula shorthand: the built cell has
/// `formula == text` and a float value type.
///
/// # Example
///
/// ```rust
/// use sods_core::{Cell, ValueType};
///
/// let cell = Cell::builder()
///     .text("123.40")
///     .number(123.4)
///     .background_color("#00ff00")
///     .build()
///     .unwrap();
///
/// assert_eq!(cell.value_type(), ValueType::Float);
/// assert_eq!(cell.value(), Some("123.4"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CellBuilder {
    cell: Cell,
}

impl CellBuilder {
    pub fn text<S: Into<String>>(mut self, text: S) -> Self {
        self.cell.text = text.into();
        self
    }

    pub fn value<S: Into<String>>(mut self, value: Option<S>) -> Self {
        self.cell.value = value.map(Into::into);
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.cell.value_type = value_type;
        self
    }

    pub fn formula<S: Into<String>>(mut self, formula: Option<S>) -> Self {
        self.cell.formula = formula.map(Into::into);
        self
    }

    pub fn date_value<S: Into<String>>(mut self, date_value: Option<S>) -> Self {
        self.cell.date_value = date_value.map(Into::into);
        self
    }

    /// Make this a float cell holding `n`
    pub fn number(mut self, n: f64) -> Self {
        self.cell.value_type = ValueType::Float;
        self.cell.value = Some(n.to_string());
        self.cell.date_value = None;
        self
    }

    /// Make this a date cell holding `date`
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.cell.value_type = ValueType::Date;
        self.cell.date_value = Some(date.format("%Y-%m-%d").to_string());
        self.cell.value = None;
        self
    }

    /// Make this a boolean cell
    pub fn boolean(mut self, b: bool) -> Self {
        self.cell.value_type = ValueType::Boolean;
        self.cell.value = Some(b.to_string());
        self.cell.date_value = None;
        self
    }

    pub fn font_family<S: Into<String>>(mut self, family: S) -> Self {
        self.cell.font_family = family.into();
        self
    }

    pub fn font_size<S: Into<String>>(mut self, size: S) -> Self {
        self.cell.font_size = size.into();
        self
    }

    pub fn color<S: Into<String>>(mut self, color: S) -> Self {
        self.cell.color = color.into();
        self
    }

    pub fn background_color<S: Into<String>>(mut self, color: S) -> Self {
        self.cell.background_color = color.into();
        self
    }

    pub fn border_top<S: Into<String>>(mut self, border: S) -> Self {
        self.cell.border_top = border.into();
        self
    }

    pub fn border_bottom<S: Into<String>>(mut self, border: S) -> Self {
        self.cell.border_bottom = border.into();
        self
    }

    pub fn border_left<S: Into<String>>(mut self, border: S) -> Self {
        self.cell.border_left = border.into();
        self
    }

    pub fn border_right<S: Into<String>>(mut self, border: S) -> Self {
        self.cell.border_right = border.into();
        self
    }

    /// Set all four borders to the same value
    pub fn borders<S: Into<String>>(mut self, border: S) -> Self {
        let border = border.into();
        self.cell.border_top = border.clone();
        self.cell.border_bottom = border.clone();
        self.cell.border_left = border.clone();
        self.cell.border_right = border;
        self
    }

    pub fn condition<S: Into<String>>(mut self, condition: Option<S>) -> Self {
        self.cell.condition = condition.map(Into::into);
        self
    }

    pub fn condition_color<S: Into<String>>(mut self, color: S) -> Self {
        self.cell.condition_color = color.into();
        self
    }

    pub fn condition_background_color<S: Into<String>>(mut self, color: S) -> Self {
        self.cell.condition_background_color = color.into();
        self
    }

    /// Validate and produce the cell
    pub fn build(self) -> Result<Cell> {
        let mut cell = self.cell;

        if cell.text.starts_with(INLINE_FORMULA_PREFIX) {
            cell.formula = Some(cell.text.clone());
            cell.value_type = ValueType::Float;
            cell.date_value = None;
        }

        match (cell.value_type, &cell.date_value) {
            (ValueType::Date, None) => {
                return Err(Error::InvalidCell("date cell without a date value".into()));
            }
            (ValueType::Date, Some(date)) => {
                if cell.value.is_some() {
                    return Err(Error::InvalidCell(
                        "date cell carries both a value and a date value".into(),
                    ));
                }
                validate_date(date)?;
            }
            (other, Some(_)) => {
                return Err(Error::InvalidCell(format!(
                    "{} cell carries a date value",
                    other
                )));
            }
            (_, None) => {}
        }

        Ok(cell)
    }
}

/// Check that `s` is an ISO date or date-time
pub fn validate_date(s: &str) -> Result<()> {
    if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
    {
        Ok(())
    } else {
        Err(Error::InvalidDate(s.to_string()))
    }
}
