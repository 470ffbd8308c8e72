//! Structural style identity key

use crate::cell::{Cell, ValueType};

/// Which data (number display) style a cell style references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataStyleKind {
    /// Two decimals, thousands grouping
    Number,
    /// Long year-month-day
    Date,
}

impl DataStyleKind {
    /// Data style for a cell: date styling for date cells, numeric otherwise
    pub fn for_cell(cell: &Cell) -> Self {
        match cell.value_type() {
            ValueType::Date => DataStyleKind::Date,
            _ => DataStyleKind::Number,
        }
    }
}

/// Conditional formatting part of a [`StyleKey`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConditionalKey {
    pub condition: String,
    pub color: String,
    pub background_color: String,
}

/// Everything that distinguishes one emitted cell style from another
///
/// Two cells with equal keys resolve to the same style definition. The key
/// is compared field by field, so attribute values can never run into each
/// other the way concatenated strings can.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey {
    pub data_style: DataStyleKind,
    pub color: String,
    pub font_size: String,
    pub font_family: String,
    pub background_color: String,
    pub border_top: String,
    pub border_bottom: String,
    pub border_left: String,
    pub border_right: String,
    /// Present only when the cell has a condition
    pub conditional: Option<ConditionalKey>,
}

impl StyleKey {
    /// Build the key for `cell` using the data style it would be saved with
    pub fn from_cell(cell: &Cell) -> Self {
        Self::with_data_style(cell, DataStyleKind::for_cell(cell))
    }

    /// Build the key for `cell` with an explicit data style
    pub fn with_data_style(cell: &Cell, data_style: DataStyleKind) -> Self {
        Self {
            data_style,
            color: cell.color().to_string(),
            font_size: cell.font_size().to_string(),
            font_family: cell.font_family().to_string(),
            background_color: cell.background_color().to_string(),
            border_top: cell.border_top().to_string(),
            border_bottom: cell.border_bottom().to_string(),
            border_left: cell.border_left().to_string(),
            border_right: cell.border_right().to_string(),
            conditional: cell.condition().map(|condition| ConditionalKey {
                condition: condition.to_string(),
                color: cell.condition_color().to_string(),
                background_color: cell.condition_background_color().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_appearance_equal_key() {
        let a = Cell::builder().text("a").background_color("#00ff00").build().unwrap();
        let b = Cell::builder().text("b").number(3.0).background_color("#00ff00").build().unwrap();
        assert_eq!(StyleKey::from_cell(&a), StyleKey::from_cell(&b));
    }

    #[test]
    fn test_any_attribute_changes_key() {
        let base = Cell::default();
        let key = StyleKey::from_cell(&base);

        let variants = [
            base.to_builder().color("#ff0000"),
            base.to_builder().font_size("14pt"),
            base.to_builder().font_family("Courier"),
            base.to_builder().background_color("#ffff00"),
            base.to_builder().border_top("1pt solid #000000"),
            base.to_builder().border_bottom("1pt solid #000000"),
            base.to_builder().border_left("1pt solid #000000"),
            base.to_builder().border_right("1pt solid #000000"),
            base.to_builder().condition(Some("cell-content()>1")),
            base.to_builder().date_value(Some("2010-01-01")).value_type(ValueType::Date),
        ];
        for variant in variants {
            let cell = variant.build().unwrap();
            assert_ne!(StyleKey::from_cell(&cell), key, "{:?}", cell);
        }
    }

    #[test]
    fn test_condition_colors_ignored_without_condition() {
        let a = Cell::default();
        let b = Cell::builder().condition_color("#ff0000").build().unwrap();
        assert_eq!(StyleKey::from_cell(&a), StyleKey::from_cell(&b));
    }

    #[test]
    fn test_no_delimiter_collision() {
        // color + size concatenate to "#00000012pt" for both cells
        let a = Cell::builder().color("#000000").font_size("12pt").build().unwrap();
        let b = Cell::builder().color("#0000001").font_size("2pt").build().unwrap();
        assert_ne!(StyleKey::from_cell(&a), StyleKey::from_cell(&b));
    }

    #[test]
    fn test_data_style_kind() {
        let date = Cell::builder()
            .value_type(ValueType::Date)
            .date_value(Some("2010-01-01"))
            .build()
            .unwrap();
        assert_eq!(DataStyleKind::for_cell(&date), DataStyleKind::Date);
        assert_eq!(DataStyleKind::for_cell(&Cell::default()), DataStyleKind::Number);
    }
}
