//! Cell style interning for the writer

use ahash::AHashMap;
use sods_core::{Cell, DataStyleKind, StyleKey};

use crate::document::{CellProperties, CellStyle, StyleMap, StyleSheet, TextProperties};

/// Name of the numeric data style
pub(crate) const NUMBER_DATA_STYLE: &str = "ncs";
/// Name of the date data style
pub(crate) const DATE_DATA_STYLE: &str = "dcs";
/// Prefix of the style a conditional map applies
pub(crate) const CONDITIONAL_PREFIX: &str = "cns";

/// Maps each distinct [`StyleKey`] to the name of the style emitted for it
///
/// A cache belongs to one save: the first cell with a new key names the
/// style after itself, later cells with the same key reuse that name.
#[derive(Debug, Default)]
pub struct StyleCache {
    names: AHashMap<StyleKey, String>,
    /// Table named in the base cell address of conditional maps
    table_name: Option<String>,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the style for `key`, emitting it into `styles` when new
    pub fn intern(
        &mut self,
        styles: &mut StyleSheet,
        cell: &Cell,
        cell_name: &str,
        data_style: DataStyleKind,
        key: StyleKey,
    ) -> String {
        if let Some(name) = self.names.get(&key) {
            return name.clone();
        }

        let mut style = CellStyle::new(cell_name);
        style.data_style_name = Some(data_style_name(data_style).to_string());
        style.text_properties = Some(TextProperties {
            color: Some(cell.color().to_string()),
            font_size: Some(cell.font_size().to_string()),
            font_family: Some(cell.font_family().to_string()),
        });
        style.cell_properties = Some(CellProperties {
            background_color: fill(cell.background_color()),
            border: None,
            border_top: border(cell.border_top()),
            border_bottom: border(cell.border_bottom()),
            border_left: border(cell.border_left()),
            border_right: border(cell.border_right()),
        });

        if let Some(condition) = cell.condition() {
            let nested_name = format!("{}{}", CONDITIONAL_PREFIX, cell_name);
            let mut nested = CellStyle::new(nested_name.as_str());
            nested.text_properties = Some(TextProperties {
                color: Some(cell.condition_color().to_string()),
                ..Default::default()
            });
            nested.cell_properties = Some(CellProperties {
                background_color: fill(cell.condition_background_color()),
                ..Default::default()
            });
            styles.add_common(nested);

            style.map = Some(StyleMap {
                condition: condition.to_string(),
                apply_style_name: nested_name,
                base_cell_address: self
                    .table_name
                    .as_ref()
                    .map(|table| format!("{}.{}", table, cell_name)),
            });
        }

        log::trace!("new cell style {} for {:?}", cell_name, key);
        styles.add_automatic(style);
        self.names.insert(key, cell_name.to_string());
        cell_name.to_string()
    }

    /// Style name already interned for `key`
    pub fn get(&self, key: &StyleKey) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Number of distinct styles emitted
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Forget every style and start interning for the table `table_name`
    pub fn reset(&mut self, table_name: &str) {
        self.names.clear();
        self.table_name = Some(table_name.to_string());
    }
}

pub(crate) fn data_style_name(kind: DataStyleKind) -> &'static str {
    match kind {
        DataStyleKind::Number => NUMBER_DATA_STYLE,
        DataStyleKind::Date => DATE_DATA_STYLE,
    }
}

fn fill(color: &str) -> Option<String> {
    match color {
        "default" | "transparent" => None,
        c => Some(c.to_string()),
    }
}

fn border(value: &str) -> Option<String> {
    (value != sods_core::cell::NO_BORDER).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn intern(cache: &mut StyleCache, styles: &mut StyleSheet, cell: &Cell, name: &str) -> String {
        let kind = DataStyleKind::for_cell(cell);
        cache.intern(styles, cell, name, kind, StyleKey::with_data_style(cell, kind))
    }

    #[test]
    fn test_same_key_reuses_style() {
        let mut cache = StyleCache::new();
        let mut styles = StyleSheet::new();
        let green = Cell::builder().background_color("#00ff00").build().unwrap();
        let other = green.to_builder().text("x").build().unwrap();

        assert_eq!(intern(&mut cache, &mut styles, &green, "A1"), "A1");
        assert_eq!(intern(&mut cache, &mut styles, &other, "B1"), "A1");
        assert_eq!(cache.len(), 1);
        assert_eq!(styles.automatic().len(), 1);
    }

    #[test]
    fn test_new_key_emits_style() {
        let mut cache = StyleCache::new();
        let mut styles = StyleSheet::new();
        let plain = Cell::default();
        let red = Cell::builder().color("#ff0000").build().unwrap();

        intern(&mut cache, &mut styles, &plain, "A1");
        assert_eq!(intern(&mut cache, &mut styles, &red, "B1"), "B1");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_emitted_properties() {
        let mut cache = StyleCache::new();
        let mut styles = StyleSheet::new();
        let cell = Cell::builder()
            .border_top("1pt solid #ff0000")
            .font_size("14pt")
            .build()
            .unwrap();
        intern(&mut cache, &mut styles, &cell, "C3");

        let style = styles.style("C3").unwrap();
        assert_eq!(style.data_style_name.as_deref(), Some("ncs"));
        let text = style.text_properties.as_ref().unwrap();
        assert_eq!(text.font_size.as_deref(), Some("14pt"));
        assert_eq!(text.font_family.as_deref(), Some("Arial"));
        let props = style.cell_properties.as_ref().unwrap();
        assert_eq!(props.background_color, None);
        assert_eq!(props.border_top.as_deref(), Some("1pt solid #ff0000"));
        assert_eq!(props.border_left, None);
        assert!(style.map.is_none());
    }

    #[test]
    fn test_conditional_style() {
        let mut cache = StyleCache::new();
        let mut styles = StyleSheet::new();
        let cell = Cell::builder()
            .condition(Some("cell-content()<=100"))
            .condition_color("#00ff00")
            .condition_background_color("#ff0000")
            .build()
            .unwrap();
        intern(&mut cache, &mut styles, &cell, "D2");

        let map = styles.style("D2").unwrap().map.clone().unwrap();
        assert_eq!(map.condition, "cell-content()<=100");
        assert_eq!(map.apply_style_name, "cnsD2");
        assert_eq!(map.base_cell_address, None);

        assert_eq!(styles.common().len(), 1);
        let nested = styles.style("cnsD2").unwrap();
        assert_eq!(
            nested.text_properties.as_ref().unwrap().color.as_deref(),
            Some("#00ff00")
        );
        assert_eq!(
            nested.cell_properties.as_ref().unwrap().background_color.as_deref(),
            Some("#ff0000")
        );
    }

    #[test]
    fn test_date_cells_use_date_data_style() {
        let mut cache = StyleCache::new();
        let mut styles = StyleSheet::new();
        let cell = Cell::builder()
            .value_type(sods_core::ValueType::Date)
            .date_value(Some("2010-01-01"))
            .build()
            .unwrap();
        intern(&mut cache, &mut styles, &cell, "A1");
        assert_eq!(styles.style("A1").unwrap().data_style_name.as_deref(), Some("dcs"));
    }

    #[test]
    fn test_reset_sets_base_cell_table() {
        let mut cache = StyleCache::new();
        let mut styles = StyleSheet::new();
        intern(&mut cache, &mut styles, &Cell::default(), "A1");
        cache.reset("Sheet1");
        assert!(cache.is_empty());

        let cell = Cell::builder().condition(Some("cell-content()>1")).build().unwrap();
        intern(&mut cache, &mut styles, &cell, "B2");
        let map = styles.style("B2").unwrap().map.clone().unwrap();
        assert_eq!(map.base_cell_address.as_deref(), Some("Sheet1.B2"));
    }

    #[test]
    fn test_clear() {
        let mut cache = StyleCache::new();
        let mut styles = StyleSheet::new();
        let key = StyleKey::from_cell(&Cell::default());
        intern(&mut cache, &mut styles, &Cell::default(), "A1");
        assert_eq!(cache.get(&key), Some("A1"));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&key), None);
    }
}
