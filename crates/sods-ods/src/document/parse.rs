//! Parse `styles.xml` and `content.xml` into an [`OdsDocument`]

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{
    CellProperties, CellStyle, OdsDocument, StyleMap, TableCell, TableColumn, TableRow,
    TextProperties,
};
use crate::error::OdsResult;

/// Build a document from the package's XML parts
///
/// `styles.xml` is parsed first so automatic styles from `content.xml`
/// shadow common styles of the same name.
pub(crate) fn parse_document(styles_xml: Option<&str>, content_xml: &str) -> OdsResult<OdsDocument> {
    let mut parser = PartParser::default();
    if let Some(xml) = styles_xml {
        parser.parse(xml)?;
    }
    parser.parse(content_xml)?;
    Ok(parser.document)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Section {
    #[default]
    Other,
    CommonStyles,
    AutomaticStyles,
}

#[derive(Debug, Default)]
struct PartParser {
    document: OdsDocument,
    section: Section,
    style: Option<CellStyle>,
    table_depth: usize,
    tables_seen: usize,
    row: Option<TableRow>,
    cell: Option<TableCell>,
    annotation_depth: usize,
    paragraph: Option<String>,
}

impl PartParser {
    fn parse(&mut self, xml: &str) -> OdsResult<()> {
        let mut reader = Reader::from_str(xml);

        loop {
            match reader.read_event()? {
                Event::Start(e) => self.open(&e)?,
                Event::Empty(e) => {
                    self.open(&e)?;
                    self.close(e.name().as_ref());
                }
                Event::End(e) => self.close(e.name().as_ref()),
                Event::Text(e) => {
                    if let Some(paragraph) = self.paragraph.as_mut() {
                        paragraph.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(paragraph) = self.paragraph.as_mut() {
                        paragraph.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        self.section = Section::Other;
        Ok(())
    }

    /// Inside the first top-level table
    fn in_table(&self) -> bool {
        self.table_depth == 1 && self.tables_seen == 1
    }

    fn open(&mut self, e: &BytesStart<'_>) -> OdsResult<()> {
        match e.name().as_ref() {
            b"office:styles" => self.section = Section::CommonStyles,
            b"office:automatic-styles" => self.section = Section::AutomaticStyles,
            b"style:style" if self.section != Section::Other => {
                self.style = Some(parse_style(e)?);
            }
            b"style:text-properties" => {
                if let Some(style) = self.style.as_mut() {
                    style.text_properties = Some(parse_text_properties(e)?);
                }
            }
            b"style:table-cell-properties" => {
                if let Some(style) = self.style.as_mut() {
                    // Some writers split borders over several property elements
                    let props = style.cell_properties.get_or_insert_with(CellProperties::default);
                    merge_cell_properties(props, e)?;
                }
            }
            b"style:map" => {
                if let Some(style) = self.style.as_mut() {
                    if style.map.is_none() {
                        style.map = parse_map(e)?;
                    }
                }
            }
            b"table:table" => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.tables_seen += 1;
                    if self.tables_seen == 1 {
                        if let Some(name) = attr(e, b"table:name")? {
                            self.document.table_name = name;
                        }
                    }
                }
            }
            b"table:table-column" if self.in_table() => {
                self.document.columns.push(TableColumn {
                    style_name: attr(e, b"table:style-name")?,
                    default_cell_style_name: attr(e, b"table:default-cell-style-name")?,
                });
            }
            b"table:table-row" if self.in_table() => {
                self.row = Some(TableRow::default());
            }
            b"table:table-cell" | b"table:covered-table-cell" if self.row.is_some() => {
                self.cell = Some(parse_cell(e)?);
            }
            b"office:annotation" if self.cell.is_some() => self.annotation_depth += 1,
            b"text:p" if self.annotation_depth == 0 => {
                let first = self.cell.as_ref().is_some_and(|c| c.text.is_none());
                if first && self.paragraph.is_none() {
                    self.paragraph = Some(String::new());
                }
            }
            b"text:s" => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    let count = attr(e, b"text:c")?
                        .and_then(|c| c.parse::<usize>().ok())
                        .unwrap_or(1);
                    paragraph.extend(std::iter::repeat(' ').take(count));
                }
            }
            b"text:tab" => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.push('\t');
                }
            }
            b"text:line-break" => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.push('\n');
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"office:styles" | b"office:automatic-styles" => self.section = Section::Other,
            b"style:style" => {
                if let Some(style) = self.style.take() {
                    match self.section {
                        Section::CommonStyles => self.document.styles.add_common(style),
                        Section::AutomaticStyles => self.document.styles.add_automatic(style),
                        Section::Other => {}
                    }
                }
            }
            b"table:table" => self.table_depth = self.table_depth.saturating_sub(1),
            b"table:table-row" => {
                if let Some(row) = self.row.take() {
                    self.document.rows.push(row);
                }
            }
            b"table:table-cell" | b"table:covered-table-cell" => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.cells.push(cell);
                }
            }
            b"office:annotation" => {
                self.annotation_depth = self.annotation_depth.saturating_sub(1);
            }
            b"text:p" if self.annotation_depth == 0 => {
                if let (Some(text), Some(cell)) = (self.paragraph.take(), self.cell.as_mut()) {
                    cell.text = Some(text);
                }
            }
            _ => {}
        }
    }
}

/// Unescaped value of one attribute
fn attr(e: &BytesStart<'_>, name: &[u8]) -> OdsResult<Option<String>> {
    for a in e.attributes().flatten() {
        if a.key.as_ref() == name {
            return Ok(Some(a.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_style(e: &BytesStart<'_>) -> OdsResult<CellStyle> {
    let mut style = CellStyle::default();
    for a in e.attributes().flatten() {
        match a.key.as_ref() {
            b"style:name" => style.name = a.unescape_value()?.into_owned(),
            b"style:family" => style.family = Some(a.unescape_value()?.into_owned()),
            b"style:data-style-name" => {
                style.data_style_name = Some(a.unescape_value()?.into_owned());
            }
            _ => {}
        }
    }
    Ok(style)
}

fn parse_text_properties(e: &BytesStart<'_>) -> OdsResult<TextProperties> {
    let mut props = TextProperties::default();
    let mut font_name = None;
    for a in e.attributes().flatten() {
        match a.key.as_ref() {
            b"fo:color" => props.color = Some(a.unescape_value()?.into_owned()),
            b"fo:font-size" => props.font_size = Some(a.unescape_value()?.into_owned()),
            b"fo:font-family" => props.font_family = Some(a.unescape_value()?.into_owned()),
            b"style:font-name" => font_name = Some(a.unescape_value()?.into_owned()),
            _ => {}
        }
    }
    if props.font_family.is_none() {
        props.font_family = font_name;
    }
    Ok(props)
}

fn merge_cell_properties(props: &mut CellProperties, e: &BytesStart<'_>) -> OdsResult<()> {
    for a in e.attributes().flatten() {
        let slot = match a.key.as_ref() {
            b"fo:background-color" => &mut props.background_color,
            b"fo:border" => &mut props.border,
            b"fo:border-top" => &mut props.border_top,
            b"fo:border-bottom" => &mut props.border_bottom,
            b"fo:border-left" => &mut props.border_left,
            b"fo:border-right" => &mut props.border_right,
            _ => continue,
        };
        *slot = Some(a.unescape_value()?.into_owned());
    }
    Ok(())
}

fn parse_map(e: &BytesStart<'_>) -> OdsResult<Option<StyleMap>> {
    let condition = attr(e, b"style:condition")?;
    let apply_style_name = attr(e, b"style:apply-style-name")?;
    let base_cell_address = attr(e, b"style:base-cell-address")?;
    Ok(condition
        .zip(apply_style_name)
        .map(|(condition, apply_style_name)| StyleMap {
            condition,
            apply_style_name,
            base_cell_address,
        }))
}

fn parse_cell(e: &BytesStart<'_>) -> OdsResult<TableCell> {
    let mut cell = TableCell::default();
    for a in e.attributes().flatten() {
        let slot = match a.key.as_ref() {
            b"office:value-type" => &mut cell.value_type,
            b"table:formula" => &mut cell.formula,
            b"office:value" => &mut cell.value,
            b"office:date-value" => &mut cell.date_value,
            b"office:boolean-value" => &mut cell.boolean_value,
            b"table:style-name" => &mut cell.style_name,
            b"table:number-columns-repeated" => &mut cell.columns_repeated,
            _ => continue,
        };
        *slot = Some(a.unescape_value()?.into_owned());
    }
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STYLES: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0">
  <office:styles>
    <style:style style:name="cnsD2" style:family="table-cell">
      <style:text-properties fo:color="#00ff00"/>
      <style:table-cell-properties fo:background-color="#ff0000"/>
    </style:style>
  </office:styles>
</office:document-styles>"##;

    const CONTENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0">
  <office:automatic-styles>
    <style:style style:name="D2" style:family="table-cell" style:data-style-name="ncs">
      <style:text-properties style:font-name="Liberation Sans" fo:font-size="0.1665in"/>
      <style:table-cell-properties fo:border-top="1pt solid #ff0000"/>
      <style:table-cell-properties fo:border-left="0.0139in solid #000000"/>
      <style:map style:condition="cell-content()&lt;=100" style:apply-style-name="cnsD2" style:base-cell-address="Data.D2"/>
    </style:style>
  </office:automatic-styles>
  <office:body>
    <office:spreadsheet>
      <table:table table:name="Data">
        <table:table-column table:style-name="co1"/>
        <table:table-row>
          <table:table-cell office:value-type="float" office:value="1" table:style-name="D2">
            <office:annotation><text:p>note</text:p></office:annotation>
            <text:p>a<text:s text:c="2"/>b&amp;c<text:span>!</text:span></text:p>
            <text:p>second</text:p>
          </table:table-cell>
          <table:covered-table-cell/>
          <table:table-cell table:number-columns-repeated="3"/>
        </table:table-row>
        <table:table-row/>
      </table:table>
      <table:table table:name="Ignored">
        <table:table-row><table:table-cell/></table:table-row>
      </table:table>
    </office:spreadsheet>
  </office:body>
</office:document-content>"#;

    #[test]
    fn test_parse_table_structure() {
        let doc = parse_document(Some(STYLES), CONTENT).unwrap();
        assert_eq!(doc.table_name, "Data");
        assert_eq!(doc.columns.len(), 1);
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.rows[0].cells.len(), 3);
        assert!(doc.rows[1].cells.is_empty());
        assert_eq!(doc.rows[0].cells[2].repeat_count(), Some(3));
    }

    #[test]
    fn test_parse_cell_text_skips_annotation() {
        let doc = parse_document(Some(STYLES), CONTENT).unwrap();
        let cell = &doc.rows[0].cells[0];
        assert_eq!(cell.text.as_deref(), Some("a  b&c!"));
        assert_eq!(cell.value_type.as_deref(), Some("float"));
        assert_eq!(cell.value.as_deref(), Some("1"));
        assert_eq!(cell.style_name.as_deref(), Some("D2"));
        assert_eq!(doc.rows[0].cells[1].text, None);
    }

    #[test]
    fn test_parse_styles() {
        let doc = parse_document(Some(STYLES), CONTENT).unwrap();

        let style = doc.styles.style("D2").unwrap();
        assert_eq!(style.data_style_name.as_deref(), Some("ncs"));
        let text = style.text_properties.as_ref().unwrap();
        assert_eq!(text.font_family.as_deref(), Some("Liberation Sans"));
        assert_eq!(text.font_size.as_deref(), Some("0.1665in"));
        let cell = style.cell_properties.as_ref().unwrap();
        assert_eq!(cell.top(), Some("1pt solid #ff0000"));
        assert_eq!(cell.left(), Some("0.0139in solid #000000"));
        assert_eq!(
            style.map,
            Some(StyleMap {
                condition: "cell-content()<=100".into(),
                apply_style_name: "cnsD2".into(),
                base_cell_address: Some("Data.D2".into()),
            })
        );

        let nested = doc.styles.style("cnsD2").unwrap();
        assert_eq!(
            nested.cell_properties.as_ref().unwrap().background_color.as_deref(),
            Some("#ff0000")
        );
    }

    #[test]
    fn test_parse_rejects_broken_xml() {
        assert!(parse_document(None, "<a><b></a>").is_err());
    }
}
