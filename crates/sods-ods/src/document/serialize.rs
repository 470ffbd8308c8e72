//! Serialize an [`OdsDocument`] into the package's XML parts

use quick_xml::escape::escape;

use super::{CellStyle, DataStyle, OdsDocument, TableCell, ODS_MIMETYPE};

const NAMESPACES: &str = concat!(
    r#"xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" "#,
    r#"xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" "#,
    r#"xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" "#,
    r#"xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" "#,
    r#"xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0" "#,
    r#"xmlns:number="urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0" "#,
    r#"xmlns:of="urn:oasis:names:tc:opendocument:xmlns:of:1.2""#,
);

const GENERATOR: &str = concat!("sods/", env!("CARGO_PKG_VERSION"));

/// `content.xml`: automatic styles and the table
pub(crate) fn content_xml(doc: &OdsDocument) -> String {
    let mut content = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <office:document-content {} office:version=\"1.2\">\n",
        NAMESPACES
    );

    content.push_str("  <office:automatic-styles>\n");
    for column in doc.styles.column_styles() {
        content.push_str(&format!(
            "    <style:style style:name=\"{}\" style:family=\"table-column\">\
             <style:table-column-properties style:column-width=\"{}\"/></style:style>\n",
            escape(&column.name),
            escape(&column.width)
        ));
    }
    for style in doc.styles.automatic() {
        write_cell_style(&mut content, style);
    }
    content.push_str("  </office:automatic-styles>\n");

    content.push_str(&format!(
        "  <office:body>\n    <office:spreadsheet>\n      <table:table table:name=\"{}\">\n",
        escape(&doc.table_name)
    ));

    for column in &doc.columns {
        content.push_str("        <table:table-column");
        push_attr(&mut content, "table:style-name", column.style_name.as_deref());
        push_attr(
            &mut content,
            "table:default-cell-style-name",
            column.default_cell_style_name.as_deref(),
        );
        content.push_str("/>\n");
    }

    for row in &doc.rows {
        content.push_str("        <table:table-row>\n");
        for cell in &row.cells {
            write_cell(&mut content, cell);
        }
        content.push_str("        </table:table-row>\n");
    }

    content.push_str(
        "      </table:table>\n    </office:spreadsheet>\n  </office:body>\n</office:document-content>\n",
    );
    content
}

/// `styles.xml`: data styles and common styles
pub(crate) fn styles_xml(doc: &OdsDocument) -> String {
    let mut content = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <office:document-styles {} office:version=\"1.2\">\n  <office:styles>\n",
        NAMESPACES
    );

    for data_style in doc.styles.data_styles() {
        match data_style {
            DataStyle::Number {
                name,
                decimal_places,
                min_integer_digits,
                grouping,
            } => {
                content.push_str(&format!(
                    "    <number:number-style style:name=\"{}\">\
                     <number:number number:decimal-places=\"{}\" number:min-integer-digits=\"{}\" number:grouping=\"{}\"/>\
                     </number:number-style>\n",
                    escape(name),
                    decimal_places,
                    min_integer_digits,
                    grouping
                ));
            }
            DataStyle::Date { name } => {
                content.push_str(&format!(
                    "    <number:date-style style:name=\"{}\">\
                     <number:year number:style=\"long\"/><number:text>-</number:text>\
                     <number:month number:style=\"long\"/><number:text>-</number:text>\
                     <number:day number:style=\"long\"/></number:date-style>\n",
                    escape(name)
                ));
            }
        }
    }

    for style in doc.styles.common() {
        write_cell_style(&mut content, style);
    }

    content.push_str("  </office:styles>\n</office:document-styles>\n");
    content
}

/// `meta.xml` with generator and creation time
pub(crate) fn meta_xml() -> String {
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-meta xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:meta="urn:oasis:names:tc:opendocument:xmlns:meta:1.0" office:version="1.2">
  <office:meta>
    <meta:generator>{}</meta:generator>
    <meta:creation-date>{}</meta:creation-date>
  </office:meta>
</office:document-meta>
"#,
        GENERATOR, now
    )
}

/// `META-INF/manifest.xml`
pub(crate) fn manifest_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
  <manifest:file-entry manifest:full-path="/" manifest:version="1.2" manifest:media-type="{}"/>
  <manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>
  <manifest:file-entry manifest:full-path="styles.xml" manifest:media-type="text/xml"/>
  <manifest:file-entry manifest:full-path="meta.xml" manifest:media-type="text/xml"/>
</manifest:manifest>
"#,
        ODS_MIMETYPE
    )
}

fn push_attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
    }
}

fn write_cell_style(out: &mut String, style: &CellStyle) {
    out.push_str("    <style:style");
    push_attr(out, "style:name", Some(&style.name));
    push_attr(out, "style:family", style.family.as_deref());
    push_attr(out, "style:data-style-name", style.data_style_name.as_deref());
    out.push('>');

    if let Some(text) = &style.text_properties {
        out.push_str("<style:text-properties");
        push_attr(out, "fo:color", text.color.as_deref());
        push_attr(out, "fo:font-size", text.font_size.as_deref());
        push_attr(out, "fo:font-family", text.font_family.as_deref());
        out.push_str("/>");
    }

    if let Some(cell) = style.cell_properties.as_ref().filter(|c| !c.is_empty()) {
        out.push_str("<style:table-cell-properties");
        push_attr(out, "fo:background-color", cell.background_color.as_deref());
        push_attr(out, "fo:border", cell.border.as_deref());
        push_attr(out, "fo:border-top", cell.border_top.as_deref());
        push_attr(out, "fo:border-bottom", cell.border_bottom.as_deref());
        push_attr(out, "fo:border-left", cell.border_left.as_deref());
        push_attr(out, "fo:border-right", cell.border_right.as_deref());
        out.push_str("/>");
    }

    if let Some(map) = &style.map {
        out.push_str("<style:map");
        push_attr(out, "style:condition", Some(&map.condition));
        push_attr(out, "style:apply-style-name", Some(&map.apply_style_name));
        push_attr(out, "style:base-cell-address", map.base_cell_address.as_deref());
        out.push_str("/>");
    }

    out.push_str("</style:style>\n");
}

fn write_cell(out: &mut String, cell: &TableCell) {
    out.push_str("          <table:table-cell");
    push_attr(out, "table:style-name", cell.style_name.as_deref());
    push_attr(out, "office:value-type", cell.value_type.as_deref());
    push_attr(out, "table:formula", cell.formula.as_deref());
    push_attr(out, "office:value", cell.value.as_deref());
    push_attr(out, "office:date-value", cell.date_value.as_deref());
    push_attr(out, "office:boolean-value", cell.boolean_value.as_deref());
    push_attr(
        out,
        "table:number-columns-repeated",
        cell.columns_repeated.as_deref(),
    );

    match &cell.text {
        Some(text) => {
            out.push('>');
            write_paragraph(out, text);
            out.push_str("</table:table-cell>\n");
        }
        None => out.push_str("/>\n"),
    }
}

/// Write `text` as one `text:p`
///
/// Tabs, newlines and any space the consumer would collapse are written as
/// elements; everything else is escaped character data.
fn write_paragraph(out: &mut String, text: &str) {
    if text.is_empty() {
        out.push_str("<text:p/>");
        return;
    }

    out.push_str("<text:p>");
    let chars: Vec<char> = text.chars().collect();
    let mut plain = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ' ' => {
                let start = i;
                while i < chars.len() && chars[i] == ' ' {
                    i += 1;
                }
                let run = i - start;
                let interior = start > 0
                    && i < chars.len()
                    && !matches!(chars[start - 1], '\t' | '\n')
                    && !matches!(chars[i], '\t' | '\n');

                if run == 1 && interior {
                    plain.push(' ');
                    continue;
                }
                flush_plain(out, &mut plain);
                if run == 1 {
                    out.push_str("<text:s/>");
                } else {
                    out.push_str(&format!("<text:s text:c=\"{}\"/>", run));
                }
                continue;
            }
            '\t' => {
                flush_plain(out, &mut plain);
                out.push_str("<text:tab/>");
            }
            '\n' => {
                flush_plain(out, &mut plain);
                out.push_str("<text:line-break/>");
            }
            c => plain.push(c),
        }
        i += 1;
    }

    flush_plain(out, &mut plain);
    out.push_str("</text:p>");
}

fn flush_plain(out: &mut String, plain: &mut String) {
    if !plain.is_empty() {
        out.push_str(&escape(plain.as_str()));
        plain.clear();
    }
}
