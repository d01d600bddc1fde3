//! Single-sheet `.xlsx` workbook assembled from SpreadsheetML parts.
//!
//! The package holds a styled header row (bold white on indigo, centered),
//! thin borders on every populated cell, and column widths sized to the
//! longest value. Cell text is stored inline so no shared-string table is
//! needed.

use super::bundle::zip_entries;
use crate::error::ExportError;
use crate::model::TranslationRow;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub const SHEET_NAME: &str = "Localization";
const MAX_COLUMN_WIDTH: usize = 50;

const STYLE_BODY: &str = "1";
const STYLE_HEADER: &str = "2";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Localization" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

// cellXfs: 0 default, 1 bordered body, 2 header
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><color rgb="FFFFFFFF"/><name val="Calibri"/></font></fonts><fills count="3"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill><fill><patternFill patternType="solid"><fgColor rgb="FF4F46E5"/><bgColor rgb="FF4F46E5"/></patternFill></fill></fills><borders count="2"><border><left/><right/><top/><bottom/><diagonal/></border><border><left style="thin"/><right style="thin"/><top style="thin"/><bottom style="thin"/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="0" fillId="0" borderId="1" xfId="0" applyBorder="1"/><xf numFmtId="0" fontId="1" fillId="2" borderId="1" xfId="0" applyFont="1" applyFill="1" applyBorder="1" applyAlignment="1"><alignment horizontal="center" vertical="center"/></xf></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

/// Spreadsheet column letters for a zero-based index: 0 → `A`, 26 → `AA`.
fn column_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

fn column_width(longest: usize) -> usize {
    (longest + 2).min(MAX_COLUMN_WIDTH)
}

fn write_cell(
    writer: &mut Writer<Vec<u8>>,
    reference: &str,
    style: &str,
    value: &str,
) -> Result<(), ExportError> {
    let cell = BytesStart::new("c").with_attributes([("r", reference), ("s", style)]);

    if value.is_empty() {
        writer.write_event(Event::Empty(cell))?;
        return Ok(());
    }

    writer.write_event(Event::Start(cell.with_attributes([("t", "inlineStr")])))?;
    writer.write_event(Event::Start(BytesStart::new("is")))?;
    writer
        .create_element("t")
        .with_attribute(("xml:space", "preserve"))
        .write_text_content(BytesText::new(value))?;
    writer.write_event(Event::End(BytesEnd::new("is")))?;
    writer.write_event(Event::End(BytesEnd::new("c")))?;
    Ok(())
}

fn write_sheet(table: &[TranslationRow], languages: &[String]) -> Result<Vec<u8>, ExportError> {
    let mut header: Vec<&str> = Vec::with_capacity(languages.len() + 1);
    header.push("Source");
    header.extend(languages.iter().map(String::as_str));

    let rows: Vec<Vec<&str>> = table
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(header.len());
            cells.push(row.source.as_str());
            cells.extend(languages.iter().map(|lang| row.translation_or_empty(lang)));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            let longest = std::iter::once(&header)
                .chain(rows.iter())
                .map(|cells| cells[col].chars().count())
                .max()
                .unwrap_or(0);
            column_width(longest)
        })
        .collect();

    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Start(
        BytesStart::new("worksheet")
            .with_attributes([("xmlns", "http://schemas.openxmlformats.org/spreadsheetml/2006/main")]),
    ))?;

    writer.write_event(Event::Start(BytesStart::new("cols")))?;
    for (index, width) in widths.iter().enumerate() {
        let position = (index + 1).to_string();
        let width = width.to_string();
        writer
            .create_element("col")
            .with_attributes([
                ("min", position.as_str()),
                ("max", position.as_str()),
                ("width", width.as_str()),
                ("customWidth", "1"),
            ])
            .write_empty()?;
    }
    writer.write_event(Event::End(BytesEnd::new("cols")))?;

    writer.write_event(Event::Start(BytesStart::new("sheetData")))?;
    for (row_index, cells) in std::iter::once(&header).chain(rows.iter()).enumerate() {
        let row_number = (row_index + 1).to_string();
        let style = if row_index == 0 { STYLE_HEADER } else { STYLE_BODY };

        writer.write_event(Event::Start(
            BytesStart::new("row").with_attributes([("r", row_number.as_str())]),
        ))?;
        for (col, value) in cells.iter().enumerate() {
            let reference = format!("{}{}", column_name(col), row_number);
            write_cell(&mut writer, &reference, style, value)?;
        }
        writer.write_event(Event::End(BytesEnd::new("row")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("sheetData")))?;

    writer.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(writer.into_inner())
}

/// Render the table as an `.xlsx` workbook with a single `Localization` sheet.
pub fn write_xlsx(table: &[TranslationRow], languages: &[String]) -> Result<Vec<u8>, ExportError> {
    let entries = vec![
        ("[Content_Types].xml".to_string(), CONTENT_TYPES.as_bytes().to_vec()),
        ("_rels/.rels".to_string(), ROOT_RELS.as_bytes().to_vec()),
        ("xl/workbook.xml".to_string(), WORKBOOK.as_bytes().to_vec()),
        ("xl/_rels/workbook.xml.rels".to_string(), WORKBOOK_RELS.as_bytes().to_vec()),
        ("xl/styles.xml".to_string(), STYLES.as_bytes().to_vec()),
        ("xl/worksheets/sheet1.xml".to_string(), write_sheet(table, languages)?),
    ];

    zip_entries(&entries)
}
