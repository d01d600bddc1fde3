use crate::error::ExportError;
use crate::model::TranslationRow;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// `<localization>` document with one `<entry>` per row, indented two spaces.
pub fn write_xml(table: &[TranslationRow], languages: &[String]) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("localization")))?;

    for row in table {
        writer.write_event(Event::Start(BytesStart::new("entry")))?;
        writer
            .create_element("source")
            .write_text_content(BytesText::new(&row.source))?;

        writer.write_event(Event::Start(BytesStart::new("translations")))?;
        for language in languages {
            writer
                .create_element("language")
                .with_attribute(("name", language.as_str()))
                .write_text_content(BytesText::new(row.translation_or_empty(language)))?;
        }
        writer.write_event(Event::End(BytesEnd::new("translations")))?;

        writer.write_event(Event::End(BytesEnd::new("entry")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("localization")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}
