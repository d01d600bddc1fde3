//! Per-language resource files for iOS (`Localizable.strings`) and Android
//! (`res/values*/strings.xml`).
//!
//! Both formats key each entry by [`mobile_key`] and fall back to the source
//! text when a row has no translation for the requested language.

use crate::error::ExportError;
use crate::model::TranslationRow;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

const ANDROID_TOOLS_NS: &str = "http://schemas.android.com/tools";

/// Resource key for a source string: lowercased, spaces become underscores,
/// double quotes removed.
///
/// Not collision-safe: `"Save"` and `"save"` share the key `save`, so the
/// file carries that key twice.
pub fn mobile_key(source: &str) -> String {
    source.replace(' ', "_").replace('"', "").to_lowercase()
}

fn localized<'a>(row: &'a TranslationRow, language: &str) -> &'a str {
    row.translation(language).unwrap_or(&row.source)
}

fn escape_strings_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render a `.strings` file for one language.
pub fn write_ios_strings(table: &[TranslationRow], language: &str) -> String {
    let mut out = String::from("/* iOS Localizable.strings */\n");
    out.push_str(&format!("/* Language: {} */\n\n", language));

    for row in table {
        out.push_str(&format!(
            "\"{}\" = \"{}\";\n",
            escape_strings_value(&mobile_key(&row.source)),
            escape_strings_value(localized(row, language))
        ));
    }

    out
}

/// Whether a `strings.xml` carries the `tools` namespace and a language comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AndroidFlavor {
    /// Standalone single-language download.
    Annotated,
    /// File placed inside a `values*/` folder of a bundle.
    Plain,
}

/// Render a `strings.xml` resource file for one language, indented four spaces.
pub fn write_android_strings(
    table: &[TranslationRow],
    language: &str,
    flavor: AndroidFlavor,
) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut resources = BytesStart::new("resources");
    if flavor == AndroidFlavor::Annotated {
        resources.push_attribute(("xmlns:tools", ANDROID_TOOLS_NS));
    }
    writer.write_event(Event::Start(resources))?;

    if flavor == AndroidFlavor::Annotated {
        let comment = format!(" {} strings.xml ", language);
        writer.write_event(Event::Comment(BytesText::new(&comment)))?;
    }

    for row in table {
        let key = mobile_key(&row.source);
        writer
            .create_element("string")
            .with_attribute(("name", key.as_str()))
            .write_text_content(BytesText::new(localized(row, language)))?;
    }

    writer.write_event(Event::End(BytesEnd::new("resources")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}
