//! Tab-delimited export that opens directly in spreadsheet tools.

use crate::error::ExportError;
use crate::model::TranslationRow;
use csv::{Terminator, WriterBuilder};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// `Source` plus one column per language; missing translations are empty.
pub fn write_csv(table: &[TranslationRow], languages: &[String]) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(Terminator::CRLF)
        .from_writer(UTF8_BOM.to_vec());

    let mut header = Vec::with_capacity(languages.len() + 1);
    header.push("Source");
    header.extend(languages.iter().map(String::as_str));
    writer.write_record(&header)?;

    for row in table {
        let mut record = Vec::with_capacity(languages.len() + 1);
        record.push(row.source.as_str());
        record.extend(languages.iter().map(|lang| row.translation_or_empty(lang)));
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}
