//! Zipped per-language bundles of mobile resource files.

use super::mobile::{write_android_strings, write_ios_strings, AndroidFlavor};
use crate::error::ExportError;
use crate::model::TranslationRow;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use tracing::warn;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Pack `(path, bytes)` entries into a deflated zip.
///
/// Every entry carries the zip epoch as its timestamp so identical input
/// yields identical archives. A repeated path keeps its first entry.
pub(super) fn zip_entries(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    let mut seen = HashSet::new();

    for (path, bytes) in entries {
        if !seen.insert(path.as_str()) {
            warn!("Skipping duplicate archive entry {}", path);
            continue;
        }
        zip.start_file(path.as_str(), options)?;
        zip.write_all(bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Keep a language name from escaping its folder inside the archive.
fn path_segment(language: &str) -> String {
    language
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .replace("..", "_")
}

/// Android resource folder for a language display name.
///
/// `English` maps to the default `values` folder; anything else uses the
/// first two characters, lowercased, as a qualifier (`Spanish` → `values-sp`).
/// This is a naming heuristic rather than an ISO 639 lookup.
pub fn android_folder(language: &str) -> String {
    if language == "English" {
        return "values".to_string();
    }
    let prefix: String = language.chars().take(2).collect::<String>().to_lowercase();
    format!("values-{}", path_segment(&prefix))
}

/// `<language>/Localizable.strings` for every language.
pub fn ios_bundle(table: &[TranslationRow], languages: &[String]) -> Result<Vec<u8>, ExportError> {
    let entries: Vec<(String, Vec<u8>)> = languages
        .iter()
        .map(|language| {
            (
                format!("{}/Localizable.strings", path_segment(language)),
                write_ios_strings(table, language).into_bytes(),
            )
        })
        .collect();

    zip_entries(&entries)
}

/// `values[-xx]/strings.xml` for every language.
///
/// Languages sharing a two-letter prefix (`Portuguese`, `Polish`) map to the
/// same folder; only the first of them is written.
pub fn android_bundle(
    table: &[TranslationRow],
    languages: &[String],
) -> Result<Vec<u8>, ExportError> {
    let mut entries = Vec::with_capacity(languages.len());
    for language in languages {
        entries.push((
            format!("{}/strings.xml", android_folder(language)),
            write_android_strings(table, language, AndroidFlavor::Plain)?,
        ));
    }

    zip_entries(&entries)
}
