//! Export writers: pure transforms from a table to a downloadable artifact.
//!
//! Every writer is deterministic for a given input and accepts an empty table
//! or an empty language list, producing a header-only or empty artifact.
//!
//! Missing translations render as the empty string in CSV, Excel, JSON and
//! XML. The mobile formats (`.strings`, `strings.xml`) fall back to the row's
//! source text instead.

mod bundle;
mod delimited;
mod excel;
mod json;
mod mobile;
mod xml;

pub use bundle::{android_bundle, android_folder, ios_bundle};
pub use delimited::write_csv;
pub use excel::write_xlsx;
pub use json::write_json;
pub use mobile::{mobile_key, write_android_strings, write_ios_strings, AndroidFlavor};
pub use xml::write_xml;

use crate::error::ExportError;
use crate::model::TranslationRow;
use serde::Deserialize;
use std::fmt;

/// Language used by single-language mobile exports when none is given.
pub const DEFAULT_EXPORT_LANGUAGE: &str = "English";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Excel,
    Json,
    Xml,
    Ios,
    Android,
    IosAll,
    AndroidAll,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 8] = [
        ExportFormat::Csv,
        ExportFormat::Excel,
        ExportFormat::Json,
        ExportFormat::Xml,
        ExportFormat::Ios,
        ExportFormat::Android,
        ExportFormat::IosAll,
        ExportFormat::AndroidAll,
    ];

    pub fn from_id(id: &str) -> Option<ExportFormat> {
        match id {
            "csv" => Some(ExportFormat::Csv),
            "excel" => Some(ExportFormat::Excel),
            "json" => Some(ExportFormat::Json),
            "xml" => Some(ExportFormat::Xml),
            "ios" => Some(ExportFormat::Ios),
            "android" => Some(ExportFormat::Android),
            "ios-all" => Some(ExportFormat::IosAll),
            "android-all" => Some(ExportFormat::AndroidAll),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
            ExportFormat::Ios => "ios",
            ExportFormat::Android => "android",
            ExportFormat::IosAll => "ios-all",
            ExportFormat::AndroidAll => "android-all",
        }
    }

    /// Formats that take a single `language` rather than a `languages` list.
    pub fn is_single_language(&self) -> bool {
        matches!(self, ExportFormat::Ios | ExportFormat::Android)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Body of an export request, shared by the HTTP endpoint and the CLI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInput {
    #[serde(default)]
    pub table_data: Vec<TranslationRow>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl ExportInput {
    /// The single target language, defaulting to [`DEFAULT_EXPORT_LANGUAGE`].
    pub fn language(&self) -> &str {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .unwrap_or(DEFAULT_EXPORT_LANGUAGE)
    }

    pub fn render(&self, format: ExportFormat) -> Result<Artifact, ExportError> {
        render(format, &self.table_data, &self.languages, self.language())
    }
}

/// A rendered export ready to be served or written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// Render `table` in `format`.
///
/// `languages` drives the multi-language formats; `language` is used by the
/// single-language iOS and Android writers.
pub fn render(
    format: ExportFormat,
    table: &[TranslationRow],
    languages: &[String],
    language: &str,
) -> Result<Artifact, ExportError> {
    let artifact = match format {
        ExportFormat::Csv => Artifact {
            bytes: write_csv(table, languages)?,
            content_type: "text/csv",
            filename: "localization.csv".to_string(),
        },
        ExportFormat::Excel => Artifact {
            bytes: write_xlsx(table, languages)?,
            content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            filename: "localization.xlsx".to_string(),
        },
        ExportFormat::Json => Artifact {
            bytes: write_json(table, languages)?,
            content_type: "application/json",
            filename: "localization.json".to_string(),
        },
        ExportFormat::Xml => Artifact {
            bytes: write_xml(table, languages)?,
            content_type: "application/xml",
            filename: "localization.xml".to_string(),
        },
        ExportFormat::Ios => Artifact {
            bytes: write_ios_strings(table, language).into_bytes(),
            content_type: "text/plain",
            filename: format!("Localizable_{}.strings", language),
        },
        ExportFormat::Android => Artifact {
            bytes: write_android_strings(table, language, AndroidFlavor::Annotated)?,
            content_type: "application/xml",
            filename: format!("strings_{}.xml", language),
        },
        ExportFormat::IosAll => Artifact {
            bytes: ios_bundle(table, languages)?,
            content_type: "application/zip",
            filename: "ios_strings.zip".to_string(),
        },
        ExportFormat::AndroidAll => Artifact {
            bytes: android_bundle(table, languages)?,
            content_type: "application/zip",
            filename: "android_strings.zip".to_string(),
        },
    };

    Ok(artifact)
}
