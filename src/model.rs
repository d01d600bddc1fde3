//! In-memory data model shared by the translator, the verifier and the exporters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One source string plus its per-language translations.
///
/// `translations` is keyed by language display name ("Spanish"), not by code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRow {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl TranslationRow {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translations: BTreeMap::new(),
        }
    }

    pub fn with_translation(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.translations.insert(language.into(), text.into());
        self
    }

    /// Translation for `language`, or `None` when the row has no entry for it.
    pub fn translation(&self, language: &str) -> Option<&str> {
        self.translations.get(language).map(String::as_str)
    }

    /// Translation for `language`, or the empty string when absent.
    pub fn translation_or_empty(&self, language: &str) -> &str {
        self.translation(language).unwrap_or("")
    }
}

/// Ordered, index-stable sequence of rows. QA corrections address rows by position.
pub type Table = Vec<TranslationRow>;

/// Per-(row, language) projection sent to the QA model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub source: String,
    pub translation: String,
}

/// A cell the QA pass changed or annotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaIssue {
    pub source: String,
    pub language: String,
    pub original: String,
    pub corrected: String,
    pub notes: Vec<String>,
}

/// Outcome of translating one (text, language) cell in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Ok(String),
    Err(String),
}

impl Cell {
    pub fn is_ok(&self) -> bool {
        matches!(self, Cell::Ok(_))
    }

    /// Flatten into a single string for wire formats that only carry text.
    pub fn into_wire(self) -> String {
        match self {
            Cell::Ok(text) => text,
            Cell::Err(reason) => format!("[Error: {}]", reason),
        }
    }
}

/// A batch-translated row whose cells keep their success/failure status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub source: String,
    pub cells: BTreeMap<String, Cell>,
}

impl BatchRow {
    /// Flatten into a [`TranslationRow`], rendering failed cells as `[Error: ...]`.
    pub fn into_wire(self) -> TranslationRow {
        TranslationRow {
            source: self.source,
            translations: self
                .cells
                .into_iter()
                .map(|(language, cell)| (language, cell.into_wire()))
                .collect(),
        }
    }
}
