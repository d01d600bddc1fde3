//! Translation integrity checks.
//!
//! Verifies that format placeholders and numbers in the source survive into
//! the translation. Findings are advisory: callers log them and keep the text.

use regex::Regex;
use std::sync::OnceLock;

/// Validation report listing potential integrity problems.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validator for placeholder and number preservation.
pub struct TranslationValidator;

// Regex patterns for extraction (cached for performance)
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        // {{var}}, {name}, {0}, printf-style %s %d %@ %1$s %.2f
        Regex::new(r"\{\{\s*[A-Za-z0-9_.]+\s*\}\}|\{[A-Za-z0-9_.]*\}|%(?:\d+\$)?[-+#0]*\d*(?:\.\d+)?[sdif@]")
            .expect("placeholder pattern is valid")
    })
}

fn number_regex() -> &'static Regex {
    NUMBER_REGEX.get_or_init(|| Regex::new(r"\d+").expect("number pattern is valid"))
}

impl TranslationValidator {
    /// Compare `translated` against `source`.
    ///
    /// Empty translations are not checked; an empty cell is a missing value,
    /// not a damaged one.
    pub fn validate(source: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::default();
        if translated.trim().is_empty() {
            return report;
        }

        let source_placeholders = Self::extract_placeholders(source);
        let translated_placeholders = Self::extract_placeholders(translated);
        if source_placeholders != translated_placeholders {
            report.warnings.push(format!(
                "Placeholder mismatch: source has {:?}, translation has {:?}",
                source_placeholders, translated_placeholders
            ));
        }

        let source_numbers = Self::extract_numbers(source);
        let translated_numbers = Self::extract_numbers(translated);
        if source_numbers != translated_numbers {
            report.warnings.push(format!(
                "Number mismatch: source has {:?}, translation has {:?}",
                source_numbers, translated_numbers
            ));
        }

        report
    }

    /// Placeholders in sorted order; word order may legitimately change.
    fn extract_placeholders(text: &str) -> Vec<String> {
        let mut found: Vec<String> = placeholder_regex()
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        found.sort();
        found
    }

    /// Digit runs outside placeholders, sorted.
    fn extract_numbers(text: &str) -> Vec<String> {
        let stripped = placeholder_regex().replace_all(text, " ");
        let mut found: Vec<String> = number_regex()
            .find_iter(&stripped)
            .map(|m| m.as_str().to_string())
            .collect();
        found.sort();
        found
    }
}
