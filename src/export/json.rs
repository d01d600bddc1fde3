use crate::error::ExportError;
use crate::model::TranslationRow;
use serde_json::{Map, Value};

/// Pretty-printed array of objects: `source` first, then one key per language.
pub fn write_json(table: &[TranslationRow], languages: &[String]) -> Result<Vec<u8>, ExportError> {
    let records: Vec<Value> = table
        .iter()
        .map(|row| {
            let mut record = Map::with_capacity(languages.len() + 1);
            record.insert("source".to_string(), Value::String(row.source.clone()));
            for language in languages {
                record.insert(
                    language.clone(),
                    Value::String(row.translation_or_empty(language).to_string()),
                );
            }
            Value::Object(record)
        })
        .collect();

    Ok(serde_json::to_vec_pretty(&records)?)
}
