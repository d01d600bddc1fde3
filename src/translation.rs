use crate::config::Config;
use crate::error::UpstreamError;
use crate::model::{BatchRow, Cell};
use crate::openai::ModelClient;
use crate::prompts::{select_prompt, Scenario};
use crate::validator::TranslationValidator;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Model parameters for single-string translation.
#[derive(Debug, Clone)]
pub struct TranslateSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Delay after each batch cell; zero disables pacing.
    pub pacing: Duration,
}

impl From<&Config> for TranslateSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_tokens: config.translate_max_tokens,
            temperature: config.model_temperature,
            pacing: config.pacing_delay,
        }
    }
}

/// Translate one text into `target_language` using the scenario's prompt.
///
/// Upstream failures are returned to the caller; single-string endpoints
/// treat them as fatal, batch translation records them per cell.
pub async fn translate_text<M: ModelClient>(
    client: &M,
    settings: &TranslateSettings,
    scenario: Scenario,
    text: &str,
    target_language: &str,
    location: &str,
) -> Result<String, UpstreamError> {
    let prompt = select_prompt(scenario, text, target_language, location);
    let translated = client
        .complete(&prompt, settings.max_tokens, settings.temperature)
        .await?;

    let validation = TranslationValidator::validate(text, &translated);
    if !validation.is_clean() {
        warn!(
            "Translation validation warnings for {}: {:?}",
            target_language, validation.warnings
        );
    }

    Ok(translated)
}

/// Translate every text into every language, one call per cell.
///
/// Cells are processed sequentially, texts-major. A failed cell is recorded
/// as [`Cell::Err`] and the batch continues.
pub async fn translate_batch<M: ModelClient>(
    client: &M,
    settings: &TranslateSettings,
    scenario: Scenario,
    texts: &[String],
    languages: &[String],
    location: &str,
) -> Vec<BatchRow> {
    let mut rows = Vec::with_capacity(texts.len());
    let mut failures = 0usize;

    for text in texts {
        let mut cells = BTreeMap::new();

        for language in languages {
            let cell =
                match translate_text(client, settings, scenario, text, language, location).await {
                    Ok(translated) => Cell::Ok(translated),
                    Err(e) => {
                        warn!("Batch translation to {} failed: {}", language, e);
                        Cell::Err(e.to_string())
                    }
                };
            if !cell.is_ok() {
                failures += 1;
            }
            cells.insert(language.clone(), cell);

            if !settings.pacing.is_zero() {
                sleep(settings.pacing).await;
            }
        }

        rows.push(BatchRow {
            source: text.clone(),
            cells,
        });
    }

    info!(
        "Batch translation finished: {} texts x {} languages, {} failed cells",
        texts.len(),
        languages.len(),
        failures
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FnClient;

    fn settings() -> TranslateSettings {
        TranslateSettings {
            max_tokens: 500,
            temperature: 0.1,
            pacing: Duration::ZERO,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ==================== translate_text Tests ====================

    #[tokio::test]
    async fn test_translate_text_uses_scenario_prompt() {
        let client = FnClient::new(|_| Ok("Guardar".to_string()));

        let result = translate_text(
            &client,
            &settings(),
            Scenario::Software,
            "Save",
            "Spanish",
            "Toolbar",
        )
        .await
        .expect("Should succeed");

        assert_eq!(result, "Guardar");
        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].system.contains("CRITICAL SAFETY WORKFLOW"));
        assert!(prompts[0].user.contains("Context/Location: Toolbar"));
    }

    #[tokio::test]
    async fn test_translate_text_propagates_upstream_error() {
        let client = FnClient::new(|_| {
            Err(UpstreamError::Status {
                status: 503,
                body: "overloaded".to_string(),
            })
        });

        let err = translate_text(&client, &settings(), Scenario::General, "Save", "Spanish", "")
            .await
            .expect_err("Should fail");

        assert!(err.to_string().contains("503"));
    }

    // ==================== translate_batch Tests ====================

    #[tokio::test]
    async fn test_translate_batch_covers_every_cell_in_order() {
        let client = FnClient::new(|prompt| Ok(format!("T[{}]", prompt.user)));
        let texts = strings(&["Save", "Share"]);
        let languages = strings(&["Spanish", "German"]);

        let rows = translate_batch(
            &client,
            &settings(),
            Scenario::General,
            &texts,
            &languages,
            "",
        )
        .await;

        assert_eq!(client.calls(), 4);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source, "Save");
        assert_eq!(rows[1].source, "Share");
        for row in &rows {
            assert_eq!(row.cells.len(), 2);
            assert!(row.cells.values().all(Cell::is_ok));
        }
        assert_eq!(
            rows[1].cells["German"],
            Cell::Ok("T[Translate this text into German: Share]".to_string())
        );
    }

    #[tokio::test]
    async fn test_translate_batch_records_failed_cells_and_continues() {
        let client = FnClient::new(|prompt| {
            if prompt.user.contains("German") {
                Err(UpstreamError::Malformed("response contained no choices".to_string()))
            } else {
                Ok("Hola".to_string())
            }
        });
        let texts = strings(&["Hello"]);
        let languages = strings(&["German", "Spanish"]);

        let rows = translate_batch(
            &client,
            &settings(),
            Scenario::General,
            &texts,
            &languages,
            "",
        )
        .await;

        assert_eq!(client.calls(), 2);
        assert_eq!(rows[0].cells["Spanish"], Cell::Ok("Hola".to_string()));
        match &rows[0].cells["German"] {
            Cell::Err(reason) => assert!(reason.contains("no choices")),
            other => panic!("expected failure, got {:?}", other),
        }

        let wire = rows[0].clone().into_wire();
        assert!(wire.translations["German"].starts_with("[Error: "));
    }

    #[tokio::test]
    async fn test_translate_batch_empty_inputs() {
        let client = FnClient::new(|_| Ok("x".to_string()));

        let rows = translate_batch(&client, &settings(), Scenario::General, &[], &[], "").await;

        assert!(rows.is_empty());
        assert_eq!(client.calls(), 0);
    }
}
