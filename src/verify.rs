//! Batch verification ("QA") pipeline.
//!
//! For each language the table is projected into one [`QaEntry`] per row,
//! split into consecutive chunks, and each chunk is sent to the model for
//! review. The model answers with a JSON array aligned by position with the
//! chunk; corrections are written back by `chunk_start + index`.
//!
//! Failure is contained per chunk: an upstream error or an unparseable answer
//! leaves that chunk's cells untouched and processing moves on.

use crate::config::Config;
use crate::error::ParseError;
use crate::model::{QaEntry, QaIssue, TranslationRow};
use crate::openai::ModelClient;
use crate::prompts::{select_qa_prompt, Scenario};
use crate::validator::TranslationValidator;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Tuning for a verification run.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub chunk_size: usize,
    /// Delay after every chunk; zero disables pacing.
    pub pacing: Duration,
    pub temperature: f32,
    pub min_max_tokens: u32,
    pub tokens_per_entry: u32,
}

impl VerifyOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            chunk_size: config.qa_chunk_size,
            pacing: config.pacing_delay,
            temperature: config.model_temperature,
            min_max_tokens: config.qa_max_tokens,
            tokens_per_entry: config.qa_tokens_per_entry,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    fn max_tokens_for(&self, entries: usize) -> u32 {
        let proportional = u32::try_from(entries)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.tokens_per_entry);
        self.min_max_tokens.max(proportional)
    }
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Corrected table plus the issues discovered, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyOutcome {
    pub results: Vec<TranslationRow>,
    pub issues: Vec<QaIssue>,
}

/// One element of the model's QA answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CorrectionItem {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub notes: Option<Vec<String>>,
}

/// A successfully parsed QA answer, aligned by position with its chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedChunk {
    pub items: Vec<CorrectionItem>,
}

/// What happened to one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOutcome {
    Applied,
    UpstreamFailed,
    Unparseable,
}

/// Parse the model's QA answer.
///
/// A surrounding Markdown code fence is tolerated. The payload must be a JSON
/// array of objects; anything else is a [`ParseError`].
pub fn parse_chunk(content: &str) -> Result<ParsedChunk, ParseError> {
    let payload = strip_code_fence(content);
    let value: serde_json::Value = serde_json::from_str(payload).map_err(ParseError::NotJson)?;
    let items: Vec<CorrectionItem> = serde_json::from_value(value).map_err(ParseError::NotAList)?;
    Ok(ParsedChunk { items })
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Consecutive `[start, end)` ranges of at most `chunk_size` covering `0..row_count`.
///
/// A `chunk_size` of zero is treated as one.
pub fn plan_chunks(row_count: usize, chunk_size: usize) -> Vec<Range<usize>> {
    let size = chunk_size.max(1);
    (0..row_count)
        .step_by(size)
        .map(|start| start..(start + size).min(row_count))
        .collect()
}

/// Project the table onto one language, one entry per row, in row order.
pub fn project_entries(table: &[TranslationRow], language: &str) -> Vec<QaEntry> {
    table
        .iter()
        .map(|row| QaEntry {
            source: row.source.clone(),
            translation: row.translation_or_empty(language).to_string(),
        })
        .collect()
}

/// Write parsed corrections into `corrected` starting at row `start`.
///
/// Items whose implied row index falls outside the table are dropped. Returns
/// the issues for cells that changed or carry notes.
pub fn apply_corrections(
    corrected: &mut [TranslationRow],
    language: &str,
    start: usize,
    items: Vec<CorrectionItem>,
) -> Vec<QaIssue> {
    let mut issues = Vec::new();

    for (idx, item) in items.into_iter().enumerate() {
        let Some(row) = start
            .checked_add(idx)
            .and_then(|global| corrected.get_mut(global))
        else {
            debug!(
                "Dropping correction {} for {}: beyond table end",
                start.saturating_add(idx),
                language
            );
            continue;
        };

        let original = row.translation_or_empty(language).to_string();
        let updated = item.translation.unwrap_or_else(|| original.clone());
        let notes = item.notes.unwrap_or_default();

        if updated != original {
            let validation = TranslationValidator::validate(&row.source, &updated);
            if !validation.is_clean() {
                warn!(
                    "QA correction for {} ({:?}) has validation warnings: {:?}",
                    language, row.source, validation.warnings
                );
            }
        }

        row.translations.insert(language.to_string(), updated.clone());

        if updated != original || !notes.is_empty() {
            issues.push(QaIssue {
                source: row.source.clone(),
                language: language.to_string(),
                original,
                corrected: updated,
                notes,
            });
        }
    }

    issues
}

/// Run the QA pass over `table` for every language in `languages`.
///
/// The input is never mutated. Row count, row order and every `source` are
/// preserved. Languages and chunks are processed sequentially in the order
/// given.
pub async fn verify<M: ModelClient>(
    client: &M,
    table: &[TranslationRow],
    languages: &[String],
    scenario: Scenario,
    options: &VerifyOptions,
) -> VerifyOutcome {
    let mut corrected: Vec<TranslationRow> = table.to_vec();
    let mut issues = Vec::new();
    let chunks = plan_chunks(table.len(), options.chunk_size);
    let mut upstream_failures = 0usize;
    let mut parse_failures = 0usize;

    info!(
        "Verifying {} rows x {} languages in {} chunks per language (scenario {})",
        table.len(),
        languages.len(),
        chunks.len(),
        scenario
    );

    for language in languages {
        let entries = project_entries(table, language);

        for range in &chunks {
            let outcome = verify_chunk(
                client,
                &mut corrected,
                &entries[range.clone()],
                range.start,
                language,
                scenario,
                options,
                &mut issues,
            )
            .await;

            match outcome {
                ChunkOutcome::Applied => {}
                ChunkOutcome::UpstreamFailed => upstream_failures += 1,
                ChunkOutcome::Unparseable => parse_failures += 1,
            }

            if !options.pacing.is_zero() {
                sleep(options.pacing).await;
            }
        }
    }

    info!(
        "Verification finished: {} issues, {} chunks failed upstream, {} unparseable",
        issues.len(),
        upstream_failures,
        parse_failures
    );

    VerifyOutcome {
        results: corrected,
        issues,
    }
}

#[allow(clippy::too_many_arguments)]
async fn verify_chunk<M: ModelClient>(
    client: &M,
    corrected: &mut [TranslationRow],
    chunk: &[QaEntry],
    start: usize,
    language: &str,
    scenario: Scenario,
    options: &VerifyOptions,
    issues: &mut Vec<QaIssue>,
) -> ChunkOutcome {
    let prompt = select_qa_prompt(chunk, language, scenario);
    let max_tokens = options.max_tokens_for(chunk.len());

    let content = match client.complete(&prompt, max_tokens, options.temperature).await {
        Ok(content) => content,
        Err(e) => {
            warn!(
                "QA chunk {}..{} for {} failed upstream, leaving unchanged: {}",
                start,
                start + chunk.len(),
                language,
                e
            );
            return ChunkOutcome::UpstreamFailed;
        }
    };

    match parse_chunk(&content) {
        Ok(parsed) => {
            let items = parsed.items;
            if items.len() != chunk.len() {
                warn!(
                    "QA chunk {}..{} for {} returned {} items for {} entries",
                    start,
                    start + chunk.len(),
                    language,
                    items.len(),
                    chunk.len()
                );
            }
            // Surplus items spill into following rows; those past the table end are dropped
            let found = apply_corrections(corrected, language, start, items);
            debug!(
                "QA chunk {}..{} for {}: {} issues",
                start,
                start + chunk.len(),
                language,
                found.len()
            );
            issues.extend(found);
            ChunkOutcome::Applied
        }
        Err(e) => {
            warn!(
                "QA chunk {}..{} for {} unparseable, leaving unchanged: {}",
                start,
                start + chunk.len(),
                language,
                e
            );
            ChunkOutcome::Unparseable
        }
    }
}
