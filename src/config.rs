use anyhow::{Context, Result};
use crate::verify::DEFAULT_CHUNK_SIZE;
use std::time::Duration;

/// Placeholder value shipped in sample `.env` files; treated as "not configured".
const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

#[derive(Debug, Clone)]
pub struct Config {
    // OpenAI
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,
    pub model_temperature: f32,
    pub model_timeout: Duration,

    // Token ceilings
    pub translate_max_tokens: u32,
    pub qa_max_tokens: u32,
    pub qa_tokens_per_entry: u32,

    // QA pipeline
    pub qa_chunk_size: usize,
    pub pacing_delay: Duration,

    // Server
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // OpenAI - the key is optional so /health can report its absence
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .and_then(|key| normalize_api_key(&key)),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            model_temperature: parse_env("MODEL_TEMPERATURE", 0.1)?,
            model_timeout: Duration::from_secs(parse_env("MODEL_TIMEOUT_SECS", 60)?),

            translate_max_tokens: parse_env("TRANSLATE_MAX_TOKENS", 500)?,
            qa_max_tokens: parse_env("QA_MAX_TOKENS", 1500)?,
            qa_tokens_per_entry: parse_env("QA_TOKENS_PER_ENTRY", 30)?,

            qa_chunk_size: parse_env("QA_CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?,
            pacing_delay: Duration::from_millis(parse_env("PACING_DELAY_MS", 100)?),

            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("PORT", 5000)?,
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 600)?),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: "gpt-4o".to_string(),
            openai_api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model_temperature: 0.1,
            model_timeout: Duration::from_secs(60),
            translate_max_tokens: 500,
            qa_max_tokens: 1500,
            qa_tokens_per_entry: 30,
            qa_chunk_size: DEFAULT_CHUNK_SIZE,
            pacing_delay: Duration::from_millis(100),
            host: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout: Duration::from_secs(600),
        }
    }
}

fn normalize_api_key(raw: &str) -> Option<String> {
    let key = raw.trim();
    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        None
    } else {
        Some(key.to_string())
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset.
/// A set-but-invalid value is an error rather than a silent default.
fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        _ => Ok(default),
    }
}
