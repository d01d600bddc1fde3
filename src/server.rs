//! HTTP surface: translation, verification and export endpoints under `/api`.
//!
//! Handlers are thin: they validate the body, check that a model client was
//! configured, then call into [`crate::translation`], [`crate::verify`] or
//! [`crate::export`]. Every failure becomes an `{error}` JSON body via
//! [`AppError`].

use crate::config::Config;
use crate::error::{AppError, UpstreamError};
use crate::export::{Artifact, ExportFormat, ExportInput};
use crate::model::TranslationRow;
use crate::openai::OpenAiClient;
use crate::prompts::Scenario;
use crate::translation::{translate_batch, translate_text, TranslateSettings};
use crate::verify::{verify, VerifyOptions, VerifyOutcome};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<Config>,
    client: Option<OpenAiClient>,
}

impl AppState {
    /// Build state from configuration; the model client exists only when an
    /// API key is configured.
    pub fn new(config: Config) -> Result<Self, UpstreamError> {
        let client = OpenAiClient::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn model_configured(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&OpenAiClient, AppError> {
        self.client.as_ref().ok_or(AppError::Configuration)
    }
}

pub fn router(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout;

    let api = Router::new()
        .route("/health", get(health))
        .route("/translate", post(translate))
        .route("/translate/batch", post(translate_many))
        .route("/translate/stream", post(translate_stream))
        .route("/verify", post(verify_table))
        .route("/export/:format", post(export));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

// ==================== Request / Response Types ====================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest {
    #[serde(default)]
    text: String,
    #[serde(default)]
    target_language: String,
    #[serde(default)]
    scenario: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    row_index: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translation: String,
    source: String,
    target_language: String,
    scenario: Scenario,
    #[serde(skip_serializing_if = "Option::is_none")]
    row_index: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct BatchRequest {
    #[serde(default)]
    texts: Vec<String>,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    scenario: String,
    #[serde(default)]
    location: String,
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    results: Vec<TranslationRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest {
    #[serde(default)]
    table_data: Vec<TranslationRow>,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    scenario: String,
    #[serde(default)]
    chunk_size: Option<usize>,
}

/// An error on the stream endpoint, echoing the caller's row index so the
/// client can attach it to the right row.
struct RowError {
    row_index: i64,
    error: AppError,
}

impl IntoResponse for RowError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        warn!(
            "Stream translation for row {} failed ({}): {}",
            self.row_index, status, self.error
        );
        let body = json!({ "error": self.error.to_string(), "rowIndex": self.row_index });
        (status, Json(body)).into_response()
    }
}

// ==================== Handlers ====================

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "modelConfigured": state.model_configured(),
    }))
}

fn require_text(request: &TranslateRequest) -> Result<(), AppError> {
    if request.text.is_empty() || request.target_language.is_empty() {
        return Err(AppError::BadRequest(
            "Missing text or targetLanguage".to_string(),
        ));
    }
    Ok(())
}

async fn translate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, AppError> {
    let client = state.client()?;
    let Json(request) = body?;
    require_text(&request)?;

    let scenario = Scenario::from_id(&request.scenario);
    let settings = TranslateSettings::from(state.config());
    let translation = translate_text(
        client,
        &settings,
        scenario,
        &request.text,
        &request.target_language,
        &request.location,
    )
    .await?;

    info!(
        "Translated text into {} (scenario {})",
        request.target_language, scenario
    );

    Ok(Json(TranslateResponse {
        translation,
        source: request.text,
        target_language: request.target_language,
        scenario,
        row_index: None,
    }))
}

async fn translate_stream(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, RowError> {
    let Json(request) = body.map_err(|rejection| RowError {
        row_index: 0,
        error: rejection.into(),
    })?;
    let row_index = request.row_index;
    let client = state
        .client()
        .map_err(|error| RowError { row_index, error })?;
    require_text(&request).map_err(|error| RowError { row_index, error })?;

    let scenario = Scenario::from_id(&request.scenario);
    let settings = TranslateSettings::from(state.config());
    let translation = translate_text(
        client,
        &settings,
        scenario,
        &request.text,
        &request.target_language,
        &request.location,
    )
    .await
    .map_err(|e| RowError {
        row_index,
        error: e.into(),
    })?;

    Ok(Json(TranslateResponse {
        translation,
        source: request.text,
        target_language: request.target_language,
        scenario,
        row_index: Some(row_index),
    }))
}

async fn translate_many(
    State(state): State<Arc<AppState>>,
    body: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, AppError> {
    let client = state.client()?;
    let Json(request) = body?;
    if request.texts.is_empty() || request.languages.is_empty() {
        return Err(AppError::BadRequest(
            "Missing texts or languages".to_string(),
        ));
    }

    let scenario = Scenario::from_id(&request.scenario);
    let settings = TranslateSettings::from(state.config());
    let rows = translate_batch(
        client,
        &settings,
        scenario,
        &request.texts,
        &request.languages,
        &request.location,
    )
    .await;

    Ok(Json(BatchResponse {
        results: rows.into_iter().map(|row| row.into_wire()).collect(),
    }))
}

async fn verify_table(
    State(state): State<Arc<AppState>>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyOutcome>, AppError> {
    let client = state.client()?;
    let Json(request) = body?;

    let mut options = VerifyOptions::from_config(state.config());
    match request.chunk_size {
        Some(0) => {
            return Err(AppError::BadRequest(
                "chunkSize must be at least 1".to_string(),
            ))
        }
        Some(size) => options = options.with_chunk_size(size),
        None => {}
    }

    let scenario = Scenario::from_id(&request.scenario);
    let outcome = verify(
        client,
        &request.table_data,
        &request.languages,
        scenario,
        &options,
    )
    .await;

    info!(
        "Verified {} rows, {} issues reported",
        outcome.results.len(),
        outcome.issues.len()
    );

    Ok(Json(outcome))
}

async fn export(
    Path(format): Path<String>,
    body: Result<Json<ExportInput>, JsonRejection>,
) -> Result<Response, AppError> {
    let format = ExportFormat::from_id(&format)
        .ok_or_else(|| AppError::NotFound(format!("Unknown export format: {}", format)))?;
    let Json(input) = body?;

    let artifact = input.render(format)?;
    info!(
        "Exported {} rows as {} ({} bytes)",
        input.table_data.len(),
        format,
        artifact.bytes.len()
    );

    Ok(download(artifact))
}

fn download(artifact: Artifact) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        header_safe_filename(&artifact.filename)
    );
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}

/// Restrict a filename to characters that are safe inside a quoted
/// `Content-Disposition` parameter.
fn header_safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
