//! Error taxonomy for the localization service.
//!
//! - [`UpstreamError`]: the model service failed mid-call. Fatal for single
//!   translations, recovered per cell or per chunk in batch paths.
//! - [`ParseError`]: QA output was not the expected structured list. Always
//!   recovered inside the verifier by leaving the chunk unchanged.
//! - [`ExportError`]: a writer could not serialize the table.
//! - [`AppError`]: what an HTTP handler returns; maps onto a status code and
//!   an `{error}` body.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to reach model service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("model service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("model service error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("malformed model response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("QA response is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("QA response is not a list of corrections: {0}")]
    NotAList(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("OpenAI API key not configured")]
    Configuration,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status, self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
