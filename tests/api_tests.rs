//! Integration tests for the localization HTTP API
//!
//! Each test boots the real router on an ephemeral port and drives it over
//! HTTP. The Chat Completions endpoint is mocked with wiremock.

use localizer::config::Config;
use localizer::server::{router, AppState};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

// ==================== Test Helpers ====================

fn create_openai_response(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ]
    })
}

/// Config pointing at the mock model with pacing disabled
fn create_test_config(model_server: &MockServer) -> Config {
    Config {
        openai_api_key: Some("test-openai-key".to_string()),
        openai_api_url: format!("{}/v1/chat/completions", model_server.uri()),
        model_timeout: Duration::from_secs(5),
        pacing_delay: Duration::ZERO,
        ..Config::default()
    }
}

/// Serve the router on 127.0.0.1:0 and return the `/api` base URL
async fn spawn_app(config: Config) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind ephemeral port");
    let addr = listener.local_addr().expect("Should have local addr");
    let state = AppState::new(config).expect("Should build state");

    tokio::spawn(async move {
        axum::serve(listener, router(state))
            .await
            .expect("Server should run");
    });

    format!("http://{}/api", addr)
}

async fn mock_completion(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response(content)))
        .mount(server)
        .await;
}

async fn post_json(url: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Request should complete")
}

// ==================== Health Tests ====================

#[tokio::test]
async fn test_health_reports_model_not_configured() {
    let base = spawn_app(Config::default()).await;

    let response = reqwest::get(format!("{}/health", base))
        .await
        .expect("Request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body, json!({ "status": "ok", "modelConfigured": false }));
}

#[tokio::test]
async fn test_health_reports_model_configured() {
    let model = MockServer::start().await;
    let base = spawn_app(create_test_config(&model)).await;

    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .expect("Request should complete")
        .json()
        .await
        .expect("JSON body");

    assert_eq!(body["modelConfigured"], true);
}

// ==================== Translate Tests ====================

#[tokio::test]
async fn test_translate_without_key_is_configuration_error() {
    let base = spawn_app(Config::default()).await;

    let response = post_json(
        &format!("{}/translate", base),
        json!({ "text": "Save", "targetLanguage": "Spanish" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body["error"], "OpenAI API key not configured");
}

#[tokio::test]
async fn test_translate_missing_fields_is_bad_request() {
    let model = MockServer::start().await;
    let base = spawn_app(create_test_config(&model)).await;

    let response = post_json(&format!("{}/translate", base), json!({ "text": "Save" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body["error"], "Missing text or targetLanguage");
}

#[tokio::test]
async fn test_translate_malformed_body_is_bad_request() {
    let model = MockServer::start().await;
    let base = spawn_app(create_test_config(&model)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/translate", base))
        .header(CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("JSON body");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_translate_success_resolves_scenario() {
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Context/Location: Toolbar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response("  Guardar \n")))
        .expect(1)
        .mount(&model)
        .await;
    let base = spawn_app(create_test_config(&model)).await;

    let response = post_json(
        &format!("{}/translate", base),
        json!({
            "text": "Save",
            "targetLanguage": "Spanish",
            "scenario": "software",
            "location": "Toolbar"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(
        body,
        json!({
            "translation": "Guardar",
            "source": "Save",
            "targetLanguage": "Spanish",
            "scenario": "software"
        })
    );
}

#[tokio::test]
async fn test_translate_unknown_scenario_falls_back_to_general() {
    let model = MockServer::start().await;
    mock_completion(&model, "Guardar").await;
    let base = spawn_app(create_test_config(&model)).await;

    let body: Value = post_json(
        &format!("{}/translate", base),
        json!({ "text": "Save", "targetLanguage": "Spanish", "scenario": "podcast" }),
    )
    .await
    .json()
    .await
    .expect("JSON body");

    assert_eq!(body["scenario"], "general");
}

#[tokio::test]
async fn test_translate_upstream_failure_is_bad_gateway() {
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&model)
        .await;
    let base = spawn_app(create_test_config(&model)).await;

    let response = post_json(
        &format!("{}/translate", base),
        json!({ "text": "Save", "targetLanguage": "Spanish" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.expect("JSON body");
    assert!(body["error"].as_str().expect("error string").contains("500"));
}

// ==================== Stream Tests ====================

#[tokio::test]
async fn test_stream_echoes_row_index() {
    let model = MockServer::start().await;
    mock_completion(&model, "Guardar").await;
    let base = spawn_app(create_test_config(&model)).await;

    let body: Value = post_json(
        &format!("{}/translate/stream", base),
        json!({ "text": "Save", "targetLanguage": "Spanish", "rowIndex": 7 }),
    )
    .await
    .json()
    .await
    .expect("JSON body");

    assert_eq!(body["translation"], "Guardar");
    assert_eq!(body["rowIndex"], 7);
}

#[tokio::test]
async fn test_stream_error_echoes_row_index() {
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&model)
        .await;
    let base = spawn_app(create_test_config(&model)).await;

    let response = post_json(
        &format!("{}/translate/stream", base),
        json!({ "text": "Save", "targetLanguage": "Spanish", "rowIndex": 3 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body["rowIndex"], 3);
    assert!(body["error"].as_str().expect("error string").contains("overloaded"));
}

#[tokio::test]
async fn test_stream_configuration_error_echoes_row_index() {
    let base = spawn_app(Config::default()).await;

    let response = post_json(
        &format!("{}/translate/stream", base),
        json!({ "text": "Save", "targetLanguage": "Spanish", "rowIndex": 7 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body["error"], "OpenAI API key not configured");
    assert_eq!(body["rowIndex"], 7);
}

// ==================== Batch Tests ====================

#[tokio::test]
async fn test_batch_embeds_per_cell_errors() {
    let model = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("into German"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .with_priority(1)
        .mount(&model)
        .await;
    mock_completion(&model, "Hola").await;
    let base = spawn_app(create_test_config(&model)).await;

    let response = post_json(
        &format!("{}/translate/batch", base),
        json!({ "texts": ["Hello", "Bye"], "languages": ["Spanish", "German"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("JSON body");
    let results = body["results"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["source"], "Hello");
    assert_eq!(results[1]["source"], "Bye");
    for row in results {
        assert_eq!(row["translations"]["Spanish"], "Hola");
        let german = row["translations"]["German"].as_str().expect("string cell");
        assert!(german.starts_with("[Error: "), "got {}", german);
    }
}

#[tokio::test]
async fn test_batch_requires_texts_and_languages() {
    let model = MockServer::start().await;
    let base = spawn_app(create_test_config(&model)).await;

    let response = post_json(
        &format!("{}/translate/batch", base),
        json!({ "texts": [], "languages": ["Spanish"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ==================== Verify Tests ====================

fn verify_body(chunk_size: Option<usize>) -> Value {
    let mut body = json!({
        "tableData": [
            { "source": "Save", "translations": { "Spanish": "Guardar" } }
        ],
        "languages": ["Spanish"],
        "scenario": "software"
    });
    if let Some(size) = chunk_size {
        body["chunkSize"] = json!(size);
    }
    body
}

#[tokio::test]
async fn test_verify_applies_corrections_and_reports_issues() {
    let model = MockServer::start().await;
    let corrections = json!([
        { "source": "Save", "translation": "Guardar cambios", "notes": ["More explicit"] }
    ]);
    mock_completion(&model, &format!("```json\n{}\n```", corrections)).await;
    let base = spawn_app(create_test_config(&model)).await;

    let response = post_json(&format!("{}/verify", base), verify_body(None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(
        body["results"],
        json!([{ "source": "Save", "translations": { "Spanish": "Guardar cambios" } }])
    );
    assert_eq!(
        body["issues"],
        json!([{
            "source": "Save",
            "language": "Spanish",
            "original": "Guardar",
            "corrected": "Guardar cambios",
            "notes": ["More explicit"]
        }])
    );
}

#[tokio::test]
async fn test_verify_unparseable_answer_leaves_table_unchanged() {
    let model = MockServer::start().await;
    mock_completion(&model, "Sorry, I cannot help with that.").await;
    let base = spawn_app(create_test_config(&model)).await;

    let body: Value = post_json(&format!("{}/verify", base), verify_body(Some(10)))
        .await
        .json()
        .await
        .expect("JSON body");

    assert_eq!(
        body["results"],
        json!([{ "source": "Save", "translations": { "Spanish": "Guardar" } }])
    );
    assert_eq!(body["issues"], json!([]));
}

#[tokio::test]
async fn test_verify_rejects_zero_chunk_size() {
    let model = MockServer::start().await;
    let base = spawn_app(create_test_config(&model)).await;

    let response = post_json(&format!("{}/verify", base), verify_body(Some(0))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_without_key_is_configuration_error() {
    let base = spawn_app(Config::default()).await;

    let response = post_json(&format!("{}/verify", base), verify_body(None)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ==================== Export Tests ====================

fn export_body() -> Value {
    json!({
        "tableData": [
            { "source": "Save", "translations": { "Spanish": "Guardar" } }
        ],
        "languages": ["Spanish"]
    })
}

#[tokio::test]
async fn test_export_json_download() {
    let base = spawn_app(Config::default()).await;

    let response = post_json(&format!("{}/export/json", base), export_body()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION],
        "attachment; filename=\"localization.json\""
    );
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body, json!([{ "source": "Save", "Spanish": "Guardar" }]));
}

#[tokio::test]
async fn test_export_ios_defaults_to_english() {
    let base = spawn_app(Config::default()).await;

    let response = post_json(&format!("{}/export/ios", base), export_body()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION],
        "attachment; filename=\"Localizable_English.strings\""
    );
    let text = response.text().await.expect("text body");
    assert!(text.contains("/* Language: English */"));
    assert!(text.contains(r#""save" = "Save";"#));
}

#[tokio::test]
async fn test_export_android_single_language() {
    let base = spawn_app(Config::default()).await;
    let mut body = export_body();
    body["language"] = json!("Spanish");

    let response = post_json(&format!("{}/export/android", base), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let text = response.text().await.expect("text body");
    assert!(text.contains(r#"<string name="save">Guardar</string>"#));
}

#[tokio::test]
async fn test_export_bundles_are_zip_archives() {
    let base = spawn_app(Config::default()).await;

    for format in ["excel", "ios-all", "android-all"] {
        let response = post_json(&format!("{}/export/{}", base, format), export_body()).await;

        assert_eq!(response.status(), StatusCode::OK, "{}", format);
        let bytes = response.bytes().await.expect("body");
        assert!(bytes.starts_with(b"PK"), "{} should be a zip archive", format);
    }
}

#[tokio::test]
async fn test_export_unknown_format_is_not_found() {
    let base = spawn_app(Config::default()).await;

    let response = post_json(&format!("{}/export/pdf", base), export_body()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("JSON body");
    assert_eq!(body["error"], "Unknown export format: pdf");
}

#[tokio::test]
async fn test_export_empty_table_is_header_only() {
    let base = spawn_app(Config::default()).await;

    let response = post_json(
        &format!("{}/export/csv", base),
        json!({ "tableData": [], "languages": ["Spanish"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.bytes().await.expect("body");
    assert_eq!(&bytes[..], "\u{feff}Source\tSpanish\r\n".as_bytes());
}
