//! Integration tests for the Heartrisk HTTP API.
//!
//! Runs the real router through axum-test; the model is a stub booster
//! whose single leaf is tuned to yield a known probability.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use std::io::Write;
use std::sync::Arc;

use axum::http::header::ORIGIN;
use axum::http::HeaderValue;
use axum_test::TestServer;
use serde_json::{json, Value};

use heartrisk::api::{self, AppState};
use heartrisk_core::model::{self, ModelHandle, ModelState, RawBooster, TreeNode};

const TEST_ORIGIN: &str = "https://healthpredictorfrontend.onrender.com";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Booster stub whose output probability is exactly `probability`.
fn stub_model(probability: f64) -> ModelState {
    let leaf = (probability / (1.0 - probability)).ln();
    ModelState::Ready(ModelHandle::Booster(RawBooster {
        trees: vec![TreeNode::Leaf { value: leaf }],
        base_score: 0.0,
    }))
}

/// Spin up a test server around the given model state.
fn test_server(state: ModelState) -> TestServer {
    let app_state = AppState {
        model: Arc::new(state),
    };
    let cors = api::cors_layer(TEST_ORIGIN).unwrap();
    TestServer::new(api::router(app_state, cors)).unwrap()
}

/// The worked example record.
fn sample_payload() -> Value {
    json!({
        "age": 63, "sex": 1, "trestbps": 145, "chol": 233,
        "thalach": 150, "oldpeak": 2.3, "cp": 3, "fbs": 1,
        "restecg": 0, "exang": 0, "slope": 0, "ca": 0, "thal": 1
    })
}

// =============================================================================
// ROOT ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_root_reports_running() {
    let server = test_server(stub_model(0.5));
    let response = server.get("/").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "message": "Smart Health Predictor API is running!" })
    );
}

#[tokio::test]
async fn test_root_ignores_model_state() {
    let server = test_server(ModelState::Unavailable {
        reason: String::from("artifact missing"),
    });
    let response = server.get("/").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Smart Health Predictor API is running!");
}

// =============================================================================
// PREDICT ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_predict_at_risk() {
    let server = test_server(stub_model(0.82));
    let response = server.post("/predict").json(&sample_payload()).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "Predicted Health Score": "82.0%",
            "Risk Category": "At Risk"
        })
    );
}

#[tokio::test]
async fn test_predict_healthy() {
    let server = test_server(stub_model(0.05));
    let response = server.post("/predict").json(&sample_payload()).await;

    let body: Value = response.json();
    assert_eq!(body["Predicted Health Score"], "5.0%");
    assert_eq!(body["Risk Category"], "Healthy");
}

#[tokio::test]
async fn test_predict_mild_risk() {
    let server = test_server(stub_model(0.3));
    let response = server.post("/predict").json(&sample_payload()).await;

    let body: Value = response.json();
    assert_eq!(body["Predicted Health Score"], "30.0%");
    assert_eq!(body["Risk Category"], "Mild Risk");
}

#[tokio::test]
async fn test_predict_missing_field_is_error_envelope() {
    let server = test_server(stub_model(0.5));
    let mut payload = sample_payload();
    payload.as_object_mut().unwrap().remove("thal");

    let response = server.post("/predict").json(&payload).await;

    // Errors are reported inside the envelope, still HTTP 200.
    response.assert_status_ok();
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("thal is missing"));
    assert!(body.get("Risk Category").is_none());
}

#[tokio::test]
async fn test_predict_malformed_json_is_error_envelope() {
    let server = test_server(stub_model(0.5));
    let response = server.post("/predict").text("{not json").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("not valid JSON"));
}

#[tokio::test]
async fn test_predict_model_unavailable_is_error_envelope() {
    let server = test_server(ModelState::Unavailable {
        reason: String::from("artifact missing"),
    });
    let response = server.post("/predict").json(&sample_payload()).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("model unavailable"));
}

#[tokio::test]
async fn test_predict_is_idempotent() {
    let server = test_server(stub_model(0.42));
    let first = server.post("/predict").json(&sample_payload()).await;
    let second = server.post("/predict").json(&sample_payload()).await;

    assert_eq!(first.text(), second.text());
}

// =============================================================================
// MODEL LOADING TESTS
// =============================================================================

#[tokio::test]
async fn test_serves_model_loaded_from_disk() {
    let handle = ModelHandle::Booster(RawBooster {
        trees: vec![TreeNode::Leaf { value: 0.0 }],
        base_score: 0.0,
    });
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&handle).unwrap().as_bytes())
        .unwrap();

    let loaded = model::load(file.path()).unwrap();
    let server = test_server(ModelState::Ready(loaded));
    let response = server.post("/predict").json(&sample_payload()).await;

    let body: Value = response.json();
    assert_eq!(body["Predicted Health Score"], "50.0%");
    assert_eq!(body["Risk Category"], "At Risk");
}

// =============================================================================
// CORS TESTS
// =============================================================================

#[tokio::test]
async fn test_cors_echoes_allowed_origin() {
    let server = test_server(stub_model(0.5));
    let response = server
        .get("/")
        .add_header(ORIGIN, HeaderValue::from_static(TEST_ORIGIN))
        .await;

    let allowed = response
        .headers()
        .get("access-control-allow-origin")
        .unwrap();
    assert_eq!(allowed.to_str().unwrap(), TEST_ORIGIN);
}

#[tokio::test]
async fn test_cors_does_not_echo_other_origins() {
    let server = test_server(stub_model(0.5));
    let response = server
        .get("/")
        .add_header(ORIGIN, HeaderValue::from_static("https://evil.example"))
        .await;

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
