//! # API Module
//!
//! The HTTP surface: two routes, one error envelope.
//!
//! - `GET /` — fixed running-status message, always succeeds regardless of
//!   model state.
//! - `POST /predict` — runs one payload through the core pipeline.
//!
//! Every per-request failure is converted to `{"error": "<message>"}` with
//! HTTP 200, matching the wire contract the frontend already depends on.
//! Callers distinguish success from failure by payload shape, not status
//! code. Nothing escapes a handler as a process fault.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use heartrisk_core::error::{PredictError, ValidationError};
use heartrisk_core::model::ModelState;
use heartrisk_core::pipeline;

// =============================================================================
// STATE
// =============================================================================

/// Shared request-handler state.
///
/// The model state is constructed once at startup and injected here;
/// handlers only ever read it, so no synchronization is needed.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide model, ready or explicitly unavailable.
    pub model: Arc<ModelState>,
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the service router with CORS and request tracing attached.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/predict", post(predict))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy: exactly one allow-listed origin, credentials permitted,
/// methods and headers otherwise unrestricted for that origin.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = allowed_origin.parse::<HeaderValue>()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Liveness message, independent of model load state.
async fn root() -> Json<Value> {
    Json(json!({ "message": "Smart Health Predictor API is running!" }))
}

/// One prediction: validate, assemble, invoke, map.
///
/// The body is taken as raw text so malformed JSON lands in the uniform
/// envelope instead of a framework-level rejection.
async fn predict(State(state): State<AppState>, body: String) -> Json<Value> {
    let payload: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(err) => {
            let err = ValidationError::MalformedJson(err.to_string());
            tracing::debug!(error = %err, "request body is not valid JSON");
            return Json(json!({ "error": err.to_string() }));
        }
    };

    match pipeline::predict(&state.model, &payload) {
        Ok(prediction) => Json(json!({
            "Predicted Health Score": format!("{}%", prediction.health_score_display()),
            "Risk Category": prediction.risk_category.as_str(),
        })),
        Err(err) => {
            match &err {
                PredictError::Validation(e) => {
                    tracing::debug!(error = %e, "request failed validation");
                }
                PredictError::Inference(e) => {
                    tracing::warn!(error = %e, "model invocation failed");
                }
            }
            Json(json!({ "error": err.to_string() }))
        }
    }
}
