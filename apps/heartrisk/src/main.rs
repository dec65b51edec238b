//! Heartrisk server entry point.
//!
//! Startup sequence: parse config, initialize logging, load the model
//! artifact under the configured policy, then serve until shutdown.
//! A failed model load is the only failure class allowed to be fatal,
//! and only under the fail-fast policy.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use heartrisk::api::{self, AppState};
use heartrisk::config::{LoadPolicy, ServerConfig};
use heartrisk_core::model::{self, ModelState};

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();
    init_tracing(&config);

    let model = match model::load(&config.model) {
        Ok(handle) => {
            tracing::info!(
                path = %config.model.display(),
                shape = handle.shape_name(),
                "model loaded"
            );
            ModelState::Ready(handle)
        }
        Err(err) => match config.load_policy {
            LoadPolicy::FailFast => {
                tracing::error!(error = %err, "model load failed, aborting");
                return ExitCode::FAILURE;
            }
            LoadPolicy::Deferred => {
                tracing::warn!(
                    error = %err,
                    "model load failed, serving with predictions unavailable"
                );
                ModelState::Unavailable {
                    reason: err.to_string(),
                }
            }
        },
    };

    let cors = match api::cors_layer(&config.allowed_origin) {
        Ok(layer) => layer,
        Err(err) => {
            tracing::error!(
                origin = %config.allowed_origin,
                error = %err,
                "allowed origin is not a valid header value"
            );
            return ExitCode::FAILURE;
        }
    };

    let state = AppState {
        model: Arc::new(model),
    };
    let app = api::router(state, cors);

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(addr = %config.bind, error = %err, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        addr = %config.bind,
        origin = %config.allowed_origin,
        "Smart Health Predictor API is running"
    );

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Honor `RUST_LOG` when set, otherwise derive the filter from `-v` flags.
fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolve when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
