//! # Config Module
//!
//! CLI configuration for the Heartrisk binary.
//!
//! Everything deployment-specific lives here: artifact path, bind address,
//! the single allow-listed CORS origin, and the model load policy.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// What to do when the model artifact fails to load at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoadPolicy {
    /// Abort process startup entirely.
    FailFast,
    /// Start anyway; every prediction fails until the process restarts
    /// with a loadable artifact.
    Deferred,
}

/// Smart Health Predictor API server.
#[derive(Debug, Parser)]
#[command(name = "heartrisk", version, about = "Smart Health Predictor API")]
pub struct ServerConfig {
    /// Path to the serialized model artifact.
    #[arg(long, default_value = "model/heart_model.json")]
    pub model: PathBuf,

    /// Address to bind the HTTP server on.
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// The single origin allowed to call this service cross-origin.
    #[arg(long, default_value = "https://healthpredictorfrontend.onrender.com")]
    pub allowed_origin: String,

    /// Model load policy at startup.
    #[arg(long, value_enum, default_value_t = LoadPolicy::FailFast)]
    pub load_policy: LoadPolicy,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl ServerConfig {
    /// Default log directive for the chosen verbosity.
    #[must_use]
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
