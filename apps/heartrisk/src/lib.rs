//! # Heartrisk Library
//!
//! This library exposes the Heartrisk modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod config;

// Re-export heartrisk_core for convenience
pub use heartrisk_core;
