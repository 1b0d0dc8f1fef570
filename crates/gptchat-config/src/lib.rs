#![allow(clippy::must_use_candidate)]

pub mod client;
pub mod defaults;
mod env;
mod loader;
pub mod telemetry;

use serde::Deserialize;

pub use client::*;
pub use defaults::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level gptchat configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Credentials and transport settings
    pub client: ClientConfig,
    /// Request defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
