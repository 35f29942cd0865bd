//! Configuration module for the prediction service.
//!
//! Configuration is loaded from environment variables (optionally seeded from
//! a `.env` file by the binaries), organized by concern: Server and Artifacts.

mod artifact_config;
mod server_config;

pub use artifact_config::{ArtifactEnvConfig, DEFAULT_MODEL_PATH, DEFAULT_PREPROCESSOR_PATH};
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub artifacts: ArtifactEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let server = ServerEnvConfig::from_env().context("Failed to load server config")?;
        let artifacts = ArtifactEnvConfig::from_env();

        Ok(Self { server, artifacts })
    }
}
