use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Runner configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub cluster_url: String,
    pub resource_dir: PathBuf,
    pub pipeline_id: String,
    pub min_cluster_version: String,
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            cluster_url: env::var("CLUSTER_URL")
                .context("CLUSTER_URL must be set")?,
            resource_dir: env::var("RESOURCE_DIR")
                .context("RESOURCE_DIR must be set")?
                .into(),
            pipeline_id: env::var("PIPELINE_ID")
                .unwrap_or_else(|_| "telemetry".to_string()),
            min_cluster_version: env::var("MIN_CLUSTER_VERSION")
                .unwrap_or_else(|_| "7.0.0".to_string()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("HTTP_TIMEOUT_SECS must be a valid number")?,
        })
    }
}
