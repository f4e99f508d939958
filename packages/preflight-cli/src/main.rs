// One-shot preflight runner: load resource definitions from disk, run a
// single reconciliation pass against a live cluster, exit 0 iff it succeeded.

mod config;

use std::fs;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use preflight::{
    version, HttpClusterClient, PipelineDefinition, ResourceRegistry, TemplateDefinition,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,preflight=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let registry = load_registry(&config)?;
    tracing::info!(
        templates = registry.templates().len(),
        pipeline = %registry.pipeline().id,
        "Loaded resource definitions"
    );

    let min = version::parse(&config.min_cluster_version).with_context(|| {
        format!(
            "MIN_CLUSTER_VERSION {:?} is not a valid version",
            config.min_cluster_version
        )
    })?;
    let mut sequence = registry.into_sequence(version::at_least(min));

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;
    let client = HttpClusterClient::new(http, config.cluster_url.clone());

    tracing::info!(cluster = %config.cluster_url, "Running preflight pass");
    if sequence.check_and_publish(&client).await {
        println!(
            "{}",
            "✓ cluster resources confirmed, exporter may ship data".green()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{}",
            "✗ cluster resources could not be confirmed, see log for the failing step".red()
        );
        Ok(ExitCode::FAILURE)
    }
}

/// Build the registry from `RESOURCE_DIR`: `templates/*.json` in file-name
/// order (that order is the check order), plus `pipeline.json`.
fn load_registry(config: &Config) -> Result<ResourceRegistry> {
    let pipeline_path = config.resource_dir.join("pipeline.json");
    let pipeline_body = fs::read(&pipeline_path)
        .with_context(|| format!("Failed to read {}", pipeline_path.display()))?;

    let mut registry = ResourceRegistry::new(PipelineDefinition::new(
        config.pipeline_id.clone(),
        pipeline_body,
    ));

    let templates_dir = config.resource_dir.join("templates");
    let mut paths: Vec<_> = fs::read_dir(&templates_dir)
        .with_context(|| format!("Failed to read {}", templates_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    for path in paths {
        let name = path
            .file_stem()
            .context("Template file has no stem")?
            .to_string_lossy()
            .to_string();
        let body =
            fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        registry.register_template(TemplateDefinition::new(name, body));
    }

    Ok(registry)
}
