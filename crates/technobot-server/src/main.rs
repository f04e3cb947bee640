//! TECHNOBOT server binary: config load, catalog load, port probing, and
//! rocket launch.

use anyhow::{Context, anyhow};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use technobot_client::{HttpExtractionClient, HttpGenerationClient, HttpIntentClient};
use technobot_config::TechnobotConfig;
use technobot_core::{ChatEngine, CustomerCatalog, Explainer, SessionStore};
use technobot_server::{AppState, build_rocket, probe_port};

/// Command-line options for the TECHNOBOT server.
#[derive(Parser)]
#[command(name = "technobot-server", version)]
struct Cli {
    /// Optional path to a technobot.json5 config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Port override, probed upward when busy
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    let mut config = if let Some(path) = cli.config.as_ref() {
        info!("loading config from path: {}", path.display());
        TechnobotConfig::load_from_path(path).context("failed to load config")?
    } else {
        TechnobotConfig::default()
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let catalog = CustomerCatalog::load(&config.data.recommendations_path);
    if catalog.is_empty() {
        warn!(
            "customer catalog is empty (path={})",
            config.data.recommendations_path
        );
    }

    let timeout = Duration::from_secs(config.endpoints.timeout_secs);
    let extraction_timeout = Duration::from_secs(config.endpoints.extraction_timeout_secs);
    let intent = HttpIntentClient::new(config.endpoints.intent_urls.clone(), timeout)
        .context("failed to build intent client")?;
    let extraction =
        HttpExtractionClient::new(config.endpoints.extraction_url.clone(), extraction_timeout)
            .context("failed to build extraction client")?;
    let generation = HttpGenerationClient::new(config.endpoints.generation_url.clone(), timeout)
        .context("failed to build generation client")?;

    let engine = Arc::new(ChatEngine::new(
        SessionStore::new(),
        Arc::new(intent),
        Arc::new(extraction),
        Arc::new(generation),
        Explainer::new(config.explain.feature_names.clone()),
    ));
    let state = AppState::new(engine, Arc::new(catalog));

    let port = probe_port(
        &config.server.host,
        config.server.port,
        config.server.port_scan_limit,
    )
    .ok_or_else(|| {
        anyhow!(
            "no free port in range {}..{}",
            config.server.port,
            config.server.port.saturating_add(config.server.port_scan_limit)
        )
    })?;
    info!("starting server (host={}, port={})", config.server.host, port);

    let figment = rocket::Config::figment()
        .merge(("address", config.server.host.clone()))
        .merge(("port", port));
    build_rocket(state)
        .configure(figment)
        .launch()
        .await
        .context("server exited with error")?;
    Ok(())
}
