//! afstatus server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite cache, starts the periodic refresh task, and serves status pages
//! over HTTP.
//!
//! # Seeding the site configuration
//!
//! The sites to poll live in the cache itself, under `_Zconfig`. To load them
//! from a JSON file:
//!
//! ```
//! cargo run -p afstatus-server --bin afstatus -- --seed-config sites.json
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use afstatus_core::{
  cache::put_json,
  site::{CONFIG_KEY, StatusConfig},
};
use afstatus_esi::EsiClient;
use afstatus_server::{
  AppState, ServerConfig,
  scheduler::{run_scheduled, spawn_scheduler},
};
use afstatus_store_sqlite::SqliteCache;
use anyhow::Context as _;
use chrono::Utc;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Contract status pages for EVE Online entities")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Run a single scheduled refresh and exit.
  #[arg(long)]
  once: bool,

  /// Write the site configuration record from a JSON file and exit.
  #[arg(long, value_name = "FILE")]
  seed_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("AFSTATUS"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let cache_path = expand_tilde(&server_cfg.cache_path);
  let cache = SqliteCache::open(&cache_path)
    .await
    .with_context(|| format!("failed to open cache at {cache_path:?}"))?;

  // Helper mode: seed the configuration record and exit.
  if let Some(path) = cli.seed_config {
    let raw = std::fs::read_to_string(&path)
      .with_context(|| format!("failed to read {path:?}"))?;
    let record: StatusConfig = serde_json::from_str(&raw)
      .with_context(|| format!("{path:?} is not a valid site configuration"))?;
    put_json(&cache, CONFIG_KEY, &record)
      .await
      .context("failed to write site configuration")?;
    tracing::info!(sites = record.sites.len(), "seeded site configuration");
    return Ok(());
  }

  let cache = Arc::new(cache);
  let esi = EsiClient::new(server_cfg.esi_config())
    .context("failed to build ESI client")?;

  // Helper mode: one refresh pass and exit.
  if cli.once {
    let report = run_scheduled(
      cache.clone(),
      &esi,
      server_cfg.maintenance_window(),
      Utc::now(),
      server_cfg.max_concurrent_sites,
    )
    .await
    .context("scheduled refresh failed")?;
    tracing::info!(?report, "refresh pass complete");
    let keys = cache.keys().await.context("failed to list cache keys")?;
    tracing::info!(?keys, "cache entries");
    return Ok(());
  }

  spawn_scheduler(cache.clone(), esi, &server_cfg);

  let state = AppState { cache };

  let app = afstatus_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
