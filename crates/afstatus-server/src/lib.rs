//! HTTP surface and refresh pipeline for afstatus.
//!
//! Exposes an axum [`Router`] that renders one status page per configured
//! site from the cache, plus the refresher and scheduled job that keep the
//! cache current.

pub mod error;
pub mod handlers;
pub mod refresh;
pub mod render;
pub mod scheduler;

#[cfg(test)]
mod testing;

pub use error::Error;

use std::{path::PathBuf, sync::Arc, time::Duration};

use afstatus_core::{cache::KvCache, maintenance::MaintenanceWindow};
use afstatus_esi::{DEFAULT_BASE_URL, DEFAULT_TOKEN_URL, EsiConfig, RetrySchedule};
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `AFSTATUS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                     String,
  #[serde(default = "default_port")]
  pub port:                     u16,
  pub cache_path:               PathBuf,
  #[serde(default = "default_esi_base_url")]
  pub esi_base_url:             String,
  #[serde(default = "default_sso_token_url")]
  pub sso_token_url:            String,
  #[serde(default = "default_refresh_interval_secs")]
  pub refresh_interval_secs:    u64,
  #[serde(default = "default_maintenance_hour")]
  pub maintenance_hour:         u32,
  #[serde(default = "default_maintenance_until_minute")]
  pub maintenance_until_minute: u32,
  /// Unbounded when unset.
  #[serde(default)]
  pub max_concurrent_pages:     Option<usize>,
  /// Unbounded when unset.
  #[serde(default)]
  pub max_concurrent_sites:     Option<usize>,
  /// Overrides the default retry ladder.
  #[serde(default)]
  pub retry_delays_ms:          Option<Vec<u64>>,
  #[serde(default = "default_request_timeout_secs")]
  pub request_timeout_secs:     u64,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_esi_base_url() -> String { DEFAULT_BASE_URL.to_owned() }
fn default_sso_token_url() -> String { DEFAULT_TOKEN_URL.to_owned() }
fn default_refresh_interval_secs() -> u64 { 300 }
fn default_maintenance_hour() -> u32 { MaintenanceWindow::default().hour }
fn default_maintenance_until_minute() -> u32 {
  MaintenanceWindow::default().until_minute
}
fn default_request_timeout_secs() -> u64 { 30 }

impl ServerConfig {
  pub fn esi_config(&self) -> EsiConfig {
    EsiConfig {
      base_url:             self.esi_base_url.clone(),
      token_url:            self.sso_token_url.clone(),
      retry:                self
        .retry_delays_ms
        .as_deref()
        .map(RetrySchedule::from_millis)
        .unwrap_or_default(),
      max_concurrent_pages: self.max_concurrent_pages,
      timeout:              Duration::from_secs(self.request_timeout_secs),
    }
  }

  pub fn maintenance_window(&self) -> MaintenanceWindow {
    MaintenanceWindow {
      hour:         self.maintenance_hour,
      until_minute: self.maintenance_until_minute,
    }
  }

  pub fn refresh_interval(&self) -> Duration {
    Duration::from_secs(self.refresh_interval_secs.max(1))
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<C: KvCache> {
  pub cache: Arc<C>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the status page [`Router`]. Every path on every host is served; the
/// host's first label picks the site.
pub fn router<C>(state: AppState<C>) -> Router
where
  C: KvCache + Clone + Send + Sync + 'static,
{
  Router::new()
    .fallback(handlers::status::handler::<C>)
    .with_state(state)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
