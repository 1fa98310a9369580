//! The scheduled job: refresh every configured site, outside the maintenance
//! window.

use std::sync::Arc;

use afstatus_core::{
  cache::{KvCache, require_json},
  maintenance::MaintenanceWindow,
  site::{CONFIG_KEY, StatusConfig},
};
use afstatus_esi::EsiClient;
use chrono::{DateTime, Utc};
use tokio::{sync::Semaphore, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{Error, ServerConfig, refresh::refresh_site};

/// Outcome of one scheduled run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
  /// `now` fell inside the maintenance window; nothing was touched.
  Skipped,
  Completed {
    refreshed: Vec<String>,
    failed:    Vec<String>,
  },
}

/// Refresh every site in the configuration record concurrently.
///
/// Each site runs in its own task, so a failing site is logged and reported
/// without holding back the others. Only a missing or unreadable
/// configuration record fails the run as a whole.
pub async fn run_scheduled<C>(
  cache: Arc<C>,
  esi: &EsiClient,
  window: MaintenanceWindow,
  now: DateTime<Utc>,
  max_concurrent_sites: Option<usize>,
) -> Result<RunReport, Error>
where
  C: KvCache + 'static,
{
  if window.contains(now) {
    info!(%now, "inside maintenance window, skipping refresh");
    return Ok(RunReport::Skipped);
  }

  let StatusConfig { client_id, sites } = require_json(&*cache, CONFIG_KEY).await?;
  let limit = max_concurrent_sites.map(|n| Arc::new(Semaphore::new(n.max(1))));
  debug!(sites = sites.len(), "starting scheduled refresh");

  let tasks: Vec<(String, JoinHandle<Result<_, Error>>)> = sites
    .into_iter()
    .map(|site| {
      let cache     = cache.clone();
      let esi       = esi.clone();
      let client_id = client_id.clone();
      let limit     = limit.clone();
      let url       = site.url.clone();
      let handle    = tokio::spawn(async move {
        let _permit = match limit {
          Some(sem) => sem.acquire_owned().await.ok(),
          None => None,
        };
        refresh_site(&*cache, &esi, &client_id, &site).await
      });
      (url, handle)
    })
    .collect();

  let mut refreshed = Vec::new();
  let mut failed    = Vec::new();
  for (url, handle) in tasks {
    match handle.await {
      Ok(Ok(_)) => refreshed.push(url),
      Ok(Err(e)) => {
        error!(site = %url, error = %e, "site refresh failed");
        failed.push(url);
      }
      Err(e) => {
        error!(site = %url, error = %e, "site refresh task aborted");
        failed.push(url);
      }
    }
  }

  info!(
    refreshed = refreshed.len(),
    failed = failed.len(),
    "scheduled refresh finished"
  );
  Ok(RunReport::Completed { refreshed, failed })
}

/// Spawn the periodic trigger. Missed ticks are skipped rather than bunched.
pub fn spawn_scheduler<C>(
  cache: Arc<C>,
  esi: EsiClient,
  config: &ServerConfig,
) -> JoinHandle<()>
where
  C: KvCache + 'static,
{
  let period = config.refresh_interval();
  let window = config.maintenance_window();
  let limit  = config.max_concurrent_sites;

  tokio::spawn(async move {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
      ticker.tick().await;
      if let Err(e) = run_scheduled(cache.clone(), &esi, window, Utc::now(), limit).await {
        error!(error = %e, "scheduled refresh failed");
      }
    }
  })
}
