//! One refresh cycle for one site.

use afstatus_core::{
  cache::{KvCache, put_json},
  classify::summarize,
  site::SiteConfig,
  summary::Summary,
};
use afstatus_esi::EsiClient;
use chrono::Utc;
use tracing::info;

use crate::Error;

/// Exchange the site's refresh token, pull every contract for its entity,
/// summarise them and overwrite the site's cache entry.
///
/// Nothing is written unless every step succeeds, so a failed refresh leaves
/// the previous summary in place.
pub async fn refresh_site<C>(
  cache: &C,
  esi: &EsiClient,
  client_id: &str,
  site: &SiteConfig,
) -> Result<Summary, Error>
where
  C: KvCache,
{
  let auth      = esi.authenticate(client_id, &site.refresh_token).await?;
  let contracts = esi
    .entity_contracts(&auth, site.entity_type, site.entity_id)
    .await?;
  let summary   = summarize(&contracts, site.entity_id, Utc::now());

  put_json(cache, &site.url, &summary).await?;

  info!(
    site = %site.url,
    fetched = contracts.len(),
    qualifying = summary.num_contracts,
    "refreshed site"
  );
  Ok(summary)
}
