//! Contract listings for characters and corporations.

use afstatus_core::{contract::Contract, site::EntityType};
use reqwest::header::HeaderMap;

use crate::{Authenticator, EsiClient, Result};

/// `<base>/<entity>s/<id>/contracts/?page=<page>`
pub fn contracts_url(base: &str, entity: EntityType, id: i64, page: u32) -> String {
  format!(
    "{}/{}s/{}/contracts/?page={}",
    base.trim_end_matches('/'),
    entity.as_str(),
    id,
    page
  )
}

impl EsiClient {
  /// Every contract visible to the entity, across all pages.
  pub async fn entity_contracts(
    &self,
    auth: &Authenticator,
    entity: EntityType,
    id: i64,
  ) -> Result<Vec<Contract>> {
    let base    = self.config.base_url.clone();
    let headers = auth.decorate(HeaderMap::new());
    self
      .get_all_pages(move |page| contracts_url(&base, entity, id, page), &headers)
      .await
  }
}
