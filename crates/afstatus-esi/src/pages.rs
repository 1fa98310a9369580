//! Collecting every page of a paginated resource.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::{EsiClient, Page, Result};

impl EsiClient {
  /// Fetch every page of a resource and concatenate the records in page
  /// order.
  ///
  /// Page 1 is fetched alone to learn the page count; pages `2..=N` are then
  /// requested concurrently and appended in ascending page order, however they
  /// complete. Any page failing fails the whole call. Pages still in flight
  /// when that happens run to completion and are discarded.
  pub async fn get_all_pages<T, F>(
    &self,
    url_for: F,
    headers: &HeaderMap,
  ) -> Result<Vec<T>>
  where
    T: DeserializeOwned + Send + 'static,
    F: Fn(u32) -> String,
  {
    let first: Page<Vec<T>> = self.fetch(&url_for(1), headers).await?;
    let pages = first.total_pages();
    let mut records = first.body;
    debug!(pages, "fetched first page");

    if pages == 1 {
      return Ok(records);
    }

    let limit = self
      .config
      .max_concurrent_pages
      .map(|n| Arc::new(Semaphore::new(n.max(1))));

    let handles: Vec<_> = (2..=pages)
      .map(|page| {
        let client  = self.clone();
        let url     = url_for(page);
        let headers = headers.clone();
        let limit   = limit.clone();
        tokio::spawn(async move {
          let _permit = match limit {
            Some(sem) => sem.acquire_owned().await.ok(),
            None => None,
          };
          client.fetch::<Vec<T>>(&url, &headers).await
        })
      })
      .collect();

    for handle in handles {
      let page = handle.await??;
      records.extend(page.body);
    }

    Ok(records)
  }
}
