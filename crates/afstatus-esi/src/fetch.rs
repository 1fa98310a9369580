//! Single-resource fetch with the retry ladder.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{EsiClient, Error, Result, retry};

/// Response header carrying the total page count of a paginated resource.
pub const X_PAGES: &str = "x-pages";

/// The first successful response for a request.
#[derive(Debug)]
pub struct Page<T> {
  pub headers: HeaderMap,
  pub body:    T,
}

impl<T> Page<T> {
  /// Total pages declared by `X-Pages`. Absent, non-numeric, or zero values
  /// mean a single page.
  pub fn total_pages(&self) -> u32 {
    self
      .headers
      .get(X_PAGES)
      .and_then(|v| v.to_str().ok())
      .and_then(|s| s.trim().parse::<u32>().ok())
      .filter(|&n| n > 0)
      .unwrap_or(1)
  }
}

impl EsiClient {
  /// `GET url`, retrying every non-2xx response and every transport failure
  /// on the configured ladder.
  ///
  /// A 2xx body that fails to decode is returned as [`Error::Decode`]
  /// without further attempts.
  pub async fn fetch<T>(&self, url: &str, headers: &HeaderMap) -> Result<Page<T>>
  where
    T: DeserializeOwned,
  {
    let schedule = &self.config.retry;
    let mut last_status = None;

    for (index, delay) in schedule.delays().iter().enumerate() {
      let attempt = index + 1;
      retry::sleep(*delay).await;

      match self.client.get(url).headers(headers.clone()).send().await {
        Ok(resp) if resp.status().is_success() => {
          debug!(url, attempt, "ESI request succeeded");
          let headers = resp.headers().clone();
          let body = resp.json::<T>().await.map_err(|source| Error::Decode {
            url: url.to_owned(),
            source,
          })?;
          return Ok(Page { headers, body });
        }
        Ok(resp) => {
          let status = resp.status().as_u16();
          last_status = Some(status);
          warn!(url, attempt, status, "ESI request failed");
        }
        Err(e) => {
          last_status = None;
          warn!(url, attempt, error = %e, "ESI request failed below HTTP");
        }
      }
    }

    Err(Error::RetryExhausted {
      url: url.to_owned(),
      attempts: schedule.attempts(),
      last_status,
    })
  }
}
