//! Status page handler: one cached summary per host.

use afstatus_core::{
  cache::{KvCache, get_json},
  summary::Summary,
};
use axum::{
  extract::State,
  http::{HeaderMap, StatusCode, Uri, header},
  response::Response,
};
use chrono::Utc;

use crate::{AppState, error::Error, handlers::html_response, render};

/// Render the summary cached under the request host's first label.
pub async fn handler<C>(
  State(state): State<AppState<C>>,
  uri: Uri,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  C: KvCache + Clone + Send + Sync + 'static,
{
  let key = site_key(&uri, &headers)
    .ok_or_else(|| Error::BadRequest("request has no host".to_owned()))?;

  let summary: Summary = get_json(&*state.cache, &key)
    .await?
    .ok_or_else(|| Error::CacheMiss(key.clone()))?;

  let elapsed = summary.elapsed(Utc::now());
  Ok(html_response(
    StatusCode::OK,
    render::status_page(&key, &summary, elapsed),
  ))
}

/// First DNS label of the request host, lower-cased.
///
/// The URI authority wins over the `Host` header; any port is dropped.
/// Bracketed IPv6 literals have no DNS label and yield `None`.
pub fn site_key(uri: &Uri, headers: &HeaderMap) -> Option<String> {
  let host = match uri.host() {
    Some(h) => h,
    None => headers.get(header::HOST)?.to_str().ok()?,
  };
  if host.starts_with('[') {
    return None;
  }
  let label = host.split(':').next()?.split('.').next()?.trim();
  if label.is_empty() {
    return None;
  }
  Some(label.to_ascii_lowercase())
}
