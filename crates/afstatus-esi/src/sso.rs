//! Refresh-token exchange against the EVE SSO.

use std::fmt;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use crate::{EsiClient, Error, Result};

#[derive(Deserialize)]
struct TokenResponse {
  access_token: String,
}

/// Injects a bearer token into outgoing request headers.
///
/// Lives for a single refresh; the token is never persisted or reused.
#[derive(Clone)]
pub struct Authenticator {
  header: HeaderValue,
}

impl Authenticator {
  pub fn from_token(access_token: &str) -> Result<Self> {
    let mut header = HeaderValue::from_str(&format!("Bearer {access_token}"))
      .map_err(|_| Error::InvalidToken)?;
    header.set_sensitive(true);
    Ok(Self { header })
  }

  /// Set `Authorization: Bearer <token>`, keeping every other header.
  pub fn decorate(&self, mut headers: HeaderMap) -> HeaderMap {
    headers.insert(AUTHORIZATION, self.header.clone());
    headers
  }
}

impl fmt::Debug for Authenticator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Authenticator").finish_non_exhaustive()
  }
}

impl EsiClient {
  /// Exchange `refresh_token` for an access token.
  ///
  /// No retries: a rejected exchange is an [`Error::Authentication`].
  pub async fn authenticate(
    &self,
    client_id: &str,
    refresh_token: &str,
  ) -> Result<Authenticator> {
    let resp = self
      .client
      .post(&self.config.token_url)
      .form(&[
        ("grant_type", "refresh_token"),
        ("client_id", client_id),
        ("refresh_token", refresh_token),
      ])
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Authentication { status: resp.status().as_u16() });
    }

    let token: TokenResponse = resp.json().await?;
    debug!(client_id, "exchanged refresh token");
    Authenticator::from_token(&token.access_token)
  }
}
