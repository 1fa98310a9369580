//! Client for the EVE Swagger Interface (ESI) and its SSO token endpoint.
//!
//! Every request goes through the retry ladder in [`retry`]; paginated
//! resources are collected by [`EsiClient::get_all_pages`].

pub mod contracts;
pub mod error;
pub mod fetch;
pub mod pages;
pub mod retry;
pub mod sso;

pub use error::{Error, Result};
pub use fetch::Page;
pub use retry::RetrySchedule;
pub use sso::Authenticator;

use std::{sync::Arc, time::Duration};

use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://esi.evetech.net/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://login.eveonline.com/v2/oauth/token";

const USER_AGENT: &str = concat!("afstatus/", env!("CARGO_PKG_VERSION"));

/// Connection settings for ESI.
#[derive(Debug, Clone)]
pub struct EsiConfig {
  /// Versioned API root, without a trailing slash.
  pub base_url:             String,
  pub token_url:            String,
  pub retry:                RetrySchedule,
  /// Cap on in-flight page requests per aggregation; `None` is unbounded.
  pub max_concurrent_pages: Option<usize>,
  /// Per-request timeout.
  pub timeout:              Duration,
}

impl Default for EsiConfig {
  fn default() -> Self {
    Self {
      base_url:             DEFAULT_BASE_URL.to_owned(),
      token_url:            DEFAULT_TOKEN_URL.to_owned(),
      retry:                RetrySchedule::default(),
      max_concurrent_pages: None,
      timeout:              Duration::from_secs(30),
    }
  }
}

/// Async ESI client.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct EsiClient {
  client: Client,
  config: Arc<EsiConfig>,
}

impl EsiClient {
  pub fn new(config: EsiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .user_agent(USER_AGENT)
      .build()?;
    Ok(Self { client, config: Arc::new(config) })
  }

  pub fn config(&self) -> &EsiConfig { &self.config }
}
