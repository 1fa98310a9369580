//! Site configuration: which entity each status page tracks.

use serde::{Deserialize, Serialize};

/// Cache key holding the [`StatusConfig`] record.
pub const CONFIG_KEY: &str = "_Zconfig";

/// The kind of entity whose contracts are polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
  Character,
  Corporation,
}

impl EntityType {
  /// Singular path segment, as used in ESI routes (`/characters/…`).
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Character => "character",
      Self::Corporation => "corporation",
    }
  }
}

/// One configured status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
  /// Hostname slug; also the cache key for this site's summary.
  pub url:           String,
  pub entity_type:   EntityType,
  pub entity_id:     i64,
  pub refresh_token: String,
}

/// The full configuration record, stored under [`CONFIG_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusConfig {
  /// SSO application client id shared by every site.
  pub client_id: String,
  #[serde(default)]
  pub sites:     Vec<SiteConfig>,
}
