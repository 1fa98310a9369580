//! Error types for `afstatus-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no cached entry for key {key:?}")]
  CacheMiss { key: String },

  #[error("cache error: {0}")]
  Cache(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
