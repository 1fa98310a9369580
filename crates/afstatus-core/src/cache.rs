//! The `KvCache` trait and typed JSON helpers on top of it.
//!
//! The trait is implemented by storage backends (e.g. `afstatus-store-sqlite`).
//! The refresher, scheduler and request handler receive a cache explicitly and
//! never reach for a global binding.

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result};

/// A flat string-to-string store with atomic per-key writes.
///
/// Readers racing a writer observe either the previous or the new value,
/// never a partial one.
pub trait KvCache: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the raw value at `key`. Returns `None` if the key is absent.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Replace the value at `key` wholesale.
  fn put<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

/// Read and deserialise the JSON value at `key`.
pub async fn get_json<C, T>(cache: &C, key: &str) -> Result<Option<T>>
where
  C: KvCache,
  T: DeserializeOwned,
{
  let raw = cache
    .get(key)
    .await
    .map_err(|e| Error::Cache(Box::new(e)))?;
  raw.map(|s| serde_json::from_str(&s)).transpose().map_err(Error::from)
}

/// Like [`get_json`], but an absent key is an [`Error::CacheMiss`].
pub async fn require_json<C, T>(cache: &C, key: &str) -> Result<T>
where
  C: KvCache,
  T: DeserializeOwned,
{
  get_json(cache, key)
    .await?
    .ok_or_else(|| Error::CacheMiss { key: key.to_owned() })
}

/// Serialise `value` and write it at `key`.
pub async fn put_json<C, T>(cache: &C, key: &str, value: &T) -> Result<()>
where
  C: KvCache,
  T: Serialize + ?Sized,
{
  let raw = serde_json::to_string(value)?;
  cache
    .put(key, raw)
    .await
    .map_err(|e| Error::Cache(Box::new(e)))
}
