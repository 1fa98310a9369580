//! [`SqliteCache`], the SQLite implementation of [`KvCache`].

use std::path::Path;

use afstatus_core::cache::KvCache;
use chrono::{SecondsFormat, Utc};
use rusqlite::OptionalExtension as _;

use crate::{Error, Result, schema::SCHEMA};

/// A flat key-value cache backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteCache {
  conn: tokio_rusqlite::Connection,
}

impl SqliteCache {
  /// Open (or create) a cache at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let cache = Self { conn };
    cache.init_schema().await?;
    Ok(cache)
  }

  /// Open an in-memory cache for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let cache = Self { conn };
    cache.init_schema().await?;
    Ok(cache)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// List every stored key, sorted. Used for operator diagnostics; the
  /// request path only reads single keys.
  pub async fn keys(&self) -> Result<Vec<String>> {
    let keys: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(keys)
      })
      .await?;
    Ok(keys)
  }
}

// ─── KvCache impl ────────────────────────────────────────────────────────────

impl KvCache for SqliteCache {
  type Error = Error;

  async fn get(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_owned();

    let value: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM kv WHERE key = ?1",
              rusqlite::params![key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(value)
  }

  async fn put(&self, key: &str, value: String) -> Result<()> {
    let key = key.to_owned();
    let at  = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    // A single upsert statement keeps the write atomic per key.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
           ON CONFLICT(key) DO UPDATE SET
             value      = excluded.value,
             updated_at = excluded.updated_at",
          rusqlite::params![key, value, at],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }
}
