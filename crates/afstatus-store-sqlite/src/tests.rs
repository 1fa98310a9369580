//! Integration tests for `SqliteCache` against an in-memory database.

use afstatus_core::{
  Error as CoreError,
  cache::{KvCache, get_json, put_json, require_json},
  site::{CONFIG_KEY, EntityType, SiteConfig, StatusConfig},
  summary::{Bucket, Summary},
};

use crate::SqliteCache;

async fn cache() -> SqliteCache {
  SqliteCache::open_in_memory()
    .await
    .expect("in-memory cache")
}

// ─── Raw access ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_returns_none() {
  let c = cache().await;
  assert!(c.get("nothing").await.unwrap().is_none());
}

#[tokio::test]
async fn put_then_get() {
  let c = cache().await;
  c.put("alpha", "{\"a\":1}".to_owned()).await.unwrap();
  assert_eq!(c.get("alpha").await.unwrap().as_deref(), Some("{\"a\":1}"));
}

#[tokio::test]
async fn put_overwrites_wholesale() {
  let c = cache().await;
  c.put("alpha", "{\"a\":1,\"b\":2}".to_owned()).await.unwrap();
  c.put("alpha", "{\"c\":3}".to_owned()).await.unwrap();
  assert_eq!(c.get("alpha").await.unwrap().as_deref(), Some("{\"c\":3}"));
  assert_eq!(c.keys().await.unwrap(), vec!["alpha".to_owned()]);
}

#[tokio::test]
async fn keys_are_independent() {
  let c = cache().await;
  c.put("beta", "2".to_owned()).await.unwrap();
  c.put("alpha", "1".to_owned()).await.unwrap();
  assert_eq!(c.get("alpha").await.unwrap().as_deref(), Some("1"));
  assert_eq!(c.get("beta").await.unwrap().as_deref(), Some("2"));
  assert_eq!(c.keys().await.unwrap(), vec!["alpha".to_owned(), "beta".to_owned()]);
}

#[tokio::test]
async fn reopening_a_file_keeps_values() {
  let path = std::env::temp_dir().join(format!(
    "afstatus-cache-test-{}.sqlite",
    std::process::id()
  ));
  let _ = std::fs::remove_file(&path);

  {
    let c = SqliteCache::open(&path).await.unwrap();
    c.put("alpha", "1".to_owned()).await.unwrap();
  }
  let c = SqliteCache::open(&path).await.unwrap();
  assert_eq!(c.get("alpha").await.unwrap().as_deref(), Some("1"));

  drop(c);
  let _ = std::fs::remove_file(&path);
}

// ─── Typed helpers ───────────────────────────────────────────────────────────

#[tokio::test]
async fn summary_round_trips_through_json_helpers() {
  let c = cache().await;
  let summary = Summary {
    num_contracts: 3,
    serps: Bucket { count: 4, isk: 101 },
    ..Summary::default()
  };
  put_json(&c, "alpha", &summary).await.unwrap();
  let loaded: Option<Summary> = get_json(&c, "alpha").await.unwrap();
  assert_eq!(loaded, Some(summary));
}

#[tokio::test]
async fn require_json_reports_cache_miss() {
  let c = cache().await;
  let err = require_json::<_, StatusConfig>(&c, CONFIG_KEY).await.unwrap_err();
  assert!(matches!(err, CoreError::CacheMiss { ref key } if key == CONFIG_KEY));
}

#[tokio::test]
async fn malformed_entry_is_a_serialization_error() {
  let c = cache().await;
  c.put("alpha", "not json".to_owned()).await.unwrap();
  let err = get_json::<_, Summary>(&c, "alpha").await.unwrap_err();
  assert!(matches!(err, CoreError::Serialization(_)));
}

#[tokio::test]
async fn config_record_uses_camel_case_keys() {
  let c = cache().await;
  let config = StatusConfig {
    client_id: "client".to_owned(),
    sites:     vec![SiteConfig {
      url:           "alpha".to_owned(),
      entity_type:   EntityType::Corporation,
      entity_id:     98000001,
      refresh_token: "token".to_owned(),
    }],
  };
  put_json(&c, CONFIG_KEY, &config).await.unwrap();

  let raw = c.get(CONFIG_KEY).await.unwrap().unwrap();
  let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
  assert_eq!(value["clientId"], "client");
  assert_eq!(value["sites"][0]["entityType"], "corporation");
  assert_eq!(value["sites"][0]["refreshToken"], "token");

  let loaded: StatusConfig = require_json(&c, CONFIG_KEY).await.unwrap();
  assert_eq!(loaded, config);
}
