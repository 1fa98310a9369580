//! Mock ESI/SSO server for refresh and scheduler tests.

use std::{
  collections::HashMap,
  net::SocketAddr,
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use afstatus_esi::{EsiClient, EsiConfig, RetrySchedule};
use axum::{
  Form, Json, Router,
  extract::{Path, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
  routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Serves one page of contracts per entity id. The refresh token `"bad"` is
/// rejected by the token endpoint.
#[derive(Clone, Default)]
pub struct MockEsi {
  contracts:      Arc<HashMap<i64, Vec<Value>>>,
  token_requests: Arc<AtomicUsize>,
}

impl MockEsi {
  pub fn with_contracts(entity_id: i64, contracts: Vec<Value>) -> Self {
    Self::default().and_contracts(entity_id, contracts)
  }

  pub fn and_contracts(mut self, entity_id: i64, contracts: Vec<Value>) -> Self {
    Arc::make_mut(&mut self.contracts).insert(entity_id, contracts);
    self
  }

  pub fn token_requests(&self) -> usize {
    self.token_requests.load(Ordering::SeqCst)
  }

  pub async fn serve(self) -> SocketAddr {
    let app = Router::new()
      .route("/v1/{kind}/{id}/contracts/", get(contracts))
      .route("/v2/oauth/token", post(token))
      .with_state(self);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });
    addr
  }
}

async fn token(
  State(mock): State<MockEsi>,
  Form(form): Form<HashMap<String, String>>,
) -> Response {
  mock.token_requests.fetch_add(1, Ordering::SeqCst);
  match form.get("refresh_token").map(String::as_str) {
    Some("bad") | None => StatusCode::BAD_REQUEST.into_response(),
    Some(_) => Json(json!({ "access_token": "access-token" })).into_response(),
  }
}

async fn contracts(
  State(mock): State<MockEsi>,
  Path((_kind, id)): Path<(String, i64)>,
  headers: HeaderMap,
) -> Response {
  let authorized = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    == Some("Bearer access-token");
  if !authorized {
    return StatusCode::FORBIDDEN.into_response();
  }
  let body = mock.contracts.get(&id).cloned().unwrap_or_default();
  ([("x-pages", "1")], Json(body)).into_response()
}

pub fn esi_client(addr: SocketAddr) -> EsiClient {
  EsiClient::new(EsiConfig {
    base_url: format!("http://{addr}/v1"),
    token_url: format!("http://{addr}/v2/oauth/token"),
    retry: RetrySchedule::new(vec![Duration::ZERO; 2]),
    ..EsiConfig::default()
  })
  .unwrap()
}

/// An outstanding "Team" item exchange worth 50M, assigned to `entity_id`.
pub fn team_contract(entity_id: i64) -> Value {
  let now = Utc::now();
  json!({
    "assignee_id":  entity_id,
    "date_expired": (now + chrono::Duration::days(3)).to_rfc3339(),
    "date_issued":  (now - chrono::Duration::hours(6)).to_rfc3339(),
    "reward":       50_000_000.0,
    "status":       "outstanding",
    "title":        "Team Deadspace",
    "type":         "item_exchange",
  })
}
