//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{handlers::html_response, render};

#[derive(Debug, Error)]
pub enum Error {
  /// No summary cached for this site key yet.
  #[error("no cached summary for {0:?}")]
  CacheMiss(String),
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("cache error: {0}")]
  Core(afstatus_core::Error),
  /// Upstream failure during a refresh. The status handler only reads the
  /// cache, so this reaches a response only if an ESI-backed route is added.
  #[error("esi error: {0}")]
  Esi(#[from] afstatus_esi::Error),
}

impl From<afstatus_core::Error> for Error {
  fn from(e: afstatus_core::Error) -> Self {
    match e {
      afstatus_core::Error::CacheMiss { key } => Error::CacheMiss(key),
      other => Error::Core(other),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::CacheMiss(key) => {
        html_response(StatusCode::NOT_FOUND, render::pending_page(&key))
      }
      Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
      Error::Core(e) => {
        tracing::error!(error = %e, "failed to read cached summary");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
      Error::Esi(e) => {
        (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
      }
    }
  }
}
