//! Error type for `afstatus-esi`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Every attempt on the retry ladder failed.
  #[error("retry count exceeded after {attempts} attempts for {url} (last status: {last_status:?})")]
  RetryExhausted {
    url:         String,
    attempts:    usize,
    /// Status of the final attempt; `None` if it failed below HTTP.
    last_status: Option<u16>,
  },

  /// The SSO endpoint rejected the refresh token exchange.
  #[error("SSO token exchange failed with status {status}")]
  Authentication { status: u16 },

  #[error("access token is not a valid header value")]
  InvalidToken,

  #[error("failed to decode response from {url}: {source}")]
  Decode {
    url:    String,
    #[source]
    source: reqwest::Error,
  },

  #[error("http client error: {0}")]
  Client(#[from] reqwest::Error),

  #[error("page task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
