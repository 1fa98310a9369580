//! The fixed retry ladder used for every ESI request.

use std::time::Duration;

/// Pre-request delays, in milliseconds. Attempt 1 goes out immediately.
pub const DEFAULT_LADDER_MS: [u64; 9] =
  [0, 10, 160, 810, 2_560, 6_250, 10_000, 10_000, 10_000];

/// A fixed sequence of pre-request delays; one attempt per entry.
///
/// There is no jitter and no distinction between failure kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySchedule {
  delays: Vec<Duration>,
}

impl Default for RetrySchedule {
  fn default() -> Self { Self::from_millis(&DEFAULT_LADDER_MS) }
}

impl RetrySchedule {
  /// An empty schedule is replaced by a single immediate attempt.
  pub fn new(delays: Vec<Duration>) -> Self {
    if delays.is_empty() {
      return Self { delays: vec![Duration::ZERO] };
    }
    Self { delays }
  }

  pub fn from_millis(millis: &[u64]) -> Self {
    Self::new(millis.iter().copied().map(Duration::from_millis).collect())
  }

  pub fn attempts(&self) -> usize { self.delays.len() }

  pub fn delays(&self) -> &[Duration] { &self.delays }

  /// Total time slept before `attempt` (1-based) is sent, counting its own
  /// pre-request delay.
  pub fn cumulative_delay(&self, attempt: usize) -> Duration {
    self.delays.iter().take(attempt).sum()
  }
}

/// Suspend for `delay`. A zero delay returns without yielding to a timer.
pub async fn sleep(delay: Duration) {
  if !delay.is_zero() {
    tokio::time::sleep(delay).await;
  }
}
