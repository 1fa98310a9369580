//! The aggregate summary cached per site, and the elapsed-time view derived
//! from it at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ISK_UNIT: f64 = 1_000_000.0;
const TIER_UNIT: f64 = 25_000_000.0;

/// Which bucket a titled contract is counted towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
  Teams,
  Serps,
  Agents,
  Unknown,
}

impl BucketKind {
  /// Classify a contract title. Matching is case-insensitive and the first
  /// rule that matches wins.
  pub fn from_title(title: &str) -> Self {
    let title = title.to_lowercase();
    if title.contains("team") {
      Self::Teams
    } else if title.contains("serp") {
      Self::Serps
    } else if title.contains("angel") || title.contains("sansha") {
      Self::Agents
    } else {
      Self::Unknown
    }
  }
}

/// Running totals for one bucket.
///
/// `count` and `isk` are independent sums over each contract's reward, not
/// derived from each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
  /// Sum of `floor(reward / 25M)`.
  pub count: u64,
  /// Sum of `floor(reward / 1M)`.
  pub isk:   u64,
}

impl Bucket {
  /// Add one contract's reward. Float-to-int casts and the running sums
  /// both saturate, so negative rewards contribute nothing and huge ones pin
  /// at `u64::MAX`.
  pub fn add_reward(&mut self, reward: f64) {
    self.isk = self.isk.saturating_add((reward / ISK_UNIT).floor() as u64);
    self.count = self.count.saturating_add((reward / TIER_UNIT).floor() as u64);
  }
}

/// The cached per-site reduction of all qualifying contracts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
  /// Earliest `date_issued` among qualifying contracts.
  pub oldest:        Option<DateTime<Utc>>,
  pub num_contracts: u64,
  pub teams:         Bucket,
  pub serps:         Bucket,
  pub agents:        Bucket,
  pub unknown:       Bucket,
}

impl Summary {
  pub fn bucket(&self, kind: BucketKind) -> &Bucket {
    match kind {
      BucketKind::Teams => &self.teams,
      BucketKind::Serps => &self.serps,
      BucketKind::Agents => &self.agents,
      BucketKind::Unknown => &self.unknown,
    }
  }

  pub fn bucket_mut(&mut self, kind: BucketKind) -> &mut Bucket {
    match kind {
      BucketKind::Teams => &mut self.teams,
      BucketKind::Serps => &mut self.serps,
      BucketKind::Agents => &mut self.agents,
      BucketKind::Unknown => &mut self.unknown,
    }
  }

  /// Time since the oldest qualifying contract was issued, if there is one.
  pub fn elapsed(&self, now: DateTime<Utc>) -> Option<Elapsed> {
    self.oldest.map(|oldest| Elapsed::between(oldest, now))
  }
}

/// Wall-clock age split into display fields. Whole minutes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elapsed {
  pub minutes: i64,
  pub hours:   i64,
  pub days:    i64,
}

impl Elapsed {
  /// A `since` later than `now` (clock skew) clamps to zero.
  pub fn between(since: DateTime<Utc>, now: DateTime<Utc>) -> Self {
    let total = (now - since).num_minutes().max(0);
    Self {
      minutes: total % 60,
      hours:   (total / 60) % 24,
      days:    total / 1440,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  #[test]
  fn title_rules_in_order() {
    assert_eq!(BucketKind::from_title("Team Deadspace"), BucketKind::Teams);
    assert_eq!(BucketKind::from_title("SERPENTIS HQ"), BucketKind::Serps);
    assert_eq!(BucketKind::from_title("angel hideout"), BucketKind::Agents);
    assert_eq!(BucketKind::from_title("Sansha outpost"), BucketKind::Agents);
    assert_eq!(BucketKind::from_title("misc loot"), BucketKind::Unknown);
    assert_eq!(BucketKind::from_title(""), BucketKind::Unknown);
    // "team" is checked before "serp".
    assert_eq!(BucketKind::from_title("serp team"), BucketKind::Teams);
  }

  #[test]
  fn bucket_floors_each_reward() {
    let mut bucket = Bucket::default();
    bucket.add_reward(49_999_999.0);
    assert_eq!(bucket, Bucket { count: 1, isk: 49 });
    bucket.add_reward(24_999_999.0);
    assert_eq!(bucket, Bucket { count: 1, isk: 73 });
  }

  #[test]
  fn negative_reward_contributes_nothing() {
    let mut bucket = Bucket::default();
    bucket.add_reward(-30_000_000.0);
    assert_eq!(bucket, Bucket::default());
  }

  #[test]
  fn huge_rewards_saturate() {
    let mut bucket = Bucket::default();
    bucket.add_reward(1e26);
    bucket.add_reward(1e26);
    assert_eq!(bucket, Bucket { count: u64::MAX, isk: u64::MAX });
  }

  #[test]
  fn elapsed_splits_minutes() {
    let since = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let now = since + Duration::days(2) + Duration::hours(3) + Duration::minutes(4)
      + Duration::seconds(59);
    assert_eq!(
      Elapsed::between(since, now),
      Elapsed { minutes: 4, hours: 3, days: 2 }
    );
  }

  #[test]
  fn elapsed_clamps_future_timestamps() {
    let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let since = now + Duration::hours(1);
    assert_eq!(
      Elapsed::between(since, now),
      Elapsed { minutes: 0, hours: 0, days: 0 }
    );
  }

  #[test]
  fn summary_json_shape() {
    let summary = Summary {
      num_contracts: 1,
      teams: Bucket { count: 2, isk: 50 },
      ..Summary::default()
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["oldest"], serde_json::Value::Null);
    assert_eq!(json["numContracts"], 1);
    assert_eq!(json["teams"]["count"], 2);
    assert_eq!(json["teams"]["isk"], 50);
    assert!(summary.elapsed(Utc::now()).is_none());
  }
}
