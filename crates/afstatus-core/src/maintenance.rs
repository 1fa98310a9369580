//! The daily upstream maintenance window during which refreshes are skipped.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A window starting on the hour `hour` (UTC) and lasting `until_minute`
/// minutes. `until_minute` must be below 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceWindow {
  pub hour:         u32,
  pub until_minute: u32,
}

impl Default for MaintenanceWindow {
  /// ESI's daily downtime: 11:00 to 11:20 UTC.
  fn default() -> Self {
    Self { hour: 11, until_minute: 20 }
  }
}

impl MaintenanceWindow {
  pub fn contains(&self, now: DateTime<Utc>) -> bool {
    now.hour() == self.hour && now.minute() < self.until_minute
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 3, 14, hour, minute, 0).unwrap()
  }

  #[test]
  fn default_window() {
    let window = MaintenanceWindow::default();
    assert!(window.contains(at(11, 0)));
    assert!(window.contains(at(11, 5)));
    assert!(window.contains(at(11, 19)));
    assert!(!window.contains(at(11, 20)));
    assert!(!window.contains(at(11, 25)));
    assert!(!window.contains(at(10, 59)));
    assert!(!window.contains(at(23, 5)));
  }

  #[test]
  fn custom_window() {
    let window = MaintenanceWindow { hour: 3, until_minute: 45 };
    assert!(window.contains(at(3, 44)));
    assert!(!window.contains(at(3, 45)));
    assert!(!window.contains(at(11, 5)));
  }
}
