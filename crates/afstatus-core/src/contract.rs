//! Contract records as returned by the ESI contract listing endpoints.
//!
//! Only the fields the classifier reads are modelled; everything else in the
//! upstream payload is ignored on deserialisation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a contract. Anything other than `outstanding` is
/// irrelevant to the summary and collapses into [`ContractStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
  Outstanding,
  #[serde(other)]
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
  ItemExchange,
  #[serde(other)]
  Other,
}

/// A single upstream contract. Read-only; consumed once per refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
  pub status:       ContractStatus,
  #[serde(rename = "type")]
  pub kind:         ContractType,
  pub assignee_id:  i64,
  pub date_expired: DateTime<Utc>,
  pub date_issued:  DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title:        Option<String>,
  /// ISK reward. ESI omits the field on some contracts; treated as zero.
  #[serde(default)]
  pub reward:       f64,
}

impl Contract {
  pub fn is_outstanding(&self) -> bool {
    self.status == ContractStatus::Outstanding
  }

  pub fn is_item_exchange(&self) -> bool {
    self.kind == ContractType::ItemExchange
  }
}
