//! Reduction of an entity's contract list into a [`Summary`].

use chrono::{DateTime, Utc};

use crate::{
  contract::Contract,
  summary::{BucketKind, Summary},
};

/// Whether a contract counts towards the summary for `entity_id` at `now`:
/// an outstanding item exchange assigned to the entity that has not expired.
pub fn qualifies(contract: &Contract, entity_id: i64, now: DateTime<Utc>) -> bool {
  contract.is_outstanding()
    && contract.is_item_exchange()
    && contract.assignee_id == entity_id
    && contract.date_expired >= now
}

/// Summarise every qualifying contract.
///
/// Pure: `now` is only used for the expiry filter, so identical inputs always
/// produce an identical summary. Untitled contracts count towards
/// `num_contracts` and `oldest` but are not bucketed.
pub fn summarize<'a, I>(contracts: I, entity_id: i64, now: DateTime<Utc>) -> Summary
where
  I: IntoIterator<Item = &'a Contract>,
{
  let mut summary = Summary::default();

  for contract in contracts {
    if !qualifies(contract, entity_id, now) {
      continue;
    }

    summary.oldest = Some(match summary.oldest {
      Some(oldest) => oldest.min(contract.date_issued),
      None => contract.date_issued,
    });
    summary.num_contracts += 1;

    if let Some(title) = &contract.title {
      summary
        .bucket_mut(BucketKind::from_title(title))
        .add_reward(contract.reward);
    }
  }

  summary
}
