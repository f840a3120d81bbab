use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use eyre::{Result, WrapErr};
use recurslot_core::models::NewSlotInstance;
use recurslot_db::{SlotFilter, SlotStore};

/// Drops candidates whose `(mentor_id, start_time)` is already taken in the
/// store, or that repeat an earlier candidate in the same batch.
///
/// Issues a single query covering every candidate; an empty batch does not
/// touch the store.
pub async fn filter_new(
    candidates: Vec<NewSlotInstance>,
    store: &dyn SlotStore,
) -> Result<Vec<NewSlotInstance>> {
    if candidates.is_empty() {
        return Ok(candidates);
    }

    let mentor_ids: BTreeSet<&str> = candidates.iter().map(|c| c.mentor_id.as_str()).collect();
    let start_times: BTreeSet<DateTime<Utc>> = candidates.iter().map(|c| c.start_time).collect();

    let filter = SlotFilter::new()
        .mentors(mentor_ids.into_iter().map(str::to_string).collect())
        .starting_at(start_times.into_iter().collect());

    let existing = store
        .find_instances(&filter)
        .await
        .wrap_err("Failed to look up existing slots")?;

    let mut taken: HashSet<(String, DateTime<Utc>)> = existing
        .into_iter()
        .map(|slot| (slot.mentor_id, slot.start_time))
        .collect();

    let before = candidates.len();
    let fresh: Vec<NewSlotInstance> = candidates
        .into_iter()
        .filter(|c| taken.insert((c.mentor_id.clone(), c.start_time)))
        .collect();

    if fresh.len() < before {
        tracing::debug!(
            "Dropped {} of {} candidate slots that already exist",
            before - fresh.len(),
            before
        );
    }

    Ok(fresh)
}
