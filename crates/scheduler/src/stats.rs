use chrono::{DateTime, Utc};
use eyre::{Result, WrapErr};
use recurslot_db::{SlotFilter, SlotStore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringSlotStats {
    pub total_recurring_slots: u64,
    /// Active recurring slots starting at or after `now`
    pub future_slots: u64,
    pub past_slots: u64,
}

/// Counts active recurring slots on the store side; no rows are loaded.
pub async fn recurring_slot_stats(
    store: &dyn SlotStore,
    now: DateTime<Utc>,
) -> Result<RecurringSlotStats> {
    let recurring = SlotFilter::new().recurring(true).active(true);

    let total_recurring_slots = store
        .count_instances(&recurring)
        .await
        .wrap_err("Failed to count recurring slots")?;
    let past_slots = store
        .count_instances(&recurring.starting_before(now))
        .await
        .wrap_err("Failed to count past recurring slots")?;

    Ok(RecurringSlotStats {
        total_recurring_slots,
        future_slots: total_recurring_slots.saturating_sub(past_slots),
        past_slots,
    })
}
