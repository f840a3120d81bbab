//! # Slot Store
//!
//! The storage seam the scheduler works against. [`PgSlotStore`] is the
//! production implementation; [`crate::memory::InMemorySlotStore`] and
//! [`crate::MockSlotStore`] back the tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use recurslot_core::models::{NewSlotInstance, SlotInstance};

use crate::{repositories::slot_instance, DbPool};

/// Conjunction of optional predicates over slot instances.
///
/// Time bounds are strict. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotFilter {
    pub mentor_ids: Option<Vec<String>>,
    pub is_recurring: Option<bool>,
    pub is_active: Option<bool>,
    /// `start_time > start_after`
    pub start_after: Option<DateTime<Utc>>,
    /// `start_time < start_before`
    pub start_before: Option<DateTime<Utc>>,
    /// `start_time` is one of these
    pub start_times: Option<Vec<DateTime<Utc>>>,
    /// `end_time < end_before`
    pub end_before: Option<DateTime<Utc>>,
}

impl SlotFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = Some(is_recurring);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn mentors(mut self, mentor_ids: Vec<String>) -> Self {
        self.mentor_ids = Some(mentor_ids);
        self
    }

    pub fn starting_after(mut self, instant: DateTime<Utc>) -> Self {
        self.start_after = Some(instant);
        self
    }

    pub fn starting_before(mut self, instant: DateTime<Utc>) -> Self {
        self.start_before = Some(instant);
        self
    }

    pub fn starting_at(mut self, instants: Vec<DateTime<Utc>>) -> Self {
        self.start_times = Some(instants);
        self
    }

    pub fn ending_before(mut self, instant: DateTime<Utc>) -> Self {
        self.end_before = Some(instant);
        self
    }

    /// True when no predicate is set and the filter would match every row.
    pub fn is_unbounded(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, slot: &SlotInstance) -> bool {
        self.mentor_ids
            .as_ref()
            .is_none_or(|ids| ids.iter().any(|id| *id == slot.mentor_id))
            && self.is_recurring.is_none_or(|v| slot.is_recurring == v)
            && self.is_active.is_none_or(|v| slot.is_active == v)
            && self.start_after.is_none_or(|t| slot.start_time > t)
            && self.start_before.is_none_or(|t| slot.start_time < t)
            && self
                .start_times
                .as_ref()
                .is_none_or(|times| times.contains(&slot.start_time))
            && self.end_before.is_none_or(|t| slot.end_time < t)
    }
}

/// Result of a bulk insert. Rows rejected by the `(mentor_id, start_time)`
/// uniqueness constraint are counted as skipped, not failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    pub inserted: u64,
    pub skipped: u64,
}

#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Instances matching `filter`, ordered by start time.
    async fn find_instances(&self, filter: &SlotFilter) -> Result<Vec<SlotInstance>>;

    /// Number of instances matching `filter`, counted by the store.
    async fn count_instances(&self, filter: &SlotFilter) -> Result<u64>;

    /// Inserts all slots, skipping any whose `(mentor_id, start_time)` already exists.
    async fn insert_many(&self, slots: &[NewSlotInstance]) -> Result<InsertOutcome>;

    /// Deletes every instance matching `filter` and returns how many were removed.
    /// An unbounded filter is rejected.
    async fn delete_many(&self, filter: &SlotFilter) -> Result<u64>;
}

/// Postgres-backed store over the `mentor_time_slots` table.
#[derive(Debug, Clone)]
pub struct PgSlotStore {
    pool: DbPool,
}

impl PgSlotStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SlotStore for PgSlotStore {
    async fn find_instances(&self, filter: &SlotFilter) -> Result<Vec<SlotInstance>> {
        slot_instance::find_slot_instances(&self.pool, filter).await
    }

    async fn count_instances(&self, filter: &SlotFilter) -> Result<u64> {
        slot_instance::count_slot_instances(&self.pool, filter).await
    }

    async fn insert_many(&self, slots: &[NewSlotInstance]) -> Result<InsertOutcome> {
        slot_instance::insert_slot_instances(&self.pool, slots).await
    }

    async fn delete_many(&self, filter: &SlotFilter) -> Result<u64> {
        slot_instance::delete_slot_instances(&self.pool, filter).await
    }
}
