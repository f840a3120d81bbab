use async_trait::async_trait;
use chrono::Utc;
use eyre::{bail, Result};
use recurslot_core::models::{NewSlotInstance, SlotInstance};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{InsertOutcome, SlotFilter, SlotStore};

/// Process-local store with the same uniqueness semantics as the Postgres
/// table. Used by tests and local runs without a database.
#[derive(Debug, Default)]
pub struct InMemorySlotStore {
    slots: RwLock<Vec<SlotInstance>>,
}

impl InMemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with existing instances, bypassing the uniqueness check.
    pub fn with_instances(instances: Vec<SlotInstance>) -> Self {
        Self {
            slots: RwLock::new(instances),
        }
    }

    /// Snapshot ordered by start time.
    pub async fn snapshot(&self) -> Vec<SlotInstance> {
        let mut slots = self.slots.read().await.clone();
        slots.sort_by_key(|slot| slot.start_time);
        slots
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.read().await.is_empty()
    }
}

#[async_trait]
impl SlotStore for InMemorySlotStore {
    async fn find_instances(&self, filter: &SlotFilter) -> Result<Vec<SlotInstance>> {
        let mut found: Vec<SlotInstance> = self
            .slots
            .read()
            .await
            .iter()
            .filter(|slot| filter.matches(slot))
            .cloned()
            .collect();
        found.sort_by_key(|slot| slot.start_time);
        Ok(found)
    }

    async fn count_instances(&self, filter: &SlotFilter) -> Result<u64> {
        let slots = self.slots.read().await;
        Ok(slots.iter().filter(|slot| filter.matches(slot)).count() as u64)
    }

    async fn insert_many(&self, new_slots: &[NewSlotInstance]) -> Result<InsertOutcome> {
        let mut slots = self.slots.write().await;
        let mut outcome = InsertOutcome::default();
        let now = Utc::now();

        for new_slot in new_slots {
            let exists = slots
                .iter()
                .any(|slot| slot.mentor_id == new_slot.mentor_id && slot.start_time == new_slot.start_time);
            if exists {
                outcome.skipped += 1;
                continue;
            }
            slots.push(new_slot.clone().into_instance(Uuid::new_v4(), now));
            outcome.inserted += 1;
        }

        Ok(outcome)
    }

    async fn delete_many(&self, filter: &SlotFilter) -> Result<u64> {
        if filter.is_unbounded() {
            bail!("Refusing to delete mentor time slots without a filter");
        }

        let mut slots = self.slots.write().await;
        let before = slots.len();
        slots.retain(|slot| !filter.matches(slot));
        Ok((before - slots.len()) as u64)
    }
}
