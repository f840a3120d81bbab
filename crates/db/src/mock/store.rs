use async_trait::async_trait;
use mockall::mock;
use recurslot_core::models::{NewSlotInstance, SlotInstance};

use crate::store::{InsertOutcome, SlotFilter, SlotStore};

// Mock store for testing failure paths
mock! {
    pub SlotStore {}

    #[async_trait]
    impl SlotStore for SlotStore {
        async fn find_instances(&self, filter: &SlotFilter) -> eyre::Result<Vec<SlotInstance>>;

        async fn count_instances(&self, filter: &SlotFilter) -> eyre::Result<u64>;

        async fn insert_many(&self, slots: &[NewSlotInstance]) -> eyre::Result<InsertOutcome>;

        async fn delete_many(&self, filter: &SlotFilter) -> eyre::Result<u64>;
    }
}
