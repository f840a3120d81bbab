use chrono::{DateTime, Utc};
use recurslot_core::models::TemplateKey;
use serde::{Deserialize, Serialize};

/// A template the maintainer could not extend during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFailure {
    pub mentor_id: String,
    pub template: String,
    pub error: String,
}

impl TemplateFailure {
    pub fn new(key: &TemplateKey, error: &eyre::Report) -> Self {
        Self {
            mentor_id: key.mentor_id.clone(),
            template: key.to_string(),
            error: format!("{:#}", error),
        }
    }
}

/// Outcome of one maintenance run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    pub slots_generated: u64,
    pub slots_deleted: u64,
    /// Candidates that turned out to exist already, either found by the
    /// dedup query or rejected by the store's uniqueness constraint.
    pub skipped_duplicates: u64,
    pub templates_processed: usize,
    /// Templates whose coverage already reached the horizon.
    pub templates_satisfied: usize,
    pub errors: Vec<TemplateFailure>,
    pub ran_at: DateTime<Utc>,
}

impl MaintenanceReport {
    pub fn new(ran_at: DateTime<Utc>) -> Self {
        Self {
            slots_generated: 0,
            slots_deleted: 0,
            skipped_duplicates: 0,
            templates_processed: 0,
            templates_satisfied: 0,
            errors: Vec::new(),
            ran_at,
        }
    }

    pub fn net_change(&self) -> i64 {
        self.slots_generated as i64 - self.slots_deleted as i64
    }

    /// True when every template was processed without error.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of materializing a single template on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializeOutcome {
    pub slots_generated: u64,
    pub skipped_duplicates: u64,
}
