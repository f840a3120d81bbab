//! # Window Maintainer
//!
//! Keeps every live recurrence template covered for `horizon_days` ahead of
//! now. A run is a single sequential pass:
//!
//! 1. Purge recurring slots whose end time has passed.
//! 2. Reconstruct templates from the remaining future slots.
//! 3. For each template whose latest slot sits inside the horizon, generate
//!    the days after it, drop those that already exist, and bulk-insert the
//!    rest.
//!
//! Steps 1 and 2 are prerequisites, so a store failure there aborts the run.
//! A failure in step 3 only affects its template and is recorded in the
//! report. Runs are idempotent: re-running immediately generates nothing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use eyre::{eyre, Result, WrapErr};
use recurslot_core::{
    errors::{SlotError, SlotResult},
    generator::{count_matching_days, generate},
    grouping::TemplateGroup,
    models::{NewSlotInstance, RecurrenceTemplate, TemplateKey},
};
use recurslot_db::{SlotFilter, SlotStore};
use tracing::{debug, error, info, warn};

use crate::{
    config::SchedulerConfig,
    dedup::filter_new,
    reconstruct::reconstruct,
    report::{MaintenanceReport, MaterializeOutcome, TemplateFailure},
    stats::{recurring_slot_stats, RecurringSlotStats},
};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// What happened to one template during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extension {
    /// Coverage already reaches the horizon.
    Satisfied,
    Extended(MaterializeOutcome),
}

pub struct WindowMaintainer {
    store: Arc<dyn SlotStore>,
    config: SchedulerConfig,
}

impl WindowMaintainer {
    pub fn new(store: Arc<dyn SlotStore>, config: SchedulerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Runs one maintenance pass as of `now`.
    ///
    /// # Errors
    ///
    /// * `SlotError::Database` - the purge or the template scan failed
    pub async fn run(&self, now: DateTime<Utc>) -> SlotResult<MaintenanceReport> {
        info!(
            "Starting recurring slot maintenance at {} with a {}-day horizon",
            now, self.config.horizon_days
        );

        let mut report = MaintenanceReport::new(now);

        report.slots_deleted = self.purge(now).await.map_err(|e| {
            error!("Recurring slot maintenance aborted during purge: {:#}", e);
            SlotError::Database(e)
        })?;

        let templates = reconstruct(self.store.as_ref(), now, self.config.notes_policy)
            .await
            .map_err(|e| {
                error!("Recurring slot maintenance aborted during reconstruction: {:#}", e);
                SlotError::Database(e)
            })?;
        report.templates_processed = templates.len();

        for (key, group) in &templates {
            match self.extend(key, group, now).await {
                Ok(Extension::Satisfied) => report.templates_satisfied += 1,
                Ok(Extension::Extended(outcome)) => {
                    report.slots_generated += outcome.slots_generated;
                    report.skipped_duplicates += outcome.skipped_duplicates;
                }
                Err(e) => {
                    warn!("Failed to extend template {}: {:#}", key, e);
                    report.errors.push(TemplateFailure::new(key, &e));
                }
            }
        }

        info!(
            "Recurring slot maintenance finished: {} generated, {} deleted, {} duplicates skipped, {} of {} templates failed",
            report.slots_generated,
            report.slots_deleted,
            report.skipped_duplicates,
            report.errors.len(),
            report.templates_processed
        );

        Ok(report)
    }

    /// [`WindowMaintainer::run`] bounded by the configured timeout.
    ///
    /// A timeout leaves the store in an unknown but consistent state; the
    /// run can simply be retried.
    pub async fn run_with_timeout(&self, now: DateTime<Utc>) -> SlotResult<MaintenanceReport> {
        let seconds = self.config.run_timeout_seconds;
        tokio::time::timeout(self.config.run_timeout(), self.run(now))
            .await
            .map_err(|_| {
                error!("Recurring slot maintenance timed out after {} seconds", seconds);
                SlotError::Timeout(seconds)
            })?
    }

    /// Materializes the next `horizon_days` of a newly created or edited
    /// template, starting today.
    ///
    /// # Errors
    ///
    /// * `SlotError::Validation` - the template is malformed; nothing is written
    /// * `SlotError::Database` - the dedup query or the insert failed
    pub async fn materialize(
        &self,
        template: &RecurrenceTemplate,
        now: DateTime<Utc>,
    ) -> SlotResult<MaterializeOutcome> {
        template.validate()?;

        let candidates = generate(template, now.date_naive(), self.config.horizon_days, now);
        let outcome = self.insert_fresh(candidates).await.wrap_err_with(|| {
            format!("Failed to materialize slots for mentor {}", template.mentor_id)
        })?;

        info!(
            "Materialized {} slots for mentor {} ({} already existed)",
            outcome.slots_generated, template.mentor_id, outcome.skipped_duplicates
        );

        Ok(outcome)
    }

    pub async fn stats(&self, now: DateTime<Utc>) -> SlotResult<RecurringSlotStats> {
        Ok(recurring_slot_stats(self.store.as_ref(), now).await?)
    }

    async fn purge(&self, now: DateTime<Utc>) -> Result<u64> {
        let filter = SlotFilter::new().recurring(true).ending_before(now);
        let deleted = self
            .store
            .delete_many(&filter)
            .await
            .wrap_err("Failed to purge elapsed recurring slots")?;

        debug!("Purged {} elapsed recurring slots", deleted);
        Ok(deleted)
    }

    async fn extend(
        &self,
        key: &TemplateKey,
        group: &TemplateGroup,
        now: DateTime<Utc>,
    ) -> Result<Extension> {
        let horizon_days = i64::from(self.config.horizon_days);
        let latest = group.latest_instance.start_time;
        let days_beyond_latest = days_until(now, latest);

        if days_beyond_latest >= horizon_days {
            debug!(
                "Template {} already covered {} days ahead ({} slots)",
                key, days_beyond_latest, group.instance_count
            );
            return Ok(Extension::Satisfied);
        }

        // Never shrink coverage a template already advertises.
        let target_days = u32::try_from(horizon_days.max(days_beyond_latest + 1))
            .wrap_err("Generation window out of range")?;
        let generation_start = latest
            .date_naive()
            .succ_opt()
            .ok_or_else(|| eyre!("No calendar day after {}", latest))?;

        if count_matching_days(&group.template.days, generation_start, target_days) == 0 {
            debug!("Template {} has no matching days from {}", key, generation_start);
            return Ok(Extension::Extended(MaterializeOutcome::default()));
        }

        debug!(
            "Extending template {} from {} for {} days",
            key, generation_start, target_days
        );

        let candidates = generate(&group.template, generation_start, target_days, now);
        let outcome = self.insert_fresh(candidates).await?;

        Ok(Extension::Extended(outcome))
    }

    async fn insert_fresh(&self, candidates: Vec<NewSlotInstance>) -> Result<MaterializeOutcome> {
        let candidate_count = candidates.len() as u64;
        let fresh = filter_new(candidates, self.store.as_ref()).await?;
        let mut outcome = MaterializeOutcome {
            slots_generated: 0,
            skipped_duplicates: candidate_count - fresh.len() as u64,
        };

        if fresh.is_empty() {
            return Ok(outcome);
        }

        let inserted = self
            .store
            .insert_many(&fresh)
            .await
            .wrap_err_with(|| format!("Failed to insert {} slots", fresh.len()))?;

        if inserted.skipped > 0 {
            warn!(
                "{} slots were inserted concurrently by another run and skipped",
                inserted.skipped
            );
        }

        outcome.slots_generated = inserted.inserted;
        outcome.skipped_duplicates += inserted.skipped;
        Ok(outcome)
    }
}

/// Whole days from `now` until `instant`, rounded up.
fn days_until(now: DateTime<Utc>, instant: DateTime<Utc>) -> i64 {
    let ms = (instant - now).num_milliseconds();
    ms.div_euclid(DAY_MS) + i64::from(ms.rem_euclid(DAY_MS) > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_days_until_rounds_up() {
        let now = Utc.with_ymd_and_hms(2026, 10, 13, 10, 0, 0).unwrap();

        assert_eq!(days_until(now, now + Duration::hours(1)), 1);
        assert_eq!(days_until(now, now + Duration::days(1)), 1);
        assert_eq!(days_until(now, now + Duration::days(1) + Duration::milliseconds(1)), 2);
        assert_eq!(days_until(now, now + Duration::days(10)), 10);
        assert_eq!(days_until(now, now), 0);
        assert_eq!(days_until(now, now - Duration::hours(1)), 0);
    }
}
