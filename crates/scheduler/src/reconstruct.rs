use chrono::{DateTime, Utc};
use eyre::{Result, WrapErr};
use recurslot_core::{
    grouping::{group_instances, TemplateMap},
    models::NotesPolicy,
};
use recurslot_db::{SlotFilter, SlotStore};

/// Rebuilds the live templates from the active, recurring slots that start
/// after `now`. A template without any such slot is retired and absent here.
pub async fn reconstruct(
    store: &dyn SlotStore,
    now: DateTime<Utc>,
    policy: NotesPolicy,
) -> Result<TemplateMap> {
    let filter = SlotFilter::new()
        .recurring(true)
        .active(true)
        .starting_after(now);

    let instances = store
        .find_instances(&filter)
        .await
        .wrap_err("Failed to load future recurring slots")?;
    let instance_count = instances.len();

    let templates = group_instances(instances, now, policy);

    tracing::debug!(
        "Reconstructed {} templates from {} future recurring slots",
        templates.len(),
        instance_count
    );

    Ok(templates)
}
