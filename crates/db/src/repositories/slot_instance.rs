use crate::{
    models::DbSlotInstance,
    store::{InsertOutcome, SlotFilter},
};
use eyre::{bail, Result, WrapErr};
use recurslot_core::models::{NewSlotInstance, SlotInstance};
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

const SLOT_COLUMNS: &str = "id, mentor_id, mentor_application_id, session_kind, start_time, end_time, \
     is_recurring, recurring_days, capacity, booked_count, price, meeting_link, notes, \
     is_active, is_booked, booked_by, created_at, updated_at";

// 18 binds per row keeps each statement well under the 65535 parameter limit.
const INSERT_CHUNK_SIZE: usize = 1000;

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &SlotFilter) {
    builder.push(" WHERE TRUE");

    if let Some(mentor_ids) = &filter.mentor_ids {
        builder.push(" AND mentor_id = ANY(");
        builder.push_bind(mentor_ids.clone());
        builder.push(")");
    }
    if let Some(is_recurring) = filter.is_recurring {
        builder.push(" AND is_recurring = ");
        builder.push_bind(is_recurring);
    }
    if let Some(is_active) = filter.is_active {
        builder.push(" AND is_active = ");
        builder.push_bind(is_active);
    }
    if let Some(start_after) = filter.start_after {
        builder.push(" AND start_time > ");
        builder.push_bind(start_after);
    }
    if let Some(start_before) = filter.start_before {
        builder.push(" AND start_time < ");
        builder.push_bind(start_before);
    }
    if let Some(start_times) = &filter.start_times {
        builder.push(" AND start_time = ANY(");
        builder.push_bind(start_times.clone());
        builder.push(")");
    }
    if let Some(end_before) = filter.end_before {
        builder.push(" AND end_time < ");
        builder.push_bind(end_before);
    }
}

pub async fn find_slot_instances(
    pool: &Pool<Postgres>,
    filter: &SlotFilter,
) -> Result<Vec<SlotInstance>> {
    let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM mentor_time_slots", SLOT_COLUMNS));
    push_filter(&mut builder, filter);
    builder.push(" ORDER BY start_time ASC");

    let rows = builder
        .build_query_as::<DbSlotInstance>()
        .fetch_all(pool)
        .await
        .wrap_err("Failed to query mentor time slots")?;

    tracing::debug!("Fetched {} time slots for filter {:?}", rows.len(), filter);

    rows.into_iter().map(DbSlotInstance::into_instance).collect()
}

pub async fn count_slot_instances(pool: &Pool<Postgres>, filter: &SlotFilter) -> Result<u64> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM mentor_time_slots");
    push_filter(&mut builder, filter);

    let count: i64 = builder
        .build_query_scalar()
        .fetch_one(pool)
        .await
        .wrap_err("Failed to count mentor time slots")?;

    u64::try_from(count).wrap_err("Negative slot count")
}

pub async fn insert_slot_instances(
    pool: &Pool<Postgres>,
    slots: &[NewSlotInstance],
) -> Result<InsertOutcome> {
    let mut outcome = InsertOutcome::default();

    for chunk in slots.chunks(INSERT_CHUNK_SIZE) {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO mentor_time_slots ({}) ",
            SLOT_COLUMNS
        ));
        let now = chrono::Utc::now();

        builder.push_values(chunk, |mut row, slot| {
            row.push_bind(Uuid::new_v4())
                .push_bind(slot.mentor_id.clone())
                .push_bind(slot.mentor_application_id.clone())
                .push_bind(slot.session_kind.as_str())
                .push_bind(slot.start_time)
                .push_bind(slot.end_time)
                .push_bind(slot.is_recurring)
                .push_bind(slot.recurring_days.to_names())
                .push_bind(slot.capacity)
                .push_bind(slot.booked_count)
                .push_bind(slot.price)
                .push_bind(slot.meeting_link.clone())
                .push_bind(slot.notes.clone())
                .push_bind(slot.is_active)
                .push_bind(slot.is_booked)
                .push_bind(slot.booked_by.clone())
                .push_bind(now)
                .push_bind(now);
        });
        // A concurrent run may have inserted the same slot since our dedup check.
        builder.push(" ON CONFLICT (mentor_id, start_time) DO NOTHING");

        let result = builder
            .build()
            .execute(pool)
            .await
            .wrap_err("Failed to insert mentor time slots")?;

        let inserted = result.rows_affected();
        outcome.inserted += inserted;
        outcome.skipped += (chunk.len() as u64).saturating_sub(inserted);
    }

    Ok(outcome)
}

pub async fn delete_slot_instances(pool: &Pool<Postgres>, filter: &SlotFilter) -> Result<u64> {
    if filter.is_unbounded() {
        bail!("Refusing to delete mentor time slots without a filter");
    }

    let mut builder = QueryBuilder::<Postgres>::new("DELETE FROM mentor_time_slots");
    push_filter(&mut builder, filter);

    let result = builder
        .build()
        .execute(pool)
        .await
        .wrap_err("Failed to delete mentor time slots")?;

    Ok(result.rows_affected())
}
