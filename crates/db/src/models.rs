use chrono::{DateTime, Utc};
use eyre::{Result, WrapErr};
use recurslot_core::models::{SessionKind, SlotInstance, WeekdaySet};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotInstance {
    pub id: Uuid,
    pub mentor_id: String,
    pub mentor_application_id: Option<String>,
    pub session_kind: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_recurring: bool,
    pub recurring_days: Vec<String>,
    pub capacity: i32,
    pub booked_count: i32,
    pub price: i64,
    pub meeting_link: String,
    pub notes: String,
    pub is_active: bool,
    pub is_booked: bool,
    pub booked_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbSlotInstance {
    pub fn into_instance(self) -> Result<SlotInstance> {
        let session_kind = self
            .session_kind
            .parse::<SessionKind>()
            .wrap_err_with(|| format!("Slot {} has an invalid session kind", self.id))?;
        let recurring_days = WeekdaySet::parse(&self.recurring_days)
            .wrap_err_with(|| format!("Slot {} has invalid recurring days", self.id))?;

        Ok(SlotInstance {
            id: self.id,
            mentor_id: self.mentor_id,
            mentor_application_id: self.mentor_application_id,
            session_kind,
            start_time: self.start_time,
            end_time: self.end_time,
            is_recurring: self.is_recurring,
            recurring_days,
            capacity: self.capacity,
            booked_count: self.booked_count,
            price: self.price,
            meeting_link: self.meeting_link,
            notes: self.notes,
            is_active: self.is_active,
            is_booked: self.is_booked,
            booked_by: self.booked_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
