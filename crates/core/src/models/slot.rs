use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{session::SessionKind, weekday::WeekdaySet};

/// A concrete, bookable time interval offered by a mentor.
///
/// Booking-lifecycle fields (`is_active`, `is_booked`, `booked_by`,
/// `booked_count`) belong to the booking subsystem and are only ever written
/// here at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInstance {
    pub id: Uuid,
    pub mentor_id: String,
    pub mentor_application_id: Option<String>,
    pub session_kind: SessionKind,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_recurring: bool,
    /// Weekdays of the parent recurrence; the only persisted copy of the pattern.
    pub recurring_days: WeekdaySet,
    pub capacity: i32,
    pub booked_count: i32,
    /// Smallest currency unit.
    pub price: i64,
    pub meeting_link: String,
    pub notes: String,
    pub is_active: bool,
    pub is_booked: bool,
    pub booked_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SlotInstance {
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn has_elapsed(&self, now: DateTime<Utc>) -> bool {
        self.end_time < now
    }
}

/// A slot that has been computed but not yet persisted.
///
/// The store assigns `id`, `created_at` and `updated_at` on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlotInstance {
    pub mentor_id: String,
    pub mentor_application_id: Option<String>,
    pub session_kind: SessionKind,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_recurring: bool,
    pub recurring_days: WeekdaySet,
    pub capacity: i32,
    pub booked_count: i32,
    pub price: i64,
    pub meeting_link: String,
    pub notes: String,
    pub is_active: bool,
    pub is_booked: bool,
    pub booked_by: Option<String>,
}

impl NewSlotInstance {
    /// Identity used by the uniqueness constraint.
    pub fn slot_key(&self) -> (&str, DateTime<Utc>) {
        (&self.mentor_id, self.start_time)
    }

    pub fn into_instance(self, id: Uuid, created_at: DateTime<Utc>) -> SlotInstance {
        SlotInstance {
            id,
            mentor_id: self.mentor_id,
            mentor_application_id: self.mentor_application_id,
            session_kind: self.session_kind,
            start_time: self.start_time,
            end_time: self.end_time,
            is_recurring: self.is_recurring,
            recurring_days: self.recurring_days,
            capacity: self.capacity,
            booked_count: self.booked_count,
            price: self.price,
            meeting_link: self.meeting_link,
            notes: self.notes,
            is_active: self.is_active,
            is_booked: self.is_booked,
            booked_by: self.booked_by,
            created_at,
            updated_at: created_at,
        }
    }
}
