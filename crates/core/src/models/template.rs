use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::{session::SessionKind, slot::SlotInstance, weekday::WeekdaySet};
use crate::errors::{SlotError, SlotResult};

/// Whether `notes` takes part in template identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotesPolicy {
    /// Instances differing only in notes belong to one template.
    #[default]
    Ignore,
    /// Notes are part of the key.
    Distinguish,
}

/// A weekly recurrence pattern, either reconstructed from stored instances
/// or supplied by a mentor editing their availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceTemplate {
    pub mentor_id: String,
    pub mentor_application_id: Option<String>,
    pub session_kind: SessionKind,
    pub days: WeekdaySet,
    /// UTC hour of day the slot starts.
    pub hour: u32,
    pub minute: u32,
    pub duration: Duration,
    pub capacity: i32,
    pub price: i64,
    pub meeting_link: String,
    pub notes: String,
}

/// Canonical identity of a template. Two instances with equal keys are
/// occurrences of the same recurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TemplateKey {
    pub mentor_id: String,
    pub session_kind: SessionKind,
    pub days: WeekdaySet,
    pub hour: u32,
    pub minute: u32,
    pub duration_ms: i64,
    pub capacity: i32,
    pub price: i64,
    pub meeting_link: String,
    /// Only populated under [`NotesPolicy::Distinguish`].
    pub notes: Option<String>,
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mentor={} kind={} days={} at {:02}:{:02}",
            self.mentor_id, self.session_kind, self.days, self.hour, self.minute
        )
    }
}

impl RecurrenceTemplate {
    /// Recovers the pattern an instance was materialized from.
    pub fn from_instance(instance: &SlotInstance) -> Self {
        Self {
            mentor_id: instance.mentor_id.clone(),
            mentor_application_id: instance.mentor_application_id.clone(),
            session_kind: instance.session_kind,
            days: instance.recurring_days.clone(),
            hour: instance.start_time.hour(),
            minute: instance.start_time.minute(),
            duration: instance.duration(),
            capacity: instance.capacity,
            price: instance.price,
            meeting_link: instance.meeting_link.clone(),
            notes: instance.notes.clone(),
        }
    }

    pub fn key(&self, policy: NotesPolicy) -> TemplateKey {
        TemplateKey {
            mentor_id: self.mentor_id.clone(),
            session_kind: self.session_kind,
            days: self.days.clone(),
            hour: self.hour,
            minute: self.minute,
            duration_ms: self.duration.num_milliseconds(),
            capacity: self.capacity,
            price: self.price,
            meeting_link: self.meeting_link.clone(),
            notes: match policy {
                NotesPolicy::Ignore => None,
                NotesPolicy::Distinguish => Some(self.notes.clone()),
            },
        }
    }

    /// Start instant of the occurrence on `date`, or `None` if the time of
    /// day is out of range.
    pub fn start_on(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        date.and_hms_opt(self.hour, self.minute, 0)
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    pub fn validate(&self) -> SlotResult<()> {
        if self.mentor_id.trim().is_empty() {
            return Err(SlotError::Validation("Mentor id is required".to_string()));
        }
        if self.days.is_empty() {
            return Err(SlotError::Validation(
                "At least one recurring day is required".to_string(),
            ));
        }
        if self.hour > 23 || self.minute > 59 {
            return Err(SlotError::Validation(format!(
                "Invalid time of day {:02}:{:02}",
                self.hour, self.minute
            )));
        }
        if self.duration <= Duration::zero() {
            return Err(SlotError::Validation(
                "End time must be after start time".to_string(),
            ));
        }
        if self.capacity < 1 {
            return Err(SlotError::Validation(
                "Capacity must be at least 1".to_string(),
            ));
        }
        if self.price < 0 {
            return Err(SlotError::Validation(
                "Price cannot be negative".to_string(),
            ));
        }
        if self.meeting_link.trim().is_empty() {
            return Err(SlotError::Validation(
                "Meeting link is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterializeTemplateRequest {
    pub mentor_id: String,
    pub mentor_application_id: Option<String>,
    pub session_kind: SessionKind,
    /// Sample occurrence; only its UTC time of day and its length are used.
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub recurring_days: WeekdaySet,
    pub capacity: i32,
    pub price: i64,
    pub meeting_link: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MaterializeTemplateRequest {
    pub fn into_template(self) -> SlotResult<RecurrenceTemplate> {
        let template = RecurrenceTemplate {
            mentor_id: self.mentor_id,
            mentor_application_id: self.mentor_application_id,
            session_kind: self.session_kind,
            days: self.recurring_days,
            hour: self.start_time.hour(),
            minute: self.start_time.minute(),
            duration: self.end_time - self.start_time,
            capacity: self.capacity,
            price: self.price,
            meeting_link: self.meeting_link,
            notes: self.notes.unwrap_or_default(),
        };
        template.validate()?;
        Ok(template)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterializeTemplateResponse {
    pub slots_generated: u64,
    pub skipped_duplicates: u64,
    pub horizon_days: u32,
}
