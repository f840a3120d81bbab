#![allow(dead_code)]

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use fake::{faker::lorem::en::Sentence, Fake};
use recurslot_core::models::{RecurrenceTemplate, SessionKind, SlotInstance, WeekdaySet};
use uuid::Uuid;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn template(mentor: &str, days: &[&str], hour: u32) -> RecurrenceTemplate {
    RecurrenceTemplate {
        mentor_id: mentor.to_string(),
        mentor_application_id: None,
        session_kind: SessionKind::Yoga,
        days: WeekdaySet::parse(days).unwrap(),
        hour,
        minute: 0,
        duration: Duration::hours(1),
        capacity: 1,
        price: 500,
        meeting_link: format!("https://meet.example.com/{}", mentor),
        notes: String::new(),
    }
}

/// A stored recurring slot starting at `start`, carrying `days` as its pattern.
/// Notes are arbitrary text; they do not affect grouping by default.
pub fn slot(mentor: &str, days: &[&str], start: DateTime<Utc>) -> SlotInstance {
    SlotInstance {
        id: Uuid::new_v4(),
        mentor_id: mentor.to_string(),
        mentor_application_id: None,
        session_kind: SessionKind::Yoga,
        start_time: start,
        end_time: start + Duration::hours(1),
        is_recurring: true,
        recurring_days: WeekdaySet::parse(days).unwrap(),
        capacity: 1,
        booked_count: 0,
        price: 500,
        meeting_link: format!("https://meet.example.com/{}", mentor),
        notes: Sentence(3..8).fake(),
        is_active: true,
        is_booked: false,
        booked_by: None,
        created_at: start - Duration::days(7),
        updated_at: start - Duration::days(7),
    }
}

pub fn assert_unique_mentor_starts(slots: &[SlotInstance]) {
    let mut seen = HashSet::new();
    for slot in slots {
        assert!(
            seen.insert((slot.mentor_id.clone(), slot.start_time)),
            "duplicate slot for {} at {}",
            slot.mentor_id,
            slot.start_time
        );
    }
}
