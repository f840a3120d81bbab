//! # Instance Generator
//!
//! Expands a [`RecurrenceTemplate`] over a window of calendar days into the
//! concrete slots that should exist in that window. Everything here is pure:
//! no clock is read and nothing is persisted, so callers pass `now`
//! explicitly and hand the output to the deduplicator.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::models::{NewSlotInstance, RecurrenceTemplate, WeekdaySet};

/// Produces one candidate per day in `[window_start, window_start + window_days)`
/// whose weekday is in the template's set.
///
/// Candidates starting at or before `now` are dropped, which happens when the
/// window starts today and the time of day has already passed. A window of
/// zero days yields nothing.
pub fn generate(
    template: &RecurrenceTemplate,
    window_start: NaiveDate,
    window_days: u32,
    now: DateTime<Utc>,
) -> Vec<NewSlotInstance> {
    window_dates(window_start, window_days)
        .filter(|date| template.days.contains(date.weekday()))
        .filter_map(|date| template.start_on(date))
        .filter(|start| *start > now)
        .map(|start_time| NewSlotInstance {
            mentor_id: template.mentor_id.clone(),
            mentor_application_id: template.mentor_application_id.clone(),
            session_kind: template.session_kind,
            start_time,
            end_time: start_time + template.duration,
            is_recurring: true,
            recurring_days: template.days.clone(),
            capacity: template.capacity,
            booked_count: 0,
            price: template.price,
            meeting_link: template.meeting_link.clone(),
            notes: template.notes.clone(),
            is_active: true,
            is_booked: false,
            booked_by: None,
        })
        .collect()
}

/// Number of days in the window that fall on one of `days`.
pub fn count_matching_days(days: &WeekdaySet, window_start: NaiveDate, window_days: u32) -> usize {
    window_dates(window_start, window_days)
        .filter(|date| days.contains(date.weekday()))
        .count()
}

fn window_dates(start: NaiveDate, len: u32) -> impl Iterator<Item = NaiveDate> {
    (0..len).map_while(move |offset| start.checked_add_days(Days::new(u64::from(offset))))
}
