#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use axum_test::TestServer;
use chrono::{DateTime, Utc};
use recurslot_api::{app, ApiState};
use recurslot_core::models::{SessionKind, SlotInstance, WeekdaySet};
use recurslot_db::SlotStore;
use recurslot_scheduler::{SchedulerConfig, WindowMaintainer};
use uuid::Uuid;

pub const EVERY_DAY: [&str; 7] = [
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
    "SUNDAY",
];

pub fn test_server(store: Arc<dyn SlotStore>) -> TestServer {
    let maintainer = WindowMaintainer::new(store, SchedulerConfig::default());
    let state = Arc::new(ApiState::new(maintainer));
    TestServer::new(app(state, Duration::from_secs(30))).unwrap()
}

pub fn recurring_slot(mentor: &str, days: &[&str], start: DateTime<Utc>) -> SlotInstance {
    SlotInstance {
        id: Uuid::new_v4(),
        mentor_id: mentor.to_string(),
        mentor_application_id: None,
        session_kind: SessionKind::Meditation,
        start_time: start,
        end_time: start + chrono::Duration::minutes(45),
        is_recurring: true,
        recurring_days: WeekdaySet::parse(days).unwrap(),
        capacity: 4,
        booked_count: 0,
        price: 1500,
        meeting_link: "https://meet.example.com/calm".to_string(),
        notes: String::new(),
        is_active: true,
        is_booked: false,
        booked_by: None,
        created_at: start - chrono::Duration::days(1),
        updated_at: start - chrono::Duration::days(1),
    }
}
