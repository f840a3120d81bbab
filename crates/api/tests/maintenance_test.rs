mod test_utils;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use eyre::eyre;
use pretty_assertions::assert_eq;
use recurslot_db::{InMemorySlotStore, MockSlotStore};
use serde_json::Value;
use test_utils::{recurring_slot, test_server, EVERY_DAY};

#[test_log::test(tokio::test)]
async fn test_maintain_extends_and_reports() {
    let store = Arc::new(InMemorySlotStore::with_instances(vec![
        recurring_slot("mentor_1", &EVERY_DAY, Utc::now() + Duration::hours(1)),
        recurring_slot("mentor_1", &EVERY_DAY, Utc::now() - Duration::days(2)),
    ]));
    let server = test_server(store.clone());

    let response = server.post("/api/admin/recurring-slots/maintain").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["slots_generated"], 7);
    assert_eq!(body["slots_deleted"], 1);
    assert_eq!(body["net_change"], 6);
    assert_eq!(body["templates_processed"], 1);
    assert_eq!(body["errors"], Value::Array(Vec::new()));
    assert!(body["timestamp"].is_string());
    assert_eq!(store.len().await, 8);
}

#[test_log::test(tokio::test)]
async fn test_maintain_twice_generates_nothing_new() {
    let store = Arc::new(InMemorySlotStore::with_instances(vec![recurring_slot(
        "mentor_1",
        &["MONDAY", "THURSDAY"],
        Utc::now() + Duration::hours(2),
    )]));
    let server = test_server(store.clone());

    server.post("/api/admin/recurring-slots/maintain").await.assert_status_ok();
    let second = server.post("/api/admin/recurring-slots/maintain").await;

    second.assert_status_ok();
    assert_eq!(second.json::<Value>()["slots_generated"], 0);
}

#[test_log::test(tokio::test)]
async fn test_maintain_purge_failure_returns_500() {
    let mut store = MockSlotStore::new();
    store
        .expect_delete_many()
        .returning(|_| Err(eyre!("connection refused")));
    let server = test_server(Arc::new(store));

    let response = server.post("/api/admin/recurring-slots/maintain").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let message = response.json::<Value>()["error"].as_str().unwrap_or_default().to_string();
    assert!(message.contains("connection refused"), "unexpected error: {}", message);
}

#[tokio::test]
async fn test_stats_reports_counts_and_horizon() {
    let store = Arc::new(InMemorySlotStore::with_instances(vec![
        recurring_slot("mentor_1", &["MONDAY"], Utc::now() + Duration::days(3)),
        recurring_slot("mentor_1", &["MONDAY"], Utc::now() - Duration::days(4)),
    ]));
    let server = test_server(store);

    let response = server.get("/api/admin/recurring-slots/stats").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["total_recurring_slots"], 2);
    assert_eq!(body["future_slots"], 1);
    assert_eq!(body["past_slots"], 1);
    assert_eq!(body["horizon_days"], 7);
    assert!(body["current_time"].is_string());
}
