mod common;

use common::{at, date, slot, template};
use mockall::predicate;
use pretty_assertions::assert_eq;
use recurslot_core::generator::generate;
use recurslot_db::{InMemorySlotStore, MockSlotStore, SlotFilter};
use recurslot_scheduler::dedup::filter_new;

#[tokio::test]
async fn test_empty_batch_skips_lookup() {
    let mut store = MockSlotStore::new();
    store.expect_find_instances().times(0);

    let fresh = filter_new(Vec::new(), &store).await.unwrap();

    assert!(fresh.is_empty());
}

#[tokio::test]
async fn test_existing_slots_are_dropped() {
    let store = InMemorySlotStore::with_instances(vec![slot(
        "mentor_1",
        &["MONDAY", "WEDNESDAY"],
        at(2026, 10, 14, 18, 0),
    )]);
    let candidates = generate(
        &template("mentor_1", &["MONDAY", "WEDNESDAY"], 18),
        date(2026, 10, 13),
        7,
        at(2026, 10, 13, 10, 0),
    );
    assert_eq!(candidates.len(), 2);

    let fresh = filter_new(candidates, &store).await.unwrap();

    let starts: Vec<_> = fresh.iter().map(|c| c.start_time).collect();
    assert_eq!(starts, vec![at(2026, 10, 19, 18, 0)]);
}

#[tokio::test]
async fn test_same_start_for_other_mentor_is_kept() {
    let store = InMemorySlotStore::with_instances(vec![slot(
        "mentor_2",
        &["WEDNESDAY"],
        at(2026, 10, 14, 18, 0),
    )]);
    let candidates = generate(
        &template("mentor_1", &["WEDNESDAY"], 18),
        date(2026, 10, 13),
        7,
        at(2026, 10, 13, 10, 0),
    );

    let fresh = filter_new(candidates, &store).await.unwrap();

    assert_eq!(fresh.len(), 1);
}

#[tokio::test]
async fn test_repeats_within_batch_collapse() {
    let store = InMemorySlotStore::new();
    let now = at(2026, 10, 13, 10, 0);
    let mut candidates = generate(&template("mentor_1", &["MONDAY"], 18), date(2026, 10, 13), 7, now);
    candidates.extend(generate(
        &template("mentor_1", &["MONDAY"], 18),
        date(2026, 10, 13),
        7,
        now,
    ));
    assert_eq!(candidates.len(), 2);

    let fresh = filter_new(candidates, &store).await.unwrap();

    assert_eq!(fresh.len(), 1);
}

#[tokio::test]
async fn test_lookup_is_one_query_over_candidate_keys() {
    let now = at(2026, 10, 13, 10, 0);
    let candidates = generate(
        &template("mentor_1", &["MONDAY", "WEDNESDAY"], 18),
        date(2026, 10, 13),
        7,
        now,
    );
    let expected = SlotFilter::new()
        .mentors(vec!["mentor_1".to_string()])
        .starting_at(vec![at(2026, 10, 14, 18, 0), at(2026, 10, 19, 18, 0)]);

    let mut store = MockSlotStore::new();
    store
        .expect_find_instances()
        .with(predicate::eq(expected))
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let fresh = filter_new(candidates, &store).await.unwrap();

    assert_eq!(fresh.len(), 2);
}
