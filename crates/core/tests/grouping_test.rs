use chrono::{DateTime, Duration, TimeZone, Utc};
use fake::{Fake, Faker};
use pretty_assertions::assert_eq;
use recurslot_core::{
    grouping::group_instances,
    models::{NotesPolicy, SessionKind, SlotInstance, WeekdaySet},
};
use uuid::Uuid;

fn at(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, d, h, 0, 0).unwrap()
}

fn instance(mentor: &str, days: &[&str], start: DateTime<Utc>) -> SlotInstance {
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
        meeting_link: "https://meet.example.com/yoga".to_string(),
        notes: String::new(),
        is_active: true,
        is_booked: false,
        booked_by: None,
        created_at: start - Duration::days(7),
        updated_at: start - Duration::days(7),
    }
}

#[test]
fn test_weekday_order_does_not_split_templates() {
    let now = at(13, 10);
    let instances = vec![
        instance("mentor_1", &["WEDNESDAY", "MONDAY"], at(14, 18)),
        instance("mentor_1", &["MONDAY", "WEDNESDAY"], at(19, 18)),
    ];

    let groups = group_instances(instances, now, NotesPolicy::Ignore);

    assert_eq!(groups.len(), 1);
    let group = groups.values().next().unwrap();
    assert_eq!(group.instance_count, 2);
    assert_eq!(group.latest_instance.start_time, at(19, 18));
}

#[test]
fn test_latest_instance_wins_regardless_of_input_order() {
    let now = at(13, 10);
    let instances = vec![
        instance("mentor_1", &["MONDAY", "WEDNESDAY"], at(21, 18)),
        instance("mentor_1", &["MONDAY", "WEDNESDAY"], at(14, 18)),
        instance("mentor_1", &["MONDAY", "WEDNESDAY"], at(19, 18)),
    ];

    let groups = group_instances(instances, now, NotesPolicy::Ignore);
    let group = groups.values().next().unwrap();

    assert_eq!(group.instance_count, 3);
    assert_eq!(group.latest_instance.start_time, at(21, 18));
    assert_eq!(group.template.hour, 18);
    assert_eq!(group.template.duration, Duration::hours(1));
}

#[test]
fn test_distinct_attributes_form_distinct_templates() {
    let now = at(13, 10);
    let mut priced = instance("mentor_1", &["MONDAY"], at(19, 18));
    priced.price = 900;
    let later = instance("mentor_1", &["MONDAY"], at(19, 20));
    let other_mentor = instance("mentor_2", &["MONDAY"], at(19, 18));

    let groups = group_instances(
        vec![instance("mentor_1", &["MONDAY"], at(19, 18)), priced, later, other_mentor],
        now,
        NotesPolicy::Ignore,
    );

    assert_eq!(groups.len(), 4);
}

#[test]
fn test_non_recurring_inactive_and_past_instances_are_ignored() {
    let now = at(13, 10);
    let mut one_off = instance("mentor_1", &[], at(14, 18));
    one_off.is_recurring = false;
    let mut inactive = instance("mentor_1", &["WEDNESDAY"], at(14, 18));
    inactive.is_active = false;
    let past = instance("mentor_1", &["MONDAY"], at(12, 18));

    let groups = group_instances(vec![one_off, inactive, past], now, NotesPolicy::Ignore);

    assert!(groups.is_empty());
}

#[test]
fn test_notes_policy_controls_grouping() {
    let now = at(13, 10);
    let mut first = instance("mentor_1", &["MONDAY", "WEDNESDAY"], at(14, 18));
    first.notes = Faker.fake::<String>();
    let mut second = instance("mentor_1", &["MONDAY", "WEDNESDAY"], at(19, 18));
    second.notes = format!("{} (updated)", first.notes);

    let merged = group_instances(vec![first.clone(), second.clone()], now, NotesPolicy::Ignore);
    assert_eq!(merged.len(), 1);
    let group = merged.values().next().unwrap();
    assert_eq!(group.template.notes, second.notes);

    let split = group_instances(vec![first, second], now, NotesPolicy::Distinguish);
    assert_eq!(split.len(), 2);
}
