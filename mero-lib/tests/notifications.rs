use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use mero_lib::error::NotificationError;
use mero_lib::notification::Notification;
use mero_lib::notification::NotificationCenter;
use mero_lib::notification::NotificationFilter;
use mero_lib::notification::NotificationStore;
use mero_lib::notification::Priority;
use mero_lib::notification::StatusFilter;
use mero_lib::view::THIS_WEEK;
use mero_lib::view::TODAY;
use mero_lib::view::YESTERDAY;
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
}

/// Five notifications spread over three buckets, one of them read.
fn store() -> NotificationStore {
    let mut store = NotificationStore::new();
    store.push(
        Notification::new("Weekly report", "Numbers are in")
            .with_category("reports")
            .with_timestamp(at(5, 9)),
    );
    store.push(
        Notification::new("Deploy finished", "api v2 is live")
            .with_category("ci")
            .with_timestamp(at(9, 18)),
    );
    let read = store.push(
        Notification::new("Build failed", "main is red")
            .with_category("ci")
            .with_priority(Priority::High)
            .with_timestamp(at(10, 8)),
    );
    store.push(
        Notification::new("New comment", "Dana replied to you")
            .with_category("social")
            .with_timestamp(at(10, 11)),
    );
    store.push(
        Notification::new("Disk almost full", "92% used on /var")
            .with_category("ci")
            .with_priority(Priority::Urgent)
            .with_timestamp(at(10, 10)),
    );
    store.mark_read(read).unwrap();
    store
}

fn titles(view: &mero_lib::notification::NotificationView<'_>, group: usize) -> Vec<String> {
    view.groups[group]
        .records
        .iter()
        .map(|n| n.title.clone())
        .collect()
}

// ============================================================================
// Store
// ============================================================================

#[test]
fn test_push_keeps_newest_first() {
    let mut store = NotificationStore::new();
    store.push(Notification::new("first", ""));
    let id = store.push(Notification::new("second", ""));

    assert_eq!(store.len(), 2);
    assert_eq!(store.iter().next().unwrap().id, id);
    assert_eq!(store.unread_count(), 2);
}

#[test]
fn test_mark_read_and_unread() {
    let mut store = NotificationStore::new();
    let id = store.push(Notification::new("hello", "world"));

    store.mark_read(id).unwrap();
    assert!(store.get(id).unwrap().read);
    assert_eq!(store.unread_count(), 0);

    store.mark_unread(id).unwrap();
    assert_eq!(store.unread_count(), 1);
}

#[test]
fn test_mark_all_read_reports_changes() {
    let mut store = store();
    assert_eq!(store.mark_all_read(), 4);
    assert_eq!(store.mark_all_read(), 0);
    assert_eq!(store.unread_count(), 0);
}

#[test]
fn test_dismiss_removes_notification() {
    let mut store = NotificationStore::new();
    let id = store.push(Notification::new("bye", ""));

    let removed = store.dismiss(id).unwrap();
    assert_eq!(removed.title, "bye");
    assert!(store.is_empty());
    assert!(store.get(id).is_none());
}

#[test]
fn test_unknown_id_is_not_found() {
    let mut store = store();
    let missing = Uuid::new_v4();

    assert!(matches!(
        store.mark_read(missing),
        Err(NotificationError::NotFound { id }) if id == missing
    ));
    assert!(matches!(
        store.dismiss(missing),
        Err(NotificationError::NotFound { .. })
    ));
    assert_eq!(store.len(), 5);
}

#[test]
fn test_clear_empties_store() {
    let mut store = store();
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.unread_count(), 0);
}

#[test]
fn test_store_drops_oldest_past_max_len() {
    let mut store = NotificationStore::with_max_len(2);
    let oldest = store.push(Notification::new("one", ""));
    store.push(Notification::new("two", ""));
    store.push(Notification::new("three", ""));

    assert_eq!(store.len(), 2);
    assert!(store.get(oldest).is_none());
    let titles: Vec<&str> = store.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["three", "two"]);
}

// ============================================================================
// Center
// ============================================================================

#[test]
fn test_view_buckets_by_date_newest_first() {
    let store = store();
    let view = NotificationCenter::new().view_at(&store, &NotificationFilter::new(), &now());

    let labels: Vec<&str> = view.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec![TODAY, YESTERDAY, THIS_WEEK]);
    assert_eq!(
        titles(&view, 0),
        vec!["New comment", "Disk almost full", "Build failed"]
    );
    assert_eq!(titles(&view, 1), vec!["Deploy finished"]);
    assert_eq!(titles(&view, 2), vec!["Weekly report"]);
    assert_eq!(view.total, 5);
}

#[test]
fn test_view_status_filter() {
    let store = store();
    let center = NotificationCenter::new();

    let unread = center.view_at(
        &store,
        &NotificationFilter::new().with_status(StatusFilter::Unread),
        &now(),
    );
    assert_eq!(unread.total, 4);

    let read = center.view_at(
        &store,
        &NotificationFilter::new().with_status(StatusFilter::Read),
        &now(),
    );
    assert_eq!(read.total, 1);
    assert_eq!(titles(&read, 0), vec!["Build failed"]);
}

#[test]
fn test_view_category_and_priority_filters() {
    let store = store();
    let center = NotificationCenter::new();

    let ci = center.view_at(&store, &NotificationFilter::new().with_category("ci"), &now());
    assert_eq!(ci.total, 3);

    // Category matches exactly, not as a substring.
    let partial = center.view_at(&store, &NotificationFilter::new().with_category("c"), &now());
    assert_eq!(partial.total, 0);
    assert!(partial.groups.is_empty());

    let urgent = center.view_at(
        &store,
        &NotificationFilter::new()
            .with_category("ci")
            .with_priority(Priority::Urgent),
        &now(),
    );
    assert_eq!(urgent.total, 1);
    assert_eq!(titles(&urgent, 0), vec!["Disk almost full"]);
}

#[test]
fn test_view_search_covers_title_and_message() {
    let store = store();
    let center = NotificationCenter::new();

    let view = center.view_at(&store, &NotificationFilter::new().with_search("LIVE"), &now());
    assert_eq!(view.total, 1);
    assert_eq!(titles(&view, 0), vec!["Deploy finished"]);

    let view = center.view_at(&store, &NotificationFilter::new().with_search("repl"), &now());
    assert_eq!(titles(&view, 0), vec!["New comment"]);
}

#[test]
fn test_view_counts_ignore_filter() {
    let store = store();
    let view = NotificationCenter::new().view_at(
        &store,
        &NotificationFilter::new().with_category("social"),
        &now(),
    );

    assert_eq!(view.total, 1);
    assert_eq!(view.unread_count, 4);
    assert_eq!(
        view.category_counts,
        vec![
            ("ci".to_string(), 2),
            ("reports".to_string(), 1),
            ("social".to_string(), 1),
        ]
    );
}

#[test]
fn test_view_custom_date_format() {
    let mut store = NotificationStore::new();
    store.push(
        Notification::new("Old", "")
            .with_timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()),
    );
    let view = NotificationCenter::new()
        .with_date_format("%Y-%m-%d")
        .view_at(&store, &NotificationFilter::new(), &now());

    assert_eq!(view.groups[0].label, "2024-05-01");
}

#[test]
fn test_view_orders_within_the_same_second() {
    let mut store = NotificationStore::new();
    let t0 = at(10, 9);
    // Pushed newer first, so store order alone would not give newest first.
    store.push(Notification::new("newer", "").with_timestamp(t0 + Duration::milliseconds(500)));
    store.push(Notification::new("older", "").with_timestamp(t0));
    store.push(Notification::new("oldest", "").with_timestamp(t0 - Duration::microseconds(1)));

    let view = NotificationCenter::new().view_at(&store, &NotificationFilter::new(), &now());
    assert_eq!(titles(&view, 0), vec!["newer", "older", "oldest"]);
}

#[test]
fn test_view_search_covers_priority_and_status() {
    let store = store();
    let center = NotificationCenter::new();

    let view = center.view_at(&store, &NotificationFilter::new().with_search("urgent"), &now());
    assert_eq!(view.total, 1);
    assert_eq!(titles(&view, 0), vec!["Disk almost full"]);

    let view = center.view_at(&store, &NotificationFilter::new().with_search("unread"), &now());
    assert_eq!(view.total, 4);
}
