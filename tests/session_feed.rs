use std::fs;
use std::time::{Duration, Instant};

use network_tree::contacts::{ContactRecord, snapshot_channel, watch_file};
use network_tree::tree::{Point, Selection, TapOutcome, TreeSession};

fn contacts(ids: &[(&str, i32)]) -> Vec<ContactRecord> {
    ids.iter()
        .map(|(id, level)| ContactRecord::new(*id, id.to_uppercase(), *level))
        .collect()
}

#[test]
fn identical_snapshots_recompute_to_the_same_layout() {
    let mut session = TreeSession::new();
    let snapshot = contacts(&[("a", 1), ("b", 2), ("c", 2)]);

    assert!(session.apply_snapshot(snapshot.clone()));
    let first = session.layout().clone();
    assert!(!session.apply_snapshot(snapshot));

    assert_eq!(session.layout(), &first);
    assert_eq!(session.revision(), 2);
}

#[test]
fn newer_snapshot_fully_replaces_the_layout() {
    let mut session = TreeSession::new();
    session.apply_snapshot(contacts(&[("a", 1), ("b", 1), ("c", 2)]));
    session.apply_snapshot(contacts(&[("z", 3)]));

    let ids = session
        .layout()
        .nodes
        .iter()
        .map(|node| node.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["z"]);
    assert!(session.layout().edges.is_empty());
    assert!(session.contact("a").is_none());
    assert!(session.contact("z").is_some());
}

#[test]
fn empty_snapshot_is_tolerated() {
    let mut session = TreeSession::new();
    session.apply_snapshot(contacts(&[("a", 1)]));
    assert!(session.apply_snapshot(Vec::new()));

    assert!(session.layout().is_empty());
    assert_eq!(session.tap(Point::new(0.0, 0.0)), TapOutcome::Ignored);
}

#[test]
fn viewport_survives_recomputes() {
    let mut session = TreeSession::new();
    session.apply_snapshot(contacts(&[("a", 1), ("b", 1)]));
    session.apply_zoom_pan(2.0, Point::new(12.0, -4.0));
    session.viewport_mut().tap_node(Some("a"));

    session.apply_snapshot(contacts(&[("b", 1)]));

    assert_eq!(session.viewport().scale(), 2.0);
    assert_eq!(session.viewport().offset(), Point::new(12.0, -4.0));
    // The previewed contact is gone; the selection only clears on an empty tap.
    assert_eq!(session.viewport().selection(), &Selection::Previewing("a".to_owned()));
    assert!(session.viewport().preview(session.layout()).is_none());
}

#[test]
fn activation_invokes_the_callback_once() {
    let mut session = TreeSession::new();
    session.apply_snapshot(contacts(&[("a", 1), ("b", 1), ("c", 1)]));
    let target = {
        let layout = session.layout();
        session.viewport().node_circle(&layout.nodes[1]).center()
    };

    let mut activated = Vec::new();
    session.tap_with(target, |id| activated.push(id.to_owned()));
    let target = {
        let layout = session.layout();
        session.viewport().node_circle(&layout.nodes[1]).center()
    };
    session.tap_with(target, |id| activated.push(id.to_owned()));

    assert_eq!(activated, vec!["b".to_owned()]);
    assert_eq!(session.viewport().selection(), &Selection::Idle);
}

#[test]
fn subscription_delivers_only_the_newest_snapshot() {
    let (publisher, mut subscription) = snapshot_channel();

    assert!(subscription.latest().is_none());
    assert!(publisher.publish(contacts(&[("a", 1)])));
    assert!(publisher.publish_error("backend unavailable"));
    assert!(publisher.publish(contacts(&[("b", 2), ("c", 2)])));

    let latest = subscription.latest().unwrap().unwrap();
    assert_eq!(latest.len(), 2);
    assert!(subscription.latest().is_none());
}

#[test]
fn dropped_subscription_stops_deliveries() {
    let (publisher, subscription) = snapshot_channel();
    assert!(publisher.is_active());

    drop(subscription);

    assert!(!publisher.is_active());
    assert!(!publisher.publish(contacts(&[("a", 1)])));
}

#[test]
fn disconnect_is_reported_after_the_backlog() {
    let (publisher, mut subscription) = snapshot_channel();
    publisher.publish(contacts(&[("a", 1)]));
    drop(publisher);

    assert!(subscription.latest().is_some());
    assert!(subscription.is_disconnected());
}

#[test]
fn file_watcher_publishes_initial_and_changed_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, r#"[{ "id": "a", "name": "Ada", "relationshipLevel": 1 }]"#).unwrap();

    let mut subscription = watch_file(&path, Duration::from_millis(10)).unwrap();
    let first = subscription
        .wait_latest(Duration::from_secs(5))
        .unwrap()
        .unwrap();
    assert_eq!(first.len(), 1);

    fs::write(
        &path,
        r#"{ "contacts": [
            { "id": "a", "name": "Ada", "relationshipLevel": 1 },
            { "id": "b", "name": "Bea", "relationshipLevel": 2 }
        ] }"#,
    )
    .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut latest = None;
    while Instant::now() < deadline {
        if let Some(Ok(snapshot)) = subscription.wait_latest(Duration::from_millis(100))
            && snapshot.len() == 2
        {
            latest = Some(snapshot);
            break;
        }
    }
    assert_eq!(latest.map(|snapshot| snapshot.len()), Some(2));
}

#[test]
fn file_watcher_reports_decode_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let mut subscription = watch_file(&path, Duration::from_millis(10)).unwrap();
    let delivery = subscription.wait_latest(Duration::from_secs(5)).unwrap();

    let error = delivery.unwrap_err();
    assert!(error.contains("broken.json"), "{error}");
}

#[test]
fn file_watcher_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let mut subscription = watch_file(&path, Duration::from_millis(10)).unwrap();
    let delivery = subscription.wait_latest(Duration::from_secs(5)).unwrap();

    assert!(delivery.is_err());
}

#[test]
fn file_watcher_detects_same_length_rewrite_with_unchanged_mtime() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, r#"[{ "id": "a", "name": "Ada", "relationshipLevel": 1 }]"#).unwrap();
    let modified = fs::metadata(&path).unwrap().modified().unwrap();

    let mut subscription = watch_file(&path, Duration::from_millis(10)).unwrap();
    let first = subscription
        .wait_latest(Duration::from_secs(5))
        .unwrap()
        .unwrap();
    assert_eq!(first[0].name, "Ada");

    fs::write(&path, r#"[{ "id": "a", "name": "Bob", "relationshipLevel": 1 }]"#).unwrap();
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(modified)
        .unwrap();
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut renamed = None;
    while Instant::now() < deadline {
        if let Some(Ok(snapshot)) = subscription.wait_latest(Duration::from_millis(100))
            && snapshot[0].name == "Bob"
        {
            renamed = Some(snapshot);
            break;
        }
    }
    assert!(renamed.is_some());
}

#[test]
fn file_watcher_stays_quiet_while_content_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    let raw = r#"[{ "id": "a", "name": "Ada", "relationshipLevel": 1 }]"#;
    fs::write(&path, raw).unwrap();

    let mut subscription = watch_file(&path, Duration::from_millis(10)).unwrap();
    assert!(subscription.wait_latest(Duration::from_secs(5)).is_some());

    let staged = dir.path().join("contacts.json.tmp");
    fs::write(&staged, raw).unwrap();
    fs::rename(&staged, &path).unwrap();
    assert!(subscription.wait_latest(Duration::from_millis(200)).is_none());
}
