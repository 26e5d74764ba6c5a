use lildb::collection::{StoreAction, StoreEvent, StoreEventListener};
use lildb::{doc, LilDb};
use lildb_int_test::test_util::random_dir;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn wait_for_event<F: Fn() -> bool>(timeout_ms: u64, check: F) {
    awaitility::at_most(Duration::from_millis(timeout_ms)).until(check);
}

fn recording_listener() -> (StoreEventListener, Arc<Mutex<Vec<StoreEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let listener = StoreEventListener::new(move |event: StoreEvent| {
        sink.lock().unwrap().push(event);
    });
    (listener, events)
}

fn count(events: &Arc<Mutex<Vec<StoreEvent>>>, action: StoreAction) -> usize {
    events.lock().unwrap().iter().filter(|e| e.action() == action).count()
}

#[test]
fn test_loaded_event_on_connect() {
    let dir = random_dir();
    let (listener, events) = recording_listener();
    let db = LilDb::builder()
        .file_path(dir.join("db.jsonl"))
        .log_listener(listener)
        .open()
        .unwrap();

    assert_eq!(count(&events, StoreAction::Loaded), 1);
    assert!(events.lock().unwrap()[0].error_message().is_none());
    db.close().unwrap();
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_autosave_writes_pending_changes() {
    let dir = random_dir();
    let path = dir.join("db.jsonl");
    let (listener, events) = recording_listener();
    let db = LilDb::builder()
        .file_path(&path)
        .auto_save(Duration::from_millis(50))
        .log_listener(listener)
        .open()
        .unwrap();

    db.insert(doc! { _id: "a" }).unwrap();
    wait_for_event(2000, || count(&events, StoreAction::Saved) >= 1);

    assert!(!db.is_dirty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"_id\":\"a\"}\n");
    let saved_at = events
        .lock()
        .unwrap()
        .iter()
        .find(|e| e.action() == StoreAction::Saved)
        .map(|e| e.time());
    assert_eq!(saved_at, db.last_saved());

    db.close().unwrap();
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_autosave_idle_store_emits_nothing() {
    let dir = random_dir();
    let (listener, events) = recording_listener();
    let db = LilDb::builder()
        .file_path(dir.join("db.jsonl"))
        .auto_save(Duration::from_millis(20))
        .log_listener(listener)
        .open()
        .unwrap();

    std::thread::sleep(Duration::from_millis(200));
    assert_eq!(count(&events, StoreAction::Saved), 0);
    assert_eq!(count(&events, StoreAction::Error), 0);
    db.close().unwrap();
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_autosave_failure_emits_error_and_keeps_running() {
    let dir = random_dir();
    let nested = dir.join("nested");
    let path = nested.join("db.jsonl");
    let (listener, events) = recording_listener();
    let db = LilDb::builder()
        .file_path(&path)
        .auto_save(Duration::from_millis(50))
        .log_listener(listener)
        .open()
        .unwrap();

    // replace the parent directory with a plain file so writes fail
    fs::remove_dir_all(&nested).unwrap();
    fs::write(&nested, "not a directory").unwrap();

    db.insert(doc! { _id: "a" }).unwrap();
    wait_for_event(2000, || count(&events, StoreAction::Error) >= 2);
    assert!(db.is_dirty());
    let message = events
        .lock()
        .unwrap()
        .iter()
        .find(|e| e.action() == StoreAction::Error)
        .and_then(|e| e.error_message().map(|m| m.to_string()));
    assert!(message.is_some());

    // storage recovers, the next tick saves
    fs::remove_file(&nested).unwrap();
    wait_for_event(2000, || count(&events, StoreAction::Saved) >= 1);
    assert!(!db.is_dirty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"_id\":\"a\"}\n");

    db.close().unwrap();
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_close_stops_autosave() {
    let dir = random_dir();
    let path = dir.join("db.jsonl");
    let (listener, events) = recording_listener();
    let db = LilDb::builder()
        .file_path(&path)
        .auto_save(Duration::from_millis(20))
        .log_listener(listener)
        .open()
        .unwrap();

    db.close().unwrap();
    db.insert(doc! { _id: "late" }).unwrap();
    std::thread::sleep(Duration::from_millis(200));

    assert_eq!(count(&events, StoreAction::Saved), 0);
    assert!(db.is_dirty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn test_set_log_listener_replaces_listener() {
    let dir = random_dir();
    let (first, first_events) = recording_listener();
    let (second, second_events) = recording_listener();
    let db = LilDb::builder()
        .file_path(dir.join("db.jsonl"))
        .auto_save(Duration::from_millis(50))
        .log_listener(first)
        .open()
        .unwrap();

    db.set_log_listener(second);
    db.insert(doc! { _id: "a" }).unwrap();
    wait_for_event(2000, || count(&second_events, StoreAction::Saved) >= 1);

    assert_eq!(count(&first_events, StoreAction::Loaded), 1);
    assert_eq!(count(&first_events, StoreAction::Saved), 0);
    db.close().unwrap();
    let _ = fs::remove_dir_all(dir);
}
