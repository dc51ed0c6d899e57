//! Lifecycle logging emitted by service operations

use std::sync::Arc;

use boxstash_core::logging_facility::test_capture::init_test_capture;
use boxstash_core::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use boxstash_core::{User, VagrantBox};
use boxstash_engine::BoxService;
use boxstash_store::{Database, SqliteRepository};

fn setup_service() -> BoxService<SqliteRepository> {
    let db = Arc::new(Database::open_in_memory().unwrap());
    BoxService::new(SqliteRepository::new(db))
}

#[test]
fn test_successful_operation_logs_start_and_end() {
    let capture = init_test_capture();
    let service = setup_service();

    service.create_user(&User::new("logged")).unwrap();

    capture.assert_event_exists("create_user", EVENT_START);
    capture.assert_event_exists("create_user", EVENT_END);
    let end = capture
        .events_for_op("create_user")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert!(end.field("duration_ms").is_some());
}

#[test]
fn test_failed_operation_logs_end_error_with_code() {
    let capture = init_test_capture();
    let service = setup_service();

    let err = service.find_box("nobody", "nothing").unwrap_err();
    assert_eq!(err.code(), "ERR_NOT_FOUND");

    let failures: Vec<_> = capture
        .events_for_op("find_box")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert!(!failures.is_empty());
    assert_eq!(failures[0].field("err.code"), Some("ERR_NOT_FOUND"));
    assert_eq!(failures[0].field("err.kind"), Some("NotFound"));
}

#[test]
fn test_nested_helpers_do_not_log_lifecycle() {
    let capture = init_test_capture();
    let service = setup_service();
    service.create_user(&User::new("quiet")).unwrap();

    service.create_box(&VagrantBox::new("quiet", "box")).unwrap();

    // create_box decorates through internal helpers, never through list_versions
    assert_eq!(
        capture.count_events(|e| e.op.as_deref() == Some("list_versions")),
        0
    );
}
