#![allow(clippy::unwrap_used, clippy::expect_used)]

use casewatch_core::errors::CaseWatchError;
use casewatch_core::logging_facility::test_capture::init_test_capture;
use casewatch_core::{log_critical, log_op_end, log_op_error, log_op_start};
use casewatch_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use tracing::Level;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, cycle_id = "c-1");

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[0].field("cycle_id"), Some("c-1"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = CaseWatchError::SourceStatus { status: 503 };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1, "Should have exactly one error event");
    assert_eq!(events[0].level, Level::ERROR);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field("err.code"), Some("ERR_SOURCE_STATUS"));
    assert!(!events[0].is_critical());
}

#[test]
fn test_log_critical_marks_severity() {
    let capture = init_test_capture();
    let op_name = "test_log_critical_unique_4";

    let err = CaseWatchError::SourceTimeout { after_secs: 10 };
    log_critical!(op_name, err, channel_id = 7u64);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::ERROR);
    assert!(events[0].is_critical());
    assert_eq!(events[0].field("channel_id"), Some("7"));
    assert_eq!(events[0].field("err.code"), Some("ERR_SOURCE_TIMEOUT"));
    assert!(events[0]
        .field("message")
        .unwrap()
        .contains("Timed out after 10s"));
}

#[test]
fn test_component_is_module_path() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_5";

    log_op_start!(op_name);

    let events = capture.events_for_op(op_name);
    assert_eq!(
        events[0].component.as_deref(),
        Some("logging_facility_tests")
    );
}
