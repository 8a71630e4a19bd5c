#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use apicompat_core::errors::CompatError;
use apicompat_core::logging_facility::test_capture::init_test_capture;
use apicompat_core::model::MethodSpec;
use apicompat_core::{load_snapshot, log_op_end, log_op_error, log_op_start};
use apicompat_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_ISSUE, EVENT_START};
use common::*;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.find(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = CompatError::InvalidConfig {
        message: "bad key".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field("err.code"), Some("ERR_INVALID_CONFIG"));
    assert_eq!(error_events[0].field("err.kind"), Some("InvalidConfig"));
}

#[test]
fn test_check_run_logs_start_and_end_with_run_id() {
    let capture = init_test_capture();
    let old = surface(
        "logging_old",
        vec![public_class("p.C").method(MethodSpec::new("m").returns("void"))],
    );
    let new = surface("logging_new", vec![public_class("p.C")]);

    let outcome = check(&old, &new);

    let run_id = outcome.run_id.to_string();
    let of_run = |event: &str| {
        capture
            .find("check_compatibility", event)
            .into_iter()
            .filter(|e| e.field("run_id") == Some(run_id.as_str()))
            .collect::<Vec<_>>()
    };
    let starts = of_run(EVENT_START);
    let ends = of_run(EVENT_END);
    assert_eq!(starts.len(), 1);
    assert_eq!(ends.len(), 1);
    assert_eq!(starts[0].field("old_location"), Some("logging_old"));
    assert_eq!(ends[0].field("issue_count"), Some("1"));
    assert_eq!(ends[0].field("found_problems"), Some("true"));
    assert!(ends[0].field("duration_ms").is_some());
}

#[test]
fn test_each_issue_is_logged() {
    let capture = init_test_capture();
    let old = surface(
        "s",
        vec![public_class("p.LoggedIssueOwner").method(MethodSpec::new("m").returns("void"))],
    );
    let new = surface("s", vec![public_class("p.LoggedIssueOwner")]);

    check(&old, &new);

    let issues: Vec<_> = capture
        .find("report_issue", EVENT_ISSUE)
        .into_iter()
        .filter(|e| e.field("subject") == Some("method p.LoggedIssueOwner.m()"))
        .collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field("issue_kind"), Some("RemovedMethod"));
    assert_eq!(issues[0].field("issue_severity"), Some("error"));
}

#[test]
fn test_snapshot_load_failure_logs_error_event() {
    let capture = init_test_capture();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let location = path.display().to_string();

    let err = load_snapshot(&path).unwrap_err();

    assert!(matches!(err, CompatError::InvalidSnapshot { .. }));
    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some("load_snapshot")
            && e.event.as_deref() == Some(EVENT_START)
            && e.field("path") == Some(location.as_str())
    });
    assert_eq!(starts, 1);
    let errors = capture.find("load_snapshot", EVENT_END_ERROR);
    assert!(errors
        .iter()
        .any(|e| e.field("err.code") == Some("ERR_INVALID_SNAPSHOT")));
}
