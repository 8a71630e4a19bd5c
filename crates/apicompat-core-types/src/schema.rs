//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent across logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Compared surfaces
pub const FIELD_OLD_LOCATION: &str = "old_location";
pub const FIELD_NEW_LOCATION: &str = "new_location";

// Issue fields
pub const FIELD_ISSUE_KIND: &str = "issue_kind";
pub const FIELD_ISSUE_SEVERITY: &str = "issue_severity";
pub const FIELD_ISSUE_COUNT: &str = "issue_count";
pub const FIELD_FOUND_PROBLEMS: &str = "found_problems";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_ISSUE: &str = "issue";
