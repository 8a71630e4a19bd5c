//! apicompat core - API surface compatibility checking
//!
//! This crate compares two versions of a library's public API and reports
//! every change that would break existing callers or implementers:
//! - Arena-backed API model with lazily computed hidden/removed flags
//! - Inheritance-aware member lookup and signature matching
//! - Merged views that let a partial snapshot borrow from a fuller one
//! - Deterministic merge-join comparison of two API trees
//! - The compatibility rule catalog with configurable severities
//! - JSON snapshot loading and text/JSON report rendering

pub use apicompat_core_types;

pub mod compare;
pub mod config;
pub mod errors;
pub mod issues;
pub mod logging_facility;
pub mod lookup;
pub mod merged;
pub mod model;
pub mod report;
pub mod rules;
pub mod snapshot;

// Re-export commonly used types
pub use compare::{compare, AllMembersFilter, ApiFilter, ComparisonVisitor, PublicApiFilter};
pub use config::{load_config, parse_config, CheckConfig};
pub use errors::{CompatError, ExError, ExErrorKind, Result};
pub use issues::{
    ConfiguredSeverities, DefaultSeverities, Issue, IssueKind, Severity, SeverityTable,
};
pub use lookup::ApiLookup;
pub use merged::MergedView;
pub use model::{Codebase, CodebaseBuilder, ItemRef};
pub use report::{render_json, render_text};
pub use rules::{check_codebases, check_compatibility, CheckOutcome, CompatibilityCheck};
pub use snapshot::{load_snapshot, parse_snapshot, ApiSnapshot};
