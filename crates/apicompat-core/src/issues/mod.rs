//! Issue kinds, severities and the severity table seam.

pub mod model;
pub mod severity;

pub use model::{Issue, IssueKind, Severity, UnknownIssueKind};
pub use severity::{ConfiguredSeverities, DefaultSeverities, SeverityTable};
