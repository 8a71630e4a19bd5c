//! Compatibility rule evaluation.
//!
//! ## Entry point
//!
//! ```ignore
//! use apicompat_core::rules::check_compatibility;
//!
//! let outcome = check_compatibility(&old_view, &new_view, &PublicApiFilter, &DefaultSeverities);
//! if outcome.found_problems {
//!     eprintln!("{}", outcome.failure_summary());
//! }
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce the same issues in the same order.
//! - **Totality**: an unresolvable reference skips the single rule it affects,
//!   never the run.
//! - **No deduplication**: one structural change may raise several issues.

pub mod check;
pub mod reporter;
mod structural;

pub use check::CompatibilityCheck;
pub use reporter::Reporter;

use crate::compare::{compare, ApiFilter};
use crate::issues::{Issue, Severity, SeverityTable};
use crate::merged::MergedView;
use crate::model::Codebase;
use crate::{log_op_end, log_op_start};
use apicompat_core_types::{RunContext, RunId};
use serde::Serialize;

/// Result of one comparison run
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub run_id: RunId,
    pub old_location: String,
    pub new_location: String,
    /// Issues in traversal order
    pub issues: Vec<Issue>,
    /// True when at least one issue resolved to [`Severity::Error`]
    pub found_problems: bool,
}

impl CheckOutcome {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// One-line summary naming both compared surfaces
    pub fn failure_summary(&self) -> String {
        format!(
            "Found {} compatibility error(s) comparing {} (old) against {} (new)",
            self.error_count(),
            self.old_location,
            self.new_location
        )
    }
}

/// Compare two API surfaces and collect every compatibility issue.
///
/// Each view's primary codebase is walked; fallbacks only fill gaps in
/// supertype lookups. Never fails: structural differences are issues.
pub fn check_compatibility(
    old: &MergedView<'_>,
    new: &MergedView<'_>,
    filter: &dyn ApiFilter,
    severities: &dyn SeverityTable,
) -> CheckOutcome {
    let ctx = RunContext::new(old.primary().location(), new.primary().location());
    log_op_start!(
        "check_compatibility",
        run_id = %ctx.run_id,
        old_location = %ctx.old_location,
        new_location = %ctx.new_location
    );
    let start = std::time::Instant::now();

    let mut check = CompatibilityCheck::new(old, new, filter, severities);
    compare(&mut check, old.primary(), new.primary(), filter);
    let reporter = check.into_reporter();
    let found_problems = reporter.found_problems();
    let issues = reporter.into_issues();

    log_op_end!(
        "check_compatibility",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = %ctx.run_id,
        issue_count = issues.len() as u64,
        found_problems = found_problems
    );

    CheckOutcome {
        run_id: ctx.run_id,
        old_location: ctx.old_location,
        new_location: ctx.new_location,
        issues,
        found_problems,
    }
}

/// [`check_compatibility`] over two plain codebases.
///
/// The old side falls back to the new one, so classes a partial snapshot
/// omitted can still be resolved.
pub fn check_codebases(
    old: &Codebase,
    new: &Codebase,
    filter: &dyn ApiFilter,
    severities: &dyn SeverityTable,
) -> CheckOutcome {
    let old_view = MergedView::new(old).with_fallback(new);
    let new_view = MergedView::new(new);
    check_compatibility(&old_view, &new_view, filter, severities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::PublicApiFilter;
    use crate::issues::{DefaultSeverities, IssueKind};
    use crate::model::{ClassSpec, MethodSpec, Modifiers};

    fn surface(location: &str, class: ClassSpec) -> Codebase {
        let mut b = Codebase::builder(location);
        let p = b.add_package("p").unwrap();
        b.add_class(p, class).unwrap();
        b.build()
    }

    #[test]
    fn test_outcome_names_both_locations() {
        let old = surface(
            "old.json",
            ClassSpec::class("p.C")
                .with_modifiers(Modifiers::public())
                .method(MethodSpec::new("m").returns("void")),
        );
        let new = surface(
            "new.json",
            ClassSpec::class("p.C").with_modifiers(Modifiers::public()),
        );

        let outcome = check_codebases(&old, &new, &PublicApiFilter, &DefaultSeverities);

        assert!(outcome.found_problems);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].kind, IssueKind::RemovedMethod);
        assert_eq!(outcome.error_count(), 1);
        let summary = outcome.failure_summary();
        assert!(summary.contains("old.json"));
        assert!(summary.contains("new.json"));
    }

    #[test]
    fn test_identical_surfaces_yield_nothing() {
        let class = ClassSpec::class("p.C")
            .with_modifiers(Modifiers::public())
            .method(MethodSpec::new("m").returns("int"));
        let old = surface("a", class.clone());
        let new = surface("b", class);

        let outcome = check_codebases(&old, &new, &PublicApiFilter, &DefaultSeverities);
        assert!(outcome.issues.is_empty());
        assert!(!outcome.found_problems);
    }
}
