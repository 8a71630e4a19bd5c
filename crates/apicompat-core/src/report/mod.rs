//! Rendering of check outcomes for people and machines.

use crate::errors::Result;
use crate::rules::CheckOutcome;

/// One line per issue:
///
/// ```text
/// error: method p.C.m(int): Removed method p.C.m(int) [RemovedMethod]
/// ```
///
/// The failure summary is left to the caller, see
/// [`CheckOutcome::failure_summary`].
pub fn render_text(outcome: &CheckOutcome) -> String {
    let mut out = String::new();
    for issue in &outcome.issues {
        out.push_str(&format!(
            "{}: {}: {} [{}]\n",
            issue.severity, issue.subject, issue.message, issue.kind
        ));
    }
    out
}

/// Pretty-printed JSON of the whole outcome.
///
/// # Errors
///
/// `Serialization` if encoding fails.
pub fn render_json(outcome: &CheckOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::{Issue, IssueKind, Severity};
    use apicompat_core_types::RunId;

    fn outcome(issues: Vec<Issue>, found_problems: bool) -> CheckOutcome {
        CheckOutcome {
            run_id: RunId::from_string("run-1".to_string()),
            old_location: "old.json".to_string(),
            new_location: "new.json".to_string(),
            issues,
            found_problems,
        }
    }

    fn removed_method() -> Issue {
        Issue {
            kind: IssueKind::RemovedMethod,
            severity: Severity::Error,
            subject: "method p.C.m(int)".to_string(),
            message: "Removed method p.C.m(int)".to_string(),
        }
    }

    #[test]
    fn test_text_lists_issues_without_summary() {
        let text = render_text(&outcome(vec![removed_method()], true));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "error: method p.C.m(int): Removed method p.C.m(int) [RemovedMethod]"
        );
        assert_eq!(lines.len(), 1);
        assert!(!text.contains("Found "));
    }

    #[test]
    fn test_text_is_empty_for_clean_run() {
        assert_eq!(render_text(&outcome(Vec::new(), false)), "");
    }

    #[test]
    fn test_json_carries_run_and_issues() {
        let json = render_json(&outcome(vec![removed_method()], true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["run_id"], "run-1");
        assert_eq!(value["found_problems"], true);
        assert_eq!(value["issues"][0]["kind"], "RemovedMethod");
        assert_eq!(value["issues"][0]["subject"], "method p.C.m(int)");
    }
}
