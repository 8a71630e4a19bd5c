use crate::issues::{Issue, IssueKind, Severity, SeverityTable};
use crate::model::ItemRef;
use apicompat_core_types::schema::EVENT_ISSUE;

/// Shared sink every rule writes through.
///
/// Issues are kept in the order they are reported. Issues whose kind
/// resolves to [`Severity::Hidden`] are dropped.
pub struct Reporter<'a> {
    severities: &'a dyn SeverityTable,
    issues: Vec<Issue>,
    found_problems: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(severities: &'a dyn SeverityTable) -> Self {
        Self {
            severities,
            issues: Vec::new(),
            found_problems: false,
        }
    }

    pub fn report(&mut self, kind: IssueKind, item: ItemRef<'_>, message: impl Into<String>) {
        let severity = self.severities.severity(kind);
        if severity == Severity::Hidden {
            return;
        }
        let issue = Issue {
            kind,
            severity,
            subject: item.describe(),
            message: message.into(),
        };
        tracing::debug!(
            component = module_path!(),
            op = "report_issue",
            event = EVENT_ISSUE,
            issue_kind = kind.name(),
            issue_severity = severity.label(),
            subject = %issue.subject,
        );
        if severity == Severity::Error {
            self.found_problems = true;
        }
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// True once any reported issue resolved to [`Severity::Error`]
    pub fn found_problems(&self) -> bool {
        self.found_problems
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}
