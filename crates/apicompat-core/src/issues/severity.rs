use super::model::{IssueKind, Severity};
use std::collections::BTreeMap;

/// Resolves the severity an issue kind is reported with
pub trait SeverityTable {
    fn severity(&self, kind: IssueKind) -> Severity;
}

/// Built-in severities of every issue kind
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSeverities;

impl SeverityTable for DefaultSeverities {
    fn severity(&self, kind: IssueKind) -> Severity {
        kind.default_severity()
    }
}

/// Per-kind overrides on top of the built-in severities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredSeverities {
    overrides: BTreeMap<IssueKind, Severity>,
}

impl ConfiguredSeverities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: IssueKind, severity: Severity) -> Self {
        self.overrides.insert(kind, severity);
        self
    }

    pub fn set(&mut self, kind: IssueKind, severity: Severity) {
        self.overrides.insert(kind, severity);
    }

    pub fn overrides(&self) -> &BTreeMap<IssueKind, Severity> {
        &self.overrides
    }
}

impl SeverityTable for ConfiguredSeverities {
    fn severity(&self, kind: IssueKind) -> Severity {
        self.overrides
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_severity())
    }
}
