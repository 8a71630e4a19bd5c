use serde::{Deserialize, Serialize};

/// How a reported issue is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fails the check
    Error,
    Warning,
    Info,
    /// Suppressed: never recorded
    Hidden,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

macro_rules! issue_kinds {
    ($($kind:ident => $severity:ident),+ $(,)?) => {
        /// Every kind of compatibility issue the checker can report.
        ///
        /// Names are stable: they appear in reports and are the keys of the
        /// severity table in configuration files.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub enum IssueKind {
            $($kind),+
        }

        impl IssueKind {
            pub const ALL: &'static [IssueKind] = &[$(IssueKind::$kind),+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(IssueKind::$kind => stringify!($kind)),+
                }
            }

            pub fn default_severity(&self) -> Severity {
                match self {
                    $(IssueKind::$kind => Severity::$severity),+
                }
            }
        }
    };
}

issue_kinds! {
    AddedPackage => Error,
    AddedClass => Error,
    AddedMethod => Error,
    AddedAbstractMethod => Error,
    AddedField => Error,
    AddedInterface => Error,
    AddedFinal => Error,
    AddedFinalUninstantiable => Info,
    RemovedPackage => Error,
    RemovedClass => Error,
    RemovedMethod => Error,
    RemovedField => Error,
    RemovedInterface => Error,
    RemovedFinal => Error,
    ChangedScope => Error,
    ChangedAbstract => Error,
    ChangedSuperclass => Error,
    ChangedType => Error,
    ChangedThrows => Error,
    ChangedValue => Error,
    ChangedStatic => Error,
    ChangedClass => Error,
    ChangedDefault => Error,
    ChangedDeprecated => Warning,
    InvalidNullConversion => Error,
    ParameterNameRemoved => Error,
    ParameterNameChange => Error,
    DefaultValueRemoved => Error,
    VarargRemoval => Error,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown issue kind name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown issue kind '{0}'")]
pub struct UnknownIssueKind(pub String);

impl std::str::FromStr for IssueKind {
    type Err = UnknownIssueKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownIssueKind(s.to_string()))
    }
}

/// One reported compatibility problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    /// Description of the offending item, e.g. `method p.C.m(int)`
    pub subject: String,
    pub message: String,
}
