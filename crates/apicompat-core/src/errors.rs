use thiserror::Error;

/// Result type alias using CompatError
pub type Result<T> = std::result::Result<T, CompatError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Stable classification of every failure the tool can raise. Structural API
/// differences are never errors; they are reported as issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Model construction
    InvalidInput,
    NotFound,
    AlreadyExists,
    WrongItemKind,

    // Inputs
    InvalidSnapshot,
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::WrongItemKind => "ERR_WRONG_ITEM_KIND",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, item, file path) for diagnostics.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    item: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            item: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add item context (qualified name or item id)
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the item context, if any
    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(item) = &self.item {
            write!(f, " (item: {})", item)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for building models and loading inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompatError {
    /// A class with the same qualified name was already added to the codebase
    #[error("Duplicate class: {qualified_name}")]
    DuplicateClass { qualified_name: String },

    /// An item id does not belong to the codebase being built
    #[error("Item not found: #{id}")]
    ItemNotFound { id: u32 },

    /// An item id refers to an item of another kind than the operation needs
    #[error("Item #{id} is a {found}, expected a {expected}")]
    WrongItemKind {
        id: u32,
        expected: &'static str,
        found: &'static str,
    },

    /// A required name was empty
    #[error("Invalid name for {what}: {reason}")]
    InvalidName { what: &'static str, reason: String },

    /// A snapshot document could not be decoded
    #[error("Invalid snapshot {location}: {message}")]
    InvalidSnapshot { location: String, message: String },

    /// A configuration document could not be decoded or names unknown settings
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Encoding output failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<CompatError> for ExError {
    fn from(err: CompatError) -> Self {
        match err {
            CompatError::DuplicateClass { qualified_name } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_item(qualified_name)
                    .with_message("Class already exists")
            }
            CompatError::ItemNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_item(format!("#{}", id))
                .with_message("Item not found"),
            CompatError::WrongItemKind {
                id,
                expected,
                found,
            } => ExError::new(ExErrorKind::WrongItemKind)
                .with_item(format!("#{}", id))
                .with_message(format!("Expected a {}, found a {}", expected, found)),
            CompatError::InvalidName { what, reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid name for {}: {}", what, reason)),
            CompatError::InvalidSnapshot { location, message } => {
                ExError::new(ExErrorKind::InvalidSnapshot)
                    .with_path(location)
                    .with_message(message)
            }
            CompatError::InvalidConfig { message } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }
            CompatError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_path(path)
                .with_message(message),
            CompatError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to CompatError
impl From<serde_json::Error> for CompatError {
    fn from(err: serde_json::Error) -> Self {
        CompatError::Serialization {
            message: err.to_string(),
        }
    }
}
