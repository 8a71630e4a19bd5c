//! Correlation types for tracking a single comparison run
//!
//! Every compatibility check gets a fresh [`RunId`] so that the start, issue
//! and end events it logs can be tied together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one comparison run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new RunId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through a comparison run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: RunId,
    /// Location of the surface treated as the frozen "before" side
    pub old_location: String,
    /// Location of the surface under test
    pub new_location: String,
}

impl RunContext {
    /// Create a new context with a fresh RunId
    pub fn new(old_location: impl Into<String>, new_location: impl Into<String>) -> Self {
        Self {
            run_id: RunId::new(),
            old_location: old_location.into(),
            new_location: new_location.into(),
        }
    }

    /// Replace the generated RunId with an existing one
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = run_id;
        self
    }
}
