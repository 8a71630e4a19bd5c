//! JSON snapshot documents.
//!
//! A snapshot is the serialized form of one API surface:
//!
//! ```json
//! {
//!   "location": "api/current.json",
//!   "partial_format": false,
//!   "packages": [
//!     { "name": "p", "classes": [
//!       { "name": "p.C", "modifiers": { "visibility": "public" },
//!         "methods": [ { "name": "m", "return_type": "void",
//!                        "parameters": [ { "type": "int" } ] } ] }
//!     ] }
//!   ]
//! }
//! ```

use crate::errors::{CompatError, Result};
use crate::model::{Codebase, CodebaseBuilder, PackageSpec};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiSnapshot {
    /// Overrides the location the document was read from
    pub location: Option<String>,
    /// Legacy format known to omit members inherited from hidden classes
    pub partial_format: bool,
    pub packages: Vec<PackageSpec>,
}

impl ApiSnapshot {
    /// Build the codebase this snapshot describes.
    ///
    /// # Errors
    ///
    /// Propagates builder failures such as duplicate classes or empty names.
    pub fn into_codebase(self, fallback_location: &str) -> Result<Codebase> {
        let location = self
            .location
            .unwrap_or_else(|| fallback_location.to_string());
        let mut builder = CodebaseBuilder::new(location).partial_format(self.partial_format);
        for package in self.packages {
            builder.add_package_spec(package)?;
        }
        Ok(builder.build())
    }
}

/// Decode a snapshot document and build its codebase.
///
/// # Errors
///
/// `InvalidSnapshot` for malformed JSON or an inconsistent surface.
pub fn parse_snapshot(text: &str, location: &str) -> Result<Codebase> {
    let snapshot: ApiSnapshot =
        serde_json::from_str(text).map_err(|e| CompatError::InvalidSnapshot {
            location: location.to_string(),
            message: e.to_string(),
        })?;
    snapshot
        .into_codebase(location)
        .map_err(|e| CompatError::InvalidSnapshot {
            location: location.to_string(),
            message: e.to_string(),
        })
}

/// Read and decode a snapshot file.
///
/// # Errors
///
/// `Io` when the file cannot be read, otherwise as [`parse_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<Codebase> {
    let location = path.display().to_string();
    log_op_start!("load_snapshot", path = %location);
    let start = std::time::Instant::now();

    let result = fs::read_to_string(path)
        .map_err(|e| CompatError::Io {
            path: location.clone(),
            message: e.to_string(),
        })
        .and_then(|text| parse_snapshot(&text, &location));

    match result {
        Ok(codebase) => {
            log_op_end!(
                "load_snapshot",
                duration_ms = start.elapsed().as_millis() as u64,
                item_count = codebase.len() as u64
            );
            Ok(codebase)
        }
        Err(e) => {
            log_op_error!(
                "load_snapshot",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}
