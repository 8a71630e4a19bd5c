//! TOML configuration for a check run
//!
//! ```toml
//! [severity]
//! AddedMethod = "hidden"
//! ChangedDeprecated = "error"
//!
//! [logging]
//! profile = "production"
//! ```

use crate::errors::{CompatError, Result};
use crate::issues::{ConfiguredSeverities, IssueKind, Severity};
use crate::logging_facility::Profile;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Severity overrides keyed by issue kind name
    #[serde(default)]
    pub severity: BTreeMap<String, Severity>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Option<Profile>,
}

impl CheckConfig {
    /// Severity table with this configuration's overrides applied.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when a key does not name an issue kind.
    pub fn severities(&self) -> Result<ConfiguredSeverities> {
        let mut table = ConfiguredSeverities::new();
        for (name, severity) in &self.severity {
            let kind: IssueKind = name.parse().map_err(|e| CompatError::InvalidConfig {
                message: format!("{}", e),
            })?;
            table.set(kind, *severity);
        }
        Ok(table)
    }
}

/// Parse configuration text.
///
/// # Errors
///
/// `InvalidConfig` when the text is not valid TOML for [`CheckConfig`] or
/// names an unknown issue kind.
pub fn parse_config(text: &str) -> Result<CheckConfig> {
    let config: CheckConfig = toml::from_str(text).map_err(|e| CompatError::InvalidConfig {
        message: format!("failed to parse config: {}", e),
    })?;
    config.severities()?;
    Ok(config)
}

/// Load configuration from a file.
///
/// # Errors
///
/// `Io` when the file cannot be read, otherwise as [`parse_config`].
pub fn load_config(path: &Path) -> Result<CheckConfig> {
    let text = fs::read_to_string(path).map_err(|e| CompatError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_config(&text)
}
