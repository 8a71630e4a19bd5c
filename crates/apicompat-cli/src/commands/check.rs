//! Check command
//!
//! Usage: apicompat check --old <JSON> --new <JSON> [--baseline <JSON>...]
//!        [--config <TOML>] [--format text|json] [--all-members]

use apicompat_core::logging_facility::{init, Profile};
use apicompat_core::{
    check_compatibility, load_config, load_snapshot, render_json, render_text, AllMembersFilter,
    ApiFilter, CheckConfig, Codebase, MergedView, PublicApiFilter,
};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Snapshot of the previously released API
    #[arg(long)]
    pub old: PathBuf,

    /// Snapshot of the API being checked
    #[arg(long)]
    pub new: PathBuf,

    /// Extra snapshot consulted when a supertype is missing from both sides (repeatable)
    #[arg(long)]
    pub baseline: Vec<PathBuf>,

    /// Severity overrides and logging profile (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Compare every member, including private and hidden ones
    #[arg(long)]
    pub all_members: bool,
}

/// How the check ended, mapped to the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Compatible,
    Incompatible,
}

impl CheckStatus {
    pub fn code(self) -> i32 {
        match self {
            CheckStatus::Compatible => 0,
            CheckStatus::Incompatible => 1,
        }
    }
}

/// Execute check command
pub fn execute(args: CheckArgs) -> Result<CheckStatus, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => CheckConfig::default(),
    };
    init(config.logging.profile.unwrap_or(Profile::Development));
    let severities = config.severities()?;

    let old = load_snapshot(&args.old)?;
    let new = load_snapshot(&args.new)?;
    let baselines = args
        .baseline
        .iter()
        .map(|path| load_snapshot(path))
        .collect::<Result<Vec<Codebase>, _>>()?;

    // The old side may omit classes the new side still declares
    let mut old_view = MergedView::new(&old).with_fallback(&new);
    let mut new_view = MergedView::new(&new);
    for baseline in &baselines {
        old_view = old_view.with_fallback(baseline);
        new_view = new_view.with_fallback(baseline);
    }

    let filter: &dyn ApiFilter = if args.all_members {
        &AllMembersFilter
    } else {
        &PublicApiFilter
    };
    let outcome = check_compatibility(&old_view, &new_view, filter, &severities);

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&outcome)),
        OutputFormat::Json => println!("{}", render_json(&outcome)?),
    }

    if outcome.found_problems {
        eprintln!("{}", outcome.failure_summary());
        Ok(CheckStatus::Incompatible)
    } else {
        Ok(CheckStatus::Compatible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CheckStatus::Compatible.code(), 0);
        assert_eq!(CheckStatus::Incompatible.code(), 1);
    }
}
