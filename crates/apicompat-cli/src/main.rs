//! apicompat CLI
//!
//! Command-line interface for API compatibility checks

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "apicompat")]
#[command(about = "apicompat - API surface compatibility checker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two API snapshots and report incompatible changes
    Check(commands::check::CheckArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
    };

    match result {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
