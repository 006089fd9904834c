//! casewatch CLI
//!
//! Polls a case-count feed and posts what changed to a channel

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "casewatch")]
#[command(about = "casewatch - case count change notifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll the feed and notify a channel until interrupted
    Watch(commands::watch::WatchArgs),
    /// Render the changes between two feed files once
    Diff(commands::diff::DiffArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Watch(args) => commands::watch::execute(args).await,
        Commands::Diff(args) => commands::diff::execute(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
