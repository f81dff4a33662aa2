//! nimlab CLI - train and compare Nim-playing agents

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nimlab")]
#[command(version, about = "Nim search and learning agents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent against a fixed opponent
    Train(nimlab::cli::commands::train::TrainArgs),

    /// Play two strategies head-to-head
    Compare(nimlab::cli::commands::compare::CompareArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => nimlab::cli::commands::train::execute(args)?,
        Commands::Compare(args) => nimlab::cli::commands::compare::execute(args)?,
    }
    Ok(())
}
