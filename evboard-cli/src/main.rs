mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use evboard_core::BoardConfig;

#[derive(Parser)]
#[command(name = "evboard")]
#[command(about = "Browse the community event board and ask Gemini about it")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the events on the board
    Events {
        /// Keep the subscription open and re-render on every change
        #[arg(short, long)]
        watch: bool,
    },
    /// Add the sample event ("GDG Hackathon 2025") to the board
    Add,
    /// Ask Gemini a question (interactive when no question is given)
    Ask {
        /// The question; omit to start an interactive session
        question: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BoardConfig::load()?;

    match cli.command {
        Commands::Events { watch } => commands::events::run(&config, watch).await,
        Commands::Add => commands::add::run(&config).await,
        Commands::Ask { question } => {
            let question = if question.is_empty() {
                None
            } else {
                Some(question.join(" "))
            };
            commands::ask::run(&config, question).await
        }
    }
}
