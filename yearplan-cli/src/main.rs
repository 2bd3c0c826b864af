mod client;
mod commands;
mod config;
mod render;
mod session;
mod sync;
mod token;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use yearplan_core::{Control, DateKey, EventId};

use crate::commands::parse_date;

#[derive(Parser)]
#[command(name = "yearplan")]
#[command(about = "Plan your year one day at a time and watch the heatmap fill up")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the server password (prompted for when omitted)
    Login {
        password: Option<String>,

        /// Server base URL to use from now on
        #[arg(long)]
        server: Option<String>,
    },
    /// Forget the saved password
    Logout,
    /// Show the year as a heatmap
    Heatmap,
    /// Show one day's events
    Show {
        /// YYYY-MM-DD or "today"
        #[arg(value_parser = parse_date)]
        date: DateKey,
    },
    /// Add an event to a day
    Add {
        /// YYYY-MM-DD or "today"
        #[arg(value_parser = parse_date)]
        date: DateKey,

        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Add it as already done
        #[arg(short, long)]
        done: bool,
    },
    /// Toggle done/todo, or restore a given-up event
    Toggle {
        #[arg(value_parser = parse_date)]
        date: DateKey,
        id: String,
    },
    /// Give up on an event, or delete it for good if already given up
    Delete {
        #[arg(value_parser = parse_date)]
        date: DateKey,
        id: String,
    },
    /// Set a day's glyph, or clear it when omitted
    Glyph {
        #[arg(value_parser = parse_date)]
        date: DateKey,
        glyph: Option<String>,
    },
    /// Interactive session
    Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Tracing is opt-in via RUST_LOG.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { password, server } => commands::login::run(password, server).await,
        Commands::Logout => commands::logout::run(),
        Commands::Heatmap => commands::heatmap::run().await,
        Commands::Show { date } => commands::show::run(date).await,
        Commands::Add { date, text, done } => commands::add::run(date, text, done).await,
        Commands::Toggle { date, id } => {
            commands::control::run(date, EventId::parse(&id), Control::Primary).await
        }
        Commands::Delete { date, id } => {
            commands::control::run(date, EventId::parse(&id), Control::Delete).await
        }
        Commands::Glyph { date, glyph } => commands::glyph::run(date, glyph).await,
        Commands::Shell => commands::shell::run().await,
    }
}
