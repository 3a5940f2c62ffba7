//! Fundamentals lab: study Python basics with spaced repetition flashcards.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod state;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use study_core::StatusFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::OutputFormat;
use crate::config::Config;
use crate::db::{KeyValueStore, SqliteStore};
use crate::state::LabState;

#[derive(Debug, Parser)]
#[command(
    name = "lab",
    about = "Study programming fundamentals with spaced repetition flashcards",
    version
)]
pub struct Cli {
    /// Progress database path (overrides LAB_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List cards due for review
    Due,
    /// List cards, optionally filtered by status
    List {
        /// all, due, new, learning, hard or learned
        #[arg(short, long, default_value = "all", value_parser = parse_status_filter)]
        status: StatusFilter,
    },
    /// Grade a card from 0 (blackout) to 5 (perfect recall)
    Review { card_id: i64, quality: u8 },
    /// Mark a card as hard
    Hard { card_id: i64 },
    /// Mark a card as learned
    Learned { card_id: i64 },
    /// Mark a lesson as completed
    Lesson { topic: String },
    /// Record a quiz result
    Quiz {
        topic: String,
        score: u32,
        total: u32,
    },
    /// Show progress statistics
    Stats,
    /// Erase all progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn parse_status_filter(s: &str) -> Result<StatusFilter, String> {
    StatusFilter::from_str(s).ok_or_else(|| format!("unknown status filter '{s}'"))
}

pub fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().with_db_path(cli.db.clone());
    init_tracing(&config.log_filter);

    tracing::info!(path = %config.db_path.display(), "opening progress store");
    let store = SqliteStore::open(&config.db_path)?;

    let now = Utc::now();
    let mut state = LabState::load(store, catalog::builtin()?, now)?;
    state.record_visit(now);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&mut state, cli.command, cli.format, now, &mut out)
}

/// Run one command against loaded state.
pub fn execute<S: KeyValueStore>(
    state: &mut LabState<S>,
    command: Commands,
    format: OutputFormat,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Commands::Due => commands::study::due(state, now, format, out),
        Commands::List { status } => commands::study::list(state, status, now, format, out),
        Commands::Review { card_id, quality } => {
            commands::study::review(state, card_id, quality, now, format, out)
        }
        Commands::Hard { card_id } => commands::study::mark_hard(state, card_id, now, format, out),
        Commands::Learned { card_id } => {
            commands::study::mark_learned(state, card_id, now, format, out)
        }
        Commands::Lesson { topic } => commands::progress::complete_lesson(state, &topic, out),
        Commands::Quiz {
            topic,
            score,
            total,
        } => commands::progress::save_quiz(state, &topic, score, total, now, out),
        Commands::Stats => commands::progress::stats(state, now, format, out),
        Commands::Reset { yes } => {
            if !yes {
                anyhow::bail!("refusing to reset progress without --yes");
            }
            commands::progress::reset(state, now, out)
        }
    }
}
