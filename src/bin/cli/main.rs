mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashbox", about = "Leitner-box flashcard study tool", version)]
struct Cli {
    /// Data directory holding config, deck and progress (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Deck file to use instead of the configured one
    #[arg(long, global = true)]
    deck: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum AnswerArg {
    Correct,
    Again,
}

#[derive(Subcommand)]
enum Command {
    /// List cards due for review today
    Due {
        /// Only cards in this category
        #[arg(long)]
        category: Option<String>,
        /// Only cards whose front or back contains this text
        #[arg(long)]
        search: Option<String>,
        /// Maximum cards to list
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Study today's due cards interactively
    Study {
        /// Only cards in this category
        #[arg(long)]
        category: Option<String>,
        /// Only cards whose front or back contains this text
        #[arg(long)]
        search: Option<String>,
        /// Keep deck order instead of shuffling
        #[arg(long)]
        no_shuffle: bool,
    },

    /// Record a single answer without an interactive session
    Answer {
        /// Card ID
        card_id: String,
        /// Whether the card was answered correctly
        result: AnswerArg,
    },

    /// Show box counts and today's correct rate
    Stats {
        /// Only cards in this category
        #[arg(long)]
        category: Option<String>,
        /// Only cards whose front or back contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// List categories with card counts
    Categories,

    /// Add a card to the deck
    Add {
        /// Prompt shown on the front
        front: String,
        /// Answer lines, separated by ';'
        back: String,
        /// Category name
        #[arg(long)]
        category: String,
        /// Card ID (default: card-<timestamp>)
        #[arg(long)]
        id: Option<String>,
    },

    /// Replace the deck with cards from a CSV file (id,front,back,category)
    Import {
        /// CSV file, or "-" to read stdin
        path: PathBuf,
        /// Validate only, do not save
        #[arg(long)]
        dry_run: bool,
    },

    /// Write the deck as JSON
    Export {
        /// Output file, or "-" for stdout
        path: PathBuf,
    },

    /// Clear review progress
    Reset {
        /// Also delete the deck and today's tally
        #[arg(long)]
        all: bool,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.data_dir.as_deref(), cli.deck.as_deref())?;

    match cli.command {
        None => {
            // No subcommand → study everything due
            let shuffle = app.config.shuffle;
            commands::study::run(&app, None, None, shuffle, use_color)?;
        }
        Some(Command::Due { category, search, limit }) => {
            commands::due::run(&app, category.as_deref(), search.as_deref(), limit, &cli.format, use_color)?;
        }
        Some(Command::Study { category, search, no_shuffle }) => {
            let shuffle = app.config.shuffle && !no_shuffle;
            commands::study::run(&app, category.as_deref(), search.as_deref(), shuffle, use_color)?;
        }
        Some(Command::Answer { card_id, result }) => {
            let correct = matches!(result, AnswerArg::Correct);
            commands::answer::run(&app, &card_id, correct, &cli.format, use_color)?;
        }
        Some(Command::Stats { category, search }) => {
            commands::stats::run(&app, category.as_deref(), search.as_deref(), &cli.format, use_color)?;
        }
        Some(Command::Categories) => {
            commands::categories::run(&app, &cli.format)?;
        }
        Some(Command::Add { front, back, category, id }) => {
            commands::add::run(&app, id, &front, &back, &category, &cli.format)?;
        }
        Some(Command::Import { path, dry_run }) => {
            commands::import::run(&app, &path, dry_run, &cli.format, use_color)?;
        }
        Some(Command::Export { path }) => {
            commands::export::run(&app, &path)?;
        }
        Some(Command::Reset { all, yes }) => {
            commands::reset::run(&app, all, yes)?;
        }
    }

    Ok(())
}

/// Check if stdin is a terminal (not piped)
pub fn stdin_is_tty() -> bool {
    unsafe { libc_isatty(0) != 0 }
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
