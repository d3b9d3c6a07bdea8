//! kb - Terminal Kanban Board
//!
//! A single-user task board with three fixed columns, local JSON persistence,
//! and optional AI-assisted subtask suggestions.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kb::config::Config;
use kb::repo::TaskRepository;
use kb::store::BoardStore;
use kb::suggest::SuggestionClient;

#[derive(Parser, Debug)]
#[command(name = "kb", version, about = "Terminal kanban board with AI subtask suggestions")]
struct Cli {
    /// Board file path (overrides the configured location)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Config file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    // Tracing is opt-in via RUST_LOG.
    // Keep startup robust in CI/robot envs: ignore invalid/huge filters.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> kb::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let store = BoardStore::new(config.board_file(cli.file.as_deref()));
    let repo = TaskRepository::load(store)?;
    let suggest_client = SuggestionClient::new(&config.suggest);

    if !suggest_client.has_api_key() {
        tracing::info!("no API key configured; subtask suggestions will be unavailable");
    }

    kb::ui::board::run(repo, suggest_client)
}
