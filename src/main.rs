use clap::Parser;
use eyre::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tasklist::{Config, Renderer, Session, StatusFilter, TaskStore};
use tracing::Level;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "tasklist - In-memory task list with soft-delete and status filters")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a config file (default: .tasklist.yml, then ~/.config/tasklist/tasklist.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Filter to start in (all, completed, unchecked, trash)
    #[arg(short, long)]
    filter: Option<StatusFilter>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Replay commands from this file instead of reading stdin
    script: Option<PathBuf>,
}

fn log_level(config: &Config, verbose: bool) -> Level {
    if verbose {
        return Level::DEBUG;
    }
    config.log_level.parse::<Level>().unwrap_or(Level::WARN)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let config = &loaded.config;

    // Setup tracing on stderr so logs stay out of the rendered list
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(log_level(config, cli.verbose))
        .init();

    loaded.log();
    config.validate().context("Invalid configuration")?;

    let color = config.color && !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }

    let store = TaskStore::with_filter(cli.filter.unwrap_or(config.default_filter));
    let renderer = Renderer::new(color, config.show_ids);
    let mut session = Session::new(store, renderer, io::stdout().lock());

    match &cli.script {
        Some(path) => {
            let file = File::open(path).context(format!("Failed to open script {}", path.display()))?;
            session.run(BufReader::new(file))?;
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                session = session.with_prompt(config.prompt.clone());
            }
            session.run(stdin.lock())?;
        }
    }

    Ok(())
}
