use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use hanabi_cli::command;
use hanabi_cli::config::{ArbiterConfig, OutputFormat};
use hanabi_cli::logging::init_logging;
use hanabi_cli::runner::Arbiter;
use hanabi_core::AppInfo;
use hanabi_core::game::action::Action;
use hanabi_core::model::deck::Deck;

/// Referee for two-player Hanabi command logs.
#[derive(Debug, Parser)]
#[command(name = "hanabi", author, version, about = "Two-player Hanabi arbiter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay commands and print one line per finished game.
    Run(RunArgs),
    /// Print a start command for a shuffled standard deck.
    Deal(DealArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read commands from this file instead of stdin.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write results to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Skip malformed or refused commands instead of aborting.
    #[arg(long)]
    lenient: bool,

    /// Override the configured tracing level.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Debug, Args)]
struct DealArgs {
    #[arg(long, value_name = "SEED")]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args),
        Command::Deal(args) => deal(args),
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = ArbiterConfig::load(args.config.as_deref())?;

    if let Some(input) = args.input {
        config.input.path = Some(input);
    }

    if let Some(output) = args.output {
        config.output.path = Some(output);
    }

    if let Some(format) = args.format {
        config.output.format = format;
    }

    if args.lenient {
        config.input.strict = false;
    }

    if let Some(level) = args.log_level {
        config.logging.tracing_level = level;
    }

    config.validate()?;

    let logging_guard = init_logging(&config.logging)?;
    tracing::info!(
        app = AppInfo::name(),
        version = AppInfo::version(),
        strict = config.input.strict,
        "arbiter starting"
    );
    if let Some(guard) = &logging_guard {
        tracing::info!(path = %guard.log_path.display(), "writing structured log");
    }

    let input: Box<dyn BufRead> = match config.input.path.as_ref() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening input {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let output: Box<dyn Write> = match config.output.path.as_ref() {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let summary = Arbiter::new(config)
        .run(input, output)
        .context("arbiter run failed")?;

    tracing::info!(
        lines = summary.lines_read,
        games = summary.games_finished,
        skipped = summary.skipped,
        "arbiter finished"
    );
    Ok(())
}

fn deal(args: DealArgs) -> anyhow::Result<()> {
    let deck = Deck::shuffled_with_seed(args.seed);
    let action = Action::StartNewGame {
        cards: deck.iter().copied().collect(),
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", command::render(&action))?;
    Ok(())
}
