// UCI front end for the checkmate engine

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use checkmate_engine::engine::{spawn_stdin_reader, Engine, EngineConfig};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the minimum search depth
    #[arg(long)]
    min_depth: Option<u32>,

    /// Override the maximum search depth
    #[arg(long)]
    max_depth: Option<u32>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    // stdout belongs to the protocol; everything else goes to the log
    if let Err(e) = run(&args) {
        error!(
            "Fatal error: {e:#}\n{}",
            std::backtrace::Backtrace::force_capture()
        );
        return Err(e);
    }
    Ok(())
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("cannot load configuration {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = args.min_depth {
        config.min_depth = depth;
    }
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    info!(
        min_depth = config.min_depth,
        max_depth = config.max_depth,
        "[CONFIG] search depths"
    );

    let (source, _reader) = spawn_stdin_reader()?;
    let stdout = std::io::stdout();
    let mut engine = Engine::new(config, source, stdout.lock())?;
    engine.run()?;

    let stats = engine.stats();
    info!(
        searches = stats.searches,
        commits = stats.commits,
        ponder_hits = stats.ponder_hits,
        mispredictions = stats.mispredictions,
        "[ENGINE] session finished"
    );
    Ok(())
}
