use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use tile_cli::config::Config;
use tile_cli::session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a 2048-style sliding tile puzzle in the terminal")]
struct Args {
    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// Board width (overrides the config file)
    #[arg(long, value_name = "N")]
    width: Option<usize>,

    /// Board height (overrides the config file)
    #[arg(long, value_name = "N")]
    height: Option<usize>,

    /// Base RNG seed; game k of the session uses seed + k
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Do not clear the terminal between redraws
    #[arg(long)]
    no_clear: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut config = match &args.config {
        Some(path) => {
            info!("Using configuration file: {}", path.display());
            Config::from_toml(path).map_err(|e| anyhow!("failed to load config: {e}"))?
        }
        None => Config::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_clear {
        config.display.clear_screen = false;
    }

    let stdout = io::stdout();
    let mut session = Session::new(config, stdout.lock())?;
    session.run(io::stdin().lock())?;
    info!("Played {} game(s)", session.games_started());
    Ok(())
}
