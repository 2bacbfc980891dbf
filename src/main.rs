use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use players::{Player, PlayerKind};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use titan_core::logic::{GameConfig, TitanGame};
use tracing_subscriber::EnvFilter;

mod driver;
mod players;

#[derive(Parser, Debug)]
#[command(author, version, about = "Titan Clash: the Titan Hero against the Pantheon", long_about = None)]
struct Args {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON file overriding rules and evaluation weights
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one game from the opening position
    Play {
        #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
        titan: PlayerKind,

        #[arg(long, value_enum, default_value_t = PlayerKind::Silent)]
        pantheon: PlayerKind,

        /// Search depth limit; overrides the config file
        #[arg(short, long)]
        depth: Option<usize>,

        /// Declare a draw after this many plies
        #[arg(long, default_value_t = 1_000)]
        max_moves: u32,
    },
    /// Search the opening position once per depth limit
    Bench {
        #[arg(long, value_delimiter = ',', default_values_t = [1, 2, 3, 4, 5])]
        depths: Vec<usize>,

        /// Print rows as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Cross-check every value against plain minimax (slow)
        #[arg(long)]
        verify: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => GameConfig::load_from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Play {
            titan,
            pantheon,
            depth,
            max_moves,
        } => {
            let mut config = config;
            if let Some(depth) = depth {
                config.depth_limit = depth;
            }
            tracing::debug!(?config, "starting game");
            let game = Arc::new(TitanGame::new(config));
            let titan = Player::new(titan, &game);
            let pantheon = Player::new(pantheon, &game);
            driver::play_game(&game, &titan, &pantheon, max_moves, &mut input, &mut out)?;
        }
        Command::Bench {
            depths,
            json,
            verify,
        } => {
            driver::run_depth_bench(&config, &depths, json, verify, &mut out)?;
        }
    }
    Ok(())
}
