//! `frogbox`: headless runner.
//!
//! Usage: `frogbox [LEVEL_JSON]`. Reads JSON-lines player commands from stdin
//! and writes session events as JSON lines to stdout. Logs go to stderr,
//! filtered by `RUST_LOG` (default `info`). `FROGBOX_SEED` overrides the RNG seed.

use std::io::{self, BufRead};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use frogbox_app::error::AppError;
use frogbox_app::game_loop::JsonLinesSink;
use frogbox_app::ipc;
use frogbox_app::state::RunnerState;
use frogbox_core::config::LevelConfig;
use frogbox_sim::engine::SimConfig;

const SEED_ENV_VAR: &str = "FROGBOX_SEED";

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "frogbox failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let level = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading level");
            LevelConfig::from_json(&std::fs::read_to_string(&path)?)?
        }
        None => LevelConfig::default(),
    };
    level.validate()?;

    let mut config = SimConfig::with_level(level);
    if let Some(seed) = seed_from_env() {
        config.seed = seed;
    }

    let state = RunnerState::new();
    ipc::start_simulation(&state, config, Box::new(JsonLinesSink::new(io::stdout())))?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match ipc::parse_command(&line) {
            Ok(Some(command)) => ipc::send_command(&state, command)?,
            Ok(None) => {}
            Err(err) => warn!(%err, "skipping input line"),
        }
    }

    ipc::stop_simulation(&state)
}

fn seed_from_env() -> Option<u64> {
    let raw = std::env::var(SEED_ENV_VAR).ok()?;
    match raw.trim().parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            warn!(value = %raw, var = SEED_ENV_VAR, "ignoring unparsable seed");
            None
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
