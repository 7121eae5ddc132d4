//! Cloud Terminal Simulator entry point.
//!
//! Reads one command per line from stdin and prints each result. Logging
//! goes to stderr; set `RUST_LOG=debug` to trace dispatch.

mod shell;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use cloudsim_terminal::Session;
use cloudsim_types::config::SimConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Resolve config from CLI arg or CLOUDSIM_CONFIG env var, else defaults.
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CLOUDSIM_CONFIG").ok())
    {
        Some(path) => SimConfig::load(Path::new(&path))
            .with_context(|| format!("loading config from {path}"))?,
        None => SimConfig::default(),
    };
    log::info!(
        "Starting Cloud Terminal Simulator as {}@{}",
        config.user,
        config.hostname
    );

    let mut session = Session::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    shell::run(&mut session, stdin.lock(), stdout.lock())?;

    log::info!("Session ended after {} entries", session.log().len());
    Ok(())
}
