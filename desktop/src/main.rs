//! Single process entry point: one CPU-versus-CPU match, logged to stderr.
//! `RUST_LOG` controls verbosity.

mod app;
mod sinks;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use game_core::{Config, Game, GameRng};

use crate::app::App;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let game = Game::new(Config::new(), GameRng::from_entropy())?;

    // Handle Ctrl+C gracefully: finish the frame, then stop sensor workers
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::Release))?;

    App::new(game, running).run();
    Ok(())
}
