mod clock;
mod config;
mod food;
mod game;
mod grid;
mod input;
mod render;
mod session;
mod snake;
mod state;
mod term;

use std::fs::File;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use simplelog::{Config, WriteLogger};

use config::{Args, GameConfig};
use food::RandomFood;
use render::Surface;
use session::Session;
use term::TermManager;

/// Grid coordinates. Signed, since a head can step off the field.
pub type Cell = (i32, i32);
pub type TermCoords = (u16, u16);

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig::load(&args)?;

    let log_file = File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file {}", config.log_file.display()))?;
    WriteLogger::init(config.level_filter(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let term = TermManager::new().context("Error reading terminal size")?;
    let grid = config.grid(term.size()).map_err(|e| anyhow!("Unusable play field: {}", e))?;
    info!("Starting with {:?} on a {}x{} grid", config, grid.cols(), grid.rows());

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = Session::new(grid, RandomFood::new(rng), config.tick());
    let mut game = game::SnakeGame::new(term, session, config.swipe_threshold);

    game.term_mut().setup().context("Error setting up terminal")?;
    let result = game.run();
    // The terminal goes back to normal whether the game ended cleanly or not
    game.term_mut().restore().context("Error restoring terminal")?;

    result
}
