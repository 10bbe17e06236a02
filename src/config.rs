use std::{fs, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Parser, Debug)]
#[command(name = "snake", about = "Snake on a grid, in your terminal")]
pub struct Args {
    /// YAML file with game settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Milliseconds between game updates
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Size of one grid cell in surface pixels
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Play field width in surface pixels (defaults to the terminal)
    #[arg(long)]
    pub width: Option<u32>,

    /// Play field height in surface pixels (defaults to the terminal)
    #[arg(long)]
    pub height: Option<u32>,

    /// Shortest mouse drag, in grid cells, that counts as a swipe
    #[arg(long)]
    pub swipe_threshold: Option<u32>,

    /// Seed for food placement
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub tick_ms: u64,
    pub cell_size: u32,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub swipe_threshold: u32,
    pub seed: Option<u64>,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick_ms: 150,
            cell_size: 1,
            width: None,
            height: None,
            swipe_threshold: 1,
            seed: None,
            log_file: PathBuf::from("snake.log"),
            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// File settings (if any) with command line flags on top.
    pub fn load(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_yaml(&content)?
            }
            None => GameConfig::default(),
        };

        config.apply_args(args);
        config.validate().map_err(|e| anyhow!("Config validation error: {}", e))?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml_ng::from_str(content).context("Failed to deserialize config")
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(tick_ms) = args.tick_ms {
            self.tick_ms = tick_ms;
        }
        if let Some(cell_size) = args.cell_size {
            self.cell_size = cell_size;
        }
        if args.width.is_some() {
            self.width = args.width;
        }
        if args.height.is_some() {
            self.height = args.height;
        }
        if let Some(swipe_threshold) = args.swipe_threshold {
            self.swipe_threshold = swipe_threshold;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if let Some(log_file) = &args.log_file {
            self.log_file = log_file.clone();
        }
        if let Some(log_level) = &args.log_level {
            self.log_level = log_level.clone();
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    /// Grid over the configured size, falling back to `surface` for unset
    /// dimensions. An empty grid, or one that does not fit on the surface,
    /// is a setup error.
    pub fn grid(&self, surface: (u32, u32)) -> Result<Grid, String> {
        let width = self.width.unwrap_or(surface.0);
        let height = self.height.unwrap_or(surface.1);

        if width > surface.0 || height > surface.1 {
            return Err(format!(
                "a {}x{} play field does not fit the {}x{} screen",
                width, height, surface.0, surface.1
            ));
        }

        let grid = Grid::from_pixels(width, height, self.cell_size);

        if grid.is_empty() {
            return Err(format!(
                "a {}x{} play field holds no {}px cells",
                width, height, self.cell_size
            ));
        }

        Ok(grid)
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.tick_ms == 0 {
            return Err("tick_ms must be positive".to_string());
        }
        if self.cell_size == 0 {
            return Err("cell_size must be positive".to_string());
        }
        if self.width == Some(0) || self.height == Some(0) {
            return Err("width and height must be positive".to_string());
        }
        if LevelFilter::from_str(&self.log_level).is_err() {
            return Err(format!("unknown log level '{}'", self.log_level));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick(), Duration::from_millis(150));
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GameConfig::from_yaml("tick_ms: 90\nseed: 3\n").unwrap();
        assert_eq!(config.tick_ms, 90);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.cell_size, 1);
        assert_eq!(config.log_file, PathBuf::from("snake.log"));
    }

    #[test]
    fn test_bad_yaml_is_an_error() {
        assert!(GameConfig::from_yaml("tick_ms: [fast]").is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let mut config = GameConfig::from_yaml("tick_ms: 90\ncell_size: 2\n").unwrap();
        let args = Args::try_parse_from(["snake", "--tick-ms", "200", "--width", "30"]).unwrap();
        config.apply_args(&args);

        assert_eq!(config.tick_ms, 200);
        assert_eq!(config.cell_size, 2);
        assert_eq!(config.width, Some(30));
        assert_eq!(config.height, None);
    }

    #[test]
    fn test_rejects_degenerate_values() {
        let zero_tick = GameConfig { tick_ms: 0, ..GameConfig::default() };
        let zero_cell = GameConfig { cell_size: 0, ..GameConfig::default() };
        let zero_width = GameConfig { width: Some(0), ..GameConfig::default() };
        let bad_level = GameConfig { log_level: "loud".to_string(), ..GameConfig::default() };

        assert!(zero_tick.validate().is_err());
        assert!(zero_cell.validate().is_err());
        assert!(zero_width.validate().is_err());
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_grid_uses_surface_for_missing_dimensions() {
        let config = GameConfig { height: Some(10), cell_size: 2, ..GameConfig::default() };
        let grid = config.grid((40, 23)).unwrap();
        assert_eq!((grid.cols(), grid.rows()), (20, 5));
    }

    #[test]
    fn test_grid_rejects_too_small_field() {
        let config = GameConfig { cell_size: 20, ..GameConfig::default() };
        assert!(config.grid((10, 10)).is_err());
    }

    #[test]
    fn test_grid_rejects_field_larger_than_surface() {
        let too_big = GameConfig { width: Some(100), height: Some(100), ..GameConfig::default() };
        let too_wide = GameConfig { width: Some(41), ..GameConfig::default() };
        let too_tall = GameConfig { height: Some(21), ..GameConfig::default() };
        let exact = GameConfig { width: Some(40), height: Some(20), ..GameConfig::default() };

        assert!(too_big.grid((40, 20)).is_err());
        assert!(too_wide.grid((40, 20)).is_err());
        assert!(too_tall.grid((40, 20)).is_err());
        assert_eq!(exact.grid((40, 20)).map(|g| (g.cols(), g.rows())), Ok((40, 20)));
    }

    #[test]
    fn test_swipe_threshold_flag() {
        let mut config = GameConfig::default();
        let args = Args::try_parse_from(["snake", "--swipe-threshold", "3"]).unwrap();
        config.apply_args(&args);
        assert_eq!(config.swipe_threshold, 3);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let args = Args::try_parse_from(["snake", "--seed", "9"]).unwrap();
        let config = GameConfig::load(&args).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.tick_ms, 150);
    }
}
