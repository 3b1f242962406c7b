use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest board side accepted from a config file or the command line
pub const MAX_GRID_SIZE: usize = 200;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square game grid, in cells
    pub grid_size: usize,
    /// Terminal columns used to draw one cell
    pub cell_width: u16,
    /// Milliseconds between simulation ticks
    pub tick_ms: u64,
    /// Random samples the food placer tries before scanning the board
    pub max_food_attempts: usize,
    /// Optional file holding the glyph used to draw food
    pub food_sprite: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_width: 2,
            tick_ms: 120,
            max_food_attempts: 500,
            food_sprite: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file, filling missing fields with defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Reject configurations the game cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.grid_size > 0, "grid_size must be positive");
        ensure!(
            self.grid_size <= MAX_GRID_SIZE,
            "grid_size must be at most {}, got {}",
            MAX_GRID_SIZE,
            self.grid_size
        );
        ensure!(
            (1..=4).contains(&self.cell_width),
            "cell_width must be between 1 and 4, got {}",
            self.cell_width
        );
        ensure!(self.tick_ms > 0, "tick_ms must be positive");
        ensure!(
            self.max_food_attempts > 0,
            "max_food_attempts must be positive"
        );
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(120));
        assert_eq!(config.max_food_attempts, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.cell_width, 2);
    }

    #[test]
    fn test_validation_rejects_degenerate_values() {
        assert!(GameConfig::new(0).validate().is_err());
        assert!(GameConfig::new(MAX_GRID_SIZE + 1).validate().is_err());

        let mut config = GameConfig::default();
        config.tick_ms = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.cell_width = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.max_food_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 12, "tick_ms": 80 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.tick_ms, 80);
        assert_eq!(config.cell_width, 2);
        assert_eq!(config.food_sprite, None);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GameConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
