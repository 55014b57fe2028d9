use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;
use crate::snake::Position;

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Side length of the default square grid.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Largest accepted grid side length.
pub const MAX_GRID_SIZE: u16 = 100;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Accepted tick interval range in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;
pub const MAX_TICK_INTERVAL_MS: u64 = 2000;

/// Cell the snake starts on when the grid is large enough to hold it.
pub const START_POSITION: Position = Position { x: 5, y: 5 };

/// Glyph drawn for one occupied grid cell.
///
/// Two columns wide so that cells look roughly square in a terminal.
pub const CELL_GLYPH: &str = "██";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns an `n` by `n` grid.
    #[must_use]
    pub fn square(n: u16) -> Self {
        Self {
            width: n,
            height: n,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_SIZE)
    }
}

/// Host settings, resolved from defaults, the settings file and CLI flags.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid_size: u16,
    pub tick_interval_ms: u64,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

/// Command-line overrides; `None` keeps the value from the lower layer.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SettingsOverrides {
    pub grid_size: Option<u16>,
    pub tick_interval_ms: Option<u64>,
    pub seed: Option<u64>,
}

impl Settings {
    /// Returns the grid these settings describe.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        GridSize::square(self.grid_size)
    }

    /// Applies CLI overrides on top of `self`.
    #[must_use]
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(grid_size) = overrides.grid_size {
            self.grid_size = grid_size;
        }
        if let Some(tick_interval_ms) = overrides.tick_interval_ms {
            self.tick_interval_ms = tick_interval_ms;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self
    }

    /// Checks that the settings describe a playable game.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(AppError::InvalidSettings(format!(
                "grid size must be between 1 and {MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }

        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(AppError::InvalidSettings(format!(
                "tick interval must be between {MIN_TICK_INTERVAL_MS} and \
                 {MAX_TICK_INTERVAL_MS} ms, got {}",
                self.tick_interval_ms
            )));
        }

        Ok(())
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from `path`.
///
/// Returns the defaults when the file does not exist. Returns `Err` when the
/// file exists but cannot be read or parsed.
pub fn load_settings(path: &Path) -> Result<Settings, AppError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(AppError::SettingsRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| AppError::SettingsParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{
        DEFAULT_GRID_SIZE, DEFAULT_TICK_INTERVAL_MS, GridSize, Settings, SettingsOverrides,
        load_settings,
    };
    use crate::error::AppError;

    #[test]
    fn defaults_describe_the_classic_board() {
        let settings = Settings::default();

        assert_eq!(settings.bounds(), GridSize::square(20));
        assert_eq!(settings.tick_interval_ms, 150);
        assert_eq!(settings.bounds().total_cells(), 400);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn missing_settings_file_returns_defaults() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("settings.json");

        let settings = load_settings(&path).expect("missing file should return defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_settings_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "grid_size": 12 }"#).expect("test file write should succeed");

        let settings = load_settings(&path).expect("partial file should parse");

        assert_eq!(settings.grid_size, 12);
        assert_eq!(settings.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn malformed_settings_file_returns_error() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("settings.json");
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(matches!(
            load_settings(&path),
            Err(AppError::SettingsParse { .. })
        ));
    }

    #[test]
    fn overrides_take_precedence() {
        let settings = Settings {
            seed: Some(1),
            ..Settings::default()
        }
        .with_overrides(SettingsOverrides {
            grid_size: Some(30),
            tick_interval_ms: None,
            seed: Some(9),
        });

        assert_eq!(settings.grid_size, 30);
        assert_eq!(settings.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(settings.seed, Some(9));
    }

    #[test]
    fn out_of_range_settings_are_rejected() {
        let zero_grid = Settings {
            grid_size: 0,
            ..Settings::default()
        };
        let fast_tick = Settings {
            tick_interval_ms: 1,
            ..Settings::default()
        };
        let huge_grid = Settings {
            grid_size: DEFAULT_GRID_SIZE * 10,
            ..Settings::default()
        };

        assert!(matches!(
            zero_grid.validate(),
            Err(AppError::InvalidSettings(_))
        ));
        assert!(matches!(
            fast_tick.validate(),
            Err(AppError::InvalidSettings(_))
        ));
        assert!(matches!(
            huge_grid.validate(),
            Err(AppError::InvalidSettings(_))
        ));
    }
}
