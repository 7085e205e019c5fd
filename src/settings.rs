use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_TICKS_PER_SECOND, GridSize, MAX_GRID_EDGE,
    MAX_TICKS_PER_SECOND, MIN_GRID_EDGE, MIN_TICKS_PER_SECOND, Palette,
};
use crate::error::SettingsError;

const APP_DIR_NAME: &str = "snake";
const SETTINGS_FILE_NAME: &str = "settings.json";
const LOG_FILE_NAME: &str = "snake.log";

/// User-tunable session settings, loaded from JSON.
///
/// Every field is optional in the file; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid_width: u16,
    pub grid_height: u16,
    pub ticks_per_second: u32,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            seed: None,
            palette: Palette::default(),
        }
    }
}

/// Values given on the command line; each one wins over the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub grid_width: Option<u16>,
    pub grid_height: Option<u16>,
    pub ticks_per_second: Option<u32>,
    pub seed: Option<u64>,
}

impl Settings {
    /// Reads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves settings for a session.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise.
    pub fn resolve(explicit: Option<&Path>, overrides: Overrides) -> Result<Self, SettingsError> {
        let base = match explicit {
            Some(path) => Self::load(path)?,
            None => match default_settings_path() {
                Some(path) => load_if_present(&path)?,
                None => Self::default(),
            },
        };

        let settings = base.with_overrides(overrides);
        settings.validate()?;
        Ok(settings)
    }

    fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Applies command-line values on top of these settings.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(width) = overrides.grid_width {
            self.grid_width = width;
        }
        if let Some(height) = overrides.grid_height {
            self.grid_height = height;
        }
        if let Some(speed) = overrides.ticks_per_second {
            self.ticks_per_second = speed;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self
    }

    /// Rejects grids and speeds outside the supported ranges.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let edge_ok = |edge: u16| (MIN_GRID_EDGE..=MAX_GRID_EDGE).contains(&edge);
        if !edge_ok(self.grid_width) || !edge_ok(self.grid_height) {
            return Err(SettingsError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
                min: MIN_GRID_EDGE,
                max: MAX_GRID_EDGE,
            });
        }

        if !(MIN_TICKS_PER_SECOND..=MAX_TICKS_PER_SECOND).contains(&self.ticks_per_second) {
            return Err(SettingsError::InvalidSpeed {
                ticks_per_second: self.ticks_per_second,
                min: MIN_TICKS_PER_SECOND,
                max: MAX_TICKS_PER_SECOND,
            });
        }

        Ok(())
    }

    /// Returns the playfield size.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize {
            width: self.grid_width,
            height: self.grid_height,
        }
    }
}

fn load_if_present(path: &Path) -> Result<Settings, SettingsError> {
    match Settings::load(path) {
        Err(SettingsError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(Settings::default())
        }
        other => other,
    }
}

/// Returns the platform-correct settings file path, if a config dir exists.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    Some(base)
}

/// Returns the platform-correct log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}
