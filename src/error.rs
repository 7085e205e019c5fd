use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating game settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("grid {width}x{height} is outside the supported range {min}..={max} per edge")]
    InvalidGrid {
        width: u16,
        height: u16,
        min: u16,
        max: u16,
    },
    #[error("speed {ticks_per_second} ticks/s is outside the supported range {min}..={max}")]
    InvalidSpeed {
        ticks_per_second: u32,
        min: u32,
        max: u32,
    },
}

/// Top-level error returned by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
