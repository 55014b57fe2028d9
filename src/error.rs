use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures the terminal host can run into.
///
/// The game engine itself has no error path; everything here comes from
/// the surrounding I/O.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read settings file {}: {source}", path.display())]
    SettingsRead { path: PathBuf, source: io::Error },

    #[error("failed to parse settings file {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
