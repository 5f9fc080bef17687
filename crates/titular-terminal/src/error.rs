//! Error types for the terminal front end.

use thiserror::Error;

/// Errors from the terminal headline app.
#[derive(Debug, Error)]
pub enum TermError {
    /// Terminal I/O failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed.
    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    /// Stdout is not a terminal.
    #[error("terminal not available")]
    TerminalNotAvailable,
}
