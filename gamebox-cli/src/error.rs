//! CLI error type.

use std::fmt;

use gamebox::GameboxError;

/// Errors surfaced to the command line.
#[derive(Debug)]
pub enum CliError {
    /// A gamebox operation failed.
    Gamebox(GameboxError),

    /// Invalid arguments beyond what clap can check.
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Gamebox(e) => write!(f, "{}", e),
            CliError::Usage(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Gamebox(e) => Some(e),
            CliError::Usage(_) => None,
        }
    }
}

impl From<GameboxError> for CliError {
    fn from(e: GameboxError) -> Self {
        CliError::Gamebox(e)
    }
}
