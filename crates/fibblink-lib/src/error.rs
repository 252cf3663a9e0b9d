//! Unified error type for the fibblink-lib crate.
//!
//! [`FibblinkError`] covers failures while loading the defaults file. LED
//! writes keep their own [`LedError`](crate::led::LedError) since the
//! sequence reacts to them directly.

use std::fmt;

/// Unified error type for fibblink-lib operations.
#[derive(Debug)]
pub enum FibblinkError {
    /// Standard I/O error (config file read).
    Io(std::io::Error),
    /// Configuration error.
    Config(String),
}

impl fmt::Display for FibblinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FibblinkError::Io(e) => write!(f, "I/O error: {e}"),
            FibblinkError::Config(e) => write!(f, "Config error: {e}"),
        }
    }
}

impl std::error::Error for FibblinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FibblinkError::Io(e) => Some(e),
            FibblinkError::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for FibblinkError {
    fn from(e: std::io::Error) -> Self {
        FibblinkError::Io(e)
    }
}

/// Crate-level Result alias using [`FibblinkError`].
pub type Result<T> = std::result::Result<T, FibblinkError>;
