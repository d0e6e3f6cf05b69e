//! Config Error Types

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Merging or deserializing the configuration sources failed.
    #[display("failed to load configuration")]
    Load,
    /// The configuration loaded but doesn't make sense.
    #[display("invalid configuration: {_0}")]
    Invalid(#[error(not(source))] String),
    /// No home directory to derive default locations from.
    #[display("couldn't determine the configuration directory")]
    NoConfigDir,
}

impl ErrorKind {
    /// Configuration errors need a human to fix them.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
