//! Sync Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Failures in the storage and model crates are kept as
//! child frames.

use derive_more::{Display, Error};

/// A sync error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a sync failure.
///
/// ### Dependency Errors
/// - [`ErrorKind::Storage`]
/// - [`ErrorKind::Source`]
///
/// ### Data Errors
/// - [`ErrorKind::Snapshot`] - stored snapshot is unusable; outside of cache
///   mode callers rebuild it instead of failing.
/// - [`ErrorKind::Cache`]
/// - [`ErrorKind::MissingReference`]
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A storage backend operation failed.
    Storage,
    /// The wiki collaborator failed to answer a query.
    Source,
    /// The snapshot of a language could not be encoded or decoded.
    #[display("unusable snapshot for language '{_0}'")]
    Snapshot(#[error(not(source))] String),
    /// Cache mode needs a stored snapshot that isn't there.
    #[display("couldn't load language '{_0}' from cache")]
    Cache(#[error(not(source))] String),
    /// There's no English snapshot to compare translations against.
    #[display("no snapshot for the reference language")]
    MissingReference,
    /// A post-processor gave up.
    #[display("post-processor '{_0}' failed")]
    PostProcessor(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage | Self::Source)
    }
}
