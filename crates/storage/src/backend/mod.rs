//! Storage backend trait and implementations.

mod local;
#[cfg(feature = "mock")]
mod mock;
mod ro;

pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
pub use self::ro::ReadOnlyBackend;
use crate::Entry;
use crate::error::Result;
use async_trait::async_trait;
use futures::{Stream, TryStreamExt};
use std::path::Path;
use std::pin::Pin;

/// Stream of listed documents, see [`StorageBackend::list_stream`].
pub type EntryStream<'a> = Pin<Box<dyn Stream<Item = Result<Entry>> + Send + 'a>>;

/// Unified interface for storage backends.
///
/// All paths are keys relative to the storage root and are validated with
/// [`validate_path`](crate::validate_path) by every implementation.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use resbot_storage::{backend::StorageBackend, error::Result};
///
/// async fn snapshot_text(backend: &dyn StorageBackend, language_code: &str) -> Result<Option<String>> {
///     let key = format!("{language_code}.json");
///     match backend.read(Path::new(&key)).await {
///         Ok(data) => Ok(String::from_utf8(data).ok()),
///         Err(err) if err.is_not_found() => Ok(None),
///         Err(err) => Err(err),
///     }
/// }
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Name of the backend, for logging only.
    fn name(&self) -> &str;

    /// List every stored document.
    ///
    /// Collects [`list_stream()`](Self::list_stream) into a [`Vec`].
    async fn list(&self) -> Result<Vec<Entry>> {
        self.list_stream().try_collect().await
    }

    /// Stream every stored document, including those in subdirectories.
    ///
    /// # Examples
    ///
    /// ```
    /// use futures::TryStreamExt;
    /// # use resbot_storage::{backend::StorageBackend, error::Result};
    /// # async fn example(backend: &dyn StorageBackend) -> Result<()> {
    /// let mut stream = backend.list_stream();
    /// while let Some(entry) = stream.try_next().await? {
    ///     println!("{}", entry.path.display());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn list_stream(&self) -> EntryStream<'_>;

    /// Read a whole document.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the
    /// document does not exist.
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Create or replace a document.
    ///
    /// Readers never observe a partially written document. Parent
    /// directories are created as needed.
    async fn write(&self, path: &Path, data: &[u8]) -> Result<()>;
}
