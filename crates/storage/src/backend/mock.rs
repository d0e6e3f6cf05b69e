//! In-memory storage backend for testing.

use super::EntryStream;
use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;
use crate::{Entry, StorageBackend};
use async_stream::stream;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory storage backend for testing.
///
/// Documents live in a [`BTreeMap`] behind a [`RwLock`], so listings come
/// back sorted by path. Every successful [`write`](StorageBackend::write)
/// is counted, which lets tests assert that unchanged documents are not
/// rewritten.
///
/// # Examples
///
/// ```
/// use resbot_storage::backend::{MockBackend, StorageBackend};
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MockBackend::with_files([("languages.json", r#"["de","en"]"#)]);
/// assert_eq!(backend.read(Path::new("languages.json")).await?, br#"["de","en"]"#);
///
/// backend.write(Path::new("de.json"), b"{}").await?;
/// assert_eq!(backend.write_count(), 1);
/// # Ok(())
/// # }
/// ```
pub struct MockBackend {
    name: String,
    storage: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    writes: AtomicUsize,
}

impl MockBackend {
    /// Create a mock backend pre-populated with documents.
    ///
    /// Panics if any path fails validation: broken test setup should not
    /// produce a passing test.
    pub fn with_files(files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let storage = files
            .into_iter()
            .map(|(path, data)| {
                let path = path.into();
                let Ok(validated) = validate_path(&path) else {
                    panic!("MockBackend::with_files: invalid path {}", path.display());
                };
                (validated, data.into())
            })
            .collect();
        Self {
            name: "mock".to_string(),
            storage: RwLock::new(storage),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Contents of a document as text, for assertions.
    pub async fn text(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = validate_path(path.as_ref()).ok()?;
        let guard = self.storage.read().await;
        guard.get(&path).map(|data| String::from_utf8_lossy(data).into_owned())
    }
}
impl Default for MockBackend {
    fn default() -> Self {
        let files: [(&str, &str); 0] = [];
        Self::with_files(files)
    }
}

#[async_trait]
impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_stream(&self) -> EntryStream<'_> {
        Box::pin(stream! {
            // Snapshot under the read lock; never hold it across a yield.
            let entries: Vec<Entry> = self.storage.read().await.keys().cloned().map(Entry::new).collect();
            for entry in entries {
                yield Ok(entry);
            }
        })
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = validate_path(path)?;
        let guard = self.storage.read().await;
        let data = guard.get(&path).ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(path.clone())))?;
        Ok(data.clone())
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let path = validate_path(path)?;
        self.storage.write().await.insert(path, data.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_read() {
        let backend = MockBackend::default();
        backend.write(Path::new("de.json"), b"{}").await.unwrap();
        assert_eq!(backend.read(Path::new("de.json")).await.unwrap(), b"{}");
        assert_eq!(backend.text("de.json").await.as_deref(), Some("{}"));
        assert_eq!(backend.write_count(), 1);
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let backend = MockBackend::default();
        let err = backend.read(Path::new("de.json")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
        assert!(backend.text("de.json").await.is_none());
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let backend = MockBackend::with_files([
            ("fr.json", "{}"),
            ("archive/de.json", "{}"),
            ("de.json", "{}"),
            ("archived.json", "{}"),
        ]);
        let paths: Vec<_> = backend.list().await.unwrap().into_iter().map(|e| e.path).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("archive/de.json"),
                PathBuf::from("archived.json"),
                PathBuf::from("de.json"),
                PathBuf::from("fr.json"),
            ]
        );
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let backend = MockBackend::default();
        assert_eq!(backend.name(), "mock");
        assert!(backend.read(Path::new("../etc/passwd")).await.is_err());
        assert!(backend.write(Path::new("../escape"), b"bad").await.is_err());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    #[should_panic(expected = "invalid path")]
    fn test_with_files_panics_on_bad_path() {
        MockBackend::with_files([("../escape", "bad")]);
    }
}
