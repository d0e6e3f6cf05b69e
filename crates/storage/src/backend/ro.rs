//! Read-only storage backend.
//!
//! Wraps another backend for dry runs: everything is read from the real
//! backend, nothing is ever written back.

use async_trait::async_trait;
use std::path::Path;

use crate::{BackendHandle, StorageBackend, backend::EntryStream, error::Result};

/// Read-only storage backend.
///
/// Silently drops writes, logging an
/// [`info event`](tracing::Event) for each, and reports success.
#[derive(Clone)]
pub struct ReadOnlyBackend {
    inner: BackendHandle,
}
impl ReadOnlyBackend {
    pub fn new(inner: BackendHandle) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StorageBackend for ReadOnlyBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn list_stream(&self) -> EntryStream<'_> {
        self.inner.list_stream()
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.inner.read(path).await
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        tracing::info!(backend = self.name(), path = %path.display(), bytes = data.len(), "Skipping write during read-only mode");
        Ok(())
    }
}
