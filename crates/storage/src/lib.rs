//! Storage for snapshot documents.
//!
//! Snapshots are small text documents addressed by relative keys such as
//! `de.json`. A [`StorageBackend`] is the only thing the bot knows about
//! where they live: a directory on disk ([`LocalBackend`]), memory
//! (`MockBackend`, behind the `mock` feature) or either of those wrapped in a
//! [`ReadOnlyBackend`] for dry runs.
//!
//! [`LocalBackend`]: crate::backend::LocalBackend
//! [`ReadOnlyBackend`]: crate::backend::ReadOnlyBackend

pub mod backend;
pub mod error;
mod models;
mod path;

pub use crate::backend::StorageBackend;
pub use crate::models::Entry;
pub use crate::path::validate as validate_path;
use std::sync::Arc;

pub type BackendHandle = Arc<dyn StorageBackend + Send + Sync>;
