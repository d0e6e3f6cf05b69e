//! Keeps the stored language snapshots in step with the wiki.
//!
//! A run gathers a fresh [`LanguageInfo`](resbot_model::LanguageInfo) per
//! language (or reads them back from storage in cache mode), compares each
//! against the stored snapshot with [`sync_and_compare`], stores what
//! changed and hands everything to the post-processors.

pub mod bot;
pub mod error;
pub mod gather;
pub mod post;
pub mod snapshot;
pub mod source;
mod sync;

pub use crate::bot::{ResourcesBot, Rewrite, RunOutcome};
pub use crate::gather::Gatherer;
pub use crate::post::{CatalogSummary, ChangeReporter, GlobalPostProcessor, LanguagePostProcessor};
pub use crate::snapshot::SnapshotStore;
pub use crate::source::{MetadataAnalyzer, RemoteFile, WikiSource};
pub use crate::sync::sync_and_compare;
