//! Resource-state data model for the translated worksheet catalog.
//!
//! One [`LanguageInfo`] is a *snapshot*: every worksheet available in that
//! language, with its translation progress, version string and downloadable
//! artifacts ([`FileInfo`]). Each run builds fresh snapshots, compares them to
//! the ones persisted by the previous run ([`LanguageInfo::compare`]) and
//! stores them again through the [`codec`].
//!
//! This crate is synchronous and free of I/O; fetching and persistence live
//! in `resbot-sync` and `resbot-storage`.

pub mod codec;
mod compare;
pub mod error;
pub mod models;
pub mod numerals;
mod timestamp;

pub use crate::models::{
    ChangeItem, ChangeLog, ChangeType, FileInfo, FileType, LanguageInfo, PdfMetadataSummary, TranslationProgress,
    WorksheetInfo,
};
pub use crate::timestamp::{format as format_timestamp, parse as parse_timestamp};

/// Language code of the reference language every translation is measured against.
pub const REFERENCE_LANGUAGE: &str = "en";
