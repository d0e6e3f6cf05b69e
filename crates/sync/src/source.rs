//! Collaborators the bot queries while gathering.
//!
//! The wiki client and the PDF metadata checker live outside this crate.
//! Implementations raise [`ErrorKind::Source`](crate::error::ErrorKind::Source)
//! for failed queries and return `None` for anything that simply doesn't
//! exist (an untranslated title, a missing file).

use std::collections::BTreeMap;

use async_trait::async_trait;
use resbot_model::{FileInfo, PdfMetadataSummary, TranslationProgress, WorksheetInfo};
use time::OffsetDateTime;

use crate::error::Result;

/// An uploaded file as the wiki reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Download URL, possibly percent-encoded
    pub url: String,
    /// Upload time of the latest revision
    pub timestamp: OffsetDateTime,
}
impl RemoteFile {
    pub fn new(url: impl Into<String>, timestamp: OffsetDateTime) -> Self {
        Self { url: url.into(), timestamp }
    }
}

/// Read access to the translation wiki.
#[async_trait]
pub trait WikiSource: Send + Sync {
    /// English names of all worksheets.
    async fn worksheet_list(&self) -> Result<Vec<String>>;

    /// Progress of every translation of a worksheet, including unfinished
    /// ones and the English original itself, keyed by language code.
    async fn page_translations(&self, page: &str) -> Result<BTreeMap<String, TranslationProgress>>;

    /// Translated title, or `None` if it isn't translated.
    async fn translated_title(&self, page: &str, language_code: &str) -> Result<Option<String>>;

    /// Wikitext of the English original.
    async fn page_source(&self, page: &str) -> Result<Option<String>>;

    /// Content of one translation unit.
    async fn translated_unit(&self, page: &str, language_code: &str, unit: u32) -> Result<Option<String>>;

    /// English name of a language ("German" for `de`).
    async fn language_name(&self, language_code: &str) -> Result<Option<String>>;

    /// Latest revision of an uploaded file.
    async fn remote_file(&self, file_name: &str) -> Result<Option<RemoteFile>>;
}

/// Inspects the metadata of a published PDF.
#[async_trait]
pub trait MetadataAnalyzer: Send + Sync {
    /// Returns `None` if the file couldn't be analyzed at all.
    async fn analyze(&self, file: &FileInfo, worksheet: &WorksheetInfo) -> Result<Option<PdfMetadataSummary>>;
}
