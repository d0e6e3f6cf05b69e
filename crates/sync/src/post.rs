//! Post-processors run after every language has been synced.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use exn::ResultExt;
use resbot_model::{ChangeLog, LanguageInfo};
use serde::Serialize;

use crate::error::{ErrorKind, Result};
use crate::snapshot::{SUMMARY_KEY, SnapshotStore};

/// Works on one language at a time.
#[async_trait]
pub trait LanguagePostProcessor: Send + Sync {
    fn name(&self) -> &'static str;

    /// `changes` is empty when running from cache.
    async fn run(&self, language: &LanguageInfo, english: &LanguageInfo, changes: &ChangeLog) -> Result<()>;
}

/// Works on all languages at once. Only runs when the bot isn't limited to
/// a single language.
#[async_trait]
pub trait GlobalPostProcessor: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(
        &self,
        languages: &BTreeMap<String, LanguageInfo>,
        changes: &BTreeMap<String, ChangeLog>,
    ) -> Result<()>;
}

/// Logs what changed in a language and what's still missing.
#[derive(Debug, Default)]
pub struct ChangeReporter;

#[async_trait]
impl LanguagePostProcessor for ChangeReporter {
    fn name(&self) -> &'static str {
        "change-reporter"
    }

    async fn run(&self, language: &LanguageInfo, english: &LanguageInfo, changes: &ChangeLog) -> Result<()> {
        let code = language.language_code();
        for change in changes {
            tracing::info!(language = code, worksheet = %change.worksheet, "{}", change.change_type);
        }
        if code == english.language_code() {
            return Ok(());
        }

        let missing = language.worksheets_with_missing_pdf();
        if !missing.is_empty() {
            tracing::info!(language = code, "Worksheets without PDF: {}", missing.join(", "));
        }
        for worksheet in language.worksheets() {
            let Some(original) = english.worksheet(worksheet.page()) else {
                tracing::warn!(language = code, worksheet = worksheet.page(), "No English original");
                continue;
            };
            if !worksheet.has_same_version(original, false) {
                tracing::info!(
                    language = code,
                    worksheet = worksheet.page(),
                    "Outdated: version {} (English: {})",
                    worksheet.version(),
                    original.version()
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct Summary<'a> {
    number_of_languages: usize,
    languages: BTreeMap<&'a str, LanguageSummary<'a>>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct LanguageSummary<'a> {
    english_name: &'a str,
    worksheets: usize,
    finished: usize,
}

/// Counts languages and finished translations and stores the numbers as
/// `summary.json`.
///
/// Language variants (any code containing a `-`, like `pt-br`) are listed
/// but not counted as languages of their own.
pub struct CatalogSummary {
    store: SnapshotStore,
    force_rewrite: bool,
}

impl CatalogSummary {
    pub fn new(store: SnapshotStore, force_rewrite: bool) -> Self {
        Self { store, force_rewrite }
    }

    pub fn number_of_languages<'a>(codes: impl IntoIterator<Item = &'a str>) -> usize {
        codes
            .into_iter()
            .filter(|code| {
                let variant = code.contains('-');
                if variant {
                    tracing::debug!("Not counting {code} into the number of languages we have");
                }
                !variant
            })
            .count()
    }
}

#[async_trait]
impl GlobalPostProcessor for CatalogSummary {
    fn name(&self) -> &'static str {
        "catalog-summary"
    }

    async fn run(
        &self,
        languages: &BTreeMap<String, LanguageInfo>,
        _changes: &BTreeMap<String, ChangeLog>,
    ) -> Result<()> {
        let summary = Summary {
            number_of_languages: Self::number_of_languages(languages.keys().map(String::as_str)),
            languages: languages
                .iter()
                .map(|(code, language)| {
                    let entry = LanguageSummary {
                        english_name: language.english_name(),
                        worksheets: language.worksheets().len(),
                        finished: language.count_finished_translations(),
                    };
                    tracing::info!(language = %code, "Finished translations: {}", entry.finished);
                    (code.as_str(), entry)
                })
                .collect(),
        };
        tracing::info!("Number of languages: {}", summary.number_of_languages);

        let text = serde_json::to_string(&summary).or_raise(|| ErrorKind::PostProcessor(self.name()))?;
        let key = Path::new(SUMMARY_KEY);
        if !self.force_rewrite && self.store.read_raw(key).await?.as_deref() == Some(text.as_str()) {
            return Ok(());
        }
        self.store.write_raw(key, &text).await?;
        tracing::info!(key = SUMMARY_KEY, "Updated catalog summary");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resbot_model::{ChangeType, FileInfo, FileType, TranslationProgress, WorksheetInfo};
    use resbot_storage::backend::MockBackend;
    use rstest::rstest;
    use std::sync::Arc;
    use time::OffsetDateTime;

    fn language(code: &str, name: &str, pdfs: &[bool]) -> LanguageInfo {
        let mut language = LanguageInfo::new(code, name);
        for (index, has_pdf) in pdfs.iter().enumerate() {
            let progress = TranslationProgress::new(10, 0, 10);
            let mut worksheet = WorksheetInfo::new(format!("Sheet {index}"), code, "Title", progress, "1.0");
            if *has_pdf {
                worksheet.add_file_info(FileInfo::new(FileType::Pdf, "https://example.net/a.pdf", OffsetDateTime::UNIX_EPOCH));
            }
            language.add_worksheet_info(worksheet);
        }
        language
    }

    fn catalog() -> BTreeMap<String, LanguageInfo> {
        [
            language("en", "English", &[true, true]),
            language("de", "German", &[true, false]),
            language("pt-br", "Brazilian Portuguese", &[true]),
        ]
        .into_iter()
        .map(|language| (language.language_code().to_string(), language))
        .collect()
    }

    #[rstest]
    #[case(&["en", "de", "ru"], 3)]
    #[case(&["en", "pt", "pt-br", "zh-hans"], 2)]
    #[case(&[], 0)]
    fn test_number_of_languages(#[case] codes: &[&str], #[case] expected: usize) {
        assert_eq!(CatalogSummary::number_of_languages(codes.iter().copied()), expected);
    }

    #[tokio::test]
    async fn test_summary_written_once() {
        let backend = Arc::new(MockBackend::with_files(Vec::<(&str, &str)>::new()));
        let summary = CatalogSummary::new(SnapshotStore::new(backend.clone()), false);
        summary.run(&catalog(), &BTreeMap::new()).await.unwrap();
        summary.run(&catalog(), &BTreeMap::new()).await.unwrap();
        assert_eq!(backend.write_count(), 1);

        let text = backend.text(SUMMARY_KEY).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["number_of_languages"], 2);
        assert_eq!(value["languages"]["de"]["finished"], 1);
        assert_eq!(value["languages"]["de"]["worksheets"], 2);
        assert_eq!(value["languages"]["pt-br"]["english_name"], "Brazilian Portuguese");
    }

    #[tokio::test]
    async fn test_summary_forced_rewrite() {
        let backend = Arc::new(MockBackend::with_files(Vec::<(&str, &str)>::new()));
        let summary = CatalogSummary::new(SnapshotStore::new(backend.clone()), true);
        summary.run(&catalog(), &BTreeMap::new()).await.unwrap();
        summary.run(&catalog(), &BTreeMap::new()).await.unwrap();
        assert_eq!(backend.write_count(), 2);
    }

    #[tokio::test]
    async fn test_change_reporter_accepts_any_language() {
        let catalog = catalog();
        let mut changes = ChangeLog::new();
        changes.add_change("Sheet 1", ChangeType::NewWorksheet);
        for language in catalog.values() {
            ChangeReporter.run(language, &catalog["en"], &changes).await.unwrap();
        }
    }
}
