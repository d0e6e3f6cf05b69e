//! Building fresh language snapshots from the wiki.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use resbot_model::{FileInfo, FileType, LanguageInfo, REFERENCE_LANGUAGE, TranslationProgress, WorksheetInfo};
use tracing::instrument;

use crate::error::Result;
use crate::source::{MetadataAnalyzer, WikiSource};

static VERSION: LazyLock<Regex> = LazyLock::new(|| template_regex("Version"));
static DOWNLOADS: LazyLock<Vec<(FileType, Regex)>> = LazyLock::new(|| {
    FileType::ALL
        .iter()
        .map(|file_type| (*file_type, template_regex(file_type.template_name())))
        .collect()
});

/// Matches `{{Name|<translate><!--T:12--> value</translate>`, capturing the
/// translation unit and the value.
fn template_regex(name: &str) -> Regex {
    let pattern = format!(r"\{{\{{{name}\|<translate>*?<!--T:(\d+)-->\s*([^<]+)</translate>");
    Regex::new(&pattern).unwrap()
}

/// Version string of an English worksheet and the translation unit it's in.
pub fn english_version(page_source: &str) -> Option<(String, u32)> {
    let captures = VERSION.captures(page_source)?;
    let unit = captures[1].parse().ok()?;
    Some((captures[2].to_string(), unit))
}

/// Names of the downloadable artifacts of an English worksheet, with the
/// translation unit holding each name.
pub fn english_file_names(page_source: &str) -> Vec<(FileType, String, u32)> {
    DOWNLOADS
        .iter()
        .filter_map(|(file_type, regex)| {
            let captures = regex.captures(page_source)?;
            let unit = captures[1].parse().ok()?;
            Some((*file_type, captures[2].to_string(), unit))
        })
        .collect()
}

/// Gathers every worksheet and its translations into one [`LanguageInfo`]
/// per language.
#[derive(Clone)]
pub struct Gatherer {
    source: Arc<dyn WikiSource>,
    analyzer: Option<Arc<dyn MetadataAnalyzer>>,
    limit_to_lang: Option<String>,
}

impl Gatherer {
    pub fn new(source: Arc<dyn WikiSource>) -> Self {
        Self {
            source,
            analyzer: None,
            limit_to_lang: None,
        }
    }

    /// Analyze the metadata of every PDF found.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn MetadataAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Only gather translations into this language. English is always gathered.
    pub fn limit_to(mut self, language_code: Option<String>) -> Self {
        self.limit_to_lang = language_code;
        self
    }

    /// Queries all worksheets. This takes a while.
    ///
    /// The result always contains the English snapshot.
    #[instrument(skip(self))]
    pub async fn gather(&self) -> Result<BTreeMap<String, LanguageInfo>> {
        let mut result = BTreeMap::from([(
            REFERENCE_LANGUAGE.to_string(),
            LanguageInfo::new(REFERENCE_LANGUAGE, "English"),
        )]);
        for page in self.source.worksheet_list().await? {
            self.gather_worksheet(&page, &mut result).await?;
        }
        Ok(result)
    }

    async fn gather_worksheet(&self, page: &str, result: &mut BTreeMap<String, LanguageInfo>) -> Result<()> {
        let translations = self.source.page_translations(page).await?;
        let english_progress = translations.get(REFERENCE_LANGUAGE).copied().unwrap_or_default();
        let Some(english) = self.english_worksheet(page, english_progress).await? else {
            tracing::error!(page, "Couldn't get English page, skipping");
            return Ok(());
        };

        let mut finished = Vec::new();
        let mut ignored = Vec::new();
        for (lang, progress) in &translations {
            if lang == REFERENCE_LANGUAGE || self.limit_to_lang.as_ref().is_some_and(|limit| limit != lang) {
                continue;
            }
            let Some(worksheet) = self.translated_worksheet(&english, lang, *progress).await? else {
                ignored.push(lang.as_str());
                continue;
            };
            if progress.is_unfinished() {
                tracing::info!("Ignoring translation {page}/{lang} - ({progress} translation units translated)");
                ignored.push(lang.as_str());
            } else {
                finished.push(lang.as_str());
            }

            if !result.contains_key(lang) {
                let name = self.source.language_name(lang).await?.unwrap_or_default();
                result.insert(lang.clone(), LanguageInfo::new(lang, name));
            }
            if let Some(language) = result.get_mut(lang) {
                language.add_worksheet_info(worksheet);
            }
        }
        if let Some(language) = result.get_mut(REFERENCE_LANGUAGE) {
            language.add_worksheet_info(english);
        }
        tracing::info!("Worksheet {page} is translated into: {finished:?}, ignored {ignored:?}");
        Ok(())
    }

    /// The English original of a worksheet with all its artifacts, or `None`
    /// if the page doesn't exist.
    pub async fn english_worksheet(&self, page: &str, progress: TranslationProgress) -> Result<Option<WorksheetInfo>> {
        let Some(title) = self.source.translated_title(page, REFERENCE_LANGUAGE).await? else {
            return Ok(None);
        };
        let Some(page_source) = self.source.page_source(page).await? else {
            return Ok(None);
        };
        let (version, unit) = english_version(&page_source).unwrap_or_else(|| {
            tracing::warn!(page, "Couldn't retrieve version from English worksheet!");
            (String::new(), 0)
        });
        let mut worksheet =
            WorksheetInfo::new(page, REFERENCE_LANGUAGE, title, progress, version).with_version_unit(unit);
        for (file_type, file_name, unit) in english_file_names(&page_source) {
            self.add_file(&mut worksheet, file_type, &file_name, Some(unit)).await;
        }
        Ok(Some(worksheet))
    }

    /// One translation of `english`, or `None` if its title or version
    /// isn't translated yet.
    async fn translated_worksheet(
        &self,
        english: &WorksheetInfo,
        lang: &str,
        progress: TranslationProgress,
    ) -> Result<Option<WorksheetInfo>> {
        let page = english.page();
        let Some(title) = self.source.translated_title(page, lang).await? else {
            if !progress.is_unfinished() {
                tracing::warn!("Language {lang}: Title of {page} not translated, skipping.");
            }
            return Ok(None);
        };
        let version_unit = english.version_unit().unwrap_or_default();
        let Some(version) = self.source.translated_unit(page, lang, version_unit).await? else {
            if !progress.is_unfinished() {
                tracing::warn!("Language {lang}: Version of {page} not translated, skipping.");
            }
            return Ok(None);
        };

        let mut worksheet = WorksheetInfo::new(page, lang, title, progress, version);
        if !worksheet.has_same_version(english, false) {
            tracing::warn!(
                "Language {lang}: {} has version {} - {} has version {}",
                worksheet.title(),
                worksheet.version(),
                english.title(),
                english.version()
            );
        }
        for file in english.files().values() {
            self.translated_file(&mut worksheet, file).await?;
        }
        Ok(Some(worksheet))
    }

    /// Looks up the translated name of an English artifact and adds the
    /// file if the name is usable.
    async fn translated_file(&self, worksheet: &mut WorksheetInfo, english_file: &FileInfo) -> Result<()> {
        let Some(unit) = english_file.translation_unit else {
            tracing::warn!(file = %english_file, "Translation unit of English file is missing, ignoring");
            return Ok(());
        };
        let name = self
            .source
            .translated_unit(worksheet.page(), worksheet.language_code(), unit)
            .await?;
        let problem = match name.as_deref() {
            None => Some("does not exist".to_string()),
            Some(placeholder @ ("-" | ".")) => Some(format!("is placeholder: {placeholder}")),
            Some(name) if name == english_file.file_name() => Some("is identical with English original".to_string()),
            Some(_) => None,
        };
        match (problem, name) {
            (Some(problem), _) => {
                if !worksheet.progress().is_unfinished() {
                    tracing::warn!(
                        "Warning: translation {}/{unit}/{} (for {} file) {problem}",
                        worksheet.page(),
                        worksheet.language_code(),
                        english_file.file_type
                    );
                }
            },
            (None, Some(name)) => self.add_file(worksheet, english_file.file_type, &name, None).await,
            (None, None) => {},
        }
        Ok(())
    }

    /// Adds details on an uploaded file to `worksheet`. Files that can't be
    /// found are logged and left out.
    async fn add_file(&self, worksheet: &mut WorksheetInfo, file_type: FileType, file_name: &str, unit: Option<u32>) {
        let remote = match self.source.remote_file(file_name).await {
            Ok(Some(remote)) => remote,
            Ok(None) => {
                tracing::warn!(
                    "Page {}/{}: Couldn't find {file_name}.",
                    worksheet.page(),
                    worksheet.language_code()
                );
                return;
            },
            Err(err) => {
                tracing::warn!(error = ?err, "Exception thrown for {file_type} file");
                return;
            },
        };

        let url = match urlencoding::decode(&remote.url) {
            Ok(url) => url.into_owned(),
            Err(err) => {
                tracing::warn!(url = %remote.url, error = %err, "Keeping undecodable URL as is");
                remote.url.clone()
            },
        };
        let mut file = FileInfo::new(file_type, url, remote.timestamp);
        if let Some(unit) = unit {
            file = file.with_translation_unit(unit);
        }
        if file_type == FileType::Pdf
            && let Some(analyzer) = &self.analyzer
        {
            match analyzer.analyze(&file, worksheet).await {
                Ok(Some(metadata)) => {
                    if !metadata.correct {
                        tracing::warn!("{file_name} metadata is incorrect: {}", metadata.warnings);
                    }
                    if !metadata.pdf1a {
                        tracing::info!("{file_name} is not PDF/1A");
                    }
                    if metadata.only_docinfo {
                        tracing::info!("{file_name} uses only outdated DocInfo in PDF metadata");
                    }
                    file = file.with_metadata(metadata);
                },
                Ok(None) => tracing::warn!("Couldn't analyze PDF metadata of {file_name}"),
                Err(err) => tracing::warn!(error = ?err, "Couldn't analyze PDF metadata of {file_name}"),
            }
        }
        worksheet.add_file_info(file);
    }
}
