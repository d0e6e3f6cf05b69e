//! Snapshot documents in storage.
//!
//! Layout of the storage root:
//!
//! | Key              | Contents                                         |
//! |------------------|--------------------------------------------------|
//! | `{lang}.json`    | encoded [`LanguageInfo`] of language `lang`      |
//! | `languages.json` | alphabetically sorted array of all language codes |
//! | `summary.json`   | catalog summary, see [`CatalogSummary`](crate::CatalogSummary) |

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use exn::ResultExt;
use resbot_model::{LanguageInfo, codec};
use resbot_storage::BackendHandle;

use crate::error::{ErrorKind, Result};

/// Key of the language list.
pub const LANGUAGE_LIST_KEY: &str = "languages.json";
/// Key of the catalog summary.
pub const SUMMARY_KEY: &str = "summary.json";
/// Top-level documents that aren't language snapshots.
const RESERVED_STEMS: [&str; 2] = ["languages", "summary"];

/// Reads and writes snapshot documents through a storage backend.
#[derive(Clone)]
pub struct SnapshotStore {
    backend: BackendHandle,
}
impl SnapshotStore {
    pub fn new(backend: BackendHandle) -> Self {
        Self { backend }
    }

    /// Key of the snapshot of one language, e.g. `de.json`.
    pub fn language_key(language_code: &str) -> PathBuf {
        PathBuf::from(format!("{language_code}.json"))
    }

    /// Stored text of a document, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// [`Snapshot`](ErrorKind::Snapshot) if the document isn't valid UTF-8.
    pub async fn read_raw(&self, key: &Path) -> Result<Option<String>> {
        match self.backend.read(key).await {
            Ok(data) => String::from_utf8(data)
                .map(Some)
                .or_raise(|| ErrorKind::Snapshot(key.display().to_string())),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err).or_raise(|| ErrorKind::Storage),
        }
    }

    pub async fn write_raw(&self, key: &Path, text: &str) -> Result<()> {
        self.backend.write(key, text.as_bytes()).await.or_raise(|| ErrorKind::Storage)
    }

    /// Stored snapshot of a language, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// [`Snapshot`](ErrorKind::Snapshot) if the stored document can't be
    /// decoded or belongs to another language.
    pub async fn read_language(&self, language_code: &str) -> Result<Option<LanguageInfo>> {
        let Some(text) = self.read_raw(&Self::language_key(language_code)).await? else {
            return Ok(None);
        };
        decode_snapshot(language_code, &text).map(Some)
    }

    pub async fn write_language(&self, language: &LanguageInfo) -> Result<()> {
        let code = language.language_code();
        let text = codec::to_json_string(language).or_raise(|| ErrorKind::Snapshot(code.to_string()))?;
        self.write_raw(&Self::language_key(code), &text).await
    }

    /// Stored list of language codes, or `None` if it was never saved.
    pub async fn read_language_list(&self) -> Result<Option<Vec<String>>> {
        let Some(text) = self.read_raw(Path::new(LANGUAGE_LIST_KEY)).await? else {
            return Ok(None);
        };
        let list = serde_json::from_str(&text).or_raise(|| ErrorKind::Snapshot(LANGUAGE_LIST_KEY.to_string()))?;
        Ok(Some(list))
    }

    /// Stores the language list, sorted alphabetically and without
    /// duplicates. Only writes if the stored list differs.
    ///
    /// Returns whether the list was written.
    pub async fn save_language_list<'a>(&self, codes: impl IntoIterator<Item = &'a str>) -> Result<bool> {
        let codes: BTreeSet<&str> = codes.into_iter().collect();
        let text = serde_json::to_string(&codes).or_raise(|| ErrorKind::Snapshot(LANGUAGE_LIST_KEY.to_string()))?;
        let key = Path::new(LANGUAGE_LIST_KEY);
        match self.read_raw(key).await {
            Ok(Some(previous)) if previous == text => return Ok(false),
            Ok(Some(_)) => {},
            Ok(None) => tracing::warn!(key = LANGUAGE_LIST_KEY, "Language list doesn't exist yet, creating"),
            Err(err) if matches!(&*err, ErrorKind::Snapshot(_)) => {
                tracing::warn!(key = LANGUAGE_LIST_KEY, error = ?err, "Stored language list is unreadable, replacing");
            },
            Err(err) => return Err(err),
        }
        self.write_raw(key, &text).await?;
        tracing::info!(key = LANGUAGE_LIST_KEY, languages = codes.len(), "Updated language list");
        Ok(true)
    }

    /// Language codes of all snapshots actually in storage, for when the
    /// language list is missing. Sorted alphabetically.
    pub async fn discover_languages(&self) -> Result<Vec<String>> {
        let entries = self.backend.list().await.or_raise(|| ErrorKind::Storage)?;
        let codes: BTreeSet<String> = entries
            .iter()
            .filter(|entry| entry.is_top_level())
            .filter_map(|entry| entry.stem_with_extension("json"))
            .filter(|stem| !RESERVED_STEMS.contains(stem))
            .map(str::to_string)
            .collect();
        Ok(codes.into_iter().collect())
    }
}

/// Decodes the stored text of `language_code`'s snapshot.
pub(crate) fn decode_snapshot(language_code: &str, text: &str) -> Result<LanguageInfo> {
    let language = codec::from_json_str(text).or_raise(|| ErrorKind::Snapshot(language_code.to_string()))?;
    if language.language_code() != language_code {
        tracing::warn!(
            expected = language_code,
            found = language.language_code(),
            "Snapshot belongs to another language"
        );
        exn::bail!(ErrorKind::Snapshot(language_code.to_string()));
    }
    Ok(language)
}
