//! One run of the resources bot.

use std::collections::BTreeMap;

use exn::{OptionExt, ResultExt};
use resbot_model::{ChangeLog, LanguageInfo, REFERENCE_LANGUAGE};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::gather::Gatherer;
use crate::post::{CatalogSummary, ChangeReporter, GlobalPostProcessor, LanguagePostProcessor};
use crate::snapshot::SnapshotStore;
use crate::sync::sync_and_compare;

/// Which outputs to write even if nothing changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Rewrite {
    #[default]
    #[display("none")]
    None,
    #[display("all")]
    All,
    /// Language snapshots only
    #[display("json")]
    Json,
    /// Catalog summary only
    #[display("summary")]
    Summary,
}
impl Rewrite {
    pub fn forces_snapshots(self) -> bool {
        matches!(self, Self::All | Self::Json)
    }

    pub fn forces_summary(self) -> bool {
        matches!(self, Self::All | Self::Summary)
    }
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub languages: BTreeMap<String, LanguageInfo>,
    /// Empty logs when running from cache
    pub changes: BTreeMap<String, ChangeLog>,
}

/// Gathers (or loads) all languages, syncs them with storage and runs the
/// post-processors.
pub struct ResourcesBot {
    store: SnapshotStore,
    gatherer: Option<Gatherer>,
    limit_to_lang: Option<String>,
    rewrite: Rewrite,
    language_processors: Vec<Box<dyn LanguagePostProcessor>>,
    global_processors: Vec<Box<dyn GlobalPostProcessor>>,
}

impl ResourcesBot {
    /// A bot reading its languages from the stored snapshots.
    pub fn new(store: SnapshotStore, rewrite: Rewrite) -> Self {
        Self {
            store,
            gatherer: None,
            limit_to_lang: None,
            rewrite,
            language_processors: Vec::new(),
            global_processors: Vec::new(),
        }
    }

    /// Gather fresh data from the wiki instead of reading from cache.
    pub fn live(mut self, gatherer: Gatherer) -> Self {
        self.gatherer = Some(gatherer);
        self
    }

    pub fn limit_to(mut self, language_code: Option<String>) -> Self {
        self.limit_to_lang = language_code;
        self
    }

    /// Adds [`ChangeReporter`] and [`CatalogSummary`].
    pub fn with_builtin_processors(self) -> Self {
        let summary = CatalogSummary::new(self.store.clone(), self.rewrite.forces_summary());
        self.with_language_processor(ChangeReporter).with_global_processor(summary)
    }

    pub fn with_language_processor(mut self, processor: impl LanguagePostProcessor + 'static) -> Self {
        self.language_processors.push(Box::new(processor));
        self
    }

    pub fn with_global_processor(mut self, processor: impl GlobalPostProcessor + 'static) -> Self {
        self.global_processors.push(Box::new(processor));
        self
    }

    pub fn is_cache_mode(&self) -> bool {
        self.gatherer.is_none()
    }

    #[instrument(skip(self), fields(cache = self.is_cache_mode(), limit = ?self.limit_to_lang, rewrite = %self.rewrite))]
    pub async fn run(&self) -> Result<RunOutcome> {
        let outcome = match &self.gatherer {
            None => {
                let languages = self.load_from_cache().await?;
                let changes = languages.keys().map(|code| (code.clone(), ChangeLog::new())).collect();
                RunOutcome { languages, changes }
            },
            Some(gatherer) => self.sync_live(gatherer).await?,
        };

        let english = outcome
            .languages
            .get(REFERENCE_LANGUAGE)
            .ok_or_raise(|| ErrorKind::MissingReference)?;
        let no_changes = ChangeLog::new();
        for (code, language) in &outcome.languages {
            let changes = outcome.changes.get(code).unwrap_or(&no_changes);
            for processor in &self.language_processors {
                processor
                    .run(language, english, changes)
                    .await
                    .or_raise(|| ErrorKind::PostProcessor(processor.name()))?;
            }
        }
        if self.limit_to_lang.is_none() {
            for processor in &self.global_processors {
                processor
                    .run(&outcome.languages, &outcome.changes)
                    .await
                    .or_raise(|| ErrorKind::PostProcessor(processor.name()))?;
            }
        }
        Ok(outcome)
    }

    /// Reads the snapshot of every listed language. Every listed snapshot
    /// must be there.
    async fn load_from_cache(&self) -> Result<BTreeMap<String, LanguageInfo>> {
        let codes = match &self.limit_to_lang {
            Some(lang) => vec![lang.clone(), REFERENCE_LANGUAGE.to_string()],
            None => match self.store.read_language_list().await? {
                Some(codes) => codes,
                None => {
                    tracing::warn!("Language list is missing, looking for stored snapshots instead");
                    self.store.discover_languages().await?
                },
            },
        };

        let mut languages = BTreeMap::new();
        for code in codes {
            tracing::info!("Reading details for language {code} from cache...");
            let language = self
                .store
                .read_language(&code)
                .await
                .or_raise(|| ErrorKind::Cache(code.clone()))?
                .ok_or_raise(|| ErrorKind::Cache(code.clone()))?;
            languages.insert(code, language);
        }
        Ok(languages)
    }

    async fn sync_live(&self, gatherer: &Gatherer) -> Result<RunOutcome> {
        let languages = gatherer.clone().limit_to(self.limit_to_lang.clone()).gather().await?;
        let mut changes = BTreeMap::new();
        for (code, language) in &languages {
            let log = sync_and_compare(&self.store, language, self.rewrite.forces_snapshots()).await?;
            changes.insert(code.clone(), log);
        }
        if self.limit_to_lang.is_none() {
            self.store.save_language_list(languages.keys().map(String::as_str)).await?;
        }
        Ok(RunOutcome { languages, changes })
    }
}
