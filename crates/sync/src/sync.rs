use exn::ResultExt;
use resbot_model::{ChangeLog, LanguageInfo, codec};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::snapshot::{SnapshotStore, decode_snapshot};

/// Compares a freshly gathered language against its stored snapshot, then
/// stores the fresh one.
///
/// A missing or unusable stored snapshot counts as an empty language, so
/// every worksheet shows up as new. The snapshot is only written when its
/// encoding changed, unless `rewrite` forces it.
#[instrument(skip_all, fields(language = current.language_code()))]
pub async fn sync_and_compare(store: &SnapshotStore, current: &LanguageInfo, rewrite: bool) -> Result<ChangeLog> {
    let code = current.language_code();
    let encoded = codec::to_json_string(current).or_raise(|| ErrorKind::Snapshot(code.to_string()))?;
    let key = SnapshotStore::language_key(code);
    let empty = || LanguageInfo::new(code, current.english_name());

    let (previous, write) = match store.read_raw(&key).await {
        Ok(None) => {
            tracing::warn!(key = %key.display(), "Snapshot doesn't exist yet, creating");
            (empty(), true)
        },
        Ok(Some(stored)) => {
            let previous = decode_snapshot(code, &stored).unwrap_or_else(|err| {
                tracing::warn!(key = %key.display(), error = ?err, "Error while loading stored snapshot");
                empty()
            });
            (previous, rewrite || stored != encoded)
        },
        Err(err) if matches!(&*err, ErrorKind::Snapshot(_)) => {
            tracing::warn!(key = %key.display(), error = ?err, "Error while loading stored snapshot");
            (empty(), true)
        },
        Err(err) => return Err(err),
    };

    let changes = current.compare(&previous);
    if changes.is_empty() {
        tracing::info!("No changes in language {code} since last run.");
    } else {
        tracing::info!("Changes in language {code} since last run:\n{changes}");
    }

    if write {
        store.write_raw(&key, &encoded).await?;
        tracing::info!(key = %key.display(), "Updated snapshot");
    }
    Ok(changes)
}
