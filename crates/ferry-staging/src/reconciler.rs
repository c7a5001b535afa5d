use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use ferry_core::staging::filter_by_format;

use crate::error::{StagingError, StagingResult};
use crate::store::StagingStore;

/// Bound on staging-listing calls so a run never hangs on an unresponsive
/// storage backend.
pub const LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// List the staged objects under `prefix` whose keys end in `.format`.
///
/// Fails with [`StagingError::NoMatchingFiles`] when nothing matches; an
/// empty staging area is an expected state (first run, or a scheme that has
/// produced no files yet), so callers log that case and continue.
pub async fn list_matching<S: StagingStore>(
    store: &S,
    bucket: &str,
    prefix: &str,
    format: &str,
) -> StagingResult<Vec<String>> {
    let keys = timeout(LIST_TIMEOUT, store.list(bucket, prefix))
        .await
        .map_err(|_| StagingError::ListTimeout {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            seconds: LIST_TIMEOUT.as_secs(),
        })??;

    let matching = filter_by_format(&keys, format);
    if matching.is_empty() {
        return Err(StagingError::NoMatchingFiles {
            prefix: prefix.to_string(),
            format: format.to_string(),
        });
    }

    debug!(bucket, prefix, count = matching.len(), "matched staged objects");
    Ok(matching)
}

/// Delete every key, best effort: a failure on one key is logged and does
/// not abort the rest of the batch.
pub async fn delete_all<S: StagingStore>(store: &S, bucket: &str, keys: &[String]) {
    for key in keys {
        match store.delete(bucket, key).await {
            Ok(()) => info!(bucket, key = key.as_str(), "deleted staged object"),
            Err(e) => warn!(
                bucket,
                key = key.as_str(),
                error = %e,
                "failed to delete staged object"
            ),
        }
    }
}

/// Clear a staging directory: list the format-matching objects under
/// `prefix` and delete them. Returns how many objects were matched.
pub async fn clear_directory<S: StagingStore>(
    store: &S,
    bucket: &str,
    prefix: &str,
    format: &str,
) -> StagingResult<usize> {
    let keys = list_matching(store, bucket, prefix, format).await?;
    delete_all(store, bucket, &keys).await;
    Ok(keys.len())
}
