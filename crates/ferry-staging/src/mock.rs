use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::error::{StagingError, StagingResult};
use crate::store::StagingStore;

/// An in-memory staging store for testing.
///
/// Listing order is lexicographic by key, matching real object storage.
#[derive(Clone, Default)]
pub struct MockStaging {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Object keys per bucket.
    objects: HashMap<String, BTreeSet<String>>,
    /// Deletions recorded in order, as (bucket, key).
    deleted: Vec<(String, String)>,
    /// If set, all operations will fail with this error.
    fail_with: Option<String>,
}

impl MockStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store that simulates failures.
    pub fn failing(error_message: impl Into<String>) -> Self {
        let store = Self::new();
        store.state.lock().unwrap().fail_with = Some(error_message.into());
        store
    }

    /// Seed an object into a bucket.
    pub fn insert_object(&self, bucket: impl Into<String>, key: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        state
            .objects
            .entry(bucket.into())
            .or_default()
            .insert(key.into());
    }

    /// All keys currently in a bucket, in listing order.
    pub fn objects(&self, bucket: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .objects
            .get(bucket)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Successful deletions recorded so far, as (bucket, key).
    pub fn deleted(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().deleted.clone()
    }
}

impl StagingStore for MockStaging {
    fn list(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> impl Future<Output = StagingResult<Vec<String>>> + Send {
        let state = self.state.clone();
        let bucket = bucket.to_string();
        let prefix = prefix.to_string();
        async move {
            let state = state.lock().unwrap();

            if let Some(ref error) = state.fail_with {
                return Err(StagingError::Storage(error.clone()));
            }

            Ok(state
                .objects
                .get(&bucket)
                .map(|keys| {
                    keys.iter()
                        .filter(|key| key.starts_with(&prefix))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default())
        }
    }

    fn delete(&self, bucket: &str, key: &str) -> impl Future<Output = StagingResult<()>> + Send {
        let state = self.state.clone();
        let bucket = bucket.to_string();
        let key = key.to_string();
        async move {
            let mut state = state.lock().unwrap();

            if let Some(ref error) = state.fail_with {
                return Err(StagingError::Storage(error.clone()));
            }

            let removed = state
                .objects
                .get_mut(&bucket)
                .map(|keys| keys.remove(&key))
                .unwrap_or(false);

            if !removed {
                return Err(StagingError::NotFound(key));
            }

            state.deleted.push((bucket, key));
            Ok(())
        }
    }
}
