use std::future::Future;
use std::sync::{Arc, Mutex};

use ferry_core::{LoadJobTemplate, LoadMode};

use crate::dispatcher::Loader;
use crate::error::{LoaderError, LoaderResult};

/// A mock loader for testing.
#[derive(Clone, Default)]
pub struct MockLoader {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Resolved jobs in dispatch order.
    jobs: Vec<LoadJobTemplate>,
    /// If set, all loads will fail with this error.
    fail_with: Option<String>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock loader that simulates failures.
    pub fn failing(error_message: impl Into<String>) -> Self {
        let loader = Self::new();
        loader.state.lock().unwrap().fail_with = Some(error_message.into());
        loader
    }

    /// Jobs dispatched so far, in order.
    pub fn jobs(&self) -> Vec<LoadJobTemplate> {
        self.state.lock().unwrap().jobs.clone()
    }

    /// Load modes dispatched so far, in order.
    pub fn modes(&self) -> Vec<LoadMode> {
        let state = self.state.lock().unwrap();
        state.jobs.iter().map(|job| job.mode).collect()
    }
}

impl Loader for MockLoader {
    fn load(&self, job: LoadJobTemplate) -> impl Future<Output = LoaderResult<()>> + Send {
        let state = self.state.clone();
        async move {
            let mut state = state.lock().unwrap();

            if let Some(ref error) = state.fail_with {
                return Err(LoaderError::LoadInvocationFailed {
                    stream: job.source_stream,
                    target: job.target_object,
                    message: error.clone(),
                });
            }

            state.jobs.push(job);
            Ok(())
        }
    }
}
