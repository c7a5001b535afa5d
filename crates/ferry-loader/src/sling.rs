use std::future::Future;
use std::path::PathBuf;

use tokio::process::Command;
use tracing::debug;

use ferry_core::LoadJobTemplate;

use crate::dispatcher::Loader;
use crate::error::{LoaderError, LoaderResult};

/// Loader adapter that invokes the `sling` command-line tool.
///
/// The resolved job is serialized to a temporary config file and passed via
/// `sling run -c`; sling performs the load synchronously and its exit status
/// reports the terminal state.
pub struct SlingLoader {
    binary: PathBuf,
}

impl SlingLoader {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("sling"),
        }
    }

    /// Use a specific sling binary instead of the one on PATH.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for SlingLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for SlingLoader {
    fn load(&self, job: LoadJobTemplate) -> impl Future<Output = LoaderResult<()>> + Send {
        let binary = self.binary.clone();
        async move {
            // JSON is valid YAML, so sling accepts the config as written.
            let config = serde_json::json!({
                "source": { "conn": job.source_conn, "stream": job.source_stream },
                "target": { "conn": job.target_conn, "object": job.target_object },
                "mode": job.mode,
            });

            let file = tempfile::NamedTempFile::new()?;
            serde_json::to_writer_pretty(file.as_file(), &config)?;

            let output = Command::new(&binary)
                .arg("run")
                .arg("-c")
                .arg(file.path())
                .output()
                .await?;

            if !output.status.success() {
                return Err(LoaderError::LoadInvocationFailed {
                    stream: job.source_stream,
                    target: job.target_object,
                    message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }

            debug!(stream = job.source_stream.as_str(), "sling run finished");
            Ok(())
        }
    }
}
