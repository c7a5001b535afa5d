use std::future::Future;

use tracing::info;

use ferry_core::{LoadJobTemplate, LoadMode};

use crate::error::LoaderResult;

/// Trait for bulk-loader invocations.
pub trait Loader: Send + Sync {
    /// Load one staged object into the target, synchronously. Resolves only
    /// once the load reaches a terminal state.
    fn load(&self, job: LoadJobTemplate) -> impl Future<Output = LoaderResult<()>> + Send;
}

/// Resolve the template for one staged object and invoke the loader.
///
/// Partial loads are not rolled back on failure; operators rerun the source
/// after fixing the underlying cause.
pub async fn dispatch_load<L: Loader>(
    loader: &L,
    template: &LoadJobTemplate,
    object_uri: &str,
    mode_override: Option<LoadMode>,
) -> LoaderResult<()> {
    let job = template.resolve(object_uri, mode_override);
    info!(
        stream = job.source_stream.as_str(),
        target = job.target_object.as_str(),
        mode = ?job.mode,
        "dispatching load"
    );
    loader.load(job).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoaderError;
    use crate::mock::MockLoader;

    fn template() -> LoadJobTemplate {
        LoadJobTemplate {
            source_conn: "GCS".to_string(),
            source_stream: "{object}".to_string(),
            target_conn: "WAREHOUSE".to_string(),
            target_object: "analytics.events".to_string(),
            mode: LoadMode::Append,
        }
    }

    #[tokio::test]
    async fn test_dispatch_resolves_stream_and_records_job() {
        let loader = MockLoader::new();

        dispatch_load(&loader, &template(), "gs://b/exports/f1.json", None)
            .await
            .unwrap();

        let jobs = loader.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].source_stream, "gs://b/exports/f1.json");
        assert_eq!(jobs[0].mode, LoadMode::Append);
    }

    #[tokio::test]
    async fn test_dispatch_applies_mode_override() {
        let loader = MockLoader::new();

        dispatch_load(
            &loader,
            &template(),
            "gs://b/exports/f1.json",
            Some(LoadMode::FullRefresh),
        )
        .await
        .unwrap();

        assert_eq!(loader.modes(), vec![LoadMode::FullRefresh]);
    }

    #[tokio::test]
    async fn test_dispatch_surfaces_invocation_failure() {
        let loader = MockLoader::failing("connection refused");

        let err = dispatch_load(&loader, &template(), "gs://b/f.json", None)
            .await
            .unwrap_err();

        assert!(matches!(err, LoaderError::LoadInvocationFailed { .. }));
        assert!(loader.jobs().is_empty());
    }
}
