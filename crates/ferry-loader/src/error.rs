use thiserror::Error;

/// Errors from loader invocations.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("load of '{stream}' into '{target}' failed: {message}")]
    LoadInvocationFailed {
        stream: String,
        target: String,
        message: String,
    },

    #[error("failed to serialize load job: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to invoke loader: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type LoaderResult<T> = Result<T, LoaderError>;
