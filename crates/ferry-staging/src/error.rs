use thiserror::Error;

/// Errors from staging-store operations.
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("no files of {format} format under {prefix}")]
    NoMatchingFiles { prefix: String, format: String },

    #[error("listing {bucket}/{prefix} timed out after {seconds}s")]
    ListTimeout {
        bucket: String,
        prefix: String,
        seconds: u64,
    },

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl StagingError {
    /// An empty staging area is a normal run state, not a failure; callers
    /// checking this downgrade the error to an informational log.
    pub fn is_no_match(&self) -> bool {
        matches!(self, StagingError::NoMatchingFiles { .. })
    }
}

impl From<object_store::Error> for StagingError {
    fn from(e: object_store::Error) -> Self {
        match e {
            object_store::Error::NotFound { path, .. } => StagingError::NotFound(path),
            other => StagingError::Storage(other.to_string()),
        }
    }
}

pub type StagingResult<T> = Result<T, StagingError>;
