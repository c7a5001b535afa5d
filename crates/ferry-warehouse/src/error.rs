use thiserror::Error;

/// Errors from warehouse operations.
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("export job for table '{table}' failed: {message}")]
    ExportJobFailed { table: String, message: String },

    #[error("failed to list tables in dataset '{dataset}': {message}")]
    ListTablesFailed { dataset: String, message: String },

    #[error("failed to invoke {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("unexpected catalog listing output: {0}")]
    Catalog(#[from] serde_json::Error),
}

pub type WarehouseResult<T> = Result<T, WarehouseError>;
