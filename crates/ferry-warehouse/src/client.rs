use std::future::Future;

use crate::error::WarehouseResult;

/// One export-to-staging job request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Warehouse project identifier.
    pub project: String,
    /// Dataset/schema holding the table.
    pub dataset: String,
    /// Table to export.
    pub table: String,
    /// Destination shard-URI pattern, e.g. `gs://b/s/t/t_*.json`.
    pub destination: String,
}

/// Trait for warehouse operations.
pub trait Warehouse: Send + Sync {
    /// Run an export job to completion. The job writes the table's contents
    /// as sharded newline-delimited JSON files matching the request's
    /// destination pattern, and only resolves once it reaches a terminal
    /// state.
    fn export_table(
        &self,
        request: ExportRequest,
    ) -> impl Future<Output = WarehouseResult<()>> + Send;

    /// List the dataset's tables, in catalog order.
    fn list_tables(
        &self,
        project: &str,
        dataset: &str,
    ) -> impl Future<Output = WarehouseResult<Vec<String>>> + Send;
}
