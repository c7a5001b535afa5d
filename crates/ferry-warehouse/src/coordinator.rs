use tracing::info;

use crate::client::{ExportRequest, Warehouse};
use crate::error::WarehouseResult;

/// Export one table to the staging area and block until the job finishes.
///
/// Shards land under `<destination_prefix>/<table>/` as
/// `<table>_<shard>.json`. The destination format is always newline-delimited
/// JSON, independent of the file format a source matches during cleanup.
/// Returns the shard URI pattern the job wrote.
pub async fn export_to_staging<W: Warehouse>(
    warehouse: &W,
    project: &str,
    dataset: &str,
    table: &str,
    destination_prefix: &str,
) -> WarehouseResult<String> {
    let destination = format!("{}/{}/{}_*.json", destination_prefix, table, table);

    warehouse
        .export_table(ExportRequest {
            project: project.to_string(),
            dataset: dataset.to_string(),
            table: table.to_string(),
            destination: destination.clone(),
        })
        .await?;

    info!(table, destination = destination.as_str(), "export job finished");
    Ok(destination)
}
