use std::future::Future;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::client::{ExportRequest, Warehouse};
use crate::error::{WarehouseError, WarehouseResult};

/// Warehouse adapter that shells out to the `bq` command-line tool.
///
/// `bq extract` blocks until the underlying export job reaches a terminal
/// state, which gives the synchronous contract [`Warehouse`] requires.
/// Credentials come from the ambient gcloud configuration.
pub struct BqCliWarehouse {
    binary: String,
    location: Option<String>,
}

impl BqCliWarehouse {
    pub fn new() -> Self {
        Self {
            binary: "bq".to_string(),
            location: None,
        }
    }

    /// Pin the dataset location passed to export jobs.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl Default for BqCliWarehouse {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct TableEntry {
    #[serde(rename = "tableReference")]
    table_reference: TableReference,
}

#[derive(Debug, Deserialize)]
struct TableReference {
    #[serde(rename = "tableId")]
    table_id: String,
}

impl Warehouse for BqCliWarehouse {
    fn export_table(
        &self,
        request: ExportRequest,
    ) -> impl Future<Output = WarehouseResult<()>> + Send {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("extract")
            .arg("--destination_format=NEWLINE_DELIMITED_JSON");
        if let Some(location) = &self.location {
            cmd.arg(format!("--location={}", location));
        }
        cmd.arg(format!(
            "{}:{}.{}",
            request.project, request.dataset, request.table
        ))
        .arg(&request.destination);

        async move {
            let output = cmd.output().await.map_err(|e| WarehouseError::Spawn {
                command: "bq extract".to_string(),
                source: e,
            })?;

            if !output.status.success() {
                return Err(WarehouseError::ExportJobFailed {
                    table: request.table,
                    message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }

            debug!(table = request.table.as_str(), "bq extract finished");
            Ok(())
        }
    }

    fn list_tables(
        &self,
        project: &str,
        dataset: &str,
    ) -> impl Future<Output = WarehouseResult<Vec<String>>> + Send {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("ls")
            .arg("--format=json")
            .arg("--max_results=10000")
            .arg(format!("{}:{}", project, dataset));
        let dataset = dataset.to_string();

        async move {
            let output = cmd.output().await.map_err(|e| WarehouseError::Spawn {
                command: "bq ls".to_string(),
                source: e,
            })?;

            if !output.status.success() {
                return Err(WarehouseError::ListTablesFailed {
                    dataset,
                    message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }

            let entries: Vec<TableEntry> = serde_json::from_slice(&output.stdout)?;
            Ok(entries
                .into_iter()
                .map(|entry| entry.table_reference.table_id)
                .collect())
        }
    }
}
