use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::client::{ExportRequest, Warehouse};
use crate::error::{WarehouseError, WarehouseResult};

/// A mock warehouse for testing.
#[derive(Clone, Default)]
pub struct MockWarehouse {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Tables returned by catalog listings, in insertion order.
    catalog: Vec<String>,
    /// Recorded export requests.
    exports: Vec<ExportRequest>,
    /// If set, all operations will fail with this error.
    fail_with: Option<String>,
}

impl MockWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock warehouse that simulates failures.
    pub fn failing(error_message: impl Into<String>) -> Self {
        let warehouse = Self::new();
        warehouse.state.lock().unwrap().fail_with = Some(error_message.into());
        warehouse
    }

    /// Add a table to the catalog listing.
    pub fn add_table(&self, table: impl Into<String>) {
        self.state.lock().unwrap().catalog.push(table.into());
    }

    /// All export requests recorded so far.
    pub fn exports(&self) -> Vec<ExportRequest> {
        self.state.lock().unwrap().exports.clone()
    }

    /// Tables exported so far, in request order.
    pub fn exported_tables(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.exports.iter().map(|r| r.table.clone()).collect()
    }
}

impl Warehouse for MockWarehouse {
    fn export_table(
        &self,
        request: ExportRequest,
    ) -> impl Future<Output = WarehouseResult<()>> + Send {
        let state = self.state.clone();
        async move {
            let mut state = state.lock().unwrap();

            if let Some(ref error) = state.fail_with {
                return Err(WarehouseError::ExportJobFailed {
                    table: request.table,
                    message: error.clone(),
                });
            }

            state.exports.push(request);
            Ok(())
        }
    }

    fn list_tables(
        &self,
        _project: &str,
        dataset: &str,
    ) -> impl Future<Output = WarehouseResult<Vec<String>>> + Send {
        let state = self.state.clone();
        let dataset = dataset.to_string();
        async move {
            let state = state.lock().unwrap();

            if let Some(ref error) = state.fail_with {
                return Err(WarehouseError::ListTablesFailed {
                    dataset,
                    message: error.clone(),
                });
            }

            Ok(state.catalog.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(table: &str) -> ExportRequest {
        ExportRequest {
            project: "p".to_string(),
            dataset: "d".to_string(),
            table: table.to_string(),
            destination: format!("gs://b/s/{}/{}_*.json", table, table),
        }
    }

    #[tokio::test]
    async fn test_mock_records_exports_in_order() {
        let warehouse = MockWarehouse::new();

        warehouse.export_table(request("events_20230101")).await.unwrap();
        warehouse.export_table(request("events_20230102")).await.unwrap();

        assert_eq!(
            warehouse.exported_tables(),
            vec!["events_20230101", "events_20230102"]
        );
    }

    #[tokio::test]
    async fn test_mock_catalog_preserves_insertion_order() {
        let warehouse = MockWarehouse::new();
        warehouse.add_table("events_20250101");
        warehouse.add_table("events_20250102");
        warehouse.add_table("other_table");

        let tables = warehouse.list_tables("p", "d").await.unwrap();
        assert_eq!(
            tables,
            vec!["events_20250101", "events_20250102", "other_table"]
        );
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let warehouse = MockWarehouse::failing("simulated failure");

        let err = warehouse.export_table(request("events_20230101")).await;
        assert!(matches!(
            err,
            Err(WarehouseError::ExportJobFailed { .. })
        ));
        assert!(warehouse.list_tables("p", "d").await.is_err());
        assert!(warehouse.exports().is_empty());
    }
}
