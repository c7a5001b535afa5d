mod bq;
mod client;
mod coordinator;
mod error;
mod mock;

pub use bq::BqCliWarehouse;
pub use client::{ExportRequest, Warehouse};
pub use coordinator::export_to_staging;
pub use error::{WarehouseError, WarehouseResult};
pub use mock::MockWarehouse;
