pub mod dates;
pub mod error;
pub mod load;
pub mod plan;
pub mod policy;
pub mod scheme;
pub mod selector;
pub mod staging;

pub use error::{Error, Result};
pub use load::{LoadJobTemplate, LoadMode};
pub use plan::{DateRange, ReplicationPlan, Source};
pub use policy::{load_mode_for, should_reconcile};
pub use scheme::{ExportStrategy, ReplicationScheme, SourceKind};
pub use selector::select_tables;
