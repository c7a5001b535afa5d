mod error;
mod replication;
mod template;
mod validation;

pub use error::{ConfigError, ConfigResult};
pub use replication::{ReplicationConfig, SourceConfig};
pub use template::parse_template;
pub use validation::to_plan;
