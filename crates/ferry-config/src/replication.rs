use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigResult;

/// Raw replication configuration as parsed from `ferry.toml`.
#[derive(Debug, Deserialize)]
pub struct ReplicationConfig {
    /// Warehouse project identifier.
    pub project: String,
    /// Dataset/schema holding the source tables.
    pub dataset: String,
    /// IANA timezone for date-key computation.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Run-level export strategy (`plain` or `daily+streaming`).
    #[serde(default = "default_strategy")]
    pub export_strategy: String,
    /// Source settings keyed by role name (`daily`, `intraday`).
    pub sources: HashMap<String, SourceConfig>,
}

/// Per-source settings.
#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    /// Warehouse table name prefix, e.g. `events_`.
    pub table_prefix: String,
    /// Staging bucket name.
    pub bucket: String,
    /// Path suffix inside the bucket for this source's staging area.
    pub bucket_suffix: String,
    /// File-format suffix for staged-object matching.
    #[serde(default = "default_file_format")]
    pub file_format: String,
    /// Replication scheme (`today`, `range`, `all-time`).
    pub replication_scheme: String,
    /// Inclusive range start, `YYYYMMDD`; required by `range`.
    pub date_range_start: Option<String>,
    /// Inclusive range end, `YYYYMMDD`; required by `range`.
    pub date_range_end: Option<String>,
    /// Path to this source's load-job template file.
    pub load_template: PathBuf,
}

impl ReplicationConfig {
    /// Parse a replication config from a TOML string.
    pub fn parse(toml_str: &str) -> ConfigResult<Self> {
        let config: ReplicationConfig = toml::from_str(toml_str)?;
        Ok(config)
    }

    /// Resolve environment variables in a string.
    /// Supports ${VAR_NAME} syntax.
    pub fn resolve_env(&self, s: &str) -> String {
        let mut result = s.to_string();

        while let Some(start) = result.find("${") {
            if let Some(end) = result[start..].find('}') {
                let var_name = &result[start + 2..start + end];
                let value = std::env::var(var_name).unwrap_or_default();
                result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
            } else {
                break;
            }
        }

        result
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_strategy() -> String {
    "plain".to_string()
}

fn default_file_format() -> String {
    "json".to_string()
}
