use std::path::PathBuf;

use crate::scheme::{ExportStrategy, ReplicationScheme, SourceKind};

/// Inclusive `YYYYMMDD` bounds for the `range` scheme.
#[derive(Debug, Clone)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// A validated replication source, ready to run.
#[derive(Debug, Clone)]
pub struct Source {
    /// Source role (`daily` or `intraday`).
    pub kind: SourceKind,
    /// Warehouse table name prefix, e.g. `events_`.
    pub table_prefix: String,
    /// Staging bucket name.
    pub bucket: String,
    /// Path suffix inside the bucket for this source's staging area.
    pub bucket_suffix: String,
    /// File-format suffix used when matching staged objects for cleanup.
    pub file_format: String,
    /// Which dates/tables this source processes.
    pub scheme: ReplicationScheme,
    /// Date bounds; required by `range`, ignored otherwise.
    pub date_range: Option<DateRange>,
    /// Path to this source's load-job template file.
    pub load_template: PathBuf,
}

/// Everything a replication run needs, built once from configuration.
///
/// Sources are ordered daily before intraday; the orchestrator processes
/// them strictly in sequence.
#[derive(Debug, Clone)]
pub struct ReplicationPlan {
    /// Warehouse project identifier.
    pub project: String,
    /// Dataset/schema holding the source tables.
    pub dataset: String,
    /// IANA timezone name used to compute date keys.
    pub timezone: String,
    /// Run-level export strategy.
    pub strategy: ExportStrategy,
    pub sources: Vec<Source>,
}

impl ReplicationPlan {
    /// Look up a configured source by role.
    pub fn source(&self, kind: SourceKind) -> Option<&Source> {
        self.sources.iter().find(|s| s.kind == kind)
    }
}
