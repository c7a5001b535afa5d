use crate::load::LoadMode;
use crate::scheme::{ExportStrategy, ReplicationScheme, SourceKind};

/// Load-mode override for the object at `index` in a source's load loop.
///
/// The first intraday load of a run replaces the partial table; subsequent
/// intraday loads within the run append. Daily loads always keep the
/// template's own mode.
pub fn load_mode_for(kind: SourceKind, index: usize) -> Option<LoadMode> {
    match (kind, index) {
        (SourceKind::Intraday, 0) => Some(LoadMode::FullRefresh),
        _ => None,
    }
}

/// Whether a completed source triggers cross-source staging reconciliation.
///
/// Once a full day's batch table has been loaded, intraday partial data
/// covering the same day is stale and its staging directory must be purged
/// so the next intraday cycle starts clean.
pub fn should_reconcile(
    kind: SourceKind,
    scheme: ReplicationScheme,
    strategy: ExportStrategy,
) -> bool {
    kind == SourceKind::Daily
        && scheme == ReplicationScheme::Today
        && strategy == ExportStrategy::DailyStreaming
}
