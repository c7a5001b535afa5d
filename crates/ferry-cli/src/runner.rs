use std::fs;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::{info, warn};

use ferry_config::parse_template;
use ferry_core::{dates, policy, selector, staging};
use ferry_core::{ReplicationPlan, ReplicationScheme, Source, SourceKind};
use ferry_loader::{dispatch_load, Loader};
use ferry_staging::{clear_directory, list_matching, StagingStore};
use ferry_warehouse::{export_to_staging, Warehouse};

/// Which configured sources a run processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceSelection {
    Daily,
    Intraday,
    Both,
}

impl SourceSelection {
    pub fn includes(self, kind: SourceKind) -> bool {
        match self {
            SourceSelection::Daily => kind == SourceKind::Daily,
            SourceSelection::Intraday => kind == SourceKind::Intraday,
            SourceSelection::Both => true,
        }
    }
}

/// Run the replication pipeline for every selected source.
///
/// Sources run strictly in sequence (daily before intraday), tables within a
/// source in order, loads per staged object in listing order. Export and
/// load failures terminate the run; an empty staging listing is an expected
/// state and is only logged.
pub async fn run_replication<W, S, L>(
    plan: &ReplicationPlan,
    selection: SourceSelection,
    warehouse: &W,
    staging_store: &S,
    loader: &L,
) -> Result<()>
where
    W: Warehouse,
    S: StagingStore,
    L: Loader,
{
    for source in plan.sources.iter().filter(|s| selection.includes(s.kind)) {
        run_source(plan, source, warehouse, staging_store, loader).await?;
    }

    Ok(())
}

/// Select the tables a source processes, fetching the catalog fresh when the
/// scheme needs it.
pub async fn select_for_source<W: Warehouse>(
    plan: &ReplicationPlan,
    source: &Source,
    warehouse: &W,
) -> Result<Vec<String>> {
    let catalog = if source.scheme == ReplicationScheme::AllTime {
        let tables = warehouse
            .list_tables(&plan.project, &plan.dataset)
            .await
            .context("Failed to list dataset tables")?;
        Some(tables)
    } else {
        None
    };

    let today = dates::today_key(&plan.timezone, source.kind);
    let tables = selector::select_tables(source, &today, catalog.as_deref())?;
    Ok(tables)
}

async fn run_source<W, S, L>(
    plan: &ReplicationPlan,
    source: &Source,
    warehouse: &W,
    staging_store: &S,
    loader: &L,
) -> Result<()>
where
    W: Warehouse,
    S: StagingStore,
    L: Loader,
{
    info!(source = %source.kind, scheme = %source.scheme, "Processing source");

    let template_str = fs::read_to_string(&source.load_template).with_context(|| {
        format!(
            "Failed to read load template: {}",
            source.load_template.display()
        )
    })?;
    let template = parse_template(&template_str).with_context(|| {
        format!(
            "Failed to parse load template: {}",
            source.load_template.display()
        )
    })?;

    let tables = select_for_source(plan, source, warehouse).await?;
    info!(source = %source.kind, count = tables.len(), "Selected tables");

    let destination_prefix = staging::staging_uri(&source.bucket, &source.bucket_suffix);

    for table in &tables {
        // Clear shards left behind by a previous run of this table so the
        // export lands in a clean directory.
        let table_dir = staging::table_directory(&source.bucket_suffix, table);
        match clear_directory(staging_store, &source.bucket, &table_dir, &source.file_format).await
        {
            Ok(count) => info!(table = table.as_str(), count, "Cleared stale staging shards"),
            Err(e) if e.is_no_match() => {
                info!(table = table.as_str(), "No stale staging shards")
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to clear staging for table {}", table))
            }
        }

        export_to_staging(
            warehouse,
            &plan.project,
            &plan.dataset,
            table,
            &destination_prefix,
        )
        .await
        .with_context(|| format!("Export failed for table {}", table))?;
    }

    // The load step always consumes .json shards, matching the export job's
    // hardcoded destination format.
    let objects = match list_matching(staging_store, &source.bucket, &source.bucket_suffix, "json")
        .await
    {
        Ok(keys) => keys,
        Err(e) if e.is_no_match() => {
            info!(source = %source.kind, "No staged objects to load");
            Vec::new()
        }
        Err(e) => return Err(e).context("Failed to list staged objects"),
    };

    for (index, key) in objects.iter().enumerate() {
        let uri = staging::object_uri(&source.bucket, key);
        let mode_override = policy::load_mode_for(source.kind, index);

        dispatch_load(loader, &template, &uri, mode_override)
            .await
            .with_context(|| format!("Load failed for {}", uri))?;
    }

    if policy::should_reconcile(source.kind, source.scheme, plan.strategy) {
        reconcile_intraday_staging(plan, source, staging_store, &tables).await?;
    }

    info!(source = %source.kind, "Source complete");
    Ok(())
}

/// Once the day's batch table has loaded, both the daily staging area and
/// the intraday staging directory covering the same day are stale: clear
/// them so the next intraday cycle starts clean.
async fn reconcile_intraday_staging<S: StagingStore>(
    plan: &ReplicationPlan,
    daily: &Source,
    staging_store: &S,
    daily_tables: &[String],
) -> Result<()> {
    match clear_directory(
        staging_store,
        &daily.bucket,
        &daily.bucket_suffix,
        &daily.file_format,
    )
    .await
    {
        Ok(count) => info!(count, "Cleared daily staging area"),
        Err(e) if e.is_no_match() => info!("Daily staging area already empty"),
        Err(e) => return Err(e).context("Failed to clear daily staging area"),
    }

    let intraday = match plan.source(SourceKind::Intraday) {
        Some(intraday) => intraday,
        None => {
            warn!("No intraday source configured; skipping intraday reconciliation");
            return Ok(());
        }
    };

    let first_table = match daily_tables.first() {
        Some(table) => table,
        None => return Ok(()),
    };

    let intraday_table =
        match staging::substitute_prefix(first_table, &daily.table_prefix, &intraday.table_prefix)
        {
            Some(table) => table,
            None => {
                warn!(
                    table = first_table.as_str(),
                    "Daily table does not carry the daily prefix; skipping intraday reconciliation"
                );
                return Ok(());
            }
        };

    let intraday_dir = staging::table_directory(&intraday.bucket_suffix, &intraday_table);
    match clear_directory(
        staging_store,
        &intraday.bucket,
        &intraday_dir,
        &intraday.file_format,
    )
    .await
    {
        Ok(count) => info!(
            directory = intraday_dir.as_str(),
            count, "Cleared stale intraday staging"
        ),
        Err(e) if e.is_no_match() => {
            info!(directory = intraday_dir.as_str(), "No stale intraday staging")
        }
        Err(e) => return Err(e).context("Failed to clear intraday staging"),
    }

    Ok(())
}
