use std::str::FromStr;

use ferry_core::dates;
use ferry_core::{
    DateRange, ExportStrategy, ReplicationPlan, ReplicationScheme, Source, SourceKind,
};

use crate::error::{ConfigError, ConfigResult};
use crate::replication::{ReplicationConfig, SourceConfig};

/// Convert a raw config into a validated run plan.
///
/// Every closed-set string (strategy, scheme, source names) and every date
/// bound is checked here, so a bad config aborts the run before any side
/// effect. Sources come out ordered daily before intraday.
pub fn to_plan(config: &ReplicationConfig) -> ConfigResult<ReplicationPlan> {
    if config.sources.is_empty() {
        return Err(ConfigError::NoSources);
    }

    for name in config.sources.keys() {
        if SourceKind::from_str(name).is_err() {
            return Err(ConfigError::UnknownSourceName(name.clone()));
        }
    }

    let strategy = ExportStrategy::from_str(&config.export_strategy)?;

    // The daily+streaming reconciliation step needs both sources' staging
    // settings, so both roles must be configured up front.
    if strategy == ExportStrategy::DailyStreaming {
        for kind in [SourceKind::Daily, SourceKind::Intraday] {
            if !config.sources.contains_key(kind.as_str()) {
                return Err(ConfigError::MissingSource {
                    kind: kind.as_str().to_string(),
                    strategy: strategy.to_string(),
                });
            }
        }
    }

    let mut sources = Vec::new();
    for kind in [SourceKind::Daily, SourceKind::Intraday] {
        if let Some(raw) = config.sources.get(kind.as_str()) {
            sources.push(to_source(config, kind, raw)?);
        }
    }

    Ok(ReplicationPlan {
        project: config.resolve_env(&config.project),
        dataset: config.dataset.clone(),
        timezone: config.timezone.clone(),
        strategy,
        sources,
    })
}

fn to_source(
    config: &ReplicationConfig,
    kind: SourceKind,
    raw: &SourceConfig,
) -> ConfigResult<Source> {
    let scheme =
        ReplicationScheme::from_str(&raw.replication_scheme).map_err(|e| invalid(kind, e))?;

    let date_range = validate_date_range(kind, scheme, raw)?;

    Ok(Source {
        kind,
        table_prefix: raw.table_prefix.clone(),
        bucket: config.resolve_env(&raw.bucket),
        bucket_suffix: raw.bucket_suffix.clone(),
        file_format: raw.file_format.clone(),
        scheme,
        date_range,
        load_template: raw.load_template.clone(),
    })
}

fn validate_date_range(
    kind: SourceKind,
    scheme: ReplicationScheme,
    raw: &SourceConfig,
) -> ConfigResult<Option<DateRange>> {
    // Bounds are ignored outside the `range` scheme.
    if scheme != ReplicationScheme::Range {
        return Ok(None);
    }

    let (start, end) = match (&raw.date_range_start, &raw.date_range_end) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(invalid(kind, ferry_core::Error::MissingDateRange)),
    };

    let start_date =
        dates::parse_date_key("date_range_start", start).map_err(|e| invalid(kind, e))?;
    let end_date = dates::parse_date_key("date_range_end", end).map_err(|e| invalid(kind, e))?;

    if end_date < start_date {
        return Err(ConfigError::ReversedDateRange {
            kind: kind.to_string(),
            start: start.clone(),
            end: end.clone(),
        });
    }

    Ok(Some(DateRange {
        start: start.clone(),
        end: end.clone(),
    }))
}

fn invalid(kind: SourceKind, err: ferry_core::Error) -> ConfigError {
    ConfigError::InvalidSource {
        kind: kind.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replication::ReplicationConfig;

    fn plan_from(toml: &str) -> ConfigResult<ReplicationPlan> {
        let config = ReplicationConfig::parse(toml)?;
        to_plan(&config)
    }

    #[test]
    fn test_to_plan_orders_daily_before_intraday() {
        let plan = plan_from(
            r#"
project = "p"
dataset = "d"

[sources.intraday]
table_prefix = "events_intraday_"
bucket = "b"
bucket_suffix = "exports/intraday"
replication_scheme = "today"
load_template = "loads/intraday.toml"

[sources.daily]
table_prefix = "events_"
bucket = "b"
bucket_suffix = "exports/daily"
replication_scheme = "today"
load_template = "loads/daily.toml"
"#,
        )
        .unwrap();

        let kinds: Vec<_> = plan.sources.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SourceKind::Daily, SourceKind::Intraday]);
        assert!(plan.source(SourceKind::Intraday).is_some());
    }

    #[test]
    fn test_to_plan_unknown_scheme_lists_valid_set() {
        let err = plan_from(
            r#"
project = "p"
dataset = "d"

[sources.daily]
table_prefix = "events_"
bucket = "b"
bucket_suffix = "exports"
replication_scheme = "weekly"
load_template = "loads/daily.toml"
"#,
        )
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("daily"));
        assert!(msg.contains("today, range, all-time"));
    }

    #[test]
    fn test_to_plan_range_requires_both_bounds() {
        let err = plan_from(
            r#"
project = "p"
dataset = "d"

[sources.daily]
table_prefix = "events_"
bucket = "b"
bucket_suffix = "exports"
replication_scheme = "range"
date_range_start = "20230101"
load_template = "loads/daily.toml"
"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidSource { .. }));
        assert!(err.to_string().contains("date_range_end"));
    }

    #[test]
    fn test_to_plan_rejects_reversed_range() {
        let err = plan_from(
            r#"
project = "p"
dataset = "d"

[sources.daily]
table_prefix = "events_"
bucket = "b"
bucket_suffix = "exports"
replication_scheme = "range"
date_range_start = "20230105"
date_range_end = "20230101"
load_template = "loads/daily.toml"
"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::ReversedDateRange { .. }));
    }

    #[test]
    fn test_to_plan_rejects_malformed_bound() {
        let err = plan_from(
            r#"
project = "p"
dataset = "d"

[sources.daily]
table_prefix = "events_"
bucket = "b"
bucket_suffix = "exports"
replication_scheme = "range"
date_range_start = "2023-01-01"
date_range_end = "20230105"
load_template = "loads/daily.toml"
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("YYYYMMDD"));
    }

    #[test]
    fn test_to_plan_ignores_bounds_outside_range_scheme() {
        let plan = plan_from(
            r#"
project = "p"
dataset = "d"

[sources.daily]
table_prefix = "events_"
bucket = "b"
bucket_suffix = "exports"
replication_scheme = "today"
date_range_start = "not-a-date"
date_range_end = "also-not"
load_template = "loads/daily.toml"
"#,
        )
        .unwrap();

        assert!(plan.sources[0].date_range.is_none());
    }

    #[test]
    fn test_to_plan_daily_streaming_requires_both_sources() {
        let err = plan_from(
            r#"
project = "p"
dataset = "d"
export_strategy = "daily+streaming"

[sources.daily]
table_prefix = "events_"
bucket = "b"
bucket_suffix = "exports"
replication_scheme = "today"
load_template = "loads/daily.toml"
"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingSource { .. }));
        assert!(err.to_string().contains("intraday"));
    }

    #[test]
    fn test_to_plan_unknown_strategy() {
        let err = plan_from(
            r#"
project = "p"
dataset = "d"
export_strategy = "batch"

[sources.daily]
table_prefix = "events_"
bucket = "b"
bucket_suffix = "exports"
replication_scheme = "today"
load_template = "loads/daily.toml"
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("plain, daily+streaming"));
    }

    #[test]
    fn test_to_plan_unknown_source_name() {
        let err = plan_from(
            r#"
project = "p"
dataset = "d"

[sources.hourly]
table_prefix = "events_"
bucket = "b"
bucket_suffix = "exports"
replication_scheme = "today"
load_template = "loads/hourly.toml"
"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::UnknownSourceName(_)));
    }
}
