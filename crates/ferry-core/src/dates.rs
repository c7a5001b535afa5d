use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{Error, Result};
use crate::scheme::SourceKind;

/// Date keys are compact calendar dates, e.g. `20230415`.
pub const DATE_KEY_FORMAT: &str = "%Y%m%d";

/// Parse a `YYYYMMDD` date key. `field` names the config field for the error.
pub fn parse_date_key(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_KEY_FORMAT).map_err(|_| Error::InvalidDateFormat {
        field,
        value: value.to_string(),
    })
}

/// The ordered, inclusive sequence of date keys from `start` to `end`.
///
/// A reversed range degenerates to `[start]`; callers get no ordering
/// guarantee beyond non-decreasing in that case.
pub fn date_range(start: &str, end: &str) -> Result<Vec<String>> {
    let start_date = parse_date_key("date_range_start", start)?;
    let end_date = parse_date_key("date_range_end", end)?;

    if end_date < start_date {
        return Ok(vec![start.to_string()]);
    }

    let mut keys = Vec::new();
    let mut day = start_date;
    while day <= end_date {
        keys.push(day.format(DATE_KEY_FORMAT).to_string());
        day += Duration::days(1);
    }

    Ok(keys)
}

/// The date key a source targets right now.
pub fn today_key(timezone: &str, kind: SourceKind) -> String {
    today_key_at(Utc::now(), timezone, kind)
}

/// Clock-injected variant of [`today_key`].
///
/// Daily batch tables cover the previous day, so the daily source shifts the
/// instant back 24 hours before converting to the configured timezone. An
/// unresolvable timezone logs a warning and falls back to UTC rather than
/// failing the run.
pub fn today_key_at(now: DateTime<Utc>, timezone: &str, kind: SourceKind) -> String {
    let instant = match kind {
        SourceKind::Daily => now - Duration::hours(24),
        SourceKind::Intraday => now,
    };

    match timezone.parse::<Tz>() {
        Ok(tz) => instant
            .with_timezone(&tz)
            .format(DATE_KEY_FORMAT)
            .to_string(),
        Err(_) => {
            warn!(timezone, "could not resolve timezone, defaulting to UTC");
            instant.format(DATE_KEY_FORMAT).to_string()
        }
    }
}
