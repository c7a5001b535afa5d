//! Pure helpers for staging paths and object-key filtering.

/// The staging area URI for a bucket and path suffix, e.g. `gs://b/s`.
pub fn staging_uri(bucket: &str, suffix: &str) -> String {
    format!("gs://{}/{}", bucket, suffix)
}

/// The full URI for one staged object key.
pub fn object_uri(bucket: &str, key: &str) -> String {
    format!("gs://{}/{}", bucket, key)
}

/// The staging directory key holding one table's shards.
pub fn table_directory(suffix: &str, table: &str) -> String {
    format!("{}/{}", suffix, table)
}

/// Filter object keys to those ending in `.format`.
pub fn filter_by_format(keys: &[String], format: &str) -> Vec<String> {
    let suffix = format!(".{}", format);
    keys.iter()
        .filter(|key| key.ends_with(&suffix))
        .cloned()
        .collect()
}

/// Swap a table name onto another prefix, e.g. the daily table
/// `events_20230415` onto the intraday prefix `events_intraday_`.
/// `None` when the name does not start with `from`.
pub fn substitute_prefix(table: &str, from: &str, to: &str) -> Option<String> {
    table
        .strip_prefix(from)
        .map(|rest| format!("{}{}", to, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_uri() {
        assert_eq!(staging_uri("b", "s"), "gs://b/s");
        assert_eq!(
            staging_uri("my-bucket", "exports/daily"),
            "gs://my-bucket/exports/daily"
        );
    }

    #[test]
    fn test_table_directory() {
        assert_eq!(
            table_directory("exports/daily", "events_20230415"),
            "exports/daily/events_20230415"
        );
    }

    #[test]
    fn test_filter_by_format_keeps_matching_suffix() {
        let keys = vec![
            "f1.json".to_string(),
            "f2.json".to_string(),
            "f3.txt".to_string(),
        ];
        assert_eq!(filter_by_format(&keys, "json"), vec!["f1.json", "f2.json"]);
    }

    #[test]
    fn test_filter_by_format_requires_exact_suffix() {
        let keys = vec!["a.json.bak".to_string(), "b.njson".to_string()];
        assert!(filter_by_format(&keys, "json").is_empty());
    }

    #[test]
    fn test_substitute_prefix() {
        assert_eq!(
            substitute_prefix("events_20230415", "events_", "events_intraday_"),
            Some("events_intraday_20230415".to_string())
        );
        assert_eq!(
            substitute_prefix("other_20230415", "events_", "events_intraday_"),
            None
        );
    }
}
