use crate::dates;
use crate::error::{Error, Result};
use crate::plan::Source;
use crate::scheme::ReplicationScheme;

/// Compute the ordered list of tables a source replicates this run.
///
/// `today` is the source's precomputed date key (see [`dates::today_key`]).
/// `catalog` is the warehouse table listing for the configured dataset; the
/// `all-time` scheme selects its prefix-matching entries in catalog order
/// and the date schemes ignore it.
pub fn select_tables(
    source: &Source,
    today: &str,
    catalog: Option<&[String]>,
) -> Result<Vec<String>> {
    match source.scheme {
        ReplicationScheme::Today => Ok(vec![format!("{}{}", source.table_prefix, today)]),
        ReplicationScheme::Range => {
            let range = source.date_range.as_ref().ok_or(Error::MissingDateRange)?;
            let keys = dates::date_range(&range.start, &range.end)?;
            Ok(keys
                .into_iter()
                .map(|key| format!("{}{}", source.table_prefix, key))
                .collect())
        }
        ReplicationScheme::AllTime => Ok(catalog
            .unwrap_or_default()
            .iter()
            .filter(|table| table.starts_with(&source.table_prefix))
            .cloned()
            .collect()),
    }
}
