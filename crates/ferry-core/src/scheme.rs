use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Policy selecting which dates/tables a source processes on a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicationScheme {
    /// One table for the current date key.
    Today,
    /// One table per day in an inclusive date range.
    Range,
    /// Every catalog table carrying the source's prefix.
    AllTime,
}

impl FromStr for ReplicationScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "today" => Ok(ReplicationScheme::Today),
            "range" => Ok(ReplicationScheme::Range),
            "all-time" => Ok(ReplicationScheme::AllTime),
            _ => Err(Error::UnknownScheme {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ReplicationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReplicationScheme::Today => "today",
            ReplicationScheme::Range => "range",
            ReplicationScheme::AllTime => "all-time",
        };
        f.write_str(s)
    }
}

/// Run-level export strategy.
///
/// `daily+streaming` couples the daily batch source's completion to cleanup
/// of the intraday source's overlapping staging data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStrategy {
    Plain,
    DailyStreaming,
}

impl FromStr for ExportStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "plain" => Ok(ExportStrategy::Plain),
            "daily+streaming" => Ok(ExportStrategy::DailyStreaming),
            _ => Err(Error::UnknownStrategy {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExportStrategy::Plain => "plain",
            ExportStrategy::DailyStreaming => "daily+streaming",
        };
        f.write_str(s)
    }
}

/// The fixed set of source roles a run can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Batch source, one finalized table per day.
    Daily,
    /// Incremental source, a partial table for the current day.
    Intraday,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Daily => "daily",
            SourceKind::Intraday => "intraday",
        }
    }
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "daily" => Ok(SourceKind::Daily),
            "intraday" => Ok(SourceKind::Intraday),
            _ => Err(Error::UnknownSourceKind {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
