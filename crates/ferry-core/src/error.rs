use thiserror::Error;

/// Errors that can occur in ferry-core.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid date '{value}' for {field}: expected YYYYMMDD")]
    InvalidDateFormat { field: &'static str, value: String },

    #[error("unknown replication scheme '{value}': expected one of today, range, all-time")]
    UnknownScheme { value: String },

    #[error("unknown export strategy '{value}': expected one of plain, daily+streaming")]
    UnknownStrategy { value: String },

    #[error("unknown source kind '{value}': expected one of daily, intraday")]
    UnknownSourceKind { value: String },

    #[error("scheme 'range' requires both date_range_start and date_range_end")]
    MissingDateRange,
}

pub type Result<T> = std::result::Result<T, Error>;
