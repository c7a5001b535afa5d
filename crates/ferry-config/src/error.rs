use thiserror::Error;

/// Errors that can occur when parsing or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no sources configured")]
    NoSources,

    #[error("unknown source name '{0}': expected daily and/or intraday")]
    UnknownSourceName(String),

    #[error("missing source '{kind}': required by the {strategy} export strategy")]
    MissingSource { kind: String, strategy: String },

    #[error("source '{kind}': {message}")]
    InvalidSource { kind: String, message: String },

    #[error("source '{kind}': date_range_end {end} precedes date_range_start {start}")]
    ReversedDateRange {
        kind: String,
        start: String,
        end: String,
    },

    #[error(transparent)]
    Core(#[from] ferry_core::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
