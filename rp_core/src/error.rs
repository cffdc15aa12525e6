/// Core error type for redpool
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid metric name: {0}")]
    InvalidMetricName(String),

    #[error("Duplicate metric: {0}")]
    DuplicateMetric(String),

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Registry error: {0}")]
    Registry(String),
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
