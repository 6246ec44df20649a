use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A filter bound that is neither empty nor a valid `DD/MM/YYYY` date.
    #[error("invalid filter date '{0}', expected DD/MM/YYYY")]
    InvalidFilterDate(String),

    #[error("day {0} is outside the month (expected 1 or more)")]
    DayOutOfRange(i64),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
