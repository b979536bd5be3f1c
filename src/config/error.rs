use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("end_date cannot be earlier than start_date")]
    DateOrder,
    #[error("Failed to parse date: {0}")]
    DateParse(#[from] chrono::ParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("samples cannot be empty")]
    NoSamples,
    #[error("sample id '{0}' is used more than once")]
    DuplicateSample(String),
    #[error("sample '{id}' has an invalid position: {source}")]
    SamplePosition {
        id: String,
        source: crate::bbox::BboxError,
    },
}
