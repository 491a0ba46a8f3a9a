use thiserror::Error;

#[derive(Debug, Error)]
pub enum BioqueryError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BioqueryError>;
