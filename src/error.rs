use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("AI provider API key not configured (set {0})")]
    MissingApiKey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Unexpected AI provider response: {0}")]
    UpstreamShape(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Missing credentials or a broken config file. Never worth retrying.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::MissingApiKey(_) | AppError::Config(_))
    }

    /// Transport failures, non-2xx statuses and malformed envelopes from the provider.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::Http(_) | AppError::UpstreamStatus { .. } | AppError::UpstreamShape(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
