use thiserror::Error;

#[derive(Error, Debug)]
pub enum IssueLensError {
    #[error("Jira API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Jira API error (status {status}) after {retries} retries")]
    ApiErrorAfterRetries { status: u16, retries: u32 },

    #[error("Malformed issue {key}: {reason}")]
    MalformedRecord { key: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IssueLensError {
    pub fn malformed(key: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IssueLensError>;
