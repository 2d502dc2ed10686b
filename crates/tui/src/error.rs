use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Fatal application errors. Network failures never appear here: the API
/// client classifies every transport outcome into a `RequestOutcome` instead
/// of erroring past its boundary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential file error: {0}")]
    CredentialFile(#[from] serde_json::Error),
    #[error("terminal error: {0}")]
    Terminal(String),
}
