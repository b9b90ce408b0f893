use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Top-level application errors. Backend call failures are handled at their
/// call sites as `client::ClientError` and never bubble up here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("terminal error: {0}")]
    Terminal(String),
}
