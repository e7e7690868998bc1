pub mod config;
pub use config::{Config, DataConfig, DisplayConfig, ExportConfig, LoggingConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyGridError {
    #[error("invalid filter operation: {0}")]
    InvalidFilterOperation(String),
    #[error("malformed row {id}: {reason}")]
    MalformedRow { id: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SurveyGridError>;
