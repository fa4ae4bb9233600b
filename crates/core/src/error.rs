use clsview_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Archive error: {0}")]
    Archive(String),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ClassViewError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ClassViewError::Archive(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassViewError>;
