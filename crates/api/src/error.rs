#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unsupported mutation: cannot {operation} on read-only {element}")]
    UnsupportedMutation {
        operation: &'static str,
        element: String,
    },
    #[error("Invalid declaration template: {0}")]
    InvalidTemplate(String),
}

impl ApiError {
    pub fn unsupported(operation: &'static str, element: impl Into<String>) -> Self {
        ApiError::UnsupportedMutation {
            operation,
            element: element.into(),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
