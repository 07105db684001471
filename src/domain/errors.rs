use derive_more::Display;

/// Flat error set for the dashboard core. Each variant carries a human readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum AppError {
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "Parse Error: {}", _0)]
    Parse(String),
    #[display(fmt = "Storage Error: {}", _0)]
    Storage(String),
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(String),
    #[display(fmt = "Config Error: {}", _0)]
    Config(String),
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Parse(error.to_string())
    }
}

pub type FeedResult<T> = Result<T, AppError>;
pub type StorageResult<T> = Result<T, AppError>;
