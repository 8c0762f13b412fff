use shared::error::AppError;
use std::path::PathBuf;
use thiserror::Error;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Content could not be decoded (as opposed to an unreadable file)
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Json(_) | Self::Csv(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::storage(err.to_string())
    }
}
