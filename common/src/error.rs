//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid boundaries: {0}")]
    InvalidBoundaries(String),

    #[error("Load error: {0}")]
    Load(String),
}

impl From<crate::state::LoadFailure> for Error {
    fn from(failure: crate::state::LoadFailure) -> Self {
        Error::Load(failure.detail)
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
