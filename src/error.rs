use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClinicMapError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTPステータス異常: {status} ({url})")]
    HttpStatus { status: u16, url: String },

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tokioランタイムがありません: {0}")]
    Runtime(String),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] clinic_map_common::Error),
}

pub type Result<T> = std::result::Result<T, ClinicMapError>;
