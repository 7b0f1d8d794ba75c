//! データ取得

pub mod fetch;
