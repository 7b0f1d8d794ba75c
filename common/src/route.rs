//! 画面ルート
//!
//! `/` ダッシュボード、`/clinic/:id` クリニック詳細の2画面。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Dashboard,
    ClinicDetail { id: String },
}

impl Route {
    pub fn clinic(id: impl Into<String>) -> Self {
        Route::ClinicDetail { id: id.into() }
    }

    /// パス文字列から解釈（ハッシュ "#/clinic/7" も可）。未知のパスはダッシュボード
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_start_matches('#');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["clinic", id] => Route::ClinicDetail { id: decode_segment(id) },
            _ => Route::Dashboard,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::ClinicDetail { id } => format!("/clinic/{}", encode_segment(id)),
        }
    }
}

/// パス区切りと%だけをエスケープする
fn encode_segment(value: &str) -> String {
    value.replace('%', "%25").replace('/', "%2F").replace('#', "%23")
}

fn decode_segment(value: &str) -> String {
    value.replace("%2F", "/").replace("%23", "#").replace("%25", "%")
}
