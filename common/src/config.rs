//! ダッシュボード設定
//!
//! データソースURLと地図・選択動作の定数。JSONで一部だけ上書きできる。

use crate::types::LatLon;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CLINICS_CSV_URL: &str =
    "https://raw.githubusercontent.com/rahimiabdulrahmanab/Clinics-Dashboard/main/Afghanistan%20Clinics.csv";
pub const BOUNDARIES_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/rahimiabdulrahmanab/ShapeFile_Project/main/afg_admin2.geojson";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    pub clinics_url: String,
    pub boundaries_url: String,
    /// 初期表示の中心（カブール）
    pub initial_center: LatLon,
    pub initial_zoom: u8,
    pub min_zoom: u8,
    /// 選択時のズーム
    pub fly_zoom: u8,
    pub fly_duration_ms: u64,
    /// リスト選択後にポップアップを開くまでの待ち
    pub list_popup_delay_ms: u64,
    /// マーカー選択後にポップアップを開くまでの待ち
    pub map_popup_delay_ms: u64,
    /// 郡名ラベルを表示する最小ズーム
    pub label_min_zoom: u8,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            clinics_url: CLINICS_CSV_URL.into(),
            boundaries_url: BOUNDARIES_GEOJSON_URL.into(),
            initial_center: LatLon::new(34.5, 69.2),
            initial_zoom: 6,
            min_zoom: 5,
            fly_zoom: 10,
            fly_duration_ms: 800,
            list_popup_delay_ms: 700,
            map_popup_delay_ms: 250,
            label_min_zoom: 8,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn list_popup_delay(&self) -> Duration {
        Duration::from_millis(self.list_popup_delay_ms)
    }

    pub fn map_popup_delay(&self) -> Duration {
        Duration::from_millis(self.map_popup_delay_ms)
    }

    /// 郡名ラベルを出すズームか
    pub fn labels_visible_at(&self, zoom: u8) -> bool {
        zoom >= self.label_min_zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = DashboardConfig::default();
        assert_eq!(config.fly_zoom, 10);
        assert_eq!(config.list_popup_delay(), Duration::from_millis(700));
        assert_eq!(config.map_popup_delay(), Duration::from_millis(250));
        assert!(config.clinics_url.ends_with("Afghanistan%20Clinics.csv"));
    }

    #[test]
    fn test_partial_override_from_json() {
        let config = DashboardConfig::from_json(r#"{"flyZoom": 12, "clinicsUrl": "http://localhost/c.csv"}"#)
            .expect("設定パース失敗");
        assert_eq!(config.fly_zoom, 12);
        assert_eq!(config.clinics_url, "http://localhost/c.csv");
        assert_eq!(config.initial_zoom, 6);
    }

    #[test]
    fn test_labels_visible_at() {
        let config = DashboardConfig::default();
        assert!(!config.labels_visible_at(7));
        assert!(config.labels_visible_at(8));
    }
}
