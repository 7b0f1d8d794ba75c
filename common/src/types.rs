//! クリニックデータの型定義
//!
//! CLI(ネイティブ)とWeb(WASM)で共有される型:
//! - RawRow: CSVの1行（ヘッダー名 → セル文字列）
//! - ClinicRecord: 正規化済みのクリニック
//! - DistrictBoundary / BoundaryCollection: 郡境界ポリゴン

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CSV列名
pub const FIELD_FACILITY_ID: &str = "FacilityID";
pub const FIELD_NAME: &str = "Facility Name (DHIS2)";
pub const FIELD_DISTRICT: &str = "District Name";
pub const FIELD_PROVINCE: &str = "Province Name";
pub const FIELD_FACILITY_TYPE: &str = "Facility Type";
pub const FIELD_LATITUDE: &str = "Latitude";
pub const FIELD_LONGITUDE: &str = "Longitude";

/// 境界GeoJSONの郡名プロパティ
pub const PROPERTY_DISTRICT_NAME: &str = "adm2_name";

/// CSVの1行（ヘッダー名をそのままキーにする）
pub type RawRow = BTreeMap<String, String>;

/// 緯度経度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// 正規化済みクリニック
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicRecord {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub district: Option<String>,       // 郡

    #[serde(default)]
    pub province: Option<String>,       // 州

    #[serde(default)]
    pub facility_type: Option<String>,  // 施設種別

    pub latitude: f64,
    pub longitude: f64,

    /// 上記以外の列（詳細ページのみで参照）
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl ClinicRecord {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.latitude, self.longitude)
    }

    /// "District • Province" 形式のサブタイトル
    pub fn location_label(&self, separator: &str) -> String {
        format!(
            "{}{}{}",
            self.district.as_deref().unwrap_or_default(),
            separator,
            self.province.as_deref().unwrap_or_default(),
        )
    }
}

/// 郡境界（GeoJSON Feature）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictBoundary {
    /// adm2_name（無い場合はラベルなし）
    pub name: Option<String>,
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub geometry: serde_json::Value,
}

/// 郡境界のFeatureCollection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCollection {
    pub features: Vec<DistrictBoundary>,
}

impl BoundaryCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// 地図描画用にGeoJSONへ戻す
    pub fn to_geojson(&self) -> serde_json::Value {
        let features: Vec<serde_json::Value> = self
            .features
            .iter()
            .map(|f| {
                serde_json::json!({
                    "type": "Feature",
                    "properties": f.properties,
                    "geometry": f.geometry,
                })
            })
            .collect();

        serde_json::json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}
