//! データソースパーサー
//!
//! クリニックCSVと郡境界GeoJSONの本文をパースする。
//! 行単位の不正（列不足・座標なし等）はここでは弾かず、正規化に任せる。

use crate::error::{Error, Result};
use crate::types::{BoundaryCollection, DistrictBoundary, RawRow, PROPERTY_DISTRICT_NAME};

/// クリニックCSVをヘッダー名キーの行に変換
///
/// - 列数が不揃いの行もそのまま通す（不足列はキーなし、余剰列は捨てる）
/// - 空行はスキップ
///
/// # Errors
/// ヘッダー行が読めない場合のみエラー
///
/// # Examples
/// ```
/// use clinic_map_common::parse_clinic_csv;
///
/// let rows = parse_clinic_csv("FacilityID,Latitude\n7,34.5\n").unwrap();
/// assert_eq!(rows[0]["FacilityID"], "7");
/// ```
pub fn parse_clinic_csv(text: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.trim_start_matches('\u{feff}').as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in reader.records() {
        // 壊れた行（不正なUTF-8等）も空行として正規化側に渡す
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("unreadable CSV row passed through as empty: {}", e);
                rows.push(RawRow::new());
                continue;
            }
        };

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// 郡境界GeoJSONをパース
///
/// featureごとのバリデーションは行わない。adm2_nameが無いfeatureは名前なし。
pub fn parse_boundaries(text: &str) -> Result<BoundaryCollection> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    let features = value
        .get("features")
        .and_then(|f| f.as_array())
        .ok_or_else(|| Error::InvalidBoundaries("features 配列がありません".into()))?;

    let features = features
        .iter()
        .map(|feature| {
            let properties = feature
                .get("properties")
                .and_then(|p| p.as_object())
                .cloned()
                .unwrap_or_default();
            let name = properties
                .get(PROPERTY_DISTRICT_NAME)
                .and_then(|n| n.as_str())
                .filter(|n| !n.is_empty())
                .map(str::to_string);
            let geometry = feature
                .get("geometry")
                .cloned()
                .unwrap_or(serde_json::Value::Null);

            DistrictBoundary { name, properties, geometry }
        })
        .collect();

    Ok(BoundaryCollection { features })
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // parse_clinic_csv テスト
    // =============================================

    #[test]
    fn test_parse_clinic_csv_keys_by_header() {
        let csv = "FacilityID,Facility Name (DHIS2),Latitude,Longitude\n\
                   101,Alpha BHC,34.5,69.2\n\
                   102,Beta CHC,35.0,70.0\n";
        let rows = parse_clinic_csv(csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Facility Name (DHIS2)"], "Alpha BHC");
        assert_eq!(rows[1]["FacilityID"], "102");
        assert_eq!(rows[1]["Longitude"], "70.0");
    }

    #[test]
    fn test_parse_clinic_csv_quoted_fields() {
        let csv = "Facility Name (DHIS2),District Name\n\"Clinic, North\",\"Kabul\"\n";
        let rows = parse_clinic_csv(csv).unwrap();
        assert_eq!(rows[0]["Facility Name (DHIS2)"], "Clinic, North");
    }

    #[test]
    fn test_parse_clinic_csv_short_row_passes_through() {
        let csv = "Facility Name (DHIS2),Latitude,Longitude\nShort Clinic,34.1\n";
        let rows = parse_clinic_csv(csv).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Latitude"], "34.1");
        assert!(rows[0].get("Longitude").is_none());
    }

    #[test]
    fn test_parse_clinic_csv_skips_blank_lines() {
        let csv = "Facility Name (DHIS2),Latitude\nA,34.0\n,\n\nB,35.0\n";
        let rows = parse_clinic_csv(csv).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_clinic_csv_strips_bom() {
        let csv = "\u{feff}FacilityID,Latitude\n1,34.0\n";
        let rows = parse_clinic_csv(csv).unwrap();
        assert!(rows[0].contains_key("FacilityID"));
    }

    #[test]
    fn test_parse_clinic_csv_header_only() {
        let rows = parse_clinic_csv("FacilityID,Latitude\n").unwrap();
        assert!(rows.is_empty());
    }

    // =============================================
    // parse_boundaries テスト
    // =============================================

    #[test]
    fn test_parse_boundaries() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"adm2_name": "Bagram"}, "geometry": {"type": "Polygon", "coordinates": []}},
                {"type": "Feature", "properties": {}, "geometry": null}
            ]
        }"#;
        let collection = parse_boundaries(json).unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.features[0].name.as_deref(), Some("Bagram"));
        assert_eq!(collection.features[1].name, None);
    }

    #[test]
    fn test_parse_boundaries_missing_features() {
        let result = parse_boundaries(r#"{"type": "Feature"}"#);
        assert!(matches!(result, Err(Error::InvalidBoundaries(_))));
    }

    #[test]
    fn test_parse_boundaries_invalid_json() {
        let result = parse_boundaries("<html>404</html>");
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
