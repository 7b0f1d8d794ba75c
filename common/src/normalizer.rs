//! 正規化モジュール
//!
//! CSVの生行からクリニック一覧を作る。
//!
//! ## 処理フロー
//! 1. 施設名で重複除去（先勝ち、大文字小文字を区別）
//! 2. 座標のパースとアフガニスタン範囲チェック
//! 3. ID採番（FacilityID、無ければ元の行番号）。発行済みのIDと衝突したら `-行番号` を付けて一意にする

use crate::types::{
    ClinicRecord, RawRow, FIELD_DISTRICT, FIELD_FACILITY_ID, FIELD_FACILITY_TYPE,
    FIELD_LATITUDE, FIELD_LONGITUDE, FIELD_NAME, FIELD_PROVINCE,
};
use std::collections::{BTreeMap, HashSet};

/// アフガニスタンの緯度範囲（両端を含む）
pub const LAT_RANGE: (f64, f64) = (29.0, 39.5);
/// アフガニスタンの経度範囲（両端を含む）
pub const LON_RANGE: (f64, f64) = (60.5, 74.9);

const KNOWN_FIELDS: &[&str] = &[
    FIELD_FACILITY_ID,
    FIELD_NAME,
    FIELD_DISTRICT,
    FIELD_PROVINCE,
    FIELD_FACILITY_TYPE,
    FIELD_LATITUDE,
    FIELD_LONGITUDE,
];

/// 正規化の統計情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationStats {
    /// 入力行数
    pub total_rows: usize,
    /// 施設名なしで除外
    pub missing_name: usize,
    /// 施設名重複で除外
    pub duplicate_name: usize,
    /// 座標不正・範囲外で除外
    pub invalid_coordinates: usize,
    /// ID衝突で別IDを振った件数
    pub renamed_id: usize,
    /// 採用件数
    pub retained: usize,
}

/// 座標がバウンディングボックス内か
pub fn in_bounds(lat: f64, lon: f64) -> bool {
    lat >= LAT_RANGE.0 && lat <= LAT_RANGE.1 && lon >= LON_RANGE.0 && lon <= LON_RANGE.1
}

/// 座標文字列をパース（前後の空白は無視、NaN/∞は不可）
pub fn parse_coordinate(value: Option<&String>) -> Option<f64> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// 生行を正規化する
pub fn normalize(rows: &[RawRow]) -> Vec<ClinicRecord> {
    normalize_with_stats(rows).0
}

/// 生行を正規化し、除外理由ごとの件数も返す
pub fn normalize_with_stats(rows: &[RawRow]) -> (Vec<ClinicRecord>, NormalizationStats) {
    let mut stats = NormalizationStats {
        total_rows: rows.len(),
        ..Default::default()
    };
    let mut seen: HashSet<&str> = HashSet::new();
    let mut issued: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let name = match non_empty(row, FIELD_NAME) {
            Some(n) => n,
            None => {
                stats.missing_name += 1;
                continue;
            }
        };

        // 座標チェックより先に名前を登録する（先頭行が座標不正でも名前は使用済み）
        if !seen.insert(name) {
            stats.duplicate_name += 1;
            continue;
        }

        let lat = parse_coordinate(row.get(FIELD_LATITUDE));
        let lon = parse_coordinate(row.get(FIELD_LONGITUDE));
        let (latitude, longitude) = match (lat, lon) {
            (Some(lat), Some(lon)) if in_bounds(lat, lon) => (lat, lon),
            _ => {
                stats.invalid_coordinates += 1;
                continue;
            }
        };

        let base_id = non_empty(row, FIELD_FACILITY_ID)
            .map(|id| id.trim().to_string())
            .unwrap_or_else(|| index.to_string());
        let id = unique_id(&issued, &base_id, index);
        if id != base_id {
            stats.renamed_id += 1;
            tracing::debug!(id = %id, row = index, "clinic id collided; renamed");
        }
        issued.insert(id.clone());

        let extra: BTreeMap<String, String> = row
            .iter()
            .filter(|(k, _)| !KNOWN_FIELDS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        records.push(ClinicRecord {
            id,
            name: name.to_string(),
            district: non_empty(row, FIELD_DISTRICT).map(str::to_string),
            province: non_empty(row, FIELD_PROVINCE).map(str::to_string),
            facility_type: non_empty(row, FIELD_FACILITY_TYPE).map(str::to_string),
            latitude,
            longitude,
            extra,
        });
    }

    stats.retained = records.len();
    tracing::debug!(
        total = stats.total_rows,
        retained = stats.retained,
        missing_name = stats.missing_name,
        duplicate_name = stats.duplicate_name,
        renamed_id = stats.renamed_id,
        invalid_coordinates = stats.invalid_coordinates,
        "normalized clinic rows"
    );

    (records, stats)
}

/// 発行済みと重ならないID（`id`, `id-行番号`, `id-行番号-2`, ...の順に試す）
fn unique_id(issued: &HashSet<String>, id: &str, index: usize) -> String {
    if !issued.contains(id) {
        return id.to_string();
    }
    let base = format!("{id}-{index}");
    let mut candidate = base.clone();
    let mut n = 2;
    while issued.contains(&candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    candidate
}

/// 空でない値のみ返す（空白のみも空扱い）
fn non_empty<'a>(row: &'a RawRow, key: &str) -> Option<&'a str> {
    row.get(key)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

/// ClinicRecordを生行に戻す（再正規化用）
pub fn to_raw_row(record: &ClinicRecord) -> RawRow {
    let mut row = record.extra.clone();
    row.insert(FIELD_FACILITY_ID.to_string(), record.id.clone());
    row.insert(FIELD_NAME.to_string(), record.name.clone());
    row.insert(FIELD_LATITUDE.to_string(), record.latitude.to_string());
    row.insert(FIELD_LONGITUDE.to_string(), record.longitude.to_string());
    if let Some(district) = &record.district {
        row.insert(FIELD_DISTRICT.to_string(), district.clone());
    }
    if let Some(province) = &record.province {
        row.insert(FIELD_PROVINCE.to_string(), province.clone());
    }
    if let Some(facility_type) = &record.facility_type {
        row.insert(FIELD_FACILITY_TYPE.to_string(), facility_type.clone());
    }
    row
}
