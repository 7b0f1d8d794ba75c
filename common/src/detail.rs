//! クリニック詳細画面のデータ
//!
//! 詳細画面はまず正規化済みクリニックをIDの完全一致で探す。
//! 見つからないIDだけ正規化前の行を FacilityID、次に行番号で探し、
//! 座標が読めない行でも表示できるよう既定座標にフォールバックする。
//! グラフ・設備・連絡先は固定のプレースホルダ値。

use crate::normalizer::{parse_coordinate, to_raw_row};
use crate::types::{
    ClinicRecord, LatLon, RawRow, FIELD_DISTRICT, FIELD_FACILITY_ID, FIELD_FACILITY_TYPE,
    FIELD_LATITUDE, FIELD_LONGITUDE, FIELD_NAME, FIELD_PROVINCE,
};
use serde::Serialize;

pub const FIELD_BUILDING_CONDITION: &str = "Building Condition";
pub const FIELD_ACCESSIBILITY: &str = "Accessibility";

/// 座標が読めない場合の既定値（カブール）
pub const FALLBACK_POSITION: LatLon = LatLon { lat: 34.5, lon: 69.2 };

/// 詳細画面の地図に描く円の半径(m)
pub const SERVICE_RADIUS_METERS: f64 = 5000.0;

/// バッジの色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Info,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
            Tone::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicDetail {
    pub id: String,
    pub name: String,
    pub district: String,
    pub province: String,
    pub position: LatLon,
    pub condition: String,
    pub condition_tone: Tone,
    /// 施設情報テーブル（ラベル, 値）
    pub info_rows: Vec<(String, String)>,
}

/// 生行を探す。FacilityID（前後空白無視）の一致を優先し、無ければ行番号
pub fn find_row<'a>(rows: &'a [RawRow], id: &str) -> Option<(usize, &'a RawRow)> {
    rows.iter()
        .enumerate()
        .find(|(_, row)| row.get(FIELD_FACILITY_ID).map(|v| v.trim()) == Some(id))
        .or_else(|| {
            let index: usize = id.parse().ok().filter(|i: &usize| i.to_string() == id)?;
            rows.get(index).map(|row| (index, row))
        })
}

impl ClinicDetail {
    /// IDに対応する詳細を作る。正規化済みを優先し、無ければ生行。どちらにも無ければNone
    pub fn resolve(clinics: &[ClinicRecord], rows: &[RawRow], id: &str) -> Option<Self> {
        if let Some(record) = clinics.iter().find(|r| r.id == id) {
            return Some(Self::from_record(record));
        }
        Self::lookup(rows, id)
    }

    /// 生行だけから探す
    pub fn lookup(rows: &[RawRow], id: &str) -> Option<Self> {
        find_row(rows, id).map(|(_, row)| Self::from_row(id, row))
    }

    pub fn from_record(record: &ClinicRecord) -> Self {
        Self::from_row(&record.id, &to_raw_row(record))
    }

    pub fn from_row(id: &str, row: &RawRow) -> Self {
        let text = |key: &str| row.get(key).cloned().unwrap_or_default();
        let or_default = |key: &str, fallback: &str| {
            row.get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or_else(|| fallback.to_string())
        };

        let position = LatLon::new(
            parse_coordinate(row.get(FIELD_LATITUDE)).unwrap_or(FALLBACK_POSITION.lat),
            parse_coordinate(row.get(FIELD_LONGITUDE)).unwrap_or(FALLBACK_POSITION.lon),
        );

        let condition = or_default(FIELD_BUILDING_CONDITION, "Operational");
        let condition_tone = condition_tone(&condition);

        let info_rows = vec![
            ("Facility ID".to_string(), or_default(FIELD_FACILITY_ID, "AF12345")),
            ("Facility Type".to_string(), or_default(FIELD_FACILITY_TYPE, "Basic Health Center")),
            ("Accessibility".to_string(), or_default(FIELD_ACCESSIBILITY, "Hard-to-Reach")),
            ("Staff Count".to_string(), "25 (Doctors: 6, Nurses: 12, Midwives: 7)".to_string()),
            ("Electricity".to_string(), "✅ Solar + Generator".to_string()),
            ("Water Source".to_string(), "✅ Borehole (Safe)".to_string()),
            ("Last Renovated".to_string(), "2023".to_string()),
        ];

        Self {
            id: id.to_string(),
            name: text(FIELD_NAME),
            district: text(FIELD_DISTRICT),
            province: text(FIELD_PROVINCE),
            position,
            condition,
            condition_tone,
            info_rows,
        }
    }

    pub fn location_label(&self) -> String {
        format!("{}, {}", self.district, self.province)
    }
}

/// 建物状態のバッジ色
pub fn condition_tone(condition: &str) -> Tone {
    match condition {
        "Damaged" => Tone::Danger,
        "Under Repair" => Tone::Warning,
        _ => Tone::Success,
    }
}

// =============================================
// 固定プレースホルダ
// =============================================

/// 系列1本のグラフ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: &'static str,
    pub label: &'static str,
    pub labels: &'static [&'static str],
    pub values: &'static [u32],
    pub colors: &'static [&'static str],
}

impl ChartSeries {
    pub fn max_value(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }

    /// (ラベル, 値, 最大値に対する割合%) の組
    pub fn bars(&self) -> Vec<(&'static str, u32, f64)> {
        let max = self.max_value().max(1) as f64;
        self.labels
            .iter()
            .zip(self.values.iter())
            .map(|(label, value)| (*label, *value, *value as f64 / max * 100.0))
            .collect()
    }
}

pub const MONTHLY_WORKLOAD: ChartSeries = ChartSeries {
    title: "📊 Monthly Workload",
    label: "Patients Served",
    labels: &["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
    values: &[100, 150, 220, 180, 240, 300],
    colors: &["#1CABE2"],
};

pub const SERVICE_DISTRIBUTION: ChartSeries = ChartSeries {
    title: "🧩 Service Distribution",
    label: "Services",
    labels: &["Maternal Care", "Nutrition", "Vaccination", "Emergency"],
    values: &[35, 25, 20, 20],
    colors: &["#1CABE2", "#4CAF50", "#FFB300", "#E53935"],
};

pub const YEARLY_TRENDS: ChartSeries = ChartSeries {
    title: "📈 Yearly Trends",
    label: "Annual Visits",
    labels: &["2020", "2021", "2022", "2023", "2024"],
    values: &[500, 650, 720, 800, 950],
    colors: &["#1976D2"],
};

/// 設備の充足度（ラベル, %, 色）
pub const RESOURCE_LEVELS: &[(&str, u8, Tone)] = &[
    ("Power Availability", 85, Tone::Success),
    ("Water Supply", 70, Tone::Info),
    ("Medicine Stock", 50, Tone::Warning),
];

/// 連絡先（ラベル, 値）
pub const CONTACT_LINES: &[(&str, &str)] = &[
    ("In-Charge", "Dr. Ahmad Shah"),
    ("Phone", "+93 700 123 456"),
    ("Email", "clinic.logar@health.af"),
    ("Last Updated", "June 2024"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[(&str, &str)]) -> RawRow {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn rows() -> Vec<RawRow> {
        vec![
            row(&[(FIELD_FACILITY_ID, "A-1"), (FIELD_NAME, "Alpha"), (FIELD_LATITUDE, "35.1"), (FIELD_LONGITUDE, "70.2")]),
            row(&[(FIELD_NAME, "Beta"), (FIELD_DISTRICT, "Herat"), (FIELD_PROVINCE, "Herat"), (FIELD_BUILDING_CONDITION, "Damaged")]),
        ]
    }

    #[test]
    fn test_lookup_by_facility_id() {
        let detail = ClinicDetail::lookup(&rows(), "A-1").expect("見つからない");
        assert_eq!(detail.name, "Alpha");
        assert_eq!(detail.position, LatLon::new(35.1, 70.2));
        assert_eq!(detail.condition, "Operational");
        assert_eq!(detail.condition_tone, Tone::Success);
        assert_eq!(detail.info_rows[0], ("Facility ID".to_string(), "A-1".to_string()));
    }

    #[test]
    fn test_lookup_by_position_with_fallbacks() {
        let detail = ClinicDetail::lookup(&rows(), "1").expect("見つからない");
        assert_eq!(detail.name, "Beta");
        assert_eq!(detail.position, FALLBACK_POSITION);
        assert_eq!(detail.condition_tone, Tone::Danger);
        assert_eq!(detail.location_label(), "Herat, Herat");
        assert_eq!(detail.info_rows[0].1, "AF12345");
        assert_eq!(detail.info_rows[1].1, "Basic Health Center");
        assert_eq!(detail.info_rows[2].1, "Hard-to-Reach");
    }

    fn normalized(rows: &[RawRow]) -> Vec<ClinicRecord> {
        crate::normalizer::normalize(rows)
    }

    #[test]
    fn test_resolve_trimmed_facility_id() {
        let rows = vec![row(&[
            (FIELD_FACILITY_ID, " 9001 "),
            (FIELD_NAME, "Padded"),
            (FIELD_LATITUDE, "34.2"),
            (FIELD_LONGITUDE, "69.1"),
            (FIELD_BUILDING_CONDITION, "Under Repair"),
        ])];
        let clinics = normalized(&rows);
        assert_eq!(clinics[0].id, "9001");

        let detail = ClinicDetail::resolve(&clinics, &rows, "9001").expect("見つからない");
        assert_eq!(detail.name, "Padded");
        assert_eq!(detail.condition_tone, Tone::Warning);
        // 生行だけでも前後空白を無視して見つかる
        assert!(ClinicDetail::lookup(&rows, "9001").is_some());
    }

    #[test]
    fn test_resolve_prefers_record_id_over_row_position() {
        let rows = vec![
            row(&[(FIELD_FACILITY_ID, "5"), (FIELD_NAME, "First"), (FIELD_LATITUDE, "34.0"), (FIELD_LONGITUDE, "69.0")]),
            row(&[(FIELD_FACILITY_ID, "0"), (FIELD_NAME, "Second"), (FIELD_LATITUDE, "35.0"), (FIELD_LONGITUDE, "70.0")]),
        ];
        let clinics = normalized(&rows);

        let detail = ClinicDetail::resolve(&clinics, &rows, "0").expect("見つからない");
        assert_eq!(detail.name, "Second");
        assert_eq!(detail.position, LatLon::new(35.0, 70.0));
    }

    #[test]
    fn test_resolve_falls_back_to_raw_rows() {
        // 座標不正で正規化から外れた行も行番号で開ける
        let rows = rows();
        let clinics = normalized(&rows);
        assert!(clinics.iter().all(|r| r.id != "1"));

        let detail = ClinicDetail::resolve(&clinics, &rows, "1").expect("見つからない");
        assert_eq!(detail.name, "Beta");
        assert_eq!(detail.position, FALLBACK_POSITION);
    }

    #[test]
    fn test_lookup_missing() {
        assert!(ClinicDetail::lookup(&rows(), "99").is_none());
    }

    #[test]
    fn test_condition_tone() {
        assert_eq!(condition_tone("Under Repair"), Tone::Warning);
        assert_eq!(condition_tone("Damaged"), Tone::Danger);
        assert_eq!(condition_tone("Operational"), Tone::Success);
    }

    #[test]
    fn test_chart_bars_scaled_to_max() {
        let bars = MONTHLY_WORKLOAD.bars();
        assert_eq!(bars.len(), 6);
        assert_eq!(bars[5], ("Jun", 300, 100.0));
        assert_eq!(SERVICE_DISTRIBUTION.total(), 100);
        assert_eq!(YEARLY_TRENDS.max_value(), 950);
    }
}
