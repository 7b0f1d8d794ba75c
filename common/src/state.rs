//! ダッシュボード状態
//!
//! リスト・地図・絞り込みが共有する状態を1つにまとめる。
//! フィールドごとに書き込み元は1つ:
//! - データと読込状態: 読込完了時（クリニックと境界はそれぞれ独立）
//! - 絞り込み条件: 検索フォーム（変更のたびに表示対象を再計算）
//! - クラスタ/境界の表示切替・ズーム: 地図パネル
//!
//! 選択IDは SelectionCoordinator が持つ。

use crate::detail::ClinicDetail;
use crate::filter::{self, FilterCriteria};
use crate::normalizer;
use crate::parser;
use crate::types::{BoundaryCollection, ClinicRecord, RawRow};
use serde::{Deserialize, Serialize};

pub const CLINICS_DOWNLOAD_FAILED: &str = "Failed to download clinics CSV.";
pub const CLINICS_PROCESS_FAILED: &str = "Failed to process clinics CSV.";
pub const BOUNDARIES_LOAD_FAILED: &str = "Failed to load district boundaries.";

/// データセットごとの読込状態
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// 取得失敗（ネットワーク・HTTPステータス等）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub detail: String,
}

impl LoadFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub clinics_status: LoadStatus,
    pub boundaries_status: LoadStatus,
    raw_rows: Vec<RawRow>,
    all_clinics: Vec<ClinicRecord>,
    boundaries: Option<BoundaryCollection>,
    criteria: FilterCriteria,
    visible: Vec<ClinicRecord>,
    pub show_clusters: bool,
    pub show_boundaries: bool,
    pub zoom: u8,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(6)
    }
}

impl DashboardState {
    pub fn new(initial_zoom: u8) -> Self {
        Self {
            clinics_status: LoadStatus::Loading,
            boundaries_status: LoadStatus::Loading,
            raw_rows: Vec::new(),
            all_clinics: Vec::new(),
            boundaries: None,
            criteria: FilterCriteria::default(),
            visible: Vec::new(),
            show_clusters: true,
            show_boundaries: false,
            zoom: initial_zoom,
        }
    }

    // =============================================
    // 読込
    // =============================================

    /// クリニックCSVの取得結果を反映
    pub fn apply_clinic_csv(&mut self, fetched: Result<String, LoadFailure>) {
        let text = match fetched {
            Ok(text) => text,
            Err(failure) => {
                tracing::warn!(error = %failure, "clinic CSV download failed");
                self.clinics_status = LoadStatus::Failed(CLINICS_DOWNLOAD_FAILED.into());
                return;
            }
        };

        match parser::parse_clinic_csv(&text) {
            Ok(rows) => self.set_rows(rows),
            Err(e) => {
                tracing::warn!(error = %e, "clinic CSV could not be processed");
                self.clinics_status = LoadStatus::Failed(CLINICS_PROCESS_FAILED.into());
            }
        }
    }

    /// パース済みの行を反映（正規化して表示対象を再計算）
    pub fn set_rows(&mut self, rows: Vec<RawRow>) {
        self.all_clinics = normalizer::normalize(&rows);
        self.raw_rows = rows;
        self.clinics_status = LoadStatus::Ready;
        self.refilter();
    }

    /// 境界GeoJSONの取得結果を反映
    pub fn apply_boundaries(&mut self, fetched: Result<String, LoadFailure>) {
        let parsed = fetched
            .map_err(crate::Error::from)
            .and_then(|text| parser::parse_boundaries(&text));

        match parsed {
            Ok(collection) => {
                tracing::debug!(features = collection.len(), "district boundaries loaded");
                self.boundaries = Some(collection);
                self.boundaries_status = LoadStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "district boundaries failed to load");
                self.boundaries_status = LoadStatus::Failed(BOUNDARIES_LOAD_FAILED.into());
            }
        }
    }

    // =============================================
    // 絞り込み
    // =============================================

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    pub fn set_name_pattern(&mut self, value: &str) {
        self.criteria.name_pattern = optional(value);
        self.refilter();
    }

    pub fn set_facility_type(&mut self, value: &str) {
        self.criteria.facility_type = optional(value);
        self.refilter();
    }

    pub fn set_district_pattern(&mut self, value: &str) {
        self.criteria.district_pattern = optional(value);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.visible = filter::filter_clinics(&self.all_clinics, &self.criteria);
    }

    // =============================================
    // 参照
    // =============================================

    pub fn raw_rows(&self) -> &[RawRow] {
        &self.raw_rows
    }

    pub fn all_clinics(&self) -> &[ClinicRecord] {
        &self.all_clinics
    }

    pub fn visible(&self) -> &[ClinicRecord] {
        &self.visible
    }

    pub fn boundaries(&self) -> Option<&BoundaryCollection> {
        self.boundaries.as_ref()
    }

    pub fn total(&self) -> usize {
        self.all_clinics.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.iter().any(|r| r.id == id)
    }

    pub fn find_visible(&self, id: &str) -> Option<&ClinicRecord> {
        self.visible.iter().find(|r| r.id == id)
    }

    /// 詳細画面のデータ
    pub fn detail(&self, id: &str) -> Option<ClinicDetail> {
        ClinicDetail::resolve(&self.all_clinics, &self.raw_rows, id)
    }

    pub fn facility_type_options(&self) -> Vec<String> {
        filter::facility_type_options(&self.all_clinics)
    }

    pub fn name_suggestions(&self, input: &str) -> Vec<String> {
        filter::name_suggestions(&self.all_clinics, input)
    }

    pub fn district_suggestions(&self, input: &str) -> Vec<String> {
        filter::district_suggestions(&self.all_clinics, input)
    }

    /// 読込中バナーの文言。どちらも完了していればNone
    pub fn loading_message(&self) -> Option<String> {
        let pending: Vec<&str> = [
            (self.clinics_status.is_loading(), "clinics"),
            (self.boundaries_status.is_loading(), "boundaries"),
        ]
        .into_iter()
        .filter_map(|(loading, label)| loading.then_some(label))
        .collect();

        if pending.is_empty() {
            None
        } else {
            Some(format!("Loading data… {}", pending.join(" ")))
        }
    }

    /// 警告バナーの文言
    pub fn error_messages(&self) -> Vec<&str> {
        [self.clinics_status.error(), self.boundaries_status.error()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// クリニック読込が終わって0件なら「該当なし」表示
    pub fn shows_empty_message(&self) -> bool {
        !self.clinics_status.is_loading() && self.visible.is_empty()
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "FacilityID,Facility Name (DHIS2),District Name,Province Name,Facility Type,Latitude,Longitude\n\
        1,Kabul Clinic,Kabul,Kabul,BHC,34.5,69.2\n\
        2,Herat Clinic,Herat,Herat,CHC,34.3,62.2\n\
        3,Kabul Clinic,Kabul,Kabul,BHC,34.6,69.3\n\
        4,Bad Coords,Nowhere,Nowhere,BHC,0,0\n\
        5,Bagram Hospital,Bagram,Parwan,District Hospital,34.9,69.3\n";

    fn loaded() -> DashboardState {
        let mut state = DashboardState::default();
        state.apply_clinic_csv(Ok(CSV.to_string()));
        state
    }

    #[test]
    fn test_initial_state() {
        let state = DashboardState::default();
        assert!(state.clinics_status.is_loading());
        assert!(state.show_clusters);
        assert!(!state.show_boundaries);
        assert_eq!(state.zoom, 6);
        assert_eq!(state.loading_message().as_deref(), Some("Loading data… clinics boundaries"));
        assert!(!state.shows_empty_message());
    }

    #[test]
    fn test_apply_clinic_csv() {
        let state = loaded();
        assert_eq!(state.clinics_status, LoadStatus::Ready);
        assert_eq!(state.raw_rows().len(), 5);
        assert_eq!(state.total(), 3);
        assert_eq!(state.visible_count(), 3);
        assert_eq!(state.loading_message().as_deref(), Some("Loading data… boundaries"));
    }

    #[test]
    fn test_download_failure_sets_banner_only_for_clinics() {
        let mut state = DashboardState::default();
        state.apply_clinic_csv(Err(LoadFailure::new("connection refused")));

        assert_eq!(state.error_messages(), vec![CLINICS_DOWNLOAD_FAILED]);
        assert!(state.boundaries_status.is_loading());
        assert_eq!(state.total(), 0);
        assert!(state.shows_empty_message());
    }

    #[test]
    fn test_boundaries_independent_of_clinics() {
        let mut state = DashboardState::default();
        state.apply_boundaries(Ok(r#"{"type":"FeatureCollection","features":[]}"#.to_string()));

        assert_eq!(state.boundaries_status, LoadStatus::Ready);
        assert!(state.clinics_status.is_loading());
        assert!(state.boundaries().is_some());

        state.apply_boundaries(Ok("not json".to_string()));
        assert_eq!(state.error_messages(), vec![BOUNDARIES_LOAD_FAILED]);
    }

    #[test]
    fn test_filter_setters_recompute_visible() {
        let mut state = loaded();

        state.set_name_pattern("CLINIC");
        assert_eq!(state.visible_count(), 2);

        state.set_facility_type("CHC");
        assert_eq!(state.visible_count(), 1);
        assert!(state.is_visible("2"));

        state.set_facility_type("");
        state.set_name_pattern("");
        state.set_district_pattern("bag");
        assert_eq!(state.visible_count(), 1);
        assert_eq!(state.find_visible("5").map(|r| r.name.as_str()), Some("Bagram Hospital"));

        // 全件は変化しない
        assert_eq!(state.total(), 3);
    }

    #[test]
    fn test_options_and_suggestions_use_all_clinics() {
        let mut state = loaded();
        state.set_district_pattern("herat");

        assert_eq!(state.facility_type_options(), vec!["BHC", "CHC", "District Hospital"]);
        assert_eq!(state.name_suggestions("ka"), vec!["Kabul Clinic"]);
        assert_eq!(state.district_suggestions("a"), Vec::<String>::new());
    }
}
