//! ダッシュボードのセッション
//!
//! 状態・選択連動・記録ビューをまとめ、ブラウザ無しで画面操作を再現する。

use crate::config::Config;
use crate::error::Result;
use crate::headless::{CommandLog, HeadlessList, HeadlessMap, HeadlessNavigator, ViewCommand};
use crate::loader::{self, LoadedSources};
use crate::scheduler::TokioScheduler;
use chrono::Datelike;
use clinic_map_common::summary::{self, HeaderBadge};
use clinic_map_common::{
    ClinicDetail, ClinicRecord, DashboardState, Route, SelectionCoordinator, SelectionTiming,
};

/// 記録ビューの行の高さ・リスト表示高さ
const ROW_HEIGHT: f64 = 64.0;
const LIST_HEIGHT: f64 = 600.0;

type Coordinator = SelectionCoordinator<HeadlessMap, HeadlessList, HeadlessNavigator, TokioScheduler>;

pub struct Session {
    config: Config,
    state: DashboardState,
    coordinator: Coordinator,
    map: HeadlessMap,
    list: HeadlessList,
    navigator: HeadlessNavigator,
    log: CommandLog,
}

impl Session {
    /// 呼び出し元のtokioランタイムでセッションを作る。ランタイム外ならエラー
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_scheduler(config, TokioScheduler::current()?))
    }

    /// ランタイム外（同期コード）から使う場合はハンドルを渡す
    pub fn with_runtime(config: Config, handle: tokio::runtime::Handle) -> Self {
        Self::with_scheduler(config, TokioScheduler::new(handle))
    }

    fn with_scheduler(config: Config, scheduler: TokioScheduler) -> Self {
        let log = CommandLog::default();
        let map = HeadlessMap::new(log.clone());
        let list = HeadlessList::new(log.clone(), ROW_HEIGHT, LIST_HEIGHT);
        let navigator = HeadlessNavigator::new(log.clone());
        let coordinator = SelectionCoordinator::new(
            map.clone(),
            list.clone(),
            navigator.clone(),
            scheduler,
            SelectionTiming::from(&config.dashboard),
        );

        Self {
            state: DashboardState::new(config.dashboard.initial_zoom),
            config,
            coordinator,
            map,
            list,
            navigator,
            log,
        }
    }

    /// 両ソースを取得して反映
    pub async fn load(&mut self, client: &reqwest::Client) {
        let sources = loader::load_sources(client, &self.config).await;
        self.apply_sources(sources);
    }

    pub fn apply_sources(&mut self, sources: LoadedSources) {
        self.state.apply_clinic_csv(sources.clinics);
        self.state.apply_boundaries(sources.boundaries);
        self.sync_views();

        tracing::info!(
            total = self.state.total(),
            boundaries = self.state.boundaries().map(|b| b.len()).unwrap_or(0),
            "dashboard loaded"
        );
        for message in self.state.error_messages() {
            tracing::warn!("{message}");
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =============================================
    // 絞り込み
    // =============================================

    pub fn set_name_pattern(&mut self, value: &str) {
        self.state.set_name_pattern(value);
        self.sync_views();
    }

    pub fn set_facility_type(&mut self, value: &str) {
        self.state.set_facility_type(value);
        self.sync_views();
    }

    pub fn set_district_pattern(&mut self, value: &str) {
        self.state.set_district_pattern(value);
        self.sync_views();
    }

    /// 地図とリストを表示対象に合わせる
    fn sync_views(&self) {
        let visible = self.state.visible();
        self.map.set_markers(visible);
        self.list.set_rows(visible);
    }

    // =============================================
    // 選択
    // =============================================

    /// リスト行のクリック。表示対象に無いIDならfalse
    pub fn click_list_item(&mut self, id: &str) -> bool {
        let Some(record) = self.state.find_visible(id).cloned() else {
            tracing::debug!(id = %id, "list item not visible");
            return false;
        };
        self.coordinator
            .select_from_list(&record.id, record.latitude, record.longitude);
        true
    }

    /// マーカーのクリック
    pub fn click_marker(&mut self, id: &str) -> bool {
        let Some(record) = self.state.find_visible(id).cloned() else {
            return false;
        };
        self.coordinator
            .select_from_map(&record.id, record.latitude, record.longitude);
        true
    }

    pub fn selected(&self) -> Option<&str> {
        self.coordinator.selected()
    }

    pub fn selected_record(&self) -> Option<&ClinicRecord> {
        self.selected().and_then(|id| self.state.find_visible(id))
    }

    pub fn has_pending_popup(&self) -> bool {
        self.coordinator.has_pending_popup()
    }

    // =============================================
    // 画面
    // =============================================

    pub fn route(&self) -> Route {
        self.navigator.current()
    }

    /// 詳細画面のデータ（ダッシュボード表示中はNone）
    pub fn detail(&self) -> Option<ClinicDetail> {
        match self.route() {
            Route::ClinicDetail { id } => self.state.detail(&id),
            Route::Dashboard => None,
        }
    }

    /// ダッシュボードへ戻り、選択行をリスト中央へ
    pub fn back_to_dashboard(&mut self) {
        self.navigator.reset();
        self.coordinator.scroll_list_to_selected();
    }

    pub fn header_badges(&self) -> Vec<HeaderBadge> {
        summary::header_badges(&self.state)
    }

    pub fn footer_text(&self) -> String {
        summary::footer_text(chrono::Local::now().year())
    }

    pub fn commands(&self) -> Vec<ViewCommand> {
        self.log.commands()
    }

    pub fn take_commands(&self) -> Vec<ViewCommand> {
        self.log.take()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // 保留中のポップアップタスクを残さない
        self.coordinator.clear();
    }
}
