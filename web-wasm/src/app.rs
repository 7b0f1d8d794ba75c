//! メインアプリケーションコンポーネント

use crate::api::fetch::fetch_text;
use crate::components::{
    clinic_detail::ClinicDetailPage, dashboard::Dashboard, header::Header, intro::Intro,
    summary_footer::SummaryFooter,
};
use crate::map::{self, BrowserCoordinator, HashNavigator};
use clinic_map_common::{ClinicRecord, DashboardConfig, DashboardState, LoadFailure, Route};
use gloo::events::EventListener;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// 各コンポーネントに渡す共有状態
#[derive(Clone, Copy)]
pub struct DashboardContext {
    pub config: StoredValue<DashboardConfig>,
    pub state: ReadSignal<DashboardState>,
    pub set_state: WriteSignal<DashboardState>,
    /// 選択中ID（表示用の写し。正は coordinator 側）
    pub selected: ReadSignal<Option<String>>,
    set_selected: WriteSignal<Option<String>>,
    coordinator: StoredValue<BrowserCoordinator, LocalStorage>,
    pub route: ReadSignal<Route>,
}

impl DashboardContext {
    /// リスト行のクリック
    pub fn select_from_list(&self, record: &ClinicRecord) {
        self.coordinator.update_value(|c| {
            c.select_from_list(&record.id, record.latitude, record.longitude)
        });
        self.set_selected.set(Some(record.id.clone()));
    }

    /// 地図マーカーのクリック
    pub fn select_from_map(&self, id: &str, lat: f64, lon: f64) {
        self.coordinator
            .update_value(|c| c.select_from_map(id, lat, lon));
        self.set_selected.set(Some(id.to_string()));
    }

    /// 選択行をリスト中央へ
    pub fn scroll_list_to_selected(&self) {
        self.coordinator.with_value(|c| c.scroll_list_to_selected());
    }

    /// 選択解除（保留中のポップアップも取り消す）
    pub fn clear_selection(&self) {
        self.coordinator.update_value(|c| c.clear());
        self.set_selected.set(None);
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.with(|s| s.as_deref() == Some(id))
    }
}

fn log_failure(source: &str, result: &Result<String, LoadFailure>) {
    if let Err(failure) = result {
        web_sys::console::warn_1(&format!("{source} の取得に失敗: {failure}").into());
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let config = DashboardConfig::default();

    let (state, set_state) = signal(DashboardState::new(config.initial_zoom));
    let (selected, set_selected) = signal(None::<String>);
    let (route, set_route) = signal(HashNavigator::current());

    let ctx = DashboardContext {
        coordinator: StoredValue::new_local(map::browser_coordinator(&config)),
        config: StoredValue::new(config.clone()),
        state,
        set_state,
        selected,
        set_selected,
        route,
    };

    // 2つのソースは独立に読み込む
    let clinics_url = config.clinics_url.clone();
    spawn_local(async move {
        let fetched = fetch_text(&clinics_url).await;
        log_failure("clinics CSV", &fetched);
        set_state.update(|s| s.apply_clinic_csv(fetched));
    });

    let boundaries_url = config.boundaries_url.clone();
    spawn_local(async move {
        let fetched = fetch_text(&boundaries_url).await;
        log_failure("district boundaries", &fetched);
        set_state.update(|s| s.apply_boundaries(fetched));
    });

    // ハッシュ変更でルート更新
    if let Some(window) = web_sys::window() {
        EventListener::new(&window, "hashchange", move |_| {
            set_route.set(HashNavigator::current());
        })
        .forget();
    }

    // ダッシュボードに戻ったら地図サイズ再計算と選択行のスクロール
    Effect::new(move |previous: Option<Route>| {
        let current = route.get();
        if current == Route::Dashboard && previous.is_some_and(|p| p != Route::Dashboard) {
            map::bridge::invalidate_size_js();
            ctx.scroll_list_to_selected();
        }
        current
    });

    on_cleanup(move || ctx.clear_selection());

    let on_dashboard = move || route.with(|r| *r == Route::Dashboard);

    view! {
        <div class="app">
            <Header />
            // 地図を保持するため詳細表示中も外さない
            <div class="dashboard-page" style:display=move || if on_dashboard() { "block" } else { "none" }>
                <Intro />
                <Dashboard ctx=ctx />
                <SummaryFooter />
            </div>
            {move || match route.get() {
                Route::ClinicDetail { id } => view! { <ClinicDetailPage ctx=ctx id=id /> }.into_any(),
                Route::Dashboard => ().into_any(),
            }}
        </div>
    }
}
