//! ブラウザ上の地図・リスト・遷移・タイマー
//!
//! SelectionCoordinator に渡す実装。

use super::bridge;
use clinic_map_common::{
    LatLon, ListSurface, MapSurface, Navigator, Route, Scheduler, ScrollGeometry, TimerHandle,
};
use gloo::timers::callback::Timeout;
use std::time::Duration;
use wasm_bindgen::JsCast;

/// リストのスクロール領域のID
pub const LIST_CONTAINER_ID: &str = "clinic-list";

/// リスト行の要素ID
pub fn list_item_dom_id(id: &str) -> String {
    format!("clinic-item-{id}")
}

/// Leaflet 地図（実体はJS側に1つ）
#[derive(Debug, Clone, Copy)]
pub struct LeafletMap {
    pub fly_duration: Duration,
}

impl MapSurface for LeafletMap {
    fn fly_to(&self, target: LatLon, zoom: u8) {
        bridge::fly_to_js(target.lat, target.lon, zoom, self.fly_duration.as_secs_f64());
    }

    fn has_marker(&self, id: &str) -> bool {
        bridge::has_marker_js(id)
    }

    fn open_popup(&self, id: &str) -> bool {
        bridge::open_popup_js(id)
    }
}

/// DOM上のクリニックリスト
#[derive(Debug, Clone, Copy, Default)]
pub struct DomList;

fn element_by_id(id: &str) -> Option<web_sys::HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

impl ListSurface for DomList {
    fn scroll_geometry(&self, id: &str) -> Option<ScrollGeometry> {
        let container = element_by_id(LIST_CONTAINER_ID)?;
        let item = element_by_id(&list_item_dom_id(id))?;
        Some(ScrollGeometry {
            item_offset: item.offset_top() as f64,
            item_height: item.offset_height() as f64,
            container_height: container.client_height() as f64,
        })
    }

    fn scroll_to(&self, top: f64) {
        if let Some(container) = element_by_id(LIST_CONTAINER_ID) {
            container.set_scroll_top(top.round() as i32);
        }
    }
}

/// URLハッシュで画面遷移
#[derive(Debug, Clone, Copy, Default)]
pub struct HashNavigator;

impl HashNavigator {
    /// 現在のハッシュからルートを得る
    pub fn current() -> Route {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .map(|hash| Route::from_path(&hash))
            .unwrap_or_default()
    }
}

impl Navigator for HashNavigator {
    fn navigate(&self, route: &Route) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_hash(&route.to_path()) {
            web_sys::console::warn_2(&"ハッシュ設定失敗".into(), &e);
        }
    }
}

/// setTimeout による遅延実行
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooScheduler;

pub struct GlooTimer(Timeout);

impl TimerHandle for GlooTimer {
    fn cancel(self) {
        // 戻り値のクロージャは不要
        let _ = self.0.cancel();
    }
}

impl Scheduler for GlooScheduler {
    type Handle = GlooTimer;

    fn schedule<F>(&self, delay: Duration, task: F) -> GlooTimer
    where
        F: FnOnce() + Send + 'static,
    {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        GlooTimer(Timeout::new(millis, task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_item_dom_id() {
        assert_eq!(list_item_dom_id("7"), "clinic-item-7");
        assert_eq!(list_item_dom_id("AF-12"), "clinic-item-AF-12");
    }
}
