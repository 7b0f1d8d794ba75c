//! 選択連動モジュール
//!
//! 選択中のクリニックIDを1つだけ持ち、リストと地図のフォーカスを同期する。
//!
//! - リストから選択: 地図を移動 → 700ms後にポップアップ → 詳細画面へ遷移
//! - 地図から選択: 地図を移動 → 250ms後にポップアップ（遷移しない）
//! - 選択が変わるたびにリストの該当行をスクロール領域の中央へ
//!
//! ポップアップはキャンセル可能なタイマーで遅延させ、新しい選択が来たら前の分は取り消す。
//! 絞り込みで見えなくなったIDの選択は解除しない。地図にマーカーが無ければ移動もせず、
//! ポップアップとスクロールも空振りする。

use crate::config::DashboardConfig;
use crate::route::Route;
use crate::types::LatLon;
use std::time::Duration;

/// 地図ビュー
pub trait MapSurface {
    /// 指定座標・ズームへアニメーション移動
    fn fly_to(&self, target: LatLon, zoom: u8);
    /// 指定IDのマーカーが地図上にあるか
    fn has_marker(&self, id: &str) -> bool;
    /// マーカーのポップアップを開く。マーカーが無ければfalse
    fn open_popup(&self, id: &str) -> bool;
}

/// リストビュー
pub trait ListSurface {
    /// 行の位置情報。行が描画されていなければNone
    fn scroll_geometry(&self, id: &str) -> Option<ScrollGeometry>;
    /// スクロール領域の縦位置を設定
    fn scroll_to(&self, top: f64);
}

/// 画面遷移
pub trait Navigator {
    fn navigate(&self, route: &Route);
}

/// 遅延実行
pub trait Scheduler {
    type Handle: TimerHandle;

    fn schedule<F>(&self, delay: Duration, task: F) -> Self::Handle
    where
        F: FnOnce() + Send + 'static;
}

/// 遅延実行の取り消しハンドル（実行済みなら何もしない）
pub trait TimerHandle {
    fn cancel(self);
}

/// リスト行のスクロール計算用の寸法
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    /// スクロール領域上端からの行の位置
    pub item_offset: f64,
    pub item_height: f64,
    /// スクロール領域の表示高さ
    pub container_height: f64,
}

impl ScrollGeometry {
    /// 行を縦中央に置くスクロール位置（負にはしない）
    pub fn centered_scroll_top(&self) -> f64 {
        let top = self.item_offset - (self.container_height / 2.0 - self.item_height / 2.0);
        top.max(0.0)
    }
}

/// 選択の発生元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    List,
    Map,
}

/// 選択時の地図動作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTiming {
    pub fly_zoom: u8,
    pub list_popup_delay: Duration,
    pub map_popup_delay: Duration,
}

impl From<&DashboardConfig> for SelectionTiming {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            fly_zoom: config.fly_zoom,
            list_popup_delay: config.list_popup_delay(),
            map_popup_delay: config.map_popup_delay(),
        }
    }
}

impl Default for SelectionTiming {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

pub struct SelectionCoordinator<M, L, N, S: Scheduler> {
    map: M,
    list: L,
    navigator: N,
    scheduler: S,
    timing: SelectionTiming,
    selected: Option<String>,
    pending_popup: Option<S::Handle>,
}

impl<M, L, N, S> SelectionCoordinator<M, L, N, S>
where
    M: MapSurface + Clone + Send + 'static,
    L: ListSurface,
    N: Navigator,
    S: Scheduler,
{
    pub fn new(map: M, list: L, navigator: N, scheduler: S, timing: SelectionTiming) -> Self {
        Self {
            map,
            list,
            navigator,
            scheduler,
            timing,
            selected: None,
            pending_popup: None,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn has_pending_popup(&self) -> bool {
        self.pending_popup.is_some()
    }

    /// リスト行のクリック
    pub fn select_from_list(&mut self, id: &str, lat: f64, lon: f64) {
        self.select(id, LatLon::new(lat, lon), SelectionOrigin::List);
        self.navigator.navigate(&Route::clinic(id));
    }

    /// 地図マーカーのクリック
    pub fn select_from_map(&mut self, id: &str, lat: f64, lon: f64) {
        self.select(id, LatLon::new(lat, lon), SelectionOrigin::Map);
    }

    fn select(&mut self, id: &str, target: LatLon, origin: SelectionOrigin) {
        let changed = !self.is_selected(id);
        self.selected = Some(id.to_string());

        if self.map.has_marker(id) {
            self.map.fly_to(target, self.timing.fly_zoom);
        } else {
            tracing::debug!(id = %id, "marker not shown; skip fly");
        }

        let delay = match origin {
            SelectionOrigin::List => self.timing.list_popup_delay,
            SelectionOrigin::Map => self.timing.map_popup_delay,
        };
        self.schedule_popup(id, delay);

        if changed {
            self.scroll_list_to_selected();
        }
    }

    fn schedule_popup(&mut self, id: &str, delay: Duration) {
        if let Some(previous) = self.pending_popup.take() {
            previous.cancel();
        }

        let map = self.map.clone();
        let id = id.to_string();
        let handle = self.scheduler.schedule(delay, move || {
            if !map.open_popup(&id) {
                tracing::debug!(id = %id, "marker not found for popup");
            }
        });
        self.pending_popup = Some(handle);
    }

    /// 選択行をリスト中央へスクロール（行が無ければ何もしない）
    pub fn scroll_list_to_selected(&self) {
        let Some(id) = self.selected.as_deref() else {
            return;
        };

        match self.list.scroll_geometry(id) {
            Some(geometry) => self.list.scroll_to(geometry.centered_scroll_top()),
            None => tracing::debug!(id = %id, "list item not rendered; skip scroll"),
        }
    }

    /// 選択解除と保留中ポップアップの取り消し
    pub fn clear(&mut self) {
        if let Some(pending) = self.pending_popup.take() {
            pending.cancel();
        }
        self.selected = None;
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{harness, ViewEvent};
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_centered_scroll_top() {
        let geometry = ScrollGeometry {
            item_offset: 400.0,
            item_height: 40.0,
            container_height: 200.0,
        };
        assert_eq!(geometry.centered_scroll_top(), 320.0);

        let near_top = ScrollGeometry { item_offset: 40.0, ..geometry };
        assert_eq!(near_top.centered_scroll_top(), 0.0);
    }

    #[test]
    fn test_select_from_list_flies_scrolls_and_navigates() {
        let all = ids(10);
        let refs: Vec<&str> = all.iter().map(String::as_str).collect();
        let mut h = harness(&refs);

        h.coordinator.select_from_list("7", 34.0, 69.5);

        assert_eq!(h.coordinator.selected(), Some("7"));
        assert_eq!(
            h.events(),
            vec![
                ViewEvent::FlyTo(LatLon::new(34.0, 69.5), 10),
                ViewEvent::ScrollTo(7.0 * 40.0 - 80.0),
                ViewEvent::Navigate(Route::clinic("7")),
            ]
        );
        assert_eq!(h.scheduler.delays(), vec![Duration::from_millis(700)]);

        h.scheduler.run_all();
        assert_eq!(h.events().last(), Some(&ViewEvent::Popup("7".to_string())));
    }

    #[test]
    fn test_select_from_map_does_not_navigate() {
        let mut h = harness(&["a", "b"]);

        h.coordinator.select_from_map("b", 35.0, 70.0);
        h.scheduler.run_all();

        let events = h.events();
        assert!(events.contains(&ViewEvent::FlyTo(LatLon::new(35.0, 70.0), 10)));
        assert!(events.contains(&ViewEvent::Popup("b".to_string())));
        assert!(!events.iter().any(|e| matches!(e, ViewEvent::Navigate(_))));
        assert_eq!(h.scheduler.delays(), vec![Duration::from_millis(250)]);
    }

    #[test]
    fn test_new_selection_cancels_pending_popup() {
        let mut h = harness(&["a", "b"]);

        h.coordinator.select_from_list("a", 34.0, 69.0);
        h.coordinator.select_from_map("b", 35.0, 70.0);
        h.scheduler.run_all();

        let popups: Vec<_> = h
            .events()
            .into_iter()
            .filter(|e| matches!(e, ViewEvent::Popup(_)))
            .collect();
        assert_eq!(popups, vec![ViewEvent::Popup("b".to_string())]);
    }

    #[test]
    fn test_filtered_out_selection_is_silent_noop() {
        let mut h = harness(&["a", "b"]);
        h.markers.lock().unwrap().retain(|m| m != "b");
        h.rows.lock().unwrap().retain(|r| r != "b");

        h.coordinator.select_from_map("b", 35.0, 70.0);
        h.scheduler.run_all();

        assert_eq!(h.coordinator.selected(), Some("b"));
        assert!(h.events().is_empty());
    }

    #[test]
    fn test_hidden_selection_keeps_map_position_then_flies_when_shown() {
        let mut h = harness(&["a"]);
        h.coordinator.select_from_list("b", 35.0, 70.0);
        assert_eq!(h.events(), vec![ViewEvent::Navigate(Route::clinic("b"))]);

        // 絞り込み解除で再表示されたら通常どおり移動する
        h.markers.lock().unwrap().push("b".to_string());
        h.clear_events();
        h.coordinator.select_from_map("b", 35.0, 70.0);
        assert_eq!(h.events()[0], ViewEvent::FlyTo(LatLon::new(35.0, 70.0), 10));
    }

    #[test]
    fn test_reselecting_same_id_does_not_rescroll() {
        let mut h = harness(&["a", "b", "c"]);
        h.coordinator.select_from_map("c", 35.0, 70.0);
        h.clear_events();

        h.coordinator.select_from_map("c", 35.0, 70.0);
        assert!(!h.events().iter().any(|e| matches!(e, ViewEvent::ScrollTo(_))));
    }

    #[test]
    fn test_clear_cancels_popup() {
        let mut h = harness(&["a"]);
        h.coordinator.select_from_list("a", 34.0, 69.0);
        h.coordinator.clear();
        h.scheduler.run_all();

        assert_eq!(h.coordinator.selected(), None);
        assert!(!h.coordinator.has_pending_popup());
        assert!(!h.events().iter().any(|e| matches!(e, ViewEvent::Popup(_))));
    }
}
