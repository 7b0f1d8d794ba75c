//! 画面を持たない記録用ビュー
//!
//! 地図・リスト・遷移への命令を順に記録し、ログにも流す。

use clinic_map_common::{
    ClinicRecord, LatLon, ListSurface, MapSurface, Navigator, Route, ScrollGeometry,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// ビューに出された命令
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    FlyTo { target: LatLon, zoom: u8 },
    OpenPopup { id: String },
    ScrollTo { top: f64 },
    Navigate { path: String },
}

/// 記録先（地図・リスト・遷移で共有）
#[derive(Debug, Clone, Default)]
pub struct CommandLog(Arc<Mutex<Vec<ViewCommand>>>);

impl CommandLog {
    fn lock(&self) -> MutexGuard<'_, Vec<ViewCommand>> {
        // 記録中のpanicで毒化しても中身は使える
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, command: ViewCommand) {
        self.lock().push(command);
    }

    pub fn commands(&self) -> Vec<ViewCommand> {
        self.lock().clone()
    }

    pub fn take(&self) -> Vec<ViewCommand> {
        std::mem::take(&mut *self.lock())
    }
}

/// 地図。表示中マーカーのIDを持つ
#[derive(Debug, Clone, Default)]
pub struct HeadlessMap {
    log: CommandLog,
    markers: Arc<Mutex<Vec<String>>>,
}

impl HeadlessMap {
    pub fn new(log: CommandLog) -> Self {
        Self {
            log,
            markers: Arc::default(),
        }
    }

    /// 表示中マーカーを差し替え
    pub fn set_markers(&self, records: &[ClinicRecord]) {
        let mut markers = self.markers.lock().unwrap_or_else(|p| p.into_inner());
        *markers = records.iter().map(|r| r.id.clone()).collect();
    }
}

impl MapSurface for HeadlessMap {
    fn fly_to(&self, target: LatLon, zoom: u8) {
        tracing::info!(lat = target.lat, lon = target.lon, zoom, "fly to");
        self.log.push(ViewCommand::FlyTo { target, zoom });
    }

    fn has_marker(&self, id: &str) -> bool {
        self.markers
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .any(|m| m == id)
    }

    fn open_popup(&self, id: &str) -> bool {
        let found = self.has_marker(id);
        if found {
            tracing::info!(id = %id, "open popup");
            self.log.push(ViewCommand::OpenPopup { id: id.to_string() });
        }
        found
    }
}

/// リスト。行の高さは固定
#[derive(Debug, Clone)]
pub struct HeadlessList {
    log: CommandLog,
    rows: Arc<Mutex<Vec<String>>>,
    row_height: f64,
    container_height: f64,
}

impl HeadlessList {
    pub fn new(log: CommandLog, row_height: f64, container_height: f64) -> Self {
        Self {
            log,
            rows: Arc::default(),
            row_height,
            container_height,
        }
    }

    pub fn set_rows(&self, records: &[ClinicRecord]) {
        let mut rows = self.rows.lock().unwrap_or_else(|p| p.into_inner());
        *rows = records.iter().map(|r| r.id.clone()).collect();
    }
}

impl ListSurface for HeadlessList {
    fn scroll_geometry(&self, id: &str) -> Option<ScrollGeometry> {
        let rows = self.rows.lock().unwrap_or_else(|p| p.into_inner());
        let index = rows.iter().position(|r| r == id)?;
        Some(ScrollGeometry {
            item_offset: index as f64 * self.row_height,
            item_height: self.row_height,
            container_height: self.container_height,
        })
    }

    fn scroll_to(&self, top: f64) {
        tracing::debug!(top, "scroll list");
        self.log.push(ViewCommand::ScrollTo { top });
    }
}

/// 遷移先を記録
#[derive(Debug, Clone)]
pub struct HeadlessNavigator {
    log: CommandLog,
    current: Arc<Mutex<Route>>,
}

impl HeadlessNavigator {
    pub fn new(log: CommandLog) -> Self {
        Self {
            log,
            current: Arc::default(),
        }
    }

    pub fn current(&self) -> Route {
        self.current.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn reset(&self) {
        *self.current.lock().unwrap_or_else(|p| p.into_inner()) = Route::Dashboard;
    }
}

impl Navigator for HeadlessNavigator {
    fn navigate(&self, route: &Route) {
        let path = route.to_path();
        tracing::info!(path = %path, "navigate");
        *self.current.lock().unwrap_or_else(|p| p.into_inner()) = route.clone();
        self.log.push(ViewCommand::Navigate { path });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ClinicRecord {
        ClinicRecord {
            id: id.to_string(),
            name: format!("Clinic {id}"),
            latitude: 34.5,
            longitude: 69.2,
            ..Default::default()
        }
    }

    #[test]
    fn test_open_popup_requires_marker() {
        let log = CommandLog::default();
        let map = HeadlessMap::new(log.clone());
        map.set_markers(&[record("1")]);

        assert!(map.open_popup("1"));
        assert!(!map.open_popup("2"));
        assert_eq!(log.commands(), vec![ViewCommand::OpenPopup { id: "1".into() }]);
    }

    #[test]
    fn test_list_geometry() {
        let list = HeadlessList::new(CommandLog::default(), 50.0, 400.0);
        list.set_rows(&[record("a"), record("b"), record("c")]);

        let geometry = list.scroll_geometry("c").expect("行が無い");
        assert_eq!(geometry.item_offset, 100.0);
        assert!(list.scroll_geometry("z").is_none());
    }

    #[test]
    fn test_navigator_tracks_route() {
        let log = CommandLog::default();
        let navigator = HeadlessNavigator::new(log.clone());
        navigator.navigate(&Route::clinic("7"));

        assert_eq!(navigator.current(), Route::clinic("7"));
        assert_eq!(log.take(), vec![ViewCommand::Navigate { path: "/clinic/7".into() }]);
        assert!(log.commands().is_empty());
    }
}
