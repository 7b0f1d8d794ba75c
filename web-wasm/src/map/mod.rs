//! 地図連携

pub mod bridge;
pub mod surfaces;

pub use surfaces::{DomList, GlooScheduler, HashNavigator, LeafletMap};

use clinic_map_common::{SelectionCoordinator, SelectionTiming};

/// ブラウザ用の選択連動
pub type BrowserCoordinator = SelectionCoordinator<LeafletMap, DomList, HashNavigator, GlooScheduler>;

pub fn browser_coordinator(config: &clinic_map_common::DashboardConfig) -> BrowserCoordinator {
    SelectionCoordinator::new(
        LeafletMap {
            fly_duration: std::time::Duration::from_millis(config.fly_duration_ms),
        },
        DomList,
        HashNavigator,
        GlooScheduler,
        SelectionTiming::from(config),
    )
}
