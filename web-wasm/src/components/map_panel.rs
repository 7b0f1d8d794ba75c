//! 地図パネル
//!
//! 地図の作成はマウント後に1回だけ。以降は表示対象・クラスタ・境界の変化をJS側へ反映する。

use crate::app::DashboardContext;
use crate::map::bridge;
use clinic_map_common::LoadStatus;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

const MAP_CONTAINER_ID: &str = "map";

/// 地図の凡例（記号のCSSクラス, 表示名）
const LEGEND: &[(&str, &str)] = &[
    ("legend-swatch", "Clinic"),
    ("legend-line", "District boundary"),
];
const LEGEND_HINT: &str = "Click a list item to fly map";

#[component]
pub fn MapPanel(ctx: DashboardContext) -> impl IntoView {
    let state = ctx.state;
    let set_state = ctx.set_state;
    let (map_ready, set_map_ready) = signal(false);

    // ズーム変更では再計算しない
    let visible = Memo::new(move |_| state.with(|s| s.visible().to_vec()));
    let show_clusters = Memo::new(move |_| state.with(|s| s.show_clusters));
    let show_boundaries = Memo::new(move |_| state.with(|s| s.show_boundaries));
    let boundaries_status = Memo::new(move |_| state.with(|s| s.boundaries_status.clone()));
    let zoom = Memo::new(move |_| state.with(|s| s.zoom));

    Effect::new(move |_| {
        let options = ctx.config.with_value(serde_json::to_string);
        let options = match options {
            Ok(json) => json,
            Err(e) => {
                web_sys::console::error_1(&format!("地図設定のシリアライズ失敗: {e}").into());
                return;
            }
        };

        let on_marker_click = Closure::wrap(Box::new(move |id: String, lat: f64, lon: f64| {
            ctx.select_from_map(&id, lat, lon);
        }) as Box<dyn FnMut(String, f64, f64)>);

        let on_zoom = Closure::wrap(Box::new(move |zoom: f64| {
            let zoom = zoom.round().clamp(0.0, u8::MAX as f64) as u8;
            if state.with_untracked(|s| s.zoom) != zoom {
                set_state.update(|s| s.zoom = zoom);
            }
        }) as Box<dyn FnMut(f64)>);

        bridge::create_map_js(MAP_CONTAINER_ID, &options, &on_marker_click, &on_zoom);
        on_marker_click.forget();
        on_zoom.forget();
        set_map_ready.set(true);
    });

    Effect::new(move |_| {
        if !map_ready.get() {
            return;
        }
        let items = visible.with(|records| serde_wasm_bindgen::to_value(records));
        match items {
            Ok(items) => bridge::set_markers_js(items),
            Err(e) => web_sys::console::error_1(&format!("マーカー変換失敗: {e}").into()),
        }
    });

    Effect::new(move |_| {
        if map_ready.get() {
            bridge::set_clustering_js(show_clusters.get());
        }
    });

    Effect::new(move |_| {
        if !map_ready.get() || boundaries_status.get() != LoadStatus::Ready {
            return;
        }
        let geojson = state.with_untracked(|s| s.boundaries().map(|b| b.to_geojson().to_string()));
        if let Some(geojson) = geojson {
            bridge::set_boundaries_js(&geojson);
        }
    });

    Effect::new(move |_| {
        if map_ready.get() {
            bridge::set_boundaries_visible_js(show_boundaries.get());
        }
    });

    Effect::new(move |_| {
        if map_ready.get() {
            let zoom = zoom.get();
            bridge::set_labels_visible_js(ctx.config.with_value(|c| c.labels_visible_at(zoom)));
        }
    });

    view! {
        <div class="map-panel">
            <div id=MAP_CONTAINER_ID class="map-wrap"></div>
            <div class="map-legend">
                {LEGEND
                    .iter()
                    .map(|(symbol, label)| {
                        view! {
                            <div class="legend-row">
                                <span class=*symbol></span>
                                {*label}
                            </div>
                        }
                    })
                    .collect_view()}
                <div class="legend-row legend-hint">
                    <span class="legend-icon">"🖱️"</span>
                    {LEGEND_HINT}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_entries() {
        let labels: Vec<&str> = LEGEND.iter().map(|(_, label)| *label).collect();
        assert_eq!(labels, vec!["Clinic", "District boundary"]);
        assert_eq!(LEGEND_HINT, "Click a list item to fly map");
    }
}
