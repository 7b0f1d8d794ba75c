//! Leaflet ブリッジのバインディング
//!
//! 地図の描画は JavaScript 側（js/map-bridge.js）に委譲する。

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/map-bridge.js")]
extern "C" {
    /// 地図を作成
    ///
    /// # Arguments
    /// * `container_id` - 地図を描画する要素のID
    /// * `options_json` - DashboardConfig のJSON文字列
    /// * `on_marker_click` - マーカークリック時 (id, lat, lon)
    /// * `on_zoom` - ズーム変更時 (zoom)
    #[wasm_bindgen(js_name = "createMap")]
    pub fn create_map_js(
        container_id: &str,
        options_json: &str,
        on_marker_click: &Closure<dyn FnMut(String, f64, f64)>,
        on_zoom: &Closure<dyn FnMut(f64)>,
    );

    /// マーカーを差し替え（ClinicRecord配列）
    #[wasm_bindgen(js_name = "setMarkers")]
    pub fn set_markers_js(items: JsValue);

    #[wasm_bindgen(js_name = "setClustering")]
    pub fn set_clustering_js(enabled: bool);

    /// 境界GeoJSONを設定
    #[wasm_bindgen(js_name = "setBoundaries")]
    pub fn set_boundaries_js(geojson_json: &str);

    #[wasm_bindgen(js_name = "setBoundariesVisible")]
    pub fn set_boundaries_visible_js(visible: bool);

    /// 郡名ラベルの表示切替
    #[wasm_bindgen(js_name = "setLabelsVisible")]
    pub fn set_labels_visible_js(visible: bool);

    #[wasm_bindgen(js_name = "flyTo")]
    pub fn fly_to_js(lat: f64, lon: f64, zoom: u8, duration_seconds: f64);

    /// ポップアップを開く。マーカーが無ければfalse
    #[wasm_bindgen(js_name = "hasMarker")]
    pub fn has_marker_js(id: &str) -> bool;

    #[wasm_bindgen(js_name = "openPopup")]
    pub fn open_popup_js(id: &str) -> bool;

    /// 非表示から戻ったときのサイズ再計算
    #[wasm_bindgen(js_name = "invalidateSize")]
    pub fn invalidate_size_js();

    /// 詳細画面の小地図（マーカーとサービス範囲の円）
    #[wasm_bindgen(js_name = "showDetailMap")]
    pub fn show_detail_map_js(container_id: &str, lat: f64, lon: f64, name: &str, radius_meters: f64);
}
