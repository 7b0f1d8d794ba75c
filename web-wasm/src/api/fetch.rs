//! fetch API でテキストを取得

use clinic_map_common::LoadFailure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// URLの本文を取得（2xx以外は失敗）
pub async fn fetch_text(url: &str) -> Result<String, LoadFailure> {
    fetch_text_js(url)
        .await
        .map_err(|e| LoadFailure::new(e.as_string().unwrap_or_else(|| format!("{:?}", e))))
}

async fn fetch_text_js(url: &str) -> Result<String, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP error: {}", resp.status())));
    }

    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("レスポンスが文字列ではありません"))
}
