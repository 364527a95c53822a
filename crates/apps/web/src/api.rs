use foundation::Coordinate;
use gloo_net::http::Request;
use protocol::{
    HISTORY_PATH, HistoryResponse, LIVE_ROUTE_PATH, LiveRouteResponse, POSITIONS_PATH,
    PositionRecord, TRACK_PATH_PREFIX, TrackResponse,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

/// Backend origin set by the host page as `window.__routeMonitorBackendUrl`.
///
/// Unset or blank means same-origin relative URLs.
pub fn backend_base_url() -> Option<String> {
    let window = web_sys::window()?;
    let val = js_sys::Reflect::get(&window, &JsValue::from_str("__routeMonitorBackendUrl")).ok()?;
    let s = val.as_string().unwrap_or_default();
    let s = s.trim().trim_end_matches('/').to_string();
    if s.is_empty() { None } else { Some(s) }
}

pub fn endpoint(base: Option<&str>, path: &str) -> String {
    match base {
        Some(base) => format!("{base}{path}"),
        None => path.to_string(),
    }
}

/// `/track/{name}` with the name escaped as a single path segment.
pub fn track_url(base: Option<&str>, name: &str) -> String {
    let encoded: String = js_sys::encode_uri_component(name).into();
    endpoint(base, &format!("{TRACK_PATH_PREFIX}{encoded}"))
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let body = body.trim();
        let msg = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {body}")
        };
        return Err(JsValue::from_str(&msg));
    }

    let text = resp
        .text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub async fn fetch_history(base: Option<&str>) -> Result<Vec<String>, JsValue> {
    let body: HistoryResponse = fetch_json(&endpoint(base, HISTORY_PATH)).await?;
    Ok(body.history)
}

pub async fn fetch_positions(base: Option<&str>) -> Result<Vec<PositionRecord>, JsValue> {
    fetch_json(&endpoint(base, POSITIONS_PATH)).await
}

pub async fn fetch_track(base: Option<&str>, name: &str) -> Result<Vec<Coordinate>, JsValue> {
    let body: TrackResponse = fetch_json(&track_url(base, name)).await?;
    Ok(body.route)
}

pub async fn fetch_live_position(base: Option<&str>) -> Result<Coordinate, JsValue> {
    let body: LiveRouteResponse = fetch_json(&endpoint(base, LIVE_ROUTE_PATH)).await?;
    Ok(body.coords)
}

#[cfg(test)]
mod tests {
    use super::endpoint;

    #[test]
    fn endpoint_is_relative_without_base() {
        assert_eq!(endpoint(None, "/history"), "/history");
        assert_eq!(
            endpoint(Some("http://127.0.0.1:8000"), "/history"),
            "http://127.0.0.1:8000/history"
        );
    }
}
