use axum::extract::{Path as AxumPath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use protocol::{HistoryResponse, LiveRouteResponse, PositionRecord, TrackResponse};
use serde_json::{json, Value};

use crate::AppState;

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

pub async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        history: state.catalog.names(),
    })
}

pub async fn get_track(
    State(state): State<AppState>,
    AxumPath(route_name): AxumPath<String>,
) -> Result<Json<TrackResponse>, ApiError> {
    let Some(path) = state.catalog.get(&route_name) else {
        return Err(api_error(StatusCode::NOT_FOUND, "route not found"));
    };
    Ok(Json(TrackResponse {
        route: path.to_vec(),
    }))
}

pub async fn get_live_route(
    State(state): State<AppState>,
) -> Result<Json<LiveRouteResponse>, ApiError> {
    let next = state.live.lock().next_coordinate();
    match next {
        Some(coords) => Ok(Json(LiveRouteResponse { coords })),
        None => Err(api_error(StatusCode::NOT_FOUND, "no routes loaded")),
    }
}

pub async fn get_positions(State(state): State<AppState>) -> Json<Vec<PositionRecord>> {
    Json(state.positions.as_ref().clone())
}
