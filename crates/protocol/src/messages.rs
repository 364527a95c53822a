//! JSON bodies exchanged between the dashboard and its backend.
//!
//! - `GET /history`      -> [`HistoryResponse`]
//! - `GET /track/{name}` -> [`TrackResponse`] or [`ErrorResponse`]
//! - `GET /live-route`   -> [`LiveRouteResponse`]
//!
//! Coordinates are always `[lat, lon]` on the wire.

use foundation::Coordinate;
use serde::{Deserialize, Serialize};

pub const HISTORY_PATH: &str = "/history";
pub const TRACK_PATH_PREFIX: &str = "/track/";
pub const LIVE_ROUTE_PATH: &str = "/live-route";
pub const POSITIONS_PATH: &str = "/api/positions";

/// Ordered list of route display names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackResponse {
    pub route: Vec<Coordinate>,
}

/// One step of the simulated vehicle feed.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveRouteResponse {
    pub coords: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
