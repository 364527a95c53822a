//! Client for the external directions service that supplies route geometry.

use std::future::Future;
use std::pin::Pin;

use foundation::Coordinate;
use serde_json::Value;

#[derive(Debug)]
pub enum DirectionsError {
    Http(reqwest::Error),
    Status(u16),
    Malformed(String),
}

impl std::fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectionsError::Http(e) => write!(f, "directions request failed: {e}"),
            DirectionsError::Status(code) => write!(f, "directions service returned HTTP {code}"),
            DirectionsError::Malformed(msg) => write!(f, "unexpected directions response: {msg}"),
        }
    }
}

impl std::error::Error for DirectionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectionsError::Http(e) => Some(e),
            _ => None,
        }
    }
}

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Anything that can produce a driving path between two points.
///
/// Methods return boxed futures for dyn-compatibility.
pub trait DirectionsProvider: Send + Sync {
    fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> BoxFuture<'_, Result<Vec<Coordinate>, DirectionsError>>;
}

/// OpenRouteService `driving-car` profile.
pub struct OrsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OrsClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v2/directions/driving-car",
            self.base_url.trim_end_matches('/')
        )
    }
}

impl DirectionsProvider for OrsClient {
    fn route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> BoxFuture<'_, Result<Vec<Coordinate>, DirectionsError>> {
        Box::pin(async move {
            // ORS wants lon,lat.
            let resp = self
                .http
                .get(self.url())
                .query(&[
                    ("api_key", self.api_key.clone()),
                    ("start", format!("{},{}", start.lon, start.lat)),
                    ("end", format!("{},{}", end.lon, end.lat)),
                ])
                .send()
                .await
                .map_err(DirectionsError::Http)?;

            if !resp.status().is_success() {
                return Err(DirectionsError::Status(resp.status().as_u16()));
            }

            let body: Value = resp.json().await.map_err(DirectionsError::Http)?;
            parse_route_geometry(&body)
        })
    }
}

/// Extracts the first feature's LineString as lat/lon coordinates.
pub fn parse_route_geometry(body: &Value) -> Result<Vec<Coordinate>, DirectionsError> {
    let coords = body
        .get("features")
        .and_then(|f| f.as_array())
        .and_then(|f| f.first())
        .and_then(|f| f.get("geometry"))
        .and_then(|g| g.get("coordinates"))
        .and_then(|c| c.as_array())
        .ok_or_else(|| DirectionsError::Malformed(truncate(&body.to_string(), 200)))?;

    coords
        .iter()
        .map(|pos| {
            let lon = pos.get(0).and_then(Value::as_f64);
            let lat = pos.get(1).and_then(Value::as_f64);
            match (lon, lat) {
                (Some(lon), Some(lat)) => Ok(Coordinate::from_lon_lat([lon, lat])),
                _ => Err(DirectionsError::Malformed(format!("bad position {pos}"))),
            }
        })
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
