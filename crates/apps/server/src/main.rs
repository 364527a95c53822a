use std::path::Path;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use catalog::{LiveFeed, RouteCatalog};
use http::Method;
use parking_lot::Mutex;
use protocol::PositionRecord;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod directions;
mod loader;

use config::ServerConfig;
use directions::OrsClient;

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<RouteCatalog>,
    positions: Arc<Vec<PositionRecord>>,
    live: Arc<Mutex<LiveFeed>>,
}

impl AppState {
    pub fn new(catalog: RouteCatalog, positions: Vec<PositionRecord>) -> Self {
        let live = LiveFeed::new(&catalog);
        Self {
            catalog: Arc::new(catalog),
            positions: Arc::new(positions),
            live: Arc::new(Mutex::new(live)),
        }
    }
}

fn router(state: AppState, static_root: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(api::healthz))
        .route(protocol::HISTORY_PATH, get(api::get_history))
        .route("/track/:name", get(api::get_track))
        .route(protocol::LIVE_ROUTE_PATH, get(api::get_live_route))
        .route(protocol::POSITIONS_PATH, get(api::get_positions))
        .fallback_service(ServeDir::new(static_root))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(err) => {
            error!("{err}");
            return;
        }
    };

    let positions = match loader::read_positions(&config.positions_path).await {
        Ok(p) => p,
        Err(err) => {
            error!("cannot load position log: {err}");
            return;
        }
    };
    let definitions = match loader::read_definitions(config.definitions_path.as_deref()).await {
        Ok(d) => d,
        Err(err) => {
            error!("cannot load route definitions: {err}");
            return;
        }
    };
    info!(
        positions = positions.len(),
        definitions = definitions.len(),
        "inputs loaded"
    );

    let catalog = match &config.ors_api_key {
        Some(key) => {
            let ors = OrsClient::new(reqwest::Client::new(), &config.ors_base_url, key);
            loader::build_catalog(&definitions, &positions, &ors).await
        }
        None => {
            warn!("ORS_API_KEY not set; no routes will be resolved");
            RouteCatalog::new()
        }
    };
    info!(routes = catalog.len(), "route catalog ready");

    let state = AppState::new(catalog, positions);
    let app = router(state, &config.static_root);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(l) => l,
        Err(err) => {
            error!("failed to bind {}: {err}", config.addr);
            return;
        }
    };
    info!("route monitor listening on http://{}", config.addr);
    if let Err(err) = axum::serve(listener, app).await {
        error!("server error: {err}");
    }
}
