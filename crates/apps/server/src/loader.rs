use std::path::Path;

use catalog::{
    default_definitions, load_definitions, load_positions, CatalogError, RouteCatalog,
    RouteDefinition,
};
use protocol::PositionRecord;
use tracing::{info, warn};

use crate::directions::DirectionsProvider;

#[derive(Debug)]
pub enum LoadError {
    Io { path: String, source: std::io::Error },
    Catalog(CatalogError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "failed to read {path}: {source}"),
            LoadError::Catalog(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<CatalogError> for LoadError {
    fn from(e: CatalogError) -> Self {
        LoadError::Catalog(e)
    }
}

async fn read_text(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })
}

pub async fn read_positions(path: &Path) -> Result<Vec<PositionRecord>, LoadError> {
    let text = read_text(path).await?;
    Ok(load_positions(&text)?)
}

pub async fn read_definitions(path: Option<&Path>) -> Result<Vec<RouteDefinition>, LoadError> {
    match path {
        Some(path) => {
            let text = read_text(path).await?;
            Ok(load_definitions(&text)?)
        }
        None => Ok(default_definitions()),
    }
}

/// Resolves every definition against the position log and fetches its path.
///
/// Definitions that cannot be resolved are logged and skipped; the rest are inserted in
/// definition order.
pub async fn build_catalog(
    definitions: &[RouteDefinition],
    positions: &[PositionRecord],
    directions: &dyn DirectionsProvider,
) -> RouteCatalog {
    let mut catalog = RouteCatalog::new();

    for def in definitions {
        let ends = match def.resolve_endpoints(positions) {
            Ok(ends) => ends,
            Err(err) => {
                warn!("skipping route: {err}");
                continue;
            }
        };

        match directions
            .route(ends.start.coordinate(), ends.end.coordinate())
            .await
        {
            Ok(path) => {
                info!(route = %def.name, points = path.len(), "route resolved");
                catalog.insert(def.name.clone(), path);
            }
            Err(err) => warn!("failed to resolve route {}: {err}", def.name),
        }
    }

    catalog
}
