//! Route catalog built from a vehicle position log.
//!
//! A route definition names two address criteria. The first logged position matching
//! each criteria becomes the route's start/end; the path between them comes from an
//! external directions service and is stored here under the route's display name.

pub mod definitions;
pub mod live;
pub mod positions;
pub mod routes;

pub use definitions::*;
pub use live::*;
pub use positions::*;
pub use routes::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Parse(String),
    MissingStart { route: String },
    MissingEnd { route: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "catalog input invalid: {msg}"),
            CatalogError::MissingStart { route } => {
                write!(f, "no logged position matches the start of {route}")
            }
            CatalogError::MissingEnd { route } => {
                write!(f, "no logged position matches the end of {route}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}
