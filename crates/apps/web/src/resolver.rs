use std::future::Future;
use std::pin::Pin;

use foundation::Coordinate;
use web_sys::console;

use crate::api;

pub type LocalBoxFuture<T> = Pin<Box<dyn Future<Output = T> + 'static>>;

/// Turns a selected route name into the coordinates to draw.
///
/// `None` means "nothing known for this name"; the map keeps whatever it shows.
pub trait RouteResolver {
    fn resolve(&self, name: &str) -> LocalBoxFuture<Option<Vec<Coordinate>>>;
}

/// Resolves nothing. Selecting a route only updates the selection.
#[derive(Debug, Default, Copy, Clone)]
pub struct UnresolvedRoutes;

impl RouteResolver for UnresolvedRoutes {
    fn resolve(&self, _name: &str) -> LocalBoxFuture<Option<Vec<Coordinate>>> {
        Box::pin(async { None })
    }
}

/// Asks the backend's `/track/{name}` endpoint.
#[derive(Debug, Default, Clone)]
pub struct HttpRouteResolver {
    base: Option<String>,
}

impl HttpRouteResolver {
    pub fn new(base: Option<String>) -> Self {
        Self { base }
    }
}

impl RouteResolver for HttpRouteResolver {
    fn resolve(&self, name: &str) -> LocalBoxFuture<Option<Vec<Coordinate>>> {
        let base = self.base.clone();
        let name = name.to_string();
        Box::pin(async move {
            match api::fetch_track(base.as_deref(), &name).await {
                Ok(route) => Some(route),
                Err(err) => {
                    console::error_2(&format!("route {name} not resolved:").into(), &err);
                    None
                }
            }
        })
    }
}

/// Resolver selection accepted by `mount_dashboard`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResolverKind {
    Unresolved,
    Http,
}

impl ResolverKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "http" | "track" => Some(Self::Http),
            "none" | "stub" | "unresolved" => Some(Self::Unresolved),
            _ => None,
        }
    }

    pub fn build(self, base: Option<String>) -> Box<dyn RouteResolver> {
        match self {
            Self::Unresolved => Box::new(UnresolvedRoutes),
            Self::Http => Box::new(HttpRouteResolver::new(base)),
        }
    }
}
