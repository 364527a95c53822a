use foundation::{Coordinate, LatLngBounds};
use tracing::debug;

use crate::backend::MapBackend;
use crate::style::SurfaceConfig;

/// Handles acquired while a view is mounted.
struct Mounted<B: MapBackend> {
    surface: B::Surface,
    // Kept so the base layer lives as long as the surface; released by `destroy_surface`.
    _tiles: B::TileLayer,
    marker: B::Marker,
    overlay: B::Group,
    // Created on the first `show_area`; route syncs never touch it.
    areas: Option<B::Group>,
    marker_position: Coordinate,
    path_len: usize,
}

/// Read-only view of the mounted surface, for diagnostics.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceState {
    pub marker_position: Coordinate,
    /// Number of points in the drawn route; 0 when the overlay is empty.
    pub path_len: usize,
}

/// Keeps one rendering surface in step with the selected route.
///
/// Lifecycle per mounted view:
/// - `initialize` moves `Unmounted -> Initialized` (no-op if already initialized).
/// - `sync_route`, `focus` and `follow` are self-loops on `Initialized` and no-ops otherwise.
/// - `teardown` moves `Initialized -> Unmounted`; dropping the controller does the same.
pub struct MapSurfaceController<B: MapBackend> {
    backend: B,
    config: SurfaceConfig,
    mounted: Option<Mounted<B>>,
}

impl<B: MapBackend> MapSurfaceController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, SurfaceConfig::default())
    }

    pub fn with_config(backend: B, config: SurfaceConfig) -> Self {
        Self {
            backend,
            config,
            mounted: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn state(&self) -> Option<SurfaceState> {
        self.mounted.as_ref().map(|m| SurfaceState {
            marker_position: m.marker_position,
            path_len: m.path_len,
        })
    }

    /// Creates the surface, base layer, marker and empty overlay.
    ///
    /// Returns `false` without touching the backend when a surface already exists.
    pub fn initialize(&mut self, container: &str) -> bool {
        if self.mounted.is_some() {
            return false;
        }

        let cfg = &self.config;
        let surface = self.backend.create_surface(container, cfg.center, cfg.zoom);
        let tiles = self.backend.add_tile_layer(
            &surface,
            &cfg.tiles.url_template,
            &cfg.tiles.attribution,
        );
        let marker = self
            .backend
            .add_marker(&surface, cfg.center, &cfg.marker_icon);
        let overlay = self.backend.add_layer_group(&surface);

        debug!(container, "map surface mounted");
        self.mounted = Some(Mounted {
            surface,
            _tiles: tiles,
            marker,
            overlay,
            areas: None,
            marker_position: cfg.center,
            path_len: 0,
        });
        true
    }

    /// Releases the surface and everything attached to it. Safe to call when unmounted.
    pub fn teardown(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            self.backend.destroy_surface(mounted.surface);
            debug!("map surface torn down");
        }
    }

    /// Replaces the drawn route.
    ///
    /// - `None`: nothing changes; the previous route stays visible.
    /// - `Some(&[])`: the overlay is cleared; marker and viewport stay put.
    /// - otherwise: one polyline through every point, viewport fitted to it, marker on the
    ///   first point.
    pub fn sync_route(&mut self, coordinates: Option<&[Coordinate]>) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        let Some(path) = coordinates else {
            return;
        };

        self.backend.clear_group(&mounted.overlay);
        mounted.path_len = 0;

        let (Some(head), Some(bounds)) = (path.first(), LatLngBounds::from_points(path)) else {
            debug!("route cleared");
            return;
        };

        self.backend
            .add_polyline(&mounted.overlay, path, &self.config.route_style);
        self.backend.fit_bounds(&mounted.surface, bounds);
        self.backend.set_marker_position(&mounted.marker, *head);
        mounted.marker_position = *head;
        mounted.path_len = path.len();
        debug!(points = path.len(), "route synced");
    }

    /// Outlines a closed region (such as a geofence) beneath the route.
    ///
    /// Replaces any region shown before. An empty ring clears the region.
    pub fn show_area(&mut self, ring: &[Coordinate]) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        if mounted.areas.is_none() {
            mounted.areas = Some(self.backend.add_layer_group(&mounted.surface));
        }
        let Some(areas) = mounted.areas.as_ref() else {
            return;
        };
        self.backend.clear_group(areas);
        if !ring.is_empty() {
            self.backend
                .add_polygon(areas, ring, &self.config.area_style);
        }
    }

    /// Centers the view on `position` at `zoom` and moves the marker there.
    pub fn focus(&mut self, position: Coordinate, zoom: u8) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        self.backend.set_view(&mounted.surface, position, zoom);
        self.backend.set_marker_position(&mounted.marker, position);
        mounted.marker_position = position;
    }

    /// Moves the marker to `position` and pans to it, keeping the zoom.
    pub fn follow(&mut self, position: Coordinate) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        self.backend.set_marker_position(&mounted.marker, position);
        self.backend.pan_to(&mounted.surface, position);
        mounted.marker_position = position;
    }
}

impl<B: MapBackend> Drop for MapSurfaceController<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
