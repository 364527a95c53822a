//! Rendering primitives the controller is built against.
//!
//! A backend owns the actual map library objects. The controller only holds the
//! opaque handles it gets back and never inspects them.

use foundation::{Coordinate, LatLngBounds};

use crate::style::{AreaStyle, MarkerIcon, PathStyle};

pub trait MapBackend {
    type Surface;
    type TileLayer;
    type Marker;
    type Group;

    /// Binds a new surface to the container element with id `container`.
    fn create_surface(&mut self, container: &str, center: Coordinate, zoom: u8) -> Self::Surface;

    fn add_tile_layer(
        &mut self,
        surface: &Self::Surface,
        url_template: &str,
        attribution: &str,
    ) -> Self::TileLayer;

    fn add_marker(
        &mut self,
        surface: &Self::Surface,
        position: Coordinate,
        icon: &MarkerIcon,
    ) -> Self::Marker;

    fn set_marker_position(&mut self, marker: &Self::Marker, position: Coordinate);

    fn add_layer_group(&mut self, surface: &Self::Surface) -> Self::Group;

    fn clear_group(&mut self, group: &Self::Group);

    fn add_polyline(&mut self, group: &Self::Group, path: &[Coordinate], style: &PathStyle);

    /// Adds a filled polygon; `ring` may or may not repeat its first point.
    fn add_polygon(&mut self, group: &Self::Group, ring: &[Coordinate], style: &AreaStyle);

    fn fit_bounds(&mut self, surface: &Self::Surface, bounds: LatLngBounds);

    fn set_view(&mut self, surface: &Self::Surface, center: Coordinate, zoom: u8);

    fn pan_to(&mut self, surface: &Self::Surface, center: Coordinate);

    /// Releases the surface together with every layer, marker and handler attached to it.
    fn destroy_surface(&mut self, surface: Self::Surface);
}
