//! In-memory backend that records what a real map library would display.
//!
//! Used by tests and by native tooling that wants to inspect the scene without a browser.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use foundation::{Coordinate, LatLngBounds};

use crate::backend::MapBackend;
use crate::style::{AreaStyle, MarkerIcon, PathStyle};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerRef {
    surface: SurfaceId,
    index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayerRecord {
    pub url_template: String,
    pub attribution: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRecord {
    pub position: Coordinate,
    pub icon: MarkerIcon,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupRecord {
    pub polylines: Vec<Vec<Coordinate>>,
    pub styles: Vec<PathStyle>,
    pub polygons: Vec<Vec<Coordinate>>,
    pub area_styles: Vec<AreaStyle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSurface {
    pub container: String,
    pub center: Coordinate,
    pub zoom: u8,
    /// Last bounds passed to `fit_bounds`.
    pub viewport: Option<LatLngBounds>,
    pub tile_layers: Vec<TileLayerRecord>,
    pub markers: Vec<MarkerRecord>,
    pub groups: Vec<GroupRecord>,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_id: u32,
    surfaces: BTreeMap<SurfaceId, HeadlessSurface>,
    created: usize,
    calls: usize,
    destroyed: Rc<Cell<usize>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_surfaces(&self) -> impl Iterator<Item = &HeadlessSurface> {
        self.surfaces.values()
    }

    pub fn live_surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn surfaces_created(&self) -> usize {
        self.created
    }

    /// Total primitive calls received.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Shared counter of destroyed surfaces; stays readable after the backend is dropped.
    pub fn destroyed_log(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.destroyed)
    }

    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut HeadlessSurface> {
        self.calls += 1;
        self.surfaces.get_mut(&id)
    }
}

impl MapBackend for HeadlessBackend {
    type Surface = SurfaceId;
    type TileLayer = LayerRef;
    type Marker = LayerRef;
    type Group = LayerRef;

    fn create_surface(&mut self, container: &str, center: Coordinate, zoom: u8) -> SurfaceId {
        self.calls += 1;
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.created += 1;
        self.surfaces.insert(
            id,
            HeadlessSurface {
                container: container.to_string(),
                center,
                zoom,
                viewport: None,
                tile_layers: Vec::new(),
                markers: Vec::new(),
                groups: Vec::new(),
            },
        );
        id
    }

    fn add_tile_layer(
        &mut self,
        surface: &SurfaceId,
        url_template: &str,
        attribution: &str,
    ) -> LayerRef {
        let s = self.surface_mut(*surface);
        let index = s.map_or(0, |s| {
            s.tile_layers.push(TileLayerRecord {
                url_template: url_template.to_string(),
                attribution: attribution.to_string(),
            });
            s.tile_layers.len() - 1
        });
        LayerRef {
            surface: *surface,
            index,
        }
    }

    fn add_marker(
        &mut self,
        surface: &SurfaceId,
        position: Coordinate,
        icon: &MarkerIcon,
    ) -> LayerRef {
        let s = self.surface_mut(*surface);
        let index = s.map_or(0, |s| {
            s.markers.push(MarkerRecord {
                position,
                icon: icon.clone(),
            });
            s.markers.len() - 1
        });
        LayerRef {
            surface: *surface,
            index,
        }
    }

    fn set_marker_position(&mut self, marker: &LayerRef, position: Coordinate) {
        if let Some(m) = self
            .surface_mut(marker.surface)
            .and_then(|s| s.markers.get_mut(marker.index))
        {
            m.position = position;
        }
    }

    fn add_layer_group(&mut self, surface: &SurfaceId) -> LayerRef {
        let s = self.surface_mut(*surface);
        let index = s.map_or(0, |s| {
            s.groups.push(GroupRecord::default());
            s.groups.len() - 1
        });
        LayerRef {
            surface: *surface,
            index,
        }
    }

    fn clear_group(&mut self, group: &LayerRef) {
        if let Some(g) = self
            .surface_mut(group.surface)
            .and_then(|s| s.groups.get_mut(group.index))
        {
            g.polylines.clear();
            g.styles.clear();
            g.polygons.clear();
            g.area_styles.clear();
        }
    }

    fn add_polyline(&mut self, group: &LayerRef, path: &[Coordinate], style: &PathStyle) {
        if let Some(g) = self
            .surface_mut(group.surface)
            .and_then(|s| s.groups.get_mut(group.index))
        {
            g.polylines.push(path.to_vec());
            g.styles.push(style.clone());
        }
    }

    fn add_polygon(&mut self, group: &LayerRef, ring: &[Coordinate], style: &AreaStyle) {
        if let Some(g) = self
            .surface_mut(group.surface)
            .and_then(|s| s.groups.get_mut(group.index))
        {
            g.polygons.push(ring.to_vec());
            g.area_styles.push(style.clone());
        }
    }

    fn fit_bounds(&mut self, surface: &SurfaceId, bounds: LatLngBounds) {
        if let Some(s) = self.surface_mut(*surface) {
            s.viewport = Some(bounds);
            s.center = bounds.center();
        }
    }

    fn set_view(&mut self, surface: &SurfaceId, center: Coordinate, zoom: u8) {
        if let Some(s) = self.surface_mut(*surface) {
            s.center = center;
            s.zoom = zoom;
        }
    }

    fn pan_to(&mut self, surface: &SurfaceId, center: Coordinate) {
        if let Some(s) = self.surface_mut(*surface) {
            s.center = center;
        }
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        self.calls += 1;
        if self.surfaces.remove(&surface).is_some() {
            self.destroyed.set(self.destroyed.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HeadlessBackend;
    use crate::backend::MapBackend;
    use foundation::Coordinate;

    #[test]
    fn destroy_drops_attached_layers() {
        let mut b = HeadlessBackend::new();
        let s = b.create_surface("map", Coordinate::new(0.0, 0.0), 3);
        b.add_tile_layer(&s, "t", "a");
        let g = b.add_layer_group(&s);
        b.add_polyline(&g, &[Coordinate::new(1.0, 1.0)], &Default::default());
        b.destroy_surface(s);

        assert_eq!(b.live_surface_count(), 0);
        assert_eq!(b.destroyed_log().get(), 1);
        // Stale handles are ignored.
        b.clear_group(&g);
        assert_eq!(b.live_surface_count(), 0);
    }

    #[test]
    fn surfaces_are_independent() {
        let mut b = HeadlessBackend::new();
        let a = b.create_surface("a", Coordinate::new(0.0, 0.0), 1);
        let c = b.create_surface("c", Coordinate::new(0.0, 0.0), 1);
        b.pan_to(&a, Coordinate::new(5.0, 5.0));
        let centers: Vec<_> = b.live_surfaces().map(|s| s.center).collect();
        assert_eq!(centers, vec![Coordinate::new(5.0, 5.0), Coordinate::new(0.0, 0.0)]);
        b.destroy_surface(c);
        assert_eq!(b.surfaces_created(), 2);
        assert_eq!(b.live_surface_count(), 1);
    }
}
