//! `MapBackend` over the page's global Leaflet (`window.L`).

use foundation::{Coordinate, LatLngBounds};
use js_sys::{Array, Object, Reflect};
use surface::{AreaStyle, MapBackend, MarkerIcon, PathStyle};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L, js_name = Map)]
    #[derive(Debug, Clone)]
    pub type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn l_map(container: &str, options: &JsValue) -> LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64) -> LeafletMap;

    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &LeafletMap, bounds: &JsValue) -> LeafletMap;

    #[wasm_bindgen(method, js_name = panTo)]
    fn pan_to(this: &LeafletMap, center: &JsValue) -> LeafletMap;

    #[wasm_bindgen(method)]
    fn remove(this: &LeafletMap) -> LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = Layer)]
    #[derive(Debug, Clone)]
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &LeafletMap) -> Layer;

    #[wasm_bindgen(extends = Layer, js_namespace = L, js_name = Marker)]
    #[derive(Debug, Clone)]
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn l_marker(position: &JsValue, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn set_lat_lng(this: &Marker, position: &JsValue) -> Marker;

    #[wasm_bindgen(extends = Layer, js_namespace = L, js_name = LayerGroup)]
    #[derive(Debug, Clone)]
    pub type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn l_layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &LayerGroup) -> LayerGroup;

    #[wasm_bindgen(method, js_name = addLayer)]
    fn add_layer(this: &LayerGroup, layer: &Layer) -> LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn l_tile_layer(url_template: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = polyline)]
    fn l_polyline(path: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = polygon)]
    fn l_polygon(ring: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = icon)]
    fn l_icon(options: &JsValue) -> JsValue;
}

fn lat_lng(c: Coordinate) -> JsValue {
    let pair = Array::new();
    pair.push(&JsValue::from_f64(c.lat));
    pair.push(&JsValue::from_f64(c.lon));
    pair.into()
}

fn lat_lng_list(path: &[Coordinate]) -> JsValue {
    path.iter()
        .map(|c| lat_lng(*c))
        .collect::<Array>()
        .into()
}

fn bounds_value(bounds: LatLngBounds) -> JsValue {
    let corners = Array::new();
    corners.push(&lat_lng(bounds.south_west));
    corners.push(&lat_lng(bounds.north_east));
    corners.into()
}

fn pixel_pair(p: [u32; 2]) -> JsValue {
    let pair = Array::new();
    pair.push(&JsValue::from(p[0]));
    pair.push(&JsValue::from(p[1]));
    pair.into()
}

fn set(obj: &Object, key: &str, value: &JsValue) {
    // Setting a plain property on a fresh object cannot fail.
    let _ = Reflect::set(obj, &JsValue::from_str(key), value);
}

fn icon_value(icon: &MarkerIcon) -> JsValue {
    let opts = Object::new();
    set(&opts, "iconUrl", &JsValue::from_str(&icon.url));
    set(&opts, "iconSize", &pixel_pair(icon.size));
    set(&opts, "iconAnchor", &pixel_pair(icon.anchor));
    l_icon(&opts)
}

fn path_options(style: &PathStyle) -> JsValue {
    let opts = Object::new();
    set(&opts, "color", &JsValue::from_str(&style.color));
    set(&opts, "weight", &JsValue::from_f64(style.weight));
    if let Some(dash) = &style.dash_array {
        set(&opts, "dashArray", &JsValue::from_str(dash));
    }
    opts.into()
}

fn area_options(style: &AreaStyle) -> JsValue {
    let opts = Object::new();
    set(&opts, "color", &JsValue::from_str(&style.color));
    set(&opts, "fillOpacity", &JsValue::from_f64(style.fill_opacity));
    opts.into()
}

/// Live Leaflet objects for one mounted map.
#[derive(Debug, Default)]
pub struct LeafletBackend;

impl LeafletBackend {
    pub fn new() -> Self {
        Self
    }
}

impl MapBackend for LeafletBackend {
    type Surface = LeafletMap;
    type TileLayer = Layer;
    type Marker = Marker;
    type Group = LayerGroup;

    fn create_surface(&mut self, container: &str, center: Coordinate, zoom: u8) -> LeafletMap {
        let opts = Object::new();
        set(&opts, "preferCanvas", &JsValue::TRUE);
        let map = l_map(container, &opts);
        map.set_view(&lat_lng(center), f64::from(zoom));
        map
    }

    fn add_tile_layer(
        &mut self,
        surface: &LeafletMap,
        url_template: &str,
        attribution: &str,
    ) -> Layer {
        let opts = Object::new();
        set(&opts, "attribution", &JsValue::from_str(attribution));
        let layer = l_tile_layer(url_template, &opts);
        layer.add_to(surface);
        layer
    }

    fn add_marker(
        &mut self,
        surface: &LeafletMap,
        position: Coordinate,
        icon: &MarkerIcon,
    ) -> Marker {
        let opts = Object::new();
        set(&opts, "icon", &icon_value(icon));
        let marker = l_marker(&lat_lng(position), &opts);
        marker.add_to(surface);
        marker
    }

    fn set_marker_position(&mut self, marker: &Marker, position: Coordinate) {
        marker.set_lat_lng(&lat_lng(position));
    }

    fn add_layer_group(&mut self, surface: &LeafletMap) -> LayerGroup {
        let group = l_layer_group();
        group.add_to(surface);
        group
    }

    fn clear_group(&mut self, group: &LayerGroup) {
        group.clear_layers();
    }

    fn add_polyline(&mut self, group: &LayerGroup, path: &[Coordinate], style: &PathStyle) {
        let line = l_polyline(&lat_lng_list(path), &path_options(style));
        group.add_layer(&line);
    }

    fn add_polygon(&mut self, group: &LayerGroup, ring: &[Coordinate], style: &AreaStyle) {
        let area = l_polygon(&lat_lng_list(ring), &area_options(style));
        group.add_layer(&area);
    }

    fn fit_bounds(&mut self, surface: &LeafletMap, bounds: LatLngBounds) {
        surface.fit_bounds(&bounds_value(bounds));
    }

    fn set_view(&mut self, surface: &LeafletMap, center: Coordinate, zoom: u8) {
        surface.set_view(&lat_lng(center), f64::from(zoom));
    }

    fn pan_to(&mut self, surface: &LeafletMap, center: Coordinate) {
        surface.pan_to(&lat_lng(center));
    }

    fn destroy_surface(&mut self, surface: LeafletMap) {
        // Leaflet's `remove` detaches every layer and DOM listener it registered.
        surface.remove();
    }
}
