use foundation::Coordinate;

/// Center of the default view (Puerto Montt).
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(-41.4682, -72.9441);
pub const DEFAULT_ZOOM: u8 = 10;
/// Zoom used when focusing a single position.
pub const FOCUS_ZOOM: u8 = 15;

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Raster base layer source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileSource {
    fn default() -> Self {
        Self {
            url_template: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

/// Image marker icon. `anchor` is the pixel inside the image placed on the coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    pub url: String,
    pub size: [u32; 2],
    pub anchor: [u32; 2],
}

impl MarkerIcon {
    /// Truck icon anchored at its bottom-center.
    pub fn truck() -> Self {
        Self {
            url: "/camion.png".to_string(),
            size: [40, 40],
            anchor: [20, 40],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    pub color: String,
    pub weight: f64,
    /// `None` draws a solid line.
    pub dash_array: Option<String>,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: "blue".to_string(),
            weight: 3.0,
            dash_array: None,
        }
    }
}

/// Outline and fill of a closed region.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaStyle {
    pub color: String,
    pub fill_opacity: f64,
}

impl Default for AreaStyle {
    fn default() -> Self {
        Self {
            color: "red".to_string(),
            fill_opacity: 0.1,
        }
    }
}

/// Everything the controller needs to build a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub center: Coordinate,
    pub zoom: u8,
    pub tiles: TileSource,
    pub marker_icon: MarkerIcon,
    pub route_style: PathStyle,
    pub area_style: AreaStyle,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            tiles: TileSource::default(),
            marker_icon: MarkerIcon::truck(),
            route_style: PathStyle::default(),
            area_style: AreaStyle::default(),
        }
    }
}
