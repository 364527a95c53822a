use serde::{Deserialize, Serialize};

/// Geographic position in degrees.
///
/// No range checks are applied; NaN and out-of-range values are carried through
/// untouched so the renderer decides what to do with them.
///
/// On the wire a coordinate is a two-element array `[lat, lon]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Builds a coordinate from a `[lon, lat]` pair (GeoJSON / OpenRouteService order).
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }

    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lon]
    }
}

#[cfg(test)]
mod tests {
    use super::Coordinate;

    #[test]
    fn wire_form_is_lat_lon_array() {
        let c = Coordinate::new(-41.4682, -72.9441);
        let text = serde_json::to_string(&c).unwrap();
        assert_eq!(text, "[-41.4682,-72.9441]");
        let back: Coordinate = serde_json::from_str(&text).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn lon_lat_pairs_are_swapped() {
        let c = Coordinate::from_lon_lat([-72.94, -41.46]);
        assert_eq!(c.lat, -41.46);
        assert_eq!(c.lon, -72.94);
        assert_eq!(c.to_lon_lat(), [-72.94, -41.46]);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let c = Coordinate::from([123.0, 500.0]);
        assert_eq!(c.lat, 123.0);
        assert_eq!(c.lon, 500.0);
    }
}
