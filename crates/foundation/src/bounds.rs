use crate::coordinate::Coordinate;

/// Axis-aligned lat/lon bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatLngBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl LatLngBounds {
    pub fn new(south_west: Coordinate, north_east: Coordinate) -> Self {
        LatLngBounds {
            south_west,
            north_east,
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    ///
    /// NaN components are ignored by `f64::min`/`max` unless every value is NaN.
    pub fn from_points(points: &[Coordinate]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut b = LatLngBounds::new(*first, *first);
        for p in rest {
            b.extend(*p);
        }
        Some(b)
    }

    pub fn extend(&mut self, p: Coordinate) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lon = self.south_west.lon.min(p.lon);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lon = self.north_east.lon.max(p.lon);
    }

    pub fn contains(&self, p: Coordinate) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lon >= self.south_west.lon
            && p.lon <= self.north_east.lon
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_west.lat + self.north_east.lat) * 0.5,
            (self.south_west.lon + self.north_east.lon) * 0.5,
        )
    }
}
