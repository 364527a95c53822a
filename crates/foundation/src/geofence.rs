use crate::coordinate::Coordinate;

/// Closed polygon region used to detect a vehicle leaving an area.
#[derive(Debug, Clone, PartialEq)]
pub struct Geofence {
    name: String,
    ring: Vec<Coordinate>,
}

impl Geofence {
    pub fn new(name: impl Into<String>, ring: Vec<Coordinate>) -> Self {
        Self {
            name: name.into(),
            ring,
        }
    }

    /// Rectangular fence around Puerto Montt.
    pub fn puerto_montt() -> Self {
        Self::new(
            "Puerto Montt",
            vec![
                Coordinate::new(-41.43, -73.20),
                Coordinate::new(-41.43, -72.90),
                Coordinate::new(-41.55, -72.90),
                Coordinate::new(-41.55, -73.20),
                Coordinate::new(-41.43, -73.20),
            ],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ring(&self) -> &[Coordinate] {
        &self.ring
    }

    /// Even-odd ray casting. Points exactly on an edge may land on either side.
    pub fn contains(&self, p: Coordinate) -> bool {
        let n = self.ring.len();
        if n < 3 {
            return false;
        }
        let (x, y) = (p.lon, p.lat);
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (self.ring[i].lon, self.ring[i].lat);
            let (xj, yj) = (self.ring[j].lon, self.ring[j].lat);
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// Tracks inside/outside transitions against a fence.
///
/// Starts as "inside" so a vehicle first seen outside the fence raises an exit.
#[derive(Debug, Clone)]
pub struct GeofenceWatch {
    fence: Geofence,
    was_inside: bool,
}

impl GeofenceWatch {
    pub fn new(fence: Geofence) -> Self {
        Self {
            fence,
            was_inside: true,
        }
    }

    pub fn fence(&self) -> &Geofence {
        &self.fence
    }

    /// Feeds a new position. Returns `true` only on an inside → outside transition.
    pub fn observe(&mut self, p: Coordinate) -> bool {
        let inside = self.fence.contains(p);
        let exited = self.was_inside && !inside;
        self.was_inside = inside;
        exited
    }
}

#[cfg(test)]
mod tests {
    use super::{Geofence, GeofenceWatch};
    use crate::Coordinate;

    #[test]
    fn default_center_is_inside_puerto_montt() {
        let fence = Geofence::puerto_montt();
        assert!(fence.contains(Coordinate::new(-41.4682, -72.9441)));
    }

    #[test]
    fn santiago_is_outside_puerto_montt() {
        let fence = Geofence::puerto_montt();
        assert!(!fence.contains(Coordinate::new(-33.45, -70.66)));
    }

    #[test]
    fn degenerate_ring_contains_nothing() {
        let fence = Geofence::new(
            "line",
            vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)],
        );
        assert!(!fence.contains(Coordinate::new(0.5, 0.5)));
    }

    #[test]
    fn watch_reports_exit_once() {
        let mut watch = GeofenceWatch::new(Geofence::puerto_montt());
        let inside = Coordinate::new(-41.47, -72.95);
        let outside = Coordinate::new(-40.0, -72.95);

        assert!(!watch.observe(inside));
        assert!(watch.observe(outside));
        assert!(!watch.observe(outside));
        assert!(!watch.observe(inside));
        assert!(watch.observe(outside));
    }
}
