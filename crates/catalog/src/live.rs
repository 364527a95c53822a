use foundation::Coordinate;

use crate::routes::RouteCatalog;

/// Endless replay of every catalog coordinate, route after route, for the simulation mode.
#[derive(Debug, Clone)]
pub struct LiveFeed {
    points: Vec<Coordinate>,
    cursor: usize,
}

impl LiveFeed {
    pub fn new(catalog: &RouteCatalog) -> Self {
        let points = catalog
            .iter()
            .flat_map(|(_, path)| path.iter().copied())
            .collect();
        Self { points, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Next coordinate, wrapping to the start after the last one. `None` only when empty.
    pub fn next_coordinate(&mut self) -> Option<Coordinate> {
        let p = *self.points.get(self.cursor)?;
        self.cursor = (self.cursor + 1) % self.points.len();
        Some(p)
    }
}
