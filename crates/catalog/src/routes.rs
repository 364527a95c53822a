use foundation::Coordinate;

/// Resolved routes in history order.
///
/// Inserting a name that already exists replaces its path but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteCatalog {
    entries: Vec<(String, Vec<Coordinate>)>,
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, path: Vec<Coordinate>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = path,
            None => self.entries.push((name, path)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Coordinate]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.as_slice())
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Coordinate])> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
