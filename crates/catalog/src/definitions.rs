use std::collections::BTreeMap;

use protocol::PositionRecord;
use serde::{Deserialize, Serialize};

use crate::CatalogError;

const DEFAULT_DEFINITIONS: &str = include_str!("../data/route_definitions.json");

/// Exact-match constraints on `positionStatus` fields, e.g. `{"street": "RUTA 5"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria(pub BTreeMap<String, String>);

impl Criteria {
    /// True when every constrained field is present and equal. Empty criteria match anything.
    pub fn matches(&self, record: &PositionRecord) -> bool {
        self.0
            .iter()
            .all(|(k, v)| record.position_status.field(k) == Some(v.as_str()))
    }

    pub fn first_match<'a>(&self, records: &'a [PositionRecord]) -> Option<&'a PositionRecord> {
        records.iter().find(|r| self.matches(r))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub name: String,
    pub start: Criteria,
    pub end: Criteria,
}

/// Start and end positions chosen for a definition.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints<'a> {
    pub start: &'a PositionRecord,
    pub end: &'a PositionRecord,
}

impl RouteDefinition {
    pub fn resolve_endpoints<'a>(
        &self,
        records: &'a [PositionRecord],
    ) -> Result<Endpoints<'a>, CatalogError> {
        let start = self
            .start
            .first_match(records)
            .ok_or_else(|| CatalogError::MissingStart {
                route: self.name.clone(),
            })?;
        let end = self
            .end
            .first_match(records)
            .ok_or_else(|| CatalogError::MissingEnd {
                route: self.name.clone(),
            })?;
        Ok(Endpoints { start, end })
    }
}

pub fn load_definitions(json: &str) -> Result<Vec<RouteDefinition>, CatalogError> {
    serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))
}

/// Logistics legs between Chiloé and Santiago shipped with the crate.
pub fn default_definitions() -> Vec<RouteDefinition> {
    load_definitions(DEFAULT_DEFINITIONS).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_positions;

    fn log() -> Vec<PositionRecord> {
        load_positions(
            r#"[
            {"messageId": "3", "positionStatus": {"latitude": -41.47, "longitude": -72.95,
                "street": "2 C. LAS HILANDERAS", "city": "PUERTO MONTT", "state": "LOS LAGOS"}},
            {"messageId": "1", "positionStatus": {"latitude": -41.30, "longitude": -73.00,
                "street": "RUTA 5", "state": "LOS LAGOS"}},
            {"messageId": "2", "positionStatus": {"latitude": -41.35, "longitude": -72.99,
                "street": "RUTA 5", "state": "LOS LAGOS"}}
        ]"#,
        )
        .unwrap()
    }

    fn criteria(pairs: &[(&str, &str)]) -> Criteria {
        Criteria(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn all_keys_must_match_exactly() {
        let recs = log();
        assert!(criteria(&[("street", "RUTA 5")]).matches(&recs[0]));
        assert!(!criteria(&[("street", "RUTA 5"), ("city", "PUERTO MONTT")]).matches(&recs[0]));
        assert!(!criteria(&[("street", "ruta 5")]).matches(&recs[0]));
        assert!(criteria(&[]).matches(&recs[0]));
    }

    #[test]
    fn endpoints_pick_first_match_in_log_order() {
        let recs = log();
        let def = RouteDefinition {
            name: "RUTA 5, LOS LAGOS - 2 C. LAS HILANDERAS, PUERTO MONTT".to_string(),
            start: criteria(&[("street", "RUTA 5"), ("state", "LOS LAGOS")]),
            end: criteria(&[("street", "2 C. LAS HILANDERAS"), ("city", "PUERTO MONTT")]),
        };
        let ends = def.resolve_endpoints(&recs).unwrap();
        assert_eq!(ends.start.message_id, "1");
        assert_eq!(ends.end.message_id, "3");
    }

    #[test]
    fn missing_end_is_reported() {
        let recs = log();
        let def = RouteDefinition {
            name: "x".to_string(),
            start: criteria(&[("street", "RUTA 5")]),
            end: criteria(&[("city", "SANTIAGO")]),
        };
        let err = def.resolve_endpoints(&recs).unwrap_err();
        assert_eq!(err, CatalogError::MissingEnd { route: "x".to_string() });
    }

    #[test]
    fn bundled_definitions_parse() {
        let defs = default_definitions();
        assert_eq!(defs.len(), 28);
        assert_eq!(
            defs[0].name,
            "RUTA 5, LOS LAGOS - 2 C. LAS HILANDERAS, PUERTO MONTT"
        );
        assert!(defs.iter().all(|d| !d.start.0.is_empty() && !d.end.0.is_empty()));
    }
}
