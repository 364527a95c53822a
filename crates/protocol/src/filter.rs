use crate::positions::PositionRecord;

/// Case-insensitive substring filter over route names. An empty term keeps everything.
pub fn filter_history<'a>(names: &'a [String], term: &str) -> Vec<&'a str> {
    let needle = term.to_lowercase();
    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

/// Matches the trimmed term against message id, street, city and state.
pub fn filter_positions<'a>(
    records: &'a [PositionRecord],
    term: &str,
) -> Vec<&'a PositionRecord> {
    let needle = term.trim().to_lowercase();
    records
        .iter()
        .filter(|rec| {
            let status = &rec.position_status;
            [
                Some(rec.message_id.as_str()),
                status.street.as_deref(),
                status.city.as_deref(),
                status.state.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_history, filter_positions};
    use crate::positions::{PositionRecord, PositionStatus};

    fn names() -> Vec<String> {
        vec![
            "RUTA 5, QUELLÓN - ALAMEDA, SANTIAGO".to_string(),
            "ALAMEDA, SANTIAGO - RUTA 5, QUELLÓN".to_string(),
            "RUTA 5, RIO BUENO - RUTA 5, LIPINGUE".to_string(),
        ]
    }

    fn record(id: &str, street: &str, city: Option<&str>) -> PositionRecord {
        PositionRecord {
            message_id: id.to_string(),
            position_status: PositionStatus {
                latitude: 0.0,
                longitude: 0.0,
                street: Some(street.to_string()),
                city: city.map(str::to_string),
                state: Some("LOS LAGOS".to_string()),
                extra: Default::default(),
            },
        }
    }

    #[test]
    fn empty_term_keeps_all_routes() {
        let n = names();
        assert_eq!(filter_history(&n, "").len(), 3);
    }

    #[test]
    fn route_match_ignores_case() {
        let n = names();
        let hits = filter_history(&n, "santiago - ruta");
        assert_eq!(hits, vec!["ALAMEDA, SANTIAGO - RUTA 5, QUELLÓN"]);
        assert_eq!(filter_history(&n, "lipingue").len(), 1);
        assert!(filter_history(&n, "ancud").is_empty());
    }

    #[test]
    fn position_match_covers_id_and_address() {
        let recs = vec![
            record("100", "RUTA 5", None),
            record("200", "AV. BERLÍN", Some("SANTIAGO")),
        ];
        assert_eq!(filter_positions(&recs, "  ").len(), 2);
        assert_eq!(filter_positions(&recs, "20")[0].message_id, "200");
        assert_eq!(filter_positions(&recs, "berlín")[0].message_id, "200");
        assert_eq!(filter_positions(&recs, "santiago")[0].message_id, "200");
        assert_eq!(filter_positions(&recs, "los lagos").len(), 2);
        assert!(filter_positions(&recs, "maule").is_empty());
    }
}
