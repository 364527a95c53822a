use foundation::Coordinate;
use serde::{Deserialize, Deserializer, Serialize};

/// One raw telemetry message from the vehicle log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    /// Logged as a string, but some exports carry a bare number.
    #[serde(deserialize_with = "string_or_number")]
    pub message_id: String,
    pub position_status: PositionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionStatus {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Fields the dashboard does not interpret, kept for the raw positions endpoint.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PositionRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.position_status.latitude, self.position_status.longitude)
    }

    /// Numeric ordering key; `None` when the id is not an integer.
    pub fn sequence(&self) -> Option<i64> {
        self.message_id.trim().parse().ok()
    }
}

impl PositionStatus {
    /// Looks up a textual field by its JSON name.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "street" => self.street.as_deref(),
            "city" => self.city.as_deref(),
            "state" => self.state.as_deref(),
            other => self.extra.get(other).and_then(|v| v.as_str()),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::PositionRecord;
    use foundation::Coordinate;

    const SAMPLE: &str = r#"{
        "messageId": "1042",
        "positionStatus": {
            "latitude": -41.47,
            "longitude": -72.95,
            "street": "RUTA 5",
            "state": "LOS LAGOS",
            "speed": 62
        }
    }"#;

    #[test]
    fn parses_known_and_extra_fields() {
        let rec: PositionRecord = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(rec.message_id, "1042");
        assert_eq!(rec.sequence(), Some(1042));
        assert_eq!(rec.coordinate(), Coordinate::new(-41.47, -72.95));
        assert_eq!(rec.position_status.field("street"), Some("RUTA 5"));
        assert_eq!(rec.position_status.field("city"), None);
        assert_eq!(rec.position_status.extra["speed"], 62);
    }

    #[test]
    fn numeric_message_id_is_accepted() {
        let rec: PositionRecord = serde_json::from_str(
            r#"{"messageId": 7, "positionStatus": {"latitude": 0.0, "longitude": 0.0}}"#,
        )
        .unwrap();
        assert_eq!(rec.message_id, "7");
    }

    #[test]
    fn extra_fields_survive_reserialization() {
        let rec: PositionRecord = serde_json::from_str(SAMPLE).unwrap();
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["messageId"], "1042");
        assert_eq!(value["positionStatus"]["speed"], 62);
        assert!(value["positionStatus"].get("city").is_none());
    }
}
