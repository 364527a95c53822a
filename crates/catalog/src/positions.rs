use protocol::PositionRecord;

use crate::CatalogError;

/// Parses the position log and orders it by numeric message id.
///
/// Records with a non-numeric id keep their relative order after all numeric ones.
pub fn load_positions(json: &str) -> Result<Vec<PositionRecord>, CatalogError> {
    let mut records: Vec<PositionRecord> =
        serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
    sort_positions(&mut records);
    Ok(records)
}

pub fn sort_positions(records: &mut [PositionRecord]) {
    records.sort_by_key(|r| match r.sequence() {
        Some(n) => (0, n),
        None => (1, 0),
    });
}
