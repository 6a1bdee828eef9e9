// Bundled sample dataset used whenever live data is unavailable.
//
// Stored in the flat fallback layout so it goes through the same normalizer
// as live payloads.

use hitboard_core::record::PlayerRecord;

use crate::error::StatsError;
use crate::normalize::normalize;
use crate::shape::RawPayload;

const FALLBACK_JSON: &str = include_str!("../data/fallback_hitters.json");

/// The bundled sample payload.
pub fn fallback_payload() -> Result<RawPayload, StatsError> {
    parse_sample(FALLBACK_JSON)
}

/// The bundled sample, normalized and sorted.
pub fn fallback_records() -> Result<Vec<PlayerRecord>, StatsError> {
    Ok(normalize(&fallback_payload()?)?)
}

fn parse_sample(text: &str) -> Result<RawPayload, StatsError> {
    RawPayload::from_json_str(text).map_err(|e| StatsError::Fallback(e.to_string()))
}
