// Payload normalization: heterogeneous JSON rows -> uniform PlayerRecords.
//
// Each field is coerced independently. A missing or garbage field falls back
// to its default, so one bad row never sinks the batch.

use serde_json::Value;

use hitboard_core::record::{sort_by_avg_desc, PlayerRecord, UNKNOWN_PLAYER, UNKNOWN_TEAM};

use crate::error::ShapeError;
use crate::shape::{describe_unrecognized, PayloadShape, RawPayload};

/// Player name fields in the stats API's nested `player` object, in order of
/// preference.
const API_NAME_FIELDS: &[&str] = &[
    "fullName",
    "firstLastName",
    "nameFirstLast",
    "lastFirstName",
    "name",
];

/// Name fields on a flat fallback row.
const FLAT_NAME_FIELDS: &[&str] = &[
    "name",
    "fullName",
    "firstLastName",
    "nameFirstLast",
    "lastFirstName",
];

/// Normalize a payload into records sorted by batting average, highest first.
pub fn normalize(payload: &RawPayload) -> Result<Vec<PlayerRecord>, ShapeError> {
    let mut records: Vec<PlayerRecord> = match PayloadShape::detect(payload) {
        PayloadShape::Api(splits) => splits.into_iter().map(from_split).collect(),
        PayloadShape::Fallback(rows) => rows.into_iter().map(from_flat).collect(),
        PayloadShape::Unrecognized => return Err(describe_unrecognized(payload)),
    };
    sort_by_avg_desc(&mut records);
    Ok(records)
}

// ---------------------------------------------------------------------------
// Row mappers
// ---------------------------------------------------------------------------

/// Map one stats API split (`{player, team, stat}`).
fn from_split(split: &Value) -> PlayerRecord {
    let player = split.get("player");
    let stat = split.get("stat");

    let name = player
        .and_then(|p| first_text(p, API_NAME_FIELDS))
        .unwrap_or_else(|| UNKNOWN_PLAYER.to_string());

    PlayerRecord {
        id: coerce_id(player.and_then(|p| p.get("id"))),
        name,
        team: team_name(split.get("team")),
        avg: coerce_avg(stat.and_then(|s| s.get("avg"))),
        at_bats: coerce_count(stat.and_then(|s| s.get("atBats"))),
        hits: coerce_count(stat.and_then(|s| s.get("hits"))),
        home_runs: coerce_count(stat.and_then(|s| s.get("homeRuns"))),
        rbi: coerce_count(stat.and_then(|s| s.get("rbi"))),
    }
}

/// Map one pre-shaped row from the flat layout.
fn from_flat(row: &Value) -> PlayerRecord {
    PlayerRecord {
        id: coerce_id(row.get("id")),
        name: first_text(row, FLAT_NAME_FIELDS).unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
        team: team_name(row.get("team")),
        avg: coerce_avg(row.get("avg")),
        at_bats: coerce_count(first_present(row, &["atBats", "at_bats"])),
        hits: coerce_count(row.get("hits")),
        home_runs: coerce_count(first_present(row, &["homeRuns", "home_runs"])),
        rbi: coerce_count(row.get("rbi")),
    }
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// First non-blank string among `fields`.
fn first_text(obj: &Value, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|f| obj.get(*f).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_present<'a>(obj: &'a Value, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|f| obj.get(*f))
        .find(|v| !v.is_null())
}

/// Team display name: a plain string, or `name`/`teamName` on a team object.
fn team_name(team: Option<&Value>) -> String {
    match team {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(obj) if obj.is_object() => {
            first_text(obj, &["name", "teamName"]).unwrap_or_else(|| UNKNOWN_TEAM.to_string())
        }
        _ => UNKNOWN_TEAM.to_string(),
    }
}

fn number_of(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Batting average from a number or a string such as `".312"`, clamped to
/// [0, 1]. Defaults to 0.
pub(crate) fn coerce_avg(value: Option<&Value>) -> f64 {
    number_of(value).map_or(0.0, |n| n.clamp(0.0, 1.0))
}

/// Non-negative counting stat. Fractions truncate, negatives and garbage
/// become 0, oversized values saturate.
pub(crate) fn coerce_count(value: Option<&Value>) -> u32 {
    match number_of(value) {
        Some(n) if n > 0.0 => n.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

fn coerce_id(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_split_maps_all_fields() {
        let payload = RawPayload(json!({
            "stats": [{ "splits": [{
                "season": "2024",
                "player": { "id": 660271, "fullName": "Shohei Ohtani" },
                "team": { "id": 119, "name": "Los Angeles Dodgers" },
                "stat": { "avg": ".310", "atBats": 636, "hits": 197, "homeRuns": 54, "rbi": 130 }
            }]}]
        }));
        let records = normalize(&payload).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, Some(660271));
        assert_eq!(r.name, "Shohei Ohtani");
        assert_eq!(r.team, "Los Angeles Dodgers");
        assert!((r.avg - 0.310).abs() < 1e-12);
        assert_eq!((r.at_bats, r.hits, r.home_runs, r.rbi), (636, 197, 54, 130));
    }

    #[test]
    fn api_name_falls_back_through_fields() {
        let payload = RawPayload(json!({ "splits": [
            { "player": { "fullName": "  ", "firstLastName": "Bobby Witt Jr." } },
            { "player": { "lastFirstName": "Soto, Juan" } },
            { "player": { "id": 5 } },
            {}
        ]}));
        let names: Vec<String> = normalize(&payload)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(
            names,
            vec!["Bobby Witt Jr.", "Soto, Juan", UNKNOWN_PLAYER, UNKNOWN_PLAYER]
        );
    }

    #[test]
    fn missing_fields_default() {
        let payload = RawPayload(json!({ "splits": [ { "stat": { "avg": "-.---" } } ] }));
        let r = &normalize(&payload).unwrap()[0];
        assert_eq!(r.id, None);
        assert_eq!(r.team, UNKNOWN_TEAM);
        assert_eq!(r.avg, 0.0);
        assert_eq!((r.at_bats, r.hits, r.home_runs, r.rbi), (0, 0, 0, 0));
    }

    #[test]
    fn non_object_row_is_defaulted_not_fatal() {
        let payload = RawPayload(json!({ "players": [ null, { "name": "Real", "avg": 0.3 } ] }));
        let records = normalize(&payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Real");
        assert_eq!(records[1].name, UNKNOWN_PLAYER);
    }

    #[test]
    fn flat_rows_map_and_sort() {
        let payload = RawPayload(json!({ "players": [
            { "id": "7", "name": "Low", "team": "Chicago Cubs", "avg": 0.270, "atBats": "510", "hits": 138, "homeRuns": 12, "rbi": 60 },
            { "name": "High", "team": { "name": "Boston Red Sox" }, "avg": "0.315", "at_bats": 480, "hits": 151, "home_runs": 20, "rbi": 77 }
        ]}));
        let records = normalize(&payload).unwrap();
        assert_eq!(records[0].name, "High");
        assert_eq!(records[0].team, "Boston Red Sox");
        assert_eq!(records[0].at_bats, 480);
        assert_eq!(records[0].home_runs, 20);
        assert_eq!(records[1].id, Some(7));
        assert_eq!(records[1].at_bats, 510);
    }

    #[test]
    fn unrecognized_shape_is_error() {
        let err = normalize(&RawPayload(json!({ "message": "nope" }))).unwrap_err();
        assert_eq!(err.received, "object with keys [message]");
    }

    #[test]
    fn rows_without_any_player_object_are_error() {
        let err = normalize(&RawPayload(json!([1, 2, 3]))).unwrap_err();
        assert_eq!(err.received, "array");

        let err = normalize(&RawPayload(json!({ "stats": [ { "splits": ["x"] } ] }))).unwrap_err();
        assert_eq!(err.received, "object with keys [stats]");
    }

    #[test]
    fn coerce_avg_variants() {
        assert_eq!(coerce_avg(Some(&json!(".333"))), 0.333);
        assert_eq!(coerce_avg(Some(&json!("0.250"))), 0.25);
        assert_eq!(coerce_avg(Some(&json!(0.3))), 0.3);
        assert_eq!(coerce_avg(Some(&json!("NaN"))), 0.0);
        assert_eq!(coerce_avg(Some(&json!(true))), 0.0);
        assert_eq!(coerce_avg(Some(&json!(1.7))), 1.0);
        assert_eq!(coerce_avg(Some(&json!(-0.1))), 0.0);
        assert_eq!(coerce_avg(None), 0.0);
    }

    #[test]
    fn coerce_count_variants() {
        assert_eq!(coerce_count(Some(&json!(42))), 42);
        assert_eq!(coerce_count(Some(&json!("42"))), 42);
        assert_eq!(coerce_count(Some(&json!(41.9))), 41);
        assert_eq!(coerce_count(Some(&json!(-3))), 0);
        assert_eq!(coerce_count(Some(&json!("lots"))), 0);
        assert_eq!(coerce_count(Some(&json!(1e12))), u32::MAX);
        assert_eq!(coerce_count(Some(&Value::Null)), 0);
    }
}
