// Player records: the uniform unit every other component consumes.
//
// Records are produced by the stats normalizer (live or bundled data) and are
// treated as immutable values from then on.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Display name used when none of the source name fields are present.
pub const UNKNOWN_PLAYER: &str = "Unknown Player";

/// Display team used when the source team field is absent.
pub const UNKNOWN_TEAM: &str = "Unknown Team";

/// Number of records the dashboard displays at most.
pub const DISPLAY_LIMIT: usize = 30;

// ---------------------------------------------------------------------------
// PlayerRecord
// ---------------------------------------------------------------------------

/// One qualified hitter's season batting line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Source identifier, if the payload carried one. Display only.
    pub id: Option<u64>,
    pub name: String,
    pub team: String,
    /// Batting average in [0, 1].
    pub avg: f64,
    pub at_bats: u32,
    pub hits: u32,
    pub home_runs: u32,
    pub rbi: u32,
}

impl PlayerRecord {
    /// Batting average formatted the conventional way (three decimals).
    pub fn avg_display(&self) -> String {
        format_avg(self.avg)
    }
}

/// Format a batting average to three decimals (e.g. `0.312`).
pub fn format_avg(avg: f64) -> String {
    format!("{:.3}", avg)
}

// ---------------------------------------------------------------------------
// Ordering helpers
// ---------------------------------------------------------------------------

/// Descending comparison on batting average. NaN never reaches here because
/// the normalizer replaces non-finite values with 0.
pub fn cmp_avg_desc(a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
    b.avg.total_cmp(&a.avg)
}

/// Sort records by batting average, highest first.
///
/// The sort is stable: records with equal averages keep their input order.
pub fn sort_by_avg_desc(records: &mut [PlayerRecord]) {
    records.sort_by(cmp_avg_desc);
}

/// The records the dashboard actually shows: the first `limit` records of
/// the input, sorted by batting average descending.
///
/// Truncation happens before sorting, matching the upstream contract that the
/// source already delivered its top rows first.
pub fn displayed_records(records: &[PlayerRecord], limit: usize) -> Vec<PlayerRecord> {
    let mut shown: Vec<PlayerRecord> = records.iter().take(limit).cloned().collect();
    sort_by_avg_desc(&mut shown);
    shown
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
