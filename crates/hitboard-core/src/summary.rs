// Derived season statistics for the summary panel.

use std::collections::BTreeSet;

use crate::record::PlayerRecord;

/// Default tier thresholds, highest first.
pub const DEFAULT_TIERS: [f64; 3] = [0.300, 0.280, 0.260];

/// How many records sit at or above one batting-average threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierCount {
    pub threshold: f64,
    pub count: usize,
}

/// Read-only summary over the displayed records.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonSummary {
    /// Number of records the summary covers.
    pub players: usize,
    /// Arithmetic mean of `avg`; 0 when there are no records.
    pub league_avg: f64,
    pub best: Option<PlayerRecord>,
    pub worst: Option<PlayerRecord>,
    pub tiers: [TierCount; 3],
    pub distinct_teams: usize,
}

impl SeasonSummary {
    /// Compute the summary. Ties for best/worst go to the record that appears
    /// first in `records`.
    pub fn compute(records: &[PlayerRecord], thresholds: [f64; 3]) -> Self {
        let players = records.len();
        let league_avg = if players == 0 {
            0.0
        } else {
            records.iter().map(|r| r.avg).sum::<f64>() / players as f64
        };

        let mut best: Option<&PlayerRecord> = None;
        let mut worst: Option<&PlayerRecord> = None;
        for record in records {
            if best.map_or(true, |b| record.avg > b.avg) {
                best = Some(record);
            }
            if worst.map_or(true, |w| record.avg < w.avg) {
                worst = Some(record);
            }
        }

        let tiers = thresholds.map(|threshold| TierCount {
            threshold,
            count: records.iter().filter(|r| r.avg >= threshold).count(),
        });

        let distinct_teams = records
            .iter()
            .map(|r| r.team.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        SeasonSummary {
            players,
            league_avg,
            best: best.cloned(),
            worst: worst.cloned(),
            tiers,
            distinct_teams,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
