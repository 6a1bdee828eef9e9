// Stats API client: builds the season leaderboard request, performs it, and
// substitutes the bundled sample whenever the live data is unusable.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use hitboard_core::config::ApiConfig;
use hitboard_core::record::PlayerRecord;

use crate::error::StatsError;
use crate::fallback::fallback_payload;
use crate::normalize::normalize;
use crate::shape::{PayloadShape, RawPayload};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const USER_AGENT: &str = concat!("hitboard/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Why the bundled sample was used instead of live data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Transport failure, non-success status or undecodable body.
    Network(String),
    /// The API answered with zero rows.
    Empty,
}

/// Where a set of records came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Fallback(FallbackReason),
}

impl DataSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataSource::Fallback(_))
    }
}

/// A payload ready for normalization, tagged with its origin.
#[derive(Debug, Clone)]
pub struct FetchedPayload {
    pub payload: RawPayload,
    pub source: DataSource,
}

impl FetchedPayload {
    fn fallback(reason: FallbackReason) -> Result<Self, StatsError> {
        Ok(FetchedPayload {
            payload: fallback_payload()?,
            source: DataSource::Fallback(reason),
        })
    }
}

/// Normalized records for one season.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonStats {
    pub season: i32,
    /// Sorted by batting average, highest first.
    pub records: Vec<PlayerRecord>,
    pub source: DataSource,
}

// ---------------------------------------------------------------------------
// StatsSource
// ---------------------------------------------------------------------------

/// Anything that can produce a season's records. The controller depends on
/// this rather than on the HTTP client directly.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Load a season. Only an unrecognized payload shape is an error.
    async fn load(&self, season: i32) -> Result<SeasonStats, StatsError>;
}

// ---------------------------------------------------------------------------
// StatsClient
// ---------------------------------------------------------------------------

/// HTTP client for the season hitting leaderboard.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
    sport_id: u32,
    limit: usize,
}

impl StatsClient {
    /// Build a client from the `[api]` config section.
    pub fn new(api: &ApiConfig) -> Self {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().unwrap_or_else(|e| {
            warn!("Failed to build configured HTTP client ({e}), using defaults");
            reqwest::Client::new()
        });

        StatsClient {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            sport_id: api.sport_id,
            limit: api.limit,
        }
    }

    /// URL for the top qualified hitters of `season`, sorted by batting
    /// average descending.
    pub fn season_stats_url(&self, season: i32) -> String {
        format!(
            "{}/stats?stats=season&group=hitting&season={}&sportId={}&playerPool=qualified&sortStat=battingAverage&order=desc&limit={}",
            self.base_url, season, self.sport_id, self.limit
        )
    }

    /// Fetch the raw leaderboard payload for a season.
    ///
    /// Network failures and empty results are absorbed here: the bundled
    /// sample is returned instead and the reason is recorded on the result.
    /// A payload of unrecognized shape is passed through untouched. The only
    /// error is an unreadable bundled sample.
    pub async fn fetch_season_stats(&self, season: i32) -> Result<FetchedPayload, StatsError> {
        let url = self.season_stats_url(season);
        info!(season, %url, "Fetching season stats");

        let payload = match self.get_json(&url).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Stats fetch failed ({err}); using bundled sample data");
                return FetchedPayload::fallback(FallbackReason::Network(err.to_string()));
            }
        };

        if PayloadShape::detect(&payload).row_count() == Some(0) {
            let err = StatsError::EmptyResult { season };
            warn!("{err}; using bundled sample data");
            return FetchedPayload::fallback(FallbackReason::Empty);
        }

        Ok(FetchedPayload {
            payload,
            source: DataSource::Live,
        })
    }

    /// Fetch and normalize a season.
    pub async fn load_season(&self, season: i32) -> Result<SeasonStats, StatsError> {
        let fetched = self.fetch_season_stats(season).await?;
        let records = normalize(&fetched.payload)?;
        info!(
            season,
            count = records.len(),
            fallback = fetched.source.is_fallback(),
            "Season stats ready"
        );
        Ok(SeasonStats {
            season,
            records,
            source: fetched.source,
        })
    }

    async fn get_json(&self, url: &str) -> Result<RawPayload, StatsError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| StatsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Network(format!("API returned status {status}")));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| StatsError::Network(format!("invalid JSON body: {e}")))?;
        Ok(RawPayload(value))
    }
}

#[async_trait]
impl StatsSource for StatsClient {
    async fn load(&self, season: i32) -> Result<SeasonStats, StatsError> {
        self.load_season(season).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
