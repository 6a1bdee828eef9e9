// Stats client for the hitboard dashboard: fetches the season hitting
// leaderboard, normalizes whatever shape comes back, and falls back to a
// bundled sample when live data is unusable.

pub mod client;
pub mod error;
pub mod fallback;
pub mod normalize;
pub mod shape;

pub use client::{DataSource, FallbackReason, FetchedPayload, SeasonStats, StatsClient, StatsSource};
pub use error::{ShapeError, StatsError};
pub use normalize::normalize;
pub use shape::{PayloadShape, RawPayload};
