// Error taxonomy for fetching and normalizing season stats.

use thiserror::Error;

/// The payload matched neither the API shape nor the flat fallback shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized stats payload: {received}")]
pub struct ShapeError {
    /// Short description of what arrived instead (JSON kind, top-level keys).
    pub received: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Transport failure, non-success status, or an undecodable body.
    #[error("network error: {0}")]
    Network(String),

    /// Well-formed response with no rows.
    #[error("no qualified hitters returned for season {season}")]
    EmptyResult { season: i32 },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The bundled sample could not be read back.
    #[error("bundled sample data unusable: {0}")]
    Fallback(String),
}

impl StatsError {
    /// Whether the client substitutes bundled data for this failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StatsError::Network(_) | StatsError::EmptyResult { .. })
    }
}
