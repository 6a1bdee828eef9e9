// Shared domain types for the hitboard dashboard: player records, team
// colors, summary statistics and configuration.

pub mod colors;
pub mod config;
pub mod record;
pub mod summary;
