// Library root: re-exports all modules so integration tests can reach the
// crate's public API.

pub mod app;
pub mod protocol;
pub mod tui;
pub mod visualizer;
