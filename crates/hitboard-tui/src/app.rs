// Controller: turns fetch commands into background loads and pushes the
// results to the TUI.
//
// Only one fetch is ever in flight. Starting a fetch aborts the previous
// task and bumps a generation counter; results that come back tagged with an
// older generation are dropped, so a slow response for an earlier season can
// never overwrite the season the user asked for last.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use hitboard_core::config::Config;
use hitboard_core::record::{displayed_records, DISPLAY_LIMIT};
use hitboard_core::summary::SeasonSummary;
use hitboard_stats::{SeasonStats, StatsError, StatsSource};

use crate::protocol::{UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// FetchResult
// ---------------------------------------------------------------------------

/// Outcome of one background load, tagged with the generation that started it.
#[derive(Debug)]
pub struct FetchResult {
    pub generation: u64,
    pub season: i32,
    pub outcome: Result<SeasonStats, StatsError>,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    source: Arc<dyn StatsSource>,
    tiers: [f64; 3],
    display_limit: usize,
    /// Bumped every time a fetch starts.
    pub fetch_generation: u64,
    pub current_fetch: Option<JoinHandle<()>>,
    fetch_tx: mpsc::Sender<FetchResult>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn StatsSource>,
        config: &Config,
        fetch_tx: mpsc::Sender<FetchResult>,
    ) -> Self {
        AppState {
            source,
            tiers: config.tiers,
            display_limit: config.chart.max_bars.min(DISPLAY_LIMIT),
            fetch_generation: 0,
            current_fetch: None,
            fetch_tx,
        }
    }

    /// Abort the in-flight fetch, if any.
    pub fn cancel_fetch(&mut self) {
        if let Some(handle) = self.current_fetch.take() {
            handle.abort();
            debug!(generation = self.fetch_generation, "Cancelled previous fetch");
        }
    }

    /// Start loading `season` in the background and return its generation.
    pub fn start_fetch(&mut self, season: i32) -> u64 {
        self.cancel_fetch();
        self.fetch_generation += 1;
        let generation = self.fetch_generation;

        let source = Arc::clone(&self.source);
        let tx = self.fetch_tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = source.load(season).await;
            let _ = tx
                .send(FetchResult {
                    generation,
                    season,
                    outcome,
                })
                .await;
        });

        self.current_fetch = Some(handle);
        info!(season, generation, "Fetch started");
        generation
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the controller loop until the user quits or the command channel
/// closes.
///
/// When `initial_season` is set, a fetch for it starts immediately so the
/// dashboard is populated on launch.
pub async fn run(
    mut fetch_rx: mpsc::Receiver<FetchResult>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
    initial_season: Option<i32>,
) -> anyhow::Result<()> {
    info!("Controller loop started");

    if let Some(season) = initial_season {
        begin_fetch(&mut state, season, &ui_tx).await;
    }

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Fetch { season }) => {
                        begin_fetch(&mut state, season, &ui_tx).await;
                    }
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            result = fetch_rx.recv() => {
                // AppState holds a sender, so this never yields None here.
                if let Some(result) = result {
                    handle_fetch_result(&mut state, result, &ui_tx).await;
                }
            }
        }
    }

    state.cancel_fetch();
    Ok(())
}

async fn begin_fetch(state: &mut AppState, season: i32, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx.send(UiUpdate::Loading { season }).await;
    state.start_fetch(season);
}

/// Apply a finished load. Results from superseded fetches are discarded.
pub async fn handle_fetch_result(
    state: &mut AppState,
    result: FetchResult,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    if result.generation != state.fetch_generation {
        debug!(
            "Discarding stale fetch result (season: {}, gen: {}, current gen: {})",
            result.season, result.generation, state.fetch_generation
        );
        return;
    }
    state.current_fetch = None;

    match result.outcome {
        Ok(stats) => {
            let shown = displayed_records(&stats.records, state.display_limit);
            let summary = SeasonSummary::compute(&shown, state.tiers);
            info!(
                season = stats.season,
                records = stats.records.len(),
                fallback = stats.source.is_fallback(),
                "Season loaded"
            );
            let _ = ui_tx
                .send(UiUpdate::Loaded {
                    stats: Box::new(stats),
                    summary: Box::new(summary),
                })
                .await;
        }
        Err(e) => {
            warn!(season = result.season, "Season load failed: {}", e);
            let _ = ui_tx
                .send(UiUpdate::Failed {
                    season: result.season,
                    message: e.to_string(),
                })
                .await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hitboard_core::record::PlayerRecord;
    use hitboard_stats::{DataSource, ShapeError};

    struct FixedSource;

    #[async_trait]
    impl StatsSource for FixedSource {
        async fn load(&self, season: i32) -> Result<SeasonStats, StatsError> {
            Ok(SeasonStats {
                season,
                records: vec![PlayerRecord {
                    id: Some(1),
                    name: "Solo".into(),
                    team: "Chicago Cubs".into(),
                    avg: 0.310,
                    at_bats: 500,
                    hits: 155,
                    home_runs: 10,
                    rbi: 60,
                }],
                source: DataSource::Live,
            })
        }
    }

    fn state() -> (AppState, mpsc::Receiver<FetchResult>) {
        let (tx, rx) = mpsc::channel(8);
        (AppState::new(Arc::new(FixedSource), &Config::default(), tx), rx)
    }

    #[tokio::test]
    async fn stale_generation_is_discarded() {
        let (mut state, _rx) = state();
        let (ui_tx, mut ui_rx) = mpsc::channel(8);
        state.fetch_generation = 3;

        let stale = FetchResult {
            generation: 2,
            season: 2020,
            outcome: FixedSource.load(2020).await,
        };
        handle_fetch_result(&mut state, stale, &ui_tx).await;
        drop(ui_tx);
        assert!(ui_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn current_generation_produces_loaded_with_summary() {
        let (mut state, _rx) = state();
        let (ui_tx, mut ui_rx) = mpsc::channel(8);
        state.fetch_generation = 1;

        let result = FetchResult {
            generation: 1,
            season: 2024,
            outcome: FixedSource.load(2024).await,
        };
        handle_fetch_result(&mut state, result, &ui_tx).await;

        match ui_rx.recv().await.unwrap() {
            UiUpdate::Loaded { stats, summary } => {
                assert_eq!(stats.season, 2024);
                assert_eq!(summary.players, 1);
                assert!((summary.league_avg - 0.310).abs() < 1e-9);
                assert_eq!(summary.tiers[0].count, 1);
            }
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn shape_error_produces_failed() {
        let (mut state, _rx) = state();
        let (ui_tx, mut ui_rx) = mpsc::channel(8);
        state.fetch_generation = 1;

        let result = FetchResult {
            generation: 1,
            season: 2024,
            outcome: Err(StatsError::Shape(ShapeError {
                received: "number".into(),
            })),
        };
        handle_fetch_result(&mut state, result, &ui_tx).await;

        match ui_rx.recv().await.unwrap() {
            UiUpdate::Failed { season, message } => {
                assert_eq!(season, 2024);
                assert!(message.contains("number"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn start_fetch_bumps_generation_and_delivers() {
        let (mut state, mut rx) = state();
        assert_eq!(state.start_fetch(2023), 1);
        assert_eq!(state.start_fetch(2024), 2);

        let result = rx.recv().await.unwrap();
        assert_eq!(result.generation, 2);
        assert_eq!(result.season, 2024);
    }
}
