// hitboard entry point.
//
// Startup sequence:
// 1. Load config (missing file -> defaults)
// 2. Initialize tracing (log to file, not terminal)
// 3. Build the stats client
// 4. Create mpsc channels
// 5. Spawn the controller task, which fetches the default season
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use hitboard_core::config::{self, Config};
use hitboard_stats::StatsClient;
use hitboard_tui::app;
use hitboard_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config)?;
    info!("hitboard starting up");
    info!(
        "Config loaded: api={}, season={}, max_bars={}, {} team color overrides",
        config.api.base_url,
        config.default_season,
        config.chart.max_bars,
        config.team_colors.len()
    );

    // 3. Stats client
    let client = StatsClient::new(&config.api);

    // 4. Channels
    let (fetch_tx, fetch_rx) = mpsc::channel(16);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(64);

    // 5. Controller task
    let initial_season = config::clamp_season(config.default_season);
    let app_state = app::AppState::new(Arc::new(client), &config, fetch_tx);
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(fetch_rx, cmd_rx, ui_tx, app_state, Some(initial_season)).await {
            error!("Controller loop error: {}", e);
        }
    });

    // 6. TUI (blocks until the user presses 'q' or Ctrl+C)
    let view_state = tui::ViewState::new(&config);
    if let Err(e) = tui::run(ui_rx, cmd_tx, view_state).await {
        error!("TUI error: {}", e);
    }

    // 7. Cleanup: the controller exits on Quit or when cmd_tx drops.
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("hitboard shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("hitboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
