// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the Visualizer and everything else the
// frame needs. The controller pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream};
use crossterm::execute;
use futures_util::StreamExt;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::info;

use hitboard_core::config::{clamp_season, Config};
use hitboard_core::summary::SeasonSummary;
use hitboard_stats::DataSource;

use crate::protocol::{UiUpdate, UserCommand};
use crate::visualizer::container::Element;
use crate::visualizer::Visualizer;

use layout::{build_layout, element_areas, AppLayout};

// ---------------------------------------------------------------------------
// FetchStatus
// ---------------------------------------------------------------------------

/// What the controller last reported about the current fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing requested yet, or the chart was cleared.
    Idle,
    Loading { season: i32 },
    Ready,
    Failed(String),
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state read by `render_frame`.
pub struct ViewState {
    pub visualizer: Visualizer,
    /// Season shown in the selector; what `f` will fetch.
    pub selected_season: i32,
    /// Season whose data is currently drawn.
    pub shown_season: Option<i32>,
    pub fetch_status: FetchStatus,
    /// Origin of the drawn data.
    pub data_source: Option<DataSource>,
    pub summary: Option<SeasonSummary>,
    /// First visible table row.
    pub table_scroll: usize,
    /// Terminal area of the last frame; mouse hit-testing lays out against it.
    pub frame_area: Rect,
}

impl ViewState {
    pub fn new(config: &Config) -> Self {
        ViewState {
            visualizer: Visualizer::new(config.palette(), config.chart.clone()),
            selected_season: clamp_season(config.default_season),
            shown_season: None,
            fetch_status: FetchStatus::Idle,
            data_source: None,
            summary: None,
            table_scroll: 0,
            frame_area: Rect::default(),
        }
    }

    /// Move the season selector, staying within the selectable range.
    pub fn select_season(&mut self, delta: i32) {
        self.selected_season = clamp_season(self.selected_season.saturating_add(delta));
    }

    /// Scroll the table, clamped to its rows.
    pub fn scroll_table(&mut self, delta: isize) {
        let rows = self.visualizer.container().table().map_or(0, |t| t.len());
        let max = rows.saturating_sub(1) as isize;
        self.table_scroll = (self.table_scroll as isize + delta).clamp(0, max) as usize;
    }

    /// Drop the drawn chart and everything derived from it.
    pub fn clear(&mut self) {
        self.visualizer.clear_objects();
        self.shown_season = None;
        self.data_source = None;
        self.summary = None;
        self.table_scroll = 0;
        self.fetch_status = FetchStatus::Idle;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Loading { season } => {
            state.visualizer.show_loading();
            state.fetch_status = FetchStatus::Loading { season };
            state.summary = None;
            state.data_source = None;
            state.table_scroll = 0;
        }
        UiUpdate::Loaded { stats, summary } => {
            state.visualizer.update_visualization(&stats.records);
            state.shown_season = Some(stats.season);
            state.data_source = Some(stats.source);
            state.summary = Some(*summary);
            state.fetch_status = FetchStatus::Ready;
            state.table_scroll = 0;
        }
        UiUpdate::Failed { season, message } => {
            state
                .visualizer
                .show_message(format!("Could not load the {season} season: {message}"));
            state.shown_season = None;
            state.data_source = None;
            state.summary = None;
            state.fetch_status = FetchStatus::Failed(message);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::controls::render(frame, layout.controls_bar, state);
    render_main_panel(frame, &layout, state);
    widgets::summary::render(frame, layout.summary_panel, state);
    render_help_bar(frame, &layout);
}

fn render_main_panel(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let children = state.visualizer.container().children();
    if children.is_empty() {
        render_centered(
            frame,
            layout.main_panel,
            "Press f to fetch the selected season",
            Style::default().fg(Color::DarkGray),
        );
        return;
    }

    for (element, area) in children.iter().zip(element_areas(layout.main_panel, children)) {
        match element {
            Element::Canvas(handle) => widgets::chart::render(frame, area, state, *handle),
            Element::Legend(entries) => widgets::legend::render(frame, area, entries),
            Element::Table(rows) => widgets::players_table::render(frame, area, rows, state),
            Element::Placeholder(text) => render_centered(
                frame,
                area,
                text,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::ITALIC),
            ),
            Element::Message(text) => {
                let color = match state.fetch_status {
                    FetchStatus::Failed(_) => Color::Red,
                    _ => Color::Yellow,
                };
                render_centered(frame, area, text, Style::default().fg(color));
            }
        }
    }
}

fn render_centered(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Batting Leaders");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Vertically center by padding with empty lines.
    let pad = inner.height.saturating_sub(1) / 2;
    let mut lines: Vec<Line> = (0..pad).map(|_| Line::default()).collect();
    lines.push(Line::from(Span::styled(text.to_string(), style)));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " q:Quit | f:Fetch | +/-:Season | \u{2190}/\u{2192}:Hover | Esc:Unhover | s:Sort | c:Clear | \u{2191}/\u{2193}:Scroll";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// Enters the alternate screen with mouse capture, installs a panic hook that
/// restores the terminal, then selects over UI updates, terminal events and a
/// render tick until the user quits or the controller goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let size = terminal.size()?;
    view_state.frame_area = Rect::new(0, 0, size.width, size.height);

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        match input::handle_key(key_event, &mut view_state) {
                            Some(UserCommand::Quit) => {
                                let _ = cmd_tx.send(UserCommand::Quit).await;
                                break Ok(());
                            }
                            Some(cmd) => {
                                let _ = cmd_tx.send(cmd).await;
                            }
                            None => {}
                        }
                    }
                    Some(Ok(Event::Mouse(mouse_event))) => {
                        input::handle_mouse(mouse_event, &mut view_state);
                    }
                    Some(Ok(Event::Resize(width, height))) => {
                        view_state.frame_area = Rect::new(0, 0, width, height);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(e.into()),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| {
                    view_state.frame_area = frame.area();
                    render_frame(frame, &view_state);
                }) {
                    break Err(e.into());
                }
            }
        }
    };

    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
