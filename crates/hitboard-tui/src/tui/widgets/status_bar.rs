// Status bar widget: app name, displayed season, fetch state, data origin.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use hitboard_stats::DataSource;

use crate::tui::{FetchStatus, ViewState};

/// Render the status bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (status_text, status_color) = status_label(state);

    let season = state
        .shown_season
        .map(|s| s.to_string())
        .unwrap_or_else(|| "--".to_string());

    let source = match &state.data_source {
        Some(DataSource::Live) => "Live",
        Some(DataSource::Fallback(_)) => "Sample",
        None => "--",
    };

    let line = Line::from(vec![
        Span::styled(
            " HITBOARD ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" | Season: {season} | ")),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw(format!(" | Data: {source}")),
    ]);

    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn status_label(state: &ViewState) -> (String, Color) {
    match &state.fetch_status {
        FetchStatus::Idle => ("IDLE".to_string(), Color::White),
        FetchStatus::Loading { season } => (format!("LOADING {season}"), Color::Yellow),
        FetchStatus::Ready => ("READY".to_string(), Color::Green),
        FetchStatus::Failed(_) => ("ERROR".to_string(), Color::Red),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use hitboard_stats::FallbackReason;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn line_text(state: &ViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..80).map(|x| buffer[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn idle_shows_placeholders() {
        let text = line_text(&ViewState::default());
        assert!(text.contains("HITBOARD"));
        assert!(text.contains("Season: --"));
        assert!(text.contains("IDLE"));
        assert!(text.contains("Data: --"));
    }

    #[test]
    fn loading_names_season() {
        let mut state = ViewState::default();
        state.fetch_status = FetchStatus::Loading { season: 2019 };
        assert!(line_text(&state).contains("LOADING 2019"));
    }

    #[test]
    fn ready_with_sample_data() {
        let mut state = ViewState::default();
        state.fetch_status = FetchStatus::Ready;
        state.shown_season = Some(2024);
        state.data_source = Some(DataSource::Fallback(FallbackReason::Empty));
        let text = line_text(&state);
        assert!(text.contains("Season: 2024"));
        assert!(text.contains("READY"));
        assert!(text.contains("Data: Sample"));
    }

    #[test]
    fn failed_shows_error() {
        let mut state = ViewState::default();
        state.fetch_status = FetchStatus::Failed("bad".into());
        assert!(line_text(&state).contains("ERROR"));
    }
}
