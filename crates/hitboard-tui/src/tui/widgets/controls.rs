// Controls bar: the season selector, plus a notice whenever the drawn data is
// the bundled sample rather than the live API response.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use hitboard_stats::{DataSource, FallbackReason};

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![
        Span::raw(" Season: "),
        Span::styled(
            format!("\u{25C0} {} \u{25B6}", state.selected_season),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  [f] Fetch", Style::default().fg(Color::Gray)),
    ];

    if let Some(notice) = fallback_notice(state.data_source.as_ref()) {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            notice,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Banner text for sample data, or None for live data.
pub fn fallback_notice(source: Option<&DataSource>) -> Option<String> {
    match source? {
        DataSource::Live => None,
        DataSource::Fallback(FallbackReason::Network(reason)) => Some(format!(
            " Showing sample data: stats API unavailable ({reason}) "
        )),
        DataSource::Fallback(FallbackReason::Empty) => {
            Some(" Showing sample data: no qualified hitters for this season ".to_string())
        }
    }
}
