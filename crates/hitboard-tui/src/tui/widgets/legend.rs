// Legend widget: one colored swatch and team name per team in the chart.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::visualizer::container::LegendEntry;

use super::rgb_color;

/// Render the legend entries, wrapping onto as many lines as fit.
pub fn render(frame: &mut Frame, area: Rect, entries: &[LegendEntry]) {
    let spans: Vec<Span> = entries
        .iter()
        .flat_map(|entry| {
            [
                Span::styled(
                    "\u{25A0}",
                    Style::default()
                        .fg(rgb_color(entry.colors.primary))
                        .bg(rgb_color(entry.colors.secondary)),
                ),
                Span::raw(format!(" {}   ", entry.team)),
            ]
        })
        .collect();

    let paragraph = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Teams"));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitboard_core::colors::{Rgb, TeamColors};
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use ratatui::Terminal;

    #[test]
    fn renders_swatches_in_team_colors() {
        let entries = vec![
            LegendEntry {
                team: "Boston Red Sox".into(),
                colors: TeamColors {
                    primary: Rgb::hex(0xBD3039),
                    secondary: Rgb::hex(0x0C2340),
                },
            },
            LegendEntry {
                team: "Chicago Cubs".into(),
                colors: TeamColors {
                    primary: Rgb::hex(0x0E3386),
                    secondary: Rgb::hex(0xCC3433),
                },
            },
        ];
        let mut terminal = Terminal::new(TestBackend::new(60, 4)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &entries))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..60).map(|x| buffer[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("Boston Red Sox"));
        assert!(row.contains("Chicago Cubs"));

        // First swatch sits just inside the border.
        assert_eq!(buffer[(1, 1)].fg, Color::Rgb(0xBD, 0x30, 0x39));
        assert_eq!(buffer[(1, 1)].bg, Color::Rgb(0x0C, 0x23, 0x40));
    }

    #[test]
    fn empty_legend_renders_frame_only() {
        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        terminal.draw(|frame| render(frame, frame.area(), &[])).unwrap();
    }
}
