// Summary panel: league average, best and worst hitters, tier counts and
// team count for the displayed season.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use hitboard_core::record::{format_avg, PlayerRecord};
use hitboard_core::summary::SeasonSummary;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = match &state.summary {
        Some(summary) => summary_lines(summary),
        None => vec![Line::from(Span::styled(
            "No season loaded",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let title = match state.shown_season {
        Some(season) => format!("Season Summary ({season})"),
        None => "Season Summary".to_string(),
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn summary_lines(summary: &SeasonSummary) -> Vec<Line<'static>> {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Players:     ", label),
            Span::raw(summary.players.to_string()),
        ]),
        Line::from(vec![
            Span::styled("League AVG:  ", label),
            Span::raw(format_avg(summary.league_avg)),
        ]),
        Line::from(vec![
            Span::styled("Teams:       ", label),
            Span::raw(summary.distinct_teams.to_string()),
        ]),
        Line::default(),
        Line::from(Span::styled("Best", label)),
        player_line(summary.best.as_ref()),
        Line::from(Span::styled("Worst", label)),
        player_line(summary.worst.as_ref()),
        Line::default(),
        Line::from(Span::styled("At or above", label)),
    ];
    lines.extend(summary.tiers.iter().map(|tier| {
        Line::from(format!(
            "  {}  {:>3} players",
            format_avg(tier.threshold),
            tier.count
        ))
    }));
    lines
}

fn player_line(record: Option<&PlayerRecord>) -> Line<'static> {
    match record {
        Some(r) => Line::from(vec![
            Span::raw(format!("  {} ", r.name)),
            Span::styled(r.avg_display(), Style::default().fg(Color::Yellow)),
            Span::styled(format!(" ({})", r.team), Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from("  --"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitboard_core::summary::DEFAULT_TIERS;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn all_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn rec(name: &str, team: &str, avg: f64) -> PlayerRecord {
        PlayerRecord {
            id: None,
            name: name.into(),
            team: team.into(),
            avg,
            at_bats: 500,
            hits: 150,
            home_runs: 10,
            rbi: 50,
        }
    }

    #[test]
    fn renders_computed_summary() {
        let records = vec![
            rec("Top Hitter", "Chicago Cubs", 0.320),
            rec("Mid Hitter", "Boston Red Sox", 0.290),
            rec("Low Hitter", "Chicago Cubs", 0.260),
        ];
        let mut state = ViewState::default();
        state.summary = Some(SeasonSummary::compute(&records, DEFAULT_TIERS));
        state.shown_season = Some(2023);

        let mut terminal = Terminal::new(TestBackend::new(50, 20)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = all_text(&terminal);

        assert!(text.contains("Season Summary (2023)"));
        assert!(text.contains("League AVG:  0.290"));
        assert!(text.contains("Teams:       2"));
        assert!(text.contains("Top Hitter 0.320"));
        assert!(text.contains("Low Hitter 0.260"));
        assert!(text.contains("0.300    1 players"));
        assert!(text.contains("0.260    3 players"));
    }

    #[test]
    fn renders_placeholder_without_summary() {
        let state = ViewState::default();
        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        assert!(all_text(&terminal).contains("No season loaded"));
    }
}
