// Ranked players table: Rank, Name, Team, AVG, AB, H, HR, RBI.
//
// Rows arrive pre-sorted from the Visualizer. The active sort column is
// marked in the header and rows for the hovered team are highlighted.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

use crate::tui::ViewState;
use crate::visualizer::container::TableRow;
use crate::visualizer::SortColumn;

const SORTABLE: [SortColumn; 5] = [
    SortColumn::Avg,
    SortColumn::AtBats,
    SortColumn::Hits,
    SortColumn::HomeRuns,
    SortColumn::Rbi,
];

/// Render the table into the given area.
pub fn render(frame: &mut Frame, area: Rect, rows: &[TableRow], state: &ViewState) {
    let active = state.visualizer.table_sort();
    let hovered_team = state.visualizer.hovered_team();

    let mut header_cells = vec![Cell::from("#"), Cell::from("Name"), Cell::from("Team")];
    header_cells.extend(SORTABLE.iter().map(|column| {
        if *column == active {
            Cell::from(format!("{}\u{25BC}", column.label())).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Cell::from(column.label())
        }
    }));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let body: Vec<Row> = rows
        .iter()
        .map(|r| {
            let style = if hovered_team == Some(r.team.as_str()) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(r.rank.to_string()),
                Cell::from(r.name.clone()),
                Cell::from(r.team.clone()),
                Cell::from(r.avg.clone()),
                Cell::from(r.at_bats.to_string()),
                Cell::from(r.hits.to_string()),
                Cell::from(r.home_runs.to_string()),
                Cell::from(r.rbi.to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(18),
        Constraint::Min(16),
        Constraint::Length(6),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
    ];

    let title = format!("Leaderboard ({} players, sorted by {})", rows.len(), active.label());
    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

    let mut table_state = TableState::default().with_offset(state.table_scroll);
    frame.render_stateful_widget(table, area, &mut table_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use hitboard_core::record::PlayerRecord;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    fn loaded_state() -> ViewState {
        let records = vec![
            PlayerRecord {
                id: None,
                name: "Ann Alpha".into(),
                team: "Chicago Cubs".into(),
                avg: 0.321,
                at_bats: 560,
                hits: 180,
                home_runs: 22,
                rbi: 90,
            },
            PlayerRecord {
                id: None,
                name: "Ben Beta".into(),
                team: "Boston Red Sox".into(),
                avg: 0.288,
                at_bats: 530,
                hits: 153,
                home_runs: 31,
                rbi: 101,
            },
        ];
        let mut state = ViewState::default();
        state.visualizer.update_visualization(&records);
        state
    }

    fn draw(state: &ViewState) -> Terminal<TestBackend> {
        let rows = state.visualizer.container().table().unwrap().to_vec();
        let mut terminal = Terminal::new(TestBackend::new(90, 8)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &rows, state))
            .unwrap();
        terminal
    }

    #[test]
    fn renders_header_and_rows_in_rank_order() {
        let state = loaded_state();
        let terminal = draw(&state);
        let buffer = terminal.backend().buffer();

        assert!(row_text(buffer, 0).contains("sorted by AVG"));
        assert!(row_text(buffer, 1).contains("AVG\u{25BC}"));
        let first = row_text(buffer, 2);
        assert!(first.contains("Ann Alpha"));
        assert!(first.contains("0.321"));
        assert!(row_text(buffer, 3).contains("Ben Beta"));
    }

    #[test]
    fn header_follows_sort_column() {
        let mut state = loaded_state();
        state.visualizer.set_table_sort(SortColumn::HomeRuns);
        let terminal = draw(&state);
        let buffer = terminal.backend().buffer();
        assert!(row_text(buffer, 1).contains("HR\u{25BC}"));
        assert!(row_text(buffer, 2).contains("Ben Beta"));
    }

    #[test]
    fn hovered_team_rows_are_highlighted() {
        let mut state = loaded_state();
        state.visualizer.hover_bar(1); // Ben Beta, Boston
        let terminal = draw(&state);
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(2, 3)].bg, Color::Yellow);
        assert_ne!(buffer[(2, 2)].bg, Color::Yellow);
    }

    #[test]
    fn scroll_offset_skips_rows() {
        let mut state = loaded_state();
        state.table_scroll = 1;
        let terminal = draw(&state);
        let buffer = terminal.backend().buffer();
        assert!(row_text(buffer, 2).contains("Ben Beta"));
    }
}
