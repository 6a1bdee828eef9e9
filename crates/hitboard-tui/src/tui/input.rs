// Keyboard and mouse input handling.
//
// Translates crossterm events into UserCommand messages for the controller,
// or into local ViewState mutations (season selection, hover, table sort and
// scroll).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::protocol::UserCommand;

use super::layout::{build_layout, canvas_area, table_area};
use super::widgets::chart::bar_index_at;
use super::ViewState;

/// Rows moved by PageUp/PageDown in the table.
const PAGE_SIZE: isize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press is for the controller
/// (fetch, quit). Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports Press and Release separately on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),

        KeyCode::Char('f') | KeyCode::Enter => Some(UserCommand::Fetch {
            season: state.selected_season,
        }),

        // Season selector
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char(']') => {
            state.select_season(1);
            None
        }
        KeyCode::Char('-') | KeyCode::Char('[') => {
            state.select_season(-1);
            None
        }

        // Bar hover from the keyboard
        KeyCode::Left | KeyCode::Char('h') => {
            state.visualizer.hover_step(-1);
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.visualizer.hover_step(1);
            None
        }
        KeyCode::Esc => {
            state.visualizer.hover_leave();
            None
        }

        KeyCode::Char('s') => {
            state.visualizer.cycle_table_sort();
            state.table_scroll = 0;
            None
        }
        KeyCode::Char('c') => {
            state.clear();
            None
        }

        // Table scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            state.scroll_table(-1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.scroll_table(1);
            None
        }
        KeyCode::PageUp => {
            state.scroll_table(-PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            state.scroll_table(PAGE_SIZE);
            None
        }

        _ => None,
    }
}

/// Handle a mouse event: pointer movement drives bar hover, the wheel
/// scrolls the table when over it.
pub fn handle_mouse(mouse_event: MouseEvent, state: &mut ViewState) {
    let main_panel = build_layout(state.frame_area).main_panel;
    let children = state.visualizer.container().children();

    match mouse_event.kind {
        MouseEventKind::Moved => {
            let bars = state
                .visualizer
                .chart_config()
                .map_or(0, |config| config.bars.len());
            let hit = canvas_area(main_panel, children).and_then(|area| {
                bar_index_at(area, bars, mouse_event.column, mouse_event.row)
            });
            match hit {
                Some(index) => state.visualizer.hover_bar(index),
                None => state.visualizer.hover_leave(),
            }
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let over_table = table_area(main_panel, children).is_some_and(|area| {
                area.contains((mouse_event.column, mouse_event.row).into())
            });
            if over_table {
                let delta = if mouse_event.kind == MouseEventKind::ScrollUp {
                    -1
                } else {
                    1
                };
                state.scroll_table(delta);
            }
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
