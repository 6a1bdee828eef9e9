// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// | Controls Bar (1 row)                              |
// +-------------------------------+------------------+
// | Main Panel (72%)              | Summary (28%)    |
// |  chart / legend / table       |                  |
// +-------------------------------+------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::visualizer::container::Element;

/// Rows the legend gets: two border rows plus two rows of swatches.
pub const LEGEND_HEIGHT: u16 = 4;

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: app name, shown season and fetch state.
    pub status_bar: Rect,
    /// Season selector and the sample-data notice.
    pub controls_bar: Rect,
    /// Visualizer output: chart, legend and table, or a single message.
    pub main_panel: Rect,
    /// Derived season statistics.
    pub summary_panel: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(1), // controls bar
            Constraint::Min(10),   // main + summary
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(vertical[2]);

    AppLayout {
        status_bar: vertical[0],
        controls_bar: vertical[1],
        main_panel: horizontal[0],
        summary_panel: horizontal[1],
        help_bar: vertical[3],
    }
}

/// Split the main panel among the container's children, top to bottom.
///
/// Returns one rect per element, in the same order.
pub fn element_areas(area: Rect, elements: &[Element]) -> Vec<Rect> {
    if elements.is_empty() {
        return Vec::new();
    }
    let constraints: Vec<Constraint> = elements
        .iter()
        .map(|element| match element {
            Element::Canvas(_) => Constraint::Percentage(50),
            Element::Legend(_) => Constraint::Length(LEGEND_HEIGHT),
            Element::Table(_) => Constraint::Min(5),
            Element::Placeholder(_) | Element::Message(_) => Constraint::Min(3),
        })
        .collect();

    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

/// Area the chart canvas occupies within the main panel, if one is shown.
pub fn canvas_area(main_panel: Rect, elements: &[Element]) -> Option<Rect> {
    elements
        .iter()
        .zip(element_areas(main_panel, elements))
        .find_map(|(element, rect)| matches!(element, Element::Canvas(_)).then_some(rect))
}

/// Area the ranked table occupies within the main panel, if one is shown.
pub fn table_area(main_panel: Rect, elements: &[Element]) -> Option<Rect> {
    elements
        .iter()
        .zip(element_areas(main_panel, elements))
        .find_map(|(element, rect)| matches!(element, Element::Table(_)).then_some(rect))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizer::Visualizer;
    use hitboard_core::colors::TeamPalette;
    use hitboard_core::config::ChartSettings;
    use hitboard_core::record::PlayerRecord;

    fn test_area() -> Rect {
        Rect::new(0, 0, 160, 50)
    }

    fn rendered_elements() -> Vec<Element> {
        let mut visualizer = Visualizer::new(TeamPalette::mlb(), ChartSettings::default());
        visualizer.update_visualization(&[PlayerRecord {
            id: None,
            name: "Solo".into(),
            team: "Chicago Cubs".into(),
            avg: 0.300,
            at_bats: 500,
            hits: 150,
            home_runs: 20,
            rbi: 70,
        }]);
        visualizer.container().children().to_vec()
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        for (name, rect) in [
            ("status_bar", layout.status_bar),
            ("controls_bar", layout.controls_bar),
            ("main_panel", layout.main_panel),
            ("summary_panel", layout.summary_panel),
            ("help_bar", layout.help_bar),
        ] {
            assert!(rect.width > 0 && rect.height > 0, "{name} is empty: {rect:?}");
        }
    }

    #[test]
    fn bars_are_one_row_and_panels_split_width() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.controls_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.help_bar.y, 49);
        assert!(layout.main_panel.width > layout.summary_panel.width);
        assert_eq!(
            layout.main_panel.width + layout.summary_panel.width,
            test_area().width
        );
    }

    #[test]
    fn elements_stack_in_order() {
        let main = build_layout(test_area()).main_panel;
        let elements = rendered_elements();
        let areas = element_areas(main, &elements);
        assert_eq!(areas.len(), 3);
        assert!(areas[0].y < areas[1].y);
        assert!(areas[1].y < areas[2].y);
        assert_eq!(areas[1].height, LEGEND_HEIGHT);
        assert_eq!(canvas_area(main, &elements), Some(areas[0]));
        assert_eq!(table_area(main, &elements), Some(areas[2]));
    }

    #[test]
    fn single_message_fills_panel() {
        let main = build_layout(test_area()).main_panel;
        let elements = vec![Element::Message("nothing".into())];
        let areas = element_areas(main, &elements);
        assert_eq!(areas, vec![main]);
        assert!(canvas_area(main, &elements).is_none());
    }
}
