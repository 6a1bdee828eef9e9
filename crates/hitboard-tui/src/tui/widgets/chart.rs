// Chart widget: draws the live chart held by the Visualizer's engine as a
// vertical bar chart.
//
// Bars are laid out left to right from the inner edge of the border with a
// fixed width and gap, so `bar_index_at` can map a pointer position back to
// a bar using the same geometry the renderer used.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};
use ratatui::Frame;

use hitboard_core::record::format_avg;

use crate::tui::ViewState;
use crate::visualizer::engine::{ChartConfig, ChartHandle};

use super::rgba_color;

/// Resolution of the scaled bar values.
const SCALE: u64 = 1000;

/// Width and gap (in columns) for `bars` bars across `width` columns.
///
/// Bars get a one-column gap while there is room for it; when the area is
/// too narrow they pack edge to edge at one column each.
pub fn bar_geometry(width: u16, bars: usize) -> (u16, u16) {
    if bars == 0 {
        return (1, 0);
    }
    let slot = (width as usize / bars).min(u16::MAX as usize) as u16;
    if slot >= 2 {
        (slot - 1, 1)
    } else {
        (1, 0)
    }
}

fn chart_block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

/// Index of the bar under (`column`, `row`), if any.
pub fn bar_index_at(area: Rect, bars: usize, column: u16, row: u16) -> Option<usize> {
    let inner = chart_block().inner(area);
    if bars == 0
        || column < inner.x
        || column >= inner.right()
        || row < inner.y
        || row >= inner.bottom()
    {
        return None;
    }
    let (width, gap) = bar_geometry(inner.width, bars);
    let offset = column - inner.x;
    let slot = width + gap;
    let index = (offset / slot) as usize;
    (index < bars && offset % slot < width).then_some(index)
}

/// Bar height on the fixed y range, scaled to [0, SCALE]. Values outside the
/// range clip to the nearest edge.
pub fn scaled_value(value: f64, y_min: f64, y_max: f64) -> u64 {
    let span = y_max - y_min;
    if span <= 0.0 || !value.is_finite() {
        return 0;
    }
    (((value - y_min) / span).clamp(0.0, 1.0) * SCALE as f64).round() as u64
}

/// Render the chart for `handle` into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, handle: ChartHandle) {
    let Some(config) = state
        .visualizer
        .chart_config()
        .filter(|_| state.visualizer.container().canvas() == Some(handle))
    else {
        return;
    };

    let hovered = state.visualizer.chart_state().and_then(|c| c.hovered);
    let inner_width = chart_block().inner(area).width;
    let (bar_width, bar_gap) = bar_geometry(inner_width, config.bars.len());

    let bars = build_bars(config, hovered, bar_width);

    let mut block = chart_block().title(format!(
        "{} ({} - {})",
        config.title,
        format_avg(config.y_min),
        format_avg(config.y_max)
    ));
    if let Some(tooltip) = hovered.and_then(|i| state.visualizer.tooltip(i)) {
        block = block.title_bottom(Line::from(format!(" {tooltip} ")).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(SCALE);

    frame.render_widget(chart, area);
}

fn build_bars(config: &ChartConfig, hovered: Option<usize>, bar_width: u16) -> Vec<Bar<'static>> {
    config
        .bars
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let fill = rgba_color(config.fill[i]);
            let border = rgba_color(config.border[i]);
            let mut label_style = Style::default().fg(border);
            if hovered == Some(i) {
                label_style = label_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            // A terminal bar has no outline, so the secondary color goes on
            // the label and the value text. Exact value text only when it
            // fits inside the bar.
            let value_text = format_avg(spec.value);
            let text_value = if (bar_width as usize) > value_text.len() {
                value_text
            } else {
                String::new()
            };

            Bar::default()
                .value(scaled_value(spec.value, config.y_min, config.y_max))
                .text_value(text_value)
                .label(Line::from(spec.label.clone()).style(label_style))
                .style(Style::default().fg(fill))
                .value_style(Style::default().fg(border).bg(fill))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
