// TUI widget modules for each dashboard panel.

pub mod chart;
pub mod controls;
pub mod legend;
pub mod players_table;
pub mod status_bar;
pub mod summary;

use hitboard_core::colors::{Rgb, Rgba};
use ratatui::style::Color;

/// Background translucent colors are blended against.
const TERMINAL_BACKGROUND: Rgb = Rgb::new(0, 0, 0);

/// Terminal color for an opaque RGB value.
pub fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Terminal color for an RGBA value, blended over a black background.
pub fn rgba_color(rgba: Rgba) -> Color {
    rgb_color(rgba.composite_over(TERMINAL_BACKGROUND))
}
