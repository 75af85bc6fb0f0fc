//! Shared UI components.
//!
//! This module contains shared UI components used across different features:
//! - Theme colors and styling
//! - Value formatters
//! - Status bar and keymap bar widgets
//! - Overlay placement

mod formatters;
mod keymap_bar;
mod status_bar;
mod theme;

pub use formatters::{format_axis_value, format_number};
pub use keymap_bar::{draw_keymap, keymap_text};
pub use status_bar::draw_status;
pub use theme::{rgb, ThemeColors};

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A rectangle centred in `r`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
