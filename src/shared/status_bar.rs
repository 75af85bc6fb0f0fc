//! Status bar UI component.

use crate::shared::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the status bar: status text on the left, dataset summary on the right.
pub fn draw_status(
    f: &mut Frame<'_>,
    area: Rect,
    status: &str,
    summary: Option<&str>,
    colors: &ThemeColors,
) {
    let mut spans = vec![Span::raw(format!(" {}", status))];

    if let Some(summary) = summary {
        let used = status.chars().count() + 1;
        let pad = (area.width as usize).saturating_sub(used + summary.chars().count() + 1);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(summary.to_string(), Style::default().fg(colors.aqua)));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().fg(colors.fg0).bg(colors.bg1));

    f.render_widget(paragraph, area);
}
