//! Dialog and help menu rendering.

use super::{Dialog, DialogKind, HelpMenuState, HelpTopic};
use crate::shared::{centered_rect, ThemeColors};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw a modal dialog centred on the screen.
pub fn draw_dialog(f: &mut Frame<'_>, dialog: &Dialog, colors: &ThemeColors) {
    let area = dialog_area(f.area(), dialog);
    f.render_widget(Clear, area);

    let accent = match dialog.kind {
        DialogKind::Info => colors.blue,
        DialogKind::Warning => colors.orange,
        DialogKind::Error => colors.red,
    };

    let mut lines: Vec<Line<'_>> = dialog
        .message
        .lines()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.fg0))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter or Esc to close",
        Style::default().fg(colors.gray),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(
                format!(" {} ", dialog.title),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(colors.bg0)),
    );

    f.render_widget(paragraph, area);
}

/// Size the dialog to its message, within the screen.
fn dialog_area(screen: Rect, dialog: &Dialog) -> Rect {
    let width = screen.width.min(70).max(20);
    let inner_width = width.saturating_sub(2).max(1) as usize;
    let wrapped: usize = dialog
        .message
        .lines()
        .map(|l| l.chars().count().max(1).div_ceil(inner_width))
        .sum();
    let height = ((wrapped + 4) as u16).min(screen.height);

    Rect {
        x: screen.x + (screen.width.saturating_sub(width)) / 2,
        y: screen.y + (screen.height.saturating_sub(height)) / 2,
        width: width.min(screen.width),
        height,
    }
}

/// Draw the help menu.
pub fn draw_help_menu(f: &mut Frame<'_>, state: &HelpMenuState, colors: &ThemeColors) {
    let area = centered_rect(40, 40, f.area());
    f.render_widget(Clear, area);

    let items: Vec<ListItem<'_>> = HelpTopic::all()
        .into_iter()
        .enumerate()
        .map(|(i, topic)| {
            let style = if i == state.cursor {
                Style::default()
                    .fg(colors.bg0)
                    .bg(colors.yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg0)
            };
            ListItem::new(Line::from(format!(" {}", topic.label()))).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.bg2))
            .style(Style::default().bg(colors.bg0)),
    );

    f.render_widget(list, area);
}
