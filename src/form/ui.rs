//! Plot form UI rendering.

use super::PlotForm;
use crate::request::PlotKind;
use crate::shared::ThemeColors;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

/// Draw the plot type selector and the parameter fields.
pub fn draw_form(f: &mut Frame<'_>, form: &PlotForm, area: Rect, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    draw_kind_tabs(f, form.kind, chunks[0], colors);
    draw_fields(f, form, chunks[1], colors);
}

fn draw_kind_tabs(f: &mut Frame<'_>, selected: PlotKind, area: Rect, colors: &ThemeColors) {
    let titles: Vec<Line<'_>> = PlotKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| Line::from(format!("{} {}", i + 1, kind.name())))
        .collect();
    let index = PlotKind::ALL.iter().position(|k| *k == selected).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(index)
        .block(
            Block::default()
                .title(" Plot Type ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.bg2)),
        )
        .style(Style::default().fg(colors.fg0))
        .highlight_style(
            Style::default()
                .fg(colors.bg0)
                .bg(colors.yellow)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn draw_fields(f: &mut Frame<'_>, form: &PlotForm, area: Rect, colors: &ThemeColors) {
    let fields = form.visible_fields();
    let label_width = fields.iter().map(|field| field.label().len()).max().unwrap_or(0);

    let mut lines: Vec<Line<'_>> = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let focused = i == form.focus;
        let marker = if focused { "> " } else { "  " };
        let mut value = form.value(*field).to_string();
        if focused && form.editing {
            value.push('_');
        }

        let value_style = if focused && form.editing {
            Style::default().fg(colors.bg0).bg(colors.aqua)
        } else if focused {
            Style::default().fg(colors.yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.aqua)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(colors.yellow)),
            Span::styled(
                format!("{:<width$} : ", field.label(), width = label_width),
                Style::default().fg(colors.green),
            ),
            Span::styled(value, value_style),
        ]));
    }

    lines.push(Line::from(""));
    let hint = match form.kind {
        PlotKind::Venn => "Enter genes separated by commas. Set 3 is optional.",
        PlotKind::Volcano => "Genes beyond both thresholds are highlighted in red.",
        _ => "Press d to draw the chart.",
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(colors.gray))));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {} Settings ", form.kind.name()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.bg2))
                .style(Style::default().bg(colors.bg0)),
        );

    f.render_widget(paragraph, area);
}
