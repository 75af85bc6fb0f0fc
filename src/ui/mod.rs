//! User interface rendering.
//!
//! Draws the main screen (file header, plot form or file browser, dataset
//! panel, status and keymap bars) and then any open overlay on top.

use crate::app::App;
use crate::chart_view::ui::draw_chart_view;
use crate::dialog::ui::{draw_dialog, draw_help_menu};
use crate::file_browser::ui::draw_file_browser;
use crate::form::ui::draw_form;
use crate::shared::{draw_keymap, draw_status, ThemeColors};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(&app.theme);

    f.render_widget(Block::default().style(Style::default().bg(colors.bg0)), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(5),    // body
            Constraint::Length(1), // status
            Constraint::Length(1), // keymap
        ])
        .split(f.area());

    draw_header(f, chunks[0], app, &colors);

    if app.file_browser_mode {
        draw_file_browser(f, &mut app.file_browser, chunks[1], &colors);
    } else {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);
        draw_form(f, &app.form, body[0], &colors);
        draw_dataset_panel(f, body[1], app, &colors);
    }

    let summary = app.dataset_summary();
    draw_status(f, chunks[2], &app.status, summary.as_deref(), &colors);
    draw_keymap(f, chunks[3], app.mode(), &colors);

    draw_chart_view(f, &app.chart_view, &app.layout, &colors);
    if app.help_menu.visible {
        draw_help_menu(f, &app.help_menu, &colors);
    }
    if let Some(dialog) = &app.dialog {
        draw_dialog(f, dialog, &colors);
    }
}

fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let line = Line::from(vec![
        Span::styled(
            " GeneViz ",
            Style::default()
                .fg(colors.bg0)
                .bg(colors.yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(app.file_label.clone(), Style::default().fg(colors.fg0)),
    ]);
    f.render_widget(Paragraph::new(line).style(Style::default().bg(colors.bg1)), area);
}

/// Columns of the loaded file, with the selected plot's requirements checked off.
fn draw_dataset_panel(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let kind = app.form.kind;
    let heading = Style::default().fg(colors.yellow).add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line<'_>> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!("Required for {}", kind.name()),
        heading,
    )));
    if kind.required_columns().is_empty() {
        lines.push(Line::from(Span::styled(
            "  No data file needed; genes are typed in.",
            Style::default().fg(colors.gray),
        )));
    }
    for column in kind.required_columns() {
        let present = app.dataset.as_ref().is_some_and(|d| d.has_column(column));
        let (mark, color) = if present {
            ("✓", colors.green)
        } else {
            ("✗", colors.red)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", mark), Style::default().fg(color)),
            Span::styled(column.to_string(), Style::default().fg(colors.fg0)),
        ]));
    }

    lines.push(Line::from(""));
    match &app.dataset {
        Some(dataset) => {
            lines.push(Line::from(Span::styled(
                format!("Columns ({})", dataset.columns.len()),
                heading,
            )));
            for column in &dataset.columns {
                lines.push(Line::from(Span::styled(
                    format!("  {}", column),
                    Style::default().fg(colors.aqua),
                )));
            }
        },
        None => lines.push(Line::from(Span::styled(
            "Press o to open a CSV file.",
            Style::default().fg(colors.gray),
        ))),
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Data ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.bg2))
            .style(Style::default().bg(colors.bg0)),
    );
    f.render_widget(paragraph, area);
}
