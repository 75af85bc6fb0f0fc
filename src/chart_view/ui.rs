//! Chart view rendering.
//!
//! Scatter charts and Venn diagrams are drawn on a braille [`Canvas`]; the
//! heatmap is a grid of coloured text cells.

use super::ChartViewState;
use crate::plots::{
    heatmap::format_cell, manhattan::SHADES, venn::SET_COLORS, Figure, HeatmapFigure,
    ManhattanFigure, Significance, VennFigure, VolcanoFigure,
};
use crate::shared::{centered_rect, format_axis_value, rgb, ThemeColors};
use crate::util::{contrasting_text, layout_config::ScatterLayoutConfig, ColorPalette, LayoutConfig};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Draw the chart view.
pub fn draw_chart_view(
    f: &mut Frame<'_>,
    state: &ChartViewState,
    layout: &LayoutConfig,
    colors: &ThemeColors,
) {
    if !state.visible {
        return;
    }
    let Some(figure) = &state.figure else {
        return;
    };

    let area = centered_rect(96, 94, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} - {} ", figure.kind().name(), figure.title()))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.bg2))
        .style(Style::default().bg(colors.bg0));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(inner);

    match figure {
        Figure::Manhattan(fig) => draw_manhattan(f, chunks[0], fig, &layout.scatter, colors),
        Figure::Volcano(fig) => draw_volcano(f, chunks[0], fig, &layout.scatter, colors),
        Figure::Venn(fig) => draw_venn(f, chunks[0], fig, colors),
        Figure::Heatmap(fig) => draw_heatmap(f, chunks[0], fig, state, layout, colors),
    }

    draw_footer(f, chunks[1], state, colors);
}

/// Sub-areas of a scatter chart.
struct ScatterAreas {
    y_desc: Rect,
    y_axis: Rect,
    plot: Rect,
    x_axis: Rect,
    x_desc: Rect,
    legend: Rect,
}

fn scatter_areas(area: Rect, config: &ScatterLayoutConfig) -> ScatterAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // y description
            Constraint::Min(3),
            Constraint::Length(1), // x ticks
            Constraint::Length(1), // x description
            Constraint::Length(1), // legend
        ])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(config.y_axis_width), Constraint::Min(5)])
        .split(rows[1]);
    let indent = |r: Rect| Rect {
        x: r.x + config.y_axis_width,
        width: r.width.saturating_sub(config.y_axis_width),
        ..r
    };

    ScatterAreas {
        y_desc: rows[0],
        y_axis: body[0],
        plot: body[1],
        x_axis: indent(rows[2]),
        x_desc: indent(rows[3]),
        legend: indent(rows[4]),
    }
}

fn draw_manhattan(
    f: &mut Frame<'_>,
    area: Rect,
    fig: &ManhattanFigure,
    config: &ScatterLayoutConfig,
    colors: &ThemeColors,
) {
    let areas = scatter_areas(area, config);
    let (x_min, x_max) = (-0.5, fig.x_max() + 0.5);
    let y_max = fig.y_max() * (1.0 + config.y_padding_factor);

    let shaded: Vec<Vec<(f64, f64)>> = (0..SHADES.len())
        .map(|shade| {
            fig.points
                .iter()
                .filter(|p| p.shade == shade)
                .map(|p| (p.index as f64, p.neg_log_p))
                .collect()
        })
        .collect();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(colors.bg0)
        .x_bounds([x_min, x_max])
        .y_bounds([0.0, y_max])
        .paint(|ctx| {
            for (shade, coords) in shaded.iter().enumerate() {
                ctx.draw(&Points {
                    coords,
                    color: rgb(SHADES[shade]),
                });
            }
        });
    f.render_widget(canvas, areas.plot);

    draw_y_axis(f, areas.y_axis, 0.0, y_max, colors);
    let ticks: Vec<(f64, String)> = fig
        .ticks
        .iter()
        .map(|t| (t.position, t.label.clone()))
        .collect();
    draw_x_axis(f, areas.x_axis, x_min, x_max, &ticks, colors);
    draw_y_desc(f, areas.y_desc, colors);
    draw_caption(f, areas.x_desc, "Chromosome", colors);
    draw_caption(
        f,
        areas.legend,
        &format!("{} variants on {} chromosomes", fig.points.len(), fig.ticks.len()),
        colors,
    );
}

fn draw_volcano(
    f: &mut Frame<'_>,
    area: Rect,
    fig: &VolcanoFigure,
    config: &ScatterLayoutConfig,
    colors: &ThemeColors,
) {
    let areas = scatter_areas(area, config);
    let (x_min, x_max, y_max) = fig.bounds();

    let by_class = |class: Significance| -> Vec<(f64, f64)> {
        fig.points
            .iter()
            .filter(|p| p.significance == class)
            .map(|p| (p.log2_fold_change, p.neg_log_p))
            .collect()
    };
    let non_significant = by_class(Significance::NonSignificant);
    let significant = by_class(Significance::Significant);
    let p_line = fig.p_threshold_line();
    let dash_count = config.dash_count;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(colors.bg0)
        .x_bounds([x_min, x_max])
        .y_bounds([0.0, y_max])
        .paint(|ctx| {
            dashed_line(ctx, (x_min, p_line), (x_max, p_line), dash_count, colors.fg0);
            dashed_line(
                ctx,
                (-fig.fc_threshold, 0.0),
                (-fig.fc_threshold, y_max),
                dash_count,
                colors.fg0,
            );
            dashed_line(
                ctx,
                (fig.fc_threshold, 0.0),
                (fig.fc_threshold, y_max),
                dash_count,
                colors.fg0,
            );
            ctx.layer();
            ctx.draw(&Points {
                coords: &non_significant,
                color: rgb(Significance::NonSignificant.color()),
            });
            ctx.draw(&Points {
                coords: &significant,
                color: rgb(Significance::Significant.color()),
            });
        });
    f.render_widget(canvas, areas.plot);

    draw_y_axis(f, areas.y_axis, 0.0, y_max, colors);
    let ticks: Vec<(f64, String)> = [x_min, -fig.fc_threshold, 0.0, fig.fc_threshold, x_max]
        .iter()
        .map(|x| (*x, format_axis_value(*x)))
        .collect();
    draw_x_axis(f, areas.x_axis, x_min, x_max, &ticks, colors);
    draw_y_desc(f, areas.y_desc, colors);
    draw_caption(f, areas.x_desc, "log2 Fold Change", colors);

    let legend = Line::from(vec![
        Span::styled("• ", Style::default().fg(rgb(Significance::Significant.color()))),
        Span::raw(format!("{} ({})  ", Significance::Significant.label(), significant.len())),
        Span::styled("• ", Style::default().fg(rgb(Significance::NonSignificant.color()))),
        Span::raw(format!(
            "{} ({})  ",
            Significance::NonSignificant.label(),
            non_significant.len()
        )),
        Span::styled("- - ", Style::default().fg(colors.fg0)),
        Span::raw(format!("|FC| = {}, p = {}", fig.fc_threshold, fig.p_threshold)),
    ]);
    f.render_widget(
        Paragraph::new(legend)
            .style(Style::default().fg(colors.fg0))
            .alignment(Alignment::Center),
        areas.legend,
    );
}

/// Draw a dashed segment as alternating short lines.
fn dashed_line(ctx: &mut Context<'_>, from: (f64, f64), to: (f64, f64), dashes: usize, color: Color) {
    let steps = dashes.max(1) * 2;
    let (dx, dy) = ((to.0 - from.0) / steps as f64, (to.1 - from.1) / steps as f64);
    for i in (0..steps).step_by(2) {
        ctx.draw(&CanvasLine {
            x1: from.0 + dx * i as f64,
            y1: from.1 + dy * i as f64,
            x2: from.0 + dx * (i + 1) as f64,
            y2: from.1 + dy * (i + 1) as f64,
            color,
        });
    }
}

fn draw_venn(f: &mut Frame<'_>, area: Rect, fig: &VennFigure, colors: &ThemeColors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let plot = chunks[0];

    let (x_min, x_max, y_min, y_max) = fit_aspect(fig.bounds(), plot);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(colors.bg0)
        .x_bounds([x_min, x_max])
        .y_bounds([y_min, y_max])
        .paint(|ctx| {
            for (i, circle) in fig.circles.iter().enumerate() {
                ctx.draw(&Circle {
                    x: circle.x,
                    y: circle.y,
                    radius: circle.r,
                    color: rgb(SET_COLORS[i]),
                });
            }
            ctx.layer();
            for region in &fig.regions {
                if let Some((x, y)) = region.anchor {
                    ctx.print(
                        x,
                        y,
                        Span::styled(
                            region.size.to_string(),
                            Style::default().fg(colors.fg0).add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            }
            for (i, (circle, label)) in fig.circles.iter().zip(&fig.labels).enumerate() {
                // labels above the two top circles, below the third
                let y = if i < 2 {
                    circle.y + circle.r * 1.08
                } else {
                    circle.y - circle.r * 1.15
                };
                ctx.print(
                    circle.x - circle.r * 0.3,
                    y,
                    Span::styled(label.clone(), Style::default().fg(rgb(SET_COLORS[i]))),
                );
            }
        });
    f.render_widget(canvas, plot);

    let mut legend: Vec<Span<'_>> = Vec::new();
    for (i, (label, size)) in fig.labels.iter().zip(&fig.sizes).enumerate() {
        legend.push(Span::styled("● ", Style::default().fg(rgb(SET_COLORS[i]))));
        legend.push(Span::raw(format!("{} ({})   ", label, size)));
    }
    f.render_widget(
        Paragraph::new(Line::from(legend))
            .style(Style::default().fg(colors.fg0))
            .alignment(Alignment::Center),
        chunks[1],
    );
}

/// Widen the data bounds so circles stay round on terminal cells, which are
/// about twice as tall as they are wide. Adds a 15% margin.
fn fit_aspect(bounds: (f64, f64, f64, f64), area: Rect) -> (f64, f64, f64, f64) {
    let (x_min, x_max, y_min, y_max) = bounds;
    let (cx, cy) = ((x_min + x_max) / 2.0, (y_min + y_max) / 2.0);
    let mut dx = (x_max - x_min).max(1e-9) * 1.15;
    let mut dy = (y_max - y_min).max(1e-9) * 1.15;

    let target = area.width.max(1) as f64 / (2.0 * area.height.max(1) as f64);
    if dx / dy < target {
        dx = dy * target;
    } else {
        dy = dx / target;
    }

    (cx - dx / 2.0, cx + dx / 2.0, cy - dy / 2.0, cy + dy / 2.0)
}

fn draw_heatmap(
    f: &mut Frame<'_>,
    area: Rect,
    fig: &HeatmapFigure,
    state: &ChartViewState,
    layout: &LayoutConfig,
    colors: &ThemeColors,
) {
    let config = &layout.heatmap;
    let cell_width = config.cell_width as usize;
    let label_width = fig
        .genes
        .iter()
        .map(|g| g.width())
        .max()
        .unwrap_or(0)
        .clamp(4, config.max_label_width as usize);

    let mut lines: Vec<Line<'_>> = Vec::new();

    let mut header = vec![Span::raw(" ".repeat(label_width + 1))];
    for condition in &fig.conditions {
        header.push(Span::styled(
            format!("{:^width$}", truncate(condition, cell_width), width = cell_width),
            Style::default().fg(colors.green).add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(header));

    // header, colorbar and caption rows
    let visible_rows = (area.height as usize).saturating_sub(4);
    for (gene, row) in fig
        .genes
        .iter()
        .zip(fig.values.rows())
        .skip(state.scroll)
        .take(visible_rows)
    {
        let label = truncate(gene, label_width);
        let pad = label_width.saturating_sub(label.width());
        let mut spans = vec![Span::styled(
            format!("{}{} ", " ".repeat(pad), label),
            Style::default().fg(colors.green),
        )];
        for value in row.iter() {
            let text = format!("{:^width$}", format_cell(*value), width = cell_width);
            let style = if value.is_nan() {
                Style::default().bg(colors.bg0)
            } else {
                let bg = state.color_palette.rgb(fig.normalize(*value));
                Style::default().bg(rgb(bg)).fg(rgb(contrasting_text(bg)))
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(colorbar_line(fig, state.color_palette, config.colorbar_width, colors));
    lines.push(Line::from(Span::styled(
        format!(
            "Genes x Conditions  |  rows {}-{} of {}  |  palette: {}",
            (state.scroll + 1).min(fig.genes.len()),
            (state.scroll + visible_rows).min(fig.genes.len()),
            fig.genes.len(),
            state.color_palette.name()
        ),
        Style::default().fg(colors.gray),
    )));

    f.render_widget(Paragraph::new(lines).style(Style::default().fg(colors.fg0)), area);
}

fn colorbar_line(
    fig: &HeatmapFigure,
    palette: ColorPalette,
    width: usize,
    colors: &ThemeColors,
) -> Line<'static> {
    let Some((lo, hi)) = fig.value_range() else {
        return Line::from(Span::styled("No values", Style::default().fg(colors.gray)));
    };

    let mut spans = vec![Span::raw(format!("{} ", format_cell(lo)))];
    for i in 0..width {
        let t = i as f64 / width.saturating_sub(1).max(1) as f64;
        spans.push(Span::styled(" ", Style::default().bg(rgb(palette.rgb(t)))));
    }
    spans.push(Span::raw(format!(" {}  Expression", format_cell(hi))));
    Line::from(spans)
}

/// Cut a label to at most `width` columns, marking the cut with `~`.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + c.to_string().width() + 1 > width {
            break;
        }
        out.push(c);
    }
    out.push('~');
    out
}

fn draw_y_axis(f: &mut Frame<'_>, area: Rect, y_min: f64, y_max: f64, colors: &ThemeColors) {
    let height = area.height as usize;
    if height == 0 {
        return;
    }
    let mut lines = vec![Line::from(""); height];
    let width = area.width.saturating_sub(1) as usize;
    lines[0] = Line::from(format!("{:>width$}", format_axis_value(y_max)));
    if height > 2 {
        lines[height / 2] = Line::from(format!(
            "{:>width$}",
            format_axis_value((y_min + y_max) / 2.0)
        ));
    }
    lines[height - 1] = Line::from(format!("{:>width$}", format_axis_value(y_min)));

    f.render_widget(
        Paragraph::new(lines).style(Style::default().fg(colors.gray)),
        area,
    );
}

fn draw_x_axis(
    f: &mut Frame<'_>,
    area: Rect,
    x_min: f64,
    x_max: f64,
    ticks: &[(f64, String)],
    colors: &ThemeColors,
) {
    let row = axis_row(area.width as usize, x_min, x_max, ticks);
    f.render_widget(
        Paragraph::new(row).style(Style::default().fg(colors.gray)),
        area,
    );
}

/// Lay tick labels out along a row, centred on their positions. Labels that
/// would overlap an earlier one are dropped.
fn axis_row(width: usize, x_min: f64, x_max: f64, ticks: &[(f64, String)]) -> String {
    let mut row = vec![' '; width];
    let span = (x_max - x_min).max(f64::EPSILON);
    let mut next_free = 0usize;

    for (position, label) in ticks {
        let chars: Vec<char> = label.chars().collect();
        let centre = ((position - x_min) / span * width.saturating_sub(1) as f64).round() as isize;
        let start = (centre - chars.len() as isize / 2)
            .clamp(0, width.saturating_sub(chars.len()) as isize) as usize;
        if start < next_free || start + chars.len() > width {
            continue;
        }
        row[start..start + chars.len()].copy_from_slice(&chars);
        next_free = start + chars.len() + 1;
    }

    row.into_iter().collect()
}

fn draw_y_desc(f: &mut Frame<'_>, area: Rect, colors: &ThemeColors) {
    f.render_widget(
        Paragraph::new("-log10(p-value)").style(Style::default().fg(colors.fg0)),
        area,
    );
}

fn draw_caption(f: &mut Frame<'_>, area: Rect, text: &str, colors: &ThemeColors) {
    f.render_widget(
        Paragraph::new(text.to_string())
            .style(Style::default().fg(colors.fg0))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_footer(f: &mut Frame<'_>, area: Rect, state: &ChartViewState, colors: &ThemeColors) {
    let (text, color) = match &state.message {
        Some(message) => (message.as_str(), colors.yellow),
        None => ("s: Save PNG | y: Copy data | c: Palette | jk: Scroll | Esc/q: Close", colors.green),
    };
    f.render_widget(
        Paragraph::new(text.to_string())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        area,
    );
}
