//! PNG export of figures.
//!
//! Charts are drawn with `plotters` on a bitmap, in the same colours as the
//! terminal view.

use crate::error::{GenevizError, Result};
use crate::plots::{
    heatmap::format_cell, manhattan::SHADES, venn::SET_COLORS, volcano::POINT_ALPHA, Figure,
    HeatmapFigure, ManhattanFigure, Significance, VennFigure, VolcanoFigure,
};
use crate::util::{contrasting_text, ColorPalette, ExportConfig};
use plotters::chart::SeriesLabelPosition;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

type Area<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

const REFERENCE_LINE_COLOR: RGBColor = BLACK;

/// File name for a figure: sanitised title plus the plot type.
pub fn figure_file_name(figure: &Figure) -> String {
    format!(
        "{}_{}.png",
        sanitize_file_name(figure.title()),
        figure.kind().slug()
    )
}

/// Replace characters that are unsafe in file names.
pub fn sanitize_file_name(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.trim().chars() {
        match ch {
            '/' | '\\' | ' ' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => out.push('_'),
            _ => out.push(ch),
        }
    }
    if out.is_empty() {
        "plot".to_string()
    } else {
        out
    }
}

/// Save a figure into `dir` under its derived file name. Returns the path written.
pub fn export_figure(
    figure: &Figure,
    dir: &Path,
    palette: ColorPalette,
    config: &ExportConfig,
) -> Result<PathBuf> {
    let path = dir.join(figure_file_name(figure));
    save_png(figure, &path, (config.width, config.height), palette)?;
    Ok(path)
}

/// Draw a figure into a PNG file.
pub fn save_png(
    figure: &Figure,
    path: &Path,
    size: (u32, u32),
    palette: ColorPalette,
) -> Result<()> {
    tracing::debug!("Exporting {} to {}", figure.kind(), path.display());

    let root = BitMapBackend::new(path, size).into_drawing_area();
    let drawn = match figure {
        Figure::Manhattan(fig) => draw_manhattan(&root, fig),
        Figure::Venn(fig) => draw_venn(&root, fig),
        Figure::Heatmap(fig) => draw_heatmap(&root, fig, palette),
        Figure::Volcano(fig) => draw_volcano(&root, fig),
    };

    drawn.map_err(|e| {
        tracing::error!("Export failed: {}", e);
        GenevizError::Export(e.to_string())
    })
}

fn color((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// Draw a horizontal or vertical dashed line as short segments with gaps.
fn draw_dashes(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    from: (f64, f64),
    to: (f64, f64),
) -> DrawResult {
    let steps = 80;
    let (dx, dy) = ((to.0 - from.0) / steps as f64, (to.1 - from.1) / steps as f64);
    for i in (0..steps).step_by(2) {
        let a = (from.0 + dx * i as f64, from.1 + dy * i as f64);
        let b = (from.0 + dx * (i + 1) as f64, from.1 + dy * (i + 1) as f64);
        chart.draw_series(std::iter::once(PathElement::new(
            vec![a, b],
            REFERENCE_LINE_COLOR.stroke_width(1),
        )))?;
    }
    Ok(())
}

fn draw_manhattan(root: &Area<'_>, fig: &ManhattanFigure) -> DrawResult {
    root.fill(&WHITE)?;

    let x_max = fig.x_max() + 1.0;
    let y_top = fig.y_max() * 1.05;
    let y_min = -y_top * 0.06;

    let mut chart = ChartBuilder::on(root)
        .caption(&fig.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-1.0..x_max, y_min..y_top)?;

    chart
        .configure_mesh()
        .x_labels(0)
        .x_desc("Chromosome")
        .y_desc("-log10(p-value)")
        .disable_x_mesh()
        .disable_y_mesh()
        .draw()?;

    for (shade, rgb) in SHADES.iter().enumerate() {
        let shade_color = color(*rgb);
        chart.draw_series(
            fig.points
                .iter()
                .filter(|p| p.shade == shade)
                .map(|p| Circle::new((p.index as f64, p.neg_log_p), 2, shade_color.filled())),
        )?;
    }

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(-1.0, 0.0), (x_max, 0.0)],
        BLACK.stroke_width(1),
    )))?;

    for tick in &fig.ticks {
        chart.draw_series(std::iter::once(Text::new(
            tick.label.clone(),
            (tick.position, y_min / 2.0),
            ("sans-serif", 16)
                .into_font()
                .color(&RGBColor(64, 64, 64))
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )))?;
    }

    root.present()?;
    Ok(())
}

fn draw_volcano(root: &Area<'_>, fig: &VolcanoFigure) -> DrawResult {
    root.fill(&WHITE)?;

    let (x_min, x_max, y_max) = fig.bounds();
    let mut chart = ChartBuilder::on(root)
        .caption(&fig.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("log2 Fold Change")
        .y_desc("-log10(p-value)")
        .disable_x_mesh()
        .disable_y_mesh()
        .draw()?;

    let p_line = fig.p_threshold_line();
    draw_dashes(&mut chart, (x_min, p_line), (x_max, p_line))?;
    draw_dashes(&mut chart, (-fig.fc_threshold, 0.0), (-fig.fc_threshold, y_max))?;
    draw_dashes(&mut chart, (fig.fc_threshold, 0.0), (fig.fc_threshold, y_max))?;

    for class in [Significance::NonSignificant, Significance::Significant] {
        let point_color = color(class.color()).mix(POINT_ALPHA);
        chart
            .draw_series(
                fig.points
                    .iter()
                    .filter(|p| p.significance == class)
                    .map(|p| Circle::new((p.log2_fold_change, p.neg_log_p), 3, point_color.filled())),
            )?
            .label(class.label())
            .legend(move |(x, y)| Circle::new((x, y), 5, point_color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .position(SeriesLabelPosition::UpperRight)
        .label_font(("sans-serif", 18).into_font())
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_venn(root: &Area<'_>, fig: &VennFigure) -> DrawResult {
    root.fill(&WHITE)?;

    let (width, height) = root.dim_in_pixel();
    let (x_min, x_max, y_min, y_max) = fig.bounds();
    let (cx, cy) = ((x_min + x_max) / 2.0, (y_min + y_max) / 2.0);
    // equal scale on both axes, with room for labels
    let plot_h = height.saturating_sub(80).max(1) as f64;
    let plot_w = width.saturating_sub(40).max(1) as f64;
    let span = ((x_max - x_min) / plot_w).max((y_max - y_min) / plot_h) * 1.3;
    let (half_w, half_h) = (span * plot_w / 2.0, span * plot_h / 2.0);

    let mut chart = ChartBuilder::on(root)
        .caption(&fig.title, ("sans-serif", 30).into_font())
        .margin(20)
        .build_cartesian_2d((cx - half_w)..(cx + half_w), (cy - half_h)..(cy + half_h))?;

    for (i, circle) in fig.circles.iter().enumerate() {
        let centre = chart.backend_coord(&(circle.x, circle.y));
        let edge = chart.backend_coord(&(circle.x + circle.r, circle.y));
        let radius = (edge.0 - centre.0).max(1) as u32;
        let set_color = color(SET_COLORS[i]);

        chart.draw_series(std::iter::once(Circle::new(
            (circle.x, circle.y),
            radius,
            set_color.mix(0.4).filled(),
        )))?;
        chart.draw_series(std::iter::once(Circle::new(
            (circle.x, circle.y),
            radius,
            set_color.stroke_width(2),
        )))?;

        let label_y = if i < 2 {
            circle.y + circle.r * 1.12
        } else {
            circle.y - circle.r * 1.12
        };
        chart.draw_series(std::iter::once(Text::new(
            fig.labels[i].clone(),
            (circle.x, label_y),
            ("sans-serif", 24)
                .into_font()
                .color(&set_color)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )))?;
    }

    for region in &fig.regions {
        if let Some(anchor) = region.anchor {
            chart.draw_series(std::iter::once(Text::new(
                region.size.to_string(),
                anchor,
                ("sans-serif", 22)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            )))?;
        }
    }

    root.present()?;
    Ok(())
}

fn draw_heatmap(root: &Area<'_>, fig: &HeatmapFigure, palette: ColorPalette) -> DrawResult {
    root.fill(&WHITE)?;

    let (width, _) = root.dim_in_pixel();
    let (main, bar) = root.split_horizontally(width.saturating_sub(120));

    let (rows, cols) = fig.values.dim();
    let mut chart = ChartBuilder::on(&main)
        .caption(&fig.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(100)
        .build_cartesian_2d(0.0..cols.max(1) as f64, 0.0..rows.max(1) as f64)?;

    let column_label = |x: &f64| {
        let i = x.floor() as usize;
        fig.conditions.get(i).cloned().unwrap_or_default()
    };
    // first gene at the top
    let row_label = |y: &f64| {
        let i = rows.saturating_sub(1 + y.floor() as usize);
        fig.genes.get(i).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(cols.max(1))
        .y_labels(rows.max(1))
        .x_label_formatter(&column_label)
        .y_label_formatter(&row_label)
        .x_desc("Conditions")
        .y_desc("Genes")
        .draw()?;

    for ((row, col), value) in fig.values.indexed_iter() {
        if value.is_nan() {
            continue;
        }
        let fill = palette.rgb(fig.normalize(*value));
        let y = (rows - 1 - row) as f64;
        let x = col as f64;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x, y), (x + 1.0, y + 1.0)],
            color(fill).filled(),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            format_cell(*value),
            (x + 0.5, y + 0.5),
            ("sans-serif", 16)
                .into_font()
                .color(&color(contrasting_text(fill)))
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )))?;
    }

    draw_colorbar(&bar, fig, palette)?;
    root.present()?;
    Ok(())
}

fn draw_colorbar(area: &Area<'_>, fig: &HeatmapFigure, palette: ColorPalette) -> DrawResult {
    let Some((lo, hi)) = fig.value_range() else {
        return Ok(());
    };
    let (_, height) = area.dim_in_pixel();
    let (top, bottom) = (60i32, height as i32 - 60);
    let steps = (bottom - top).max(1);

    for i in 0..steps {
        let t = 1.0 - i as f64 / steps as f64;
        area.draw(&Rectangle::new(
            [(30, top + i), (60, top + i + 1)],
            color(palette.rgb(t)).filled(),
        ))?;
    }

    let font = ("sans-serif", 16).into_font().color(&BLACK);
    area.draw(&Text::new(format_cell(hi), (65, top), font.clone()))?;
    area.draw(&Text::new(format_cell(lo), (65, bottom - 16), font.clone()))?;
    area.draw(&Text::new("Expression".to_string(), (20, top - 30), font))?;
    Ok(())
}
