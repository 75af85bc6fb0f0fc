//! Chart view - full-screen display of a drawn figure.
//!
//! This module holds the view state. Rendering lives in [`ui`], image export
//! in [`crate::export`].

pub mod ui;

use crate::plots::Figure;
use crate::util::ColorPalette;

/// State for the chart view.
#[derive(Debug, Clone, Default)]
pub struct ChartViewState {
    /// Figure on display.
    pub figure: Option<Figure>,
    /// Is the view visible.
    pub visible: bool,
    /// Heatmap colour palette.
    pub color_palette: ColorPalette,
    /// First heatmap row shown.
    pub scroll: usize,
    /// Result of the last save or copy.
    pub message: Option<String>,
}

impl ChartViewState {
    /// Create a new chart view state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a figure, replacing any previous one.
    pub fn show(&mut self, figure: Figure) {
        self.figure = Some(figure);
        self.visible = true;
        self.scroll = 0;
        self.message = None;
    }

    /// Close the view.
    pub fn close(&mut self) {
        self.visible = false;
        self.message = None;
    }

    /// Cycle the heatmap colour palette.
    pub fn cycle_color_palette(&mut self) {
        self.color_palette = self.color_palette.next();
    }

    /// Scroll heatmap rows up.
    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    /// Scroll heatmap rows down.
    pub fn scroll_down(&mut self, amount: usize) {
        if let Some(Figure::Heatmap(heatmap)) = &self.figure {
            let max_row = heatmap.genes.len().saturating_sub(1);
            self.scroll = (self.scroll + amount).min(max_row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::HeatmapFigure;
    use ndarray::Array2;

    fn heatmap_figure(rows: usize) -> Figure {
        Figure::Heatmap(HeatmapFigure {
            title: "t".into(),
            genes: (0..rows).map(|i| format!("G{i}")).collect(),
            conditions: vec!["c".into()],
            values: Array2::zeros((rows, 1)),
        })
    }

    #[test]
    fn show_resets_scroll_and_message() {
        let mut view = ChartViewState::new();
        view.show(heatmap_figure(10));
        view.scroll_down(4);
        view.message = Some("Saved".into());
        view.show(heatmap_figure(3));
        assert!(view.visible);
        assert_eq!(view.scroll, 0);
        assert!(view.message.is_none());
    }

    #[test]
    fn scroll_is_bounded_by_rows() {
        let mut view = ChartViewState::new();
        view.show(heatmap_figure(3));
        view.scroll_down(10);
        assert_eq!(view.scroll, 2);
        view.scroll_up(5);
        assert_eq!(view.scroll, 0);
    }
}
