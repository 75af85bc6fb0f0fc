//! Chart renderers.
//!
//! Each renderer validates its input, applies the light transform its chart
//! needs, and returns a figure model. Figures carry everything needed to
//! draw the chart, so the terminal view and the PNG export draw the same
//! thing.

pub mod heatmap;
pub mod manhattan;
pub mod venn;
pub mod volcano;

pub use heatmap::{heatmap, HeatmapFigure};
pub use manhattan::{manhattan_plot, ChromosomeTick, ManhattanFigure, ManhattanPoint};
pub use venn::{venn_diagram, VennCircle, VennFigure, VennRegion};
pub use volcano::{volcano_plot, Significance, VolcanoFigure, VolcanoPoint};

use crate::data::Dataset;
use crate::error::{GenevizError, Result};
use crate::request::{PlotKind, PlotRequest};

/// A rendered chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    /// Manhattan plot.
    Manhattan(ManhattanFigure),
    /// Venn diagram.
    Venn(VennFigure),
    /// Expression heatmap.
    Heatmap(HeatmapFigure),
    /// Volcano plot.
    Volcano(VolcanoFigure),
}

impl Figure {
    /// Kind of chart.
    pub fn kind(&self) -> PlotKind {
        match self {
            Figure::Manhattan(_) => PlotKind::Manhattan,
            Figure::Venn(_) => PlotKind::Venn,
            Figure::Heatmap(_) => PlotKind::Heatmap,
            Figure::Volcano(_) => PlotKind::Volcano,
        }
    }

    /// Chart title.
    pub fn title(&self) -> &str {
        match self {
            Figure::Manhattan(f) => &f.title,
            Figure::Venn(f) => &f.title,
            Figure::Heatmap(f) => &f.title,
            Figure::Volcano(f) => &f.title,
        }
    }

    /// The data behind the chart as tab-separated text.
    pub fn to_tsv(&self) -> String {
        match self {
            Figure::Manhattan(f) => f.to_tsv(),
            Figure::Venn(f) => f.to_tsv(),
            Figure::Heatmap(f) => f.to_tsv(),
            Figure::Volcano(f) => f.to_tsv(),
        }
    }
}

/// Draw a request against the session's dataset.
///
/// Dataset-based charts fail with [`GenevizError::NoDataset`] when no file
/// is loaded. The dataset is only borrowed, so nothing a renderer does can
/// change the caller's copy.
pub fn render(request: &PlotRequest, dataset: Option<&Dataset>) -> Result<Figure> {
    let kind = request.kind();
    tracing::debug!("Rendering {}", kind);

    let require_dataset = || dataset.ok_or(GenevizError::NoDataset);

    let figure = match request {
        PlotRequest::Manhattan { title } => {
            Figure::Manhattan(manhattan_plot(require_dataset()?, title)?)
        },
        PlotRequest::Venn {
            title,
            sets,
            labels,
        } => Figure::Venn(venn_diagram(sets, labels, title)?),
        PlotRequest::Heatmap { title } => Figure::Heatmap(heatmap(require_dataset()?, title)?),
        PlotRequest::Volcano {
            title,
            fc_threshold,
            p_threshold,
        } => Figure::Volcano(volcano_plot(
            require_dataset()?,
            *fc_threshold,
            *p_threshold,
            title,
        )?),
    };

    Ok(figure)
}

/// Parse the `p_value` column and return `-log10(p)` for every row.
///
/// p-values outside `(0, inf)` have no logarithm and are rejected rather
/// than drawn at infinity.
pub(crate) fn neg_log10_p_values(dataset: &Dataset) -> Result<(Vec<f64>, Vec<f64>)> {
    let p_values = dataset.numeric_column("p_value")?;
    let mut transformed = Vec::with_capacity(p_values.len());

    for (i, &p) in p_values.iter().enumerate() {
        if !(p.is_finite() && p > 0.0) {
            return Err(GenevizError::PValueOutOfDomain { row: i + 1, value: p });
        }
        transformed.push(-p.log10());
    }

    Ok((p_values, transformed))
}
