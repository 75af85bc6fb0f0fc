//! Plot requests: which chart to draw and with what parameters.

use std::collections::BTreeSet;
use std::fmt;

/// Title used when the title field is left blank.
pub const DEFAULT_TITLE: &str = "Plot Title";

/// Default log2 fold-change threshold for volcano plots.
pub const DEFAULT_FOLD_CHANGE_THRESHOLD: f64 = 1.0;

/// Default p-value threshold for volcano plots.
pub const DEFAULT_P_VALUE_THRESHOLD: f64 = 0.05;

/// The four supported chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlotKind {
    /// Genome-wide association scatter plot.
    #[default]
    Manhattan,
    /// Overlap diagram of 2 or 3 gene sets.
    Venn,
    /// Gene x condition expression matrix.
    Heatmap,
    /// Fold change vs. significance scatter plot.
    Volcano,
}

impl PlotKind {
    /// All kinds in selector order.
    pub const ALL: [PlotKind; 4] = [
        PlotKind::Manhattan,
        PlotKind::Venn,
        PlotKind::Heatmap,
        PlotKind::Volcano,
    ];

    /// Get the next kind in the cycle.
    pub fn next(self) -> Self {
        match self {
            PlotKind::Manhattan => PlotKind::Venn,
            PlotKind::Venn => PlotKind::Heatmap,
            PlotKind::Heatmap => PlotKind::Volcano,
            PlotKind::Volcano => PlotKind::Manhattan,
        }
    }

    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            PlotKind::Manhattan => "Manhattan Plot",
            PlotKind::Venn => "Venn Diagram",
            PlotKind::Heatmap => "Heatmap",
            PlotKind::Volcano => "Volcano Plot",
        }
    }

    /// Columns the loaded file must provide. Venn diagrams use typed-in sets.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            PlotKind::Manhattan => &["chromosome", "position", "p_value"],
            PlotKind::Venn => &[],
            PlotKind::Heatmap => &["Gene", "Condition", "Expression"],
            PlotKind::Volcano => &["log2_fold_change", "p_value"],
        }
    }

    /// Whether drawing this kind needs a loaded file.
    pub fn needs_dataset(self) -> bool {
        !matches!(self, PlotKind::Venn)
    }

    /// Short identifier used in file names.
    pub fn slug(self) -> &'static str {
        match self {
            PlotKind::Manhattan => "manhattan",
            PlotKind::Venn => "venn",
            PlotKind::Heatmap => "heatmap",
            PlotKind::Volcano => "volcano",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of gene names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneSet(BTreeSet<String>);

impl GeneSet {
    /// Parse comma-separated free text. Tokens are trimmed, blanks dropped
    /// and duplicates collapsed.
    pub fn parse(text: &str) -> Self {
        Self(
            text.split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Number of distinct genes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no genes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check membership.
    pub fn contains(&self, gene: &str) -> bool {
        self.0.contains(gene)
    }

    /// Iterate genes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for GeneSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotRequest {
    /// Manhattan plot of the loaded file.
    Manhattan {
        /// Chart title.
        title: String,
    },
    /// Venn diagram of typed-in gene sets.
    Venn {
        /// Chart title.
        title: String,
        /// Two or three sets.
        sets: Vec<GeneSet>,
        /// One label per set.
        labels: Vec<String>,
    },
    /// Expression heatmap of the loaded file.
    Heatmap {
        /// Chart title.
        title: String,
    },
    /// Volcano plot of the loaded file.
    Volcano {
        /// Chart title.
        title: String,
        /// Absolute log2 fold change a gene must exceed.
        fc_threshold: f64,
        /// p-value a gene must be strictly below.
        p_threshold: f64,
    },
}

impl PlotRequest {
    /// The kind of chart requested.
    pub fn kind(&self) -> PlotKind {
        match self {
            PlotRequest::Manhattan { .. } => PlotKind::Manhattan,
            PlotRequest::Venn { .. } => PlotKind::Venn,
            PlotRequest::Heatmap { .. } => PlotKind::Heatmap,
            PlotRequest::Volcano { .. } => PlotKind::Volcano,
        }
    }

    /// The chart title.
    pub fn title(&self) -> &str {
        match self {
            PlotRequest::Manhattan { title }
            | PlotRequest::Venn { title, .. }
            | PlotRequest::Heatmap { title }
            | PlotRequest::Volcano { title, .. } => title,
        }
    }
}
