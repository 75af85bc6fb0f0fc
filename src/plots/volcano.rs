//! Volcano plot: fold change against significance.

use super::neg_log10_p_values;
use crate::data::Dataset;
use crate::error::Result;
use crate::request::PlotKind;

/// Colour of significant points (red).
pub const SIGNIFICANT_COLOR: (u8, u8, u8) = (255, 0, 0);
/// Colour of non-significant points (grey).
pub const NON_SIGNIFICANT_COLOR: (u8, u8, u8) = (128, 128, 128);
/// Point opacity.
pub const POINT_ALPHA: f64 = 0.6;

/// Significance class of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Significance {
    /// Passes both thresholds.
    Significant,
    /// Fails at least one threshold.
    NonSignificant,
}

impl Significance {
    /// Classify a point. Both comparisons are strict.
    pub fn classify(log2_fold_change: f64, p_value: f64, fc_threshold: f64, p_threshold: f64) -> Self {
        if log2_fold_change.abs() > fc_threshold && p_value < p_threshold {
            Significance::Significant
        } else {
            Significance::NonSignificant
        }
    }

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            Significance::Significant => "Significant",
            Significance::NonSignificant => "Non-significant",
        }
    }

    /// Point colour.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Significance::Significant => SIGNIFICANT_COLOR,
            Significance::NonSignificant => NON_SIGNIFICANT_COLOR,
        }
    }
}

/// One gene.
#[derive(Debug, Clone, PartialEq)]
pub struct VolcanoPoint {
    /// Gene name, when the file has a `Gene` column.
    pub gene: Option<String>,
    /// log2 fold change (x coordinate).
    pub log2_fold_change: f64,
    /// Raw p-value.
    pub p_value: f64,
    /// `-log10(p_value)` (y coordinate).
    pub neg_log_p: f64,
    /// Threshold classification.
    pub significance: Significance,
}

/// A rendered volcano plot.
#[derive(Debug, Clone, PartialEq)]
pub struct VolcanoFigure {
    /// Chart title.
    pub title: String,
    /// Points in file order.
    pub points: Vec<VolcanoPoint>,
    /// Fold-change threshold; reference lines at `+/-` this value.
    pub fc_threshold: f64,
    /// p-value threshold; reference line at its `-log10`.
    pub p_threshold: f64,
}

impl VolcanoFigure {
    /// Height of the horizontal reference line.
    pub fn p_threshold_line(&self) -> f64 {
        -self.p_threshold.log10()
    }

    /// Number of significant points.
    pub fn significant_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.significance == Significance::Significant)
            .count()
    }

    /// `(x_min, x_max, y_max)` covering all points and reference lines.
    pub fn bounds(&self) -> (f64, f64, f64) {
        let x_abs = self
            .points
            .iter()
            .map(|p| p.log2_fold_change.abs())
            .fold(self.fc_threshold, f64::max);
        let y_max = self
            .points
            .iter()
            .map(|p| p.neg_log_p)
            .fold(self.p_threshold_line(), f64::max);
        let x_pad = (x_abs * 0.1).max(0.5);
        (-(x_abs + x_pad), x_abs + x_pad, (y_max * 1.1).max(1.0))
    }

    /// Tab-separated `gene, log2 fold change, p-value, label`.
    pub fn to_tsv(&self) -> String {
        let mut text = String::from("gene\tlog2_fold_change\tp_value\tlabel\n");
        for p in &self.points {
            text.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                p.gene.as_deref().unwrap_or(""),
                p.log2_fold_change,
                p.p_value,
                p.significance.label()
            ));
        }
        text
    }
}

/// Build a volcano plot from a dataset with `log2_fold_change` and
/// `p_value` columns.
pub fn volcano_plot(
    dataset: &Dataset,
    fc_threshold: f64,
    p_threshold: f64,
    title: &str,
) -> Result<VolcanoFigure> {
    let kind = PlotKind::Volcano;
    dataset.require_columns(kind.name(), kind.required_columns())?;

    let fold_changes = dataset.numeric_column("log2_fold_change")?;
    let (p_values, neg_log_p) = neg_log10_p_values(dataset)?;
    let genes = dataset.text_column("Gene");

    let points: Vec<VolcanoPoint> = fold_changes
        .iter()
        .zip(p_values.iter().zip(&neg_log_p))
        .enumerate()
        .map(|(i, (&fc, (&p, &y)))| VolcanoPoint {
            gene: genes.as_ref().map(|g| g[i].to_string()),
            log2_fold_change: fc,
            p_value: p,
            neg_log_p: y,
            significance: Significance::classify(fc, p, fc_threshold, p_threshold),
        })
        .collect();

    let figure = VolcanoFigure {
        title: title.to_string(),
        points,
        fc_threshold,
        p_threshold,
    };
    tracing::debug!(
        "{} of {} genes significant",
        figure.significant_count(),
        figure.points.len()
    );

    Ok(figure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenevizError;
    use std::path::PathBuf;

    fn dataset(rows: &[(&str, &str)]) -> Dataset {
        Dataset::new(
            PathBuf::from("de.csv"),
            vec!["log2_fold_change".into(), "p_value".into()],
            rows.iter()
                .map(|(fc, p)| vec![fc.to_string(), p.to_string()])
                .collect(),
        )
    }

    #[test]
    fn classification_is_strict() {
        use Significance::*;
        assert_eq!(Significance::classify(2.0, 0.01, 1.0, 0.05), Significant);
        assert_eq!(Significance::classify(-2.0, 0.01, 1.0, 0.05), Significant);
        // p exactly at threshold
        assert_eq!(Significance::classify(2.0, 0.05, 1.0, 0.05), NonSignificant);
        // |fc| exactly at threshold
        assert_eq!(Significance::classify(1.0, 0.01, 1.0, 0.05), NonSignificant);
        assert_eq!(Significance::classify(0.5, 0.001, 1.0, 0.05), NonSignificant);
        assert_eq!(Significance::classify(3.0, 0.2, 1.0, 0.05), NonSignificant);
    }

    #[test]
    fn labels_every_row() {
        let ds = dataset(&[("2.5", "0.001"), ("0.2", "0.5"), ("-1.5", "0.05"), ("-3", "1e-10")]);
        let fig = volcano_plot(&ds, 1.0, 0.05, "DE").unwrap();

        let labels: Vec<_> = fig.points.iter().map(|p| p.significance.label()).collect();
        assert_eq!(
            labels,
            vec!["Significant", "Non-significant", "Non-significant", "Significant"]
        );
        assert_eq!(fig.significant_count(), 2);
        assert!((fig.points[3].neg_log_p - 10.0).abs() < 1e-9);
        assert!((fig.p_threshold_line() - 1.301_029_995_663_981).abs() < 1e-9);
        assert!(fig.points.iter().all(|p| p.gene.is_none()));
    }

    #[test]
    fn keeps_gene_names_when_present() {
        let ds = Dataset::new(
            PathBuf::from("de.csv"),
            vec!["Gene".into(), "log2_fold_change".into(), "p_value".into()],
            vec![vec!["TP53".into(), "2".into(), "0.01".into()]],
        );
        let fig = volcano_plot(&ds, 1.0, 0.05, "DE").unwrap();
        assert_eq!(fig.points[0].gene.as_deref(), Some("TP53"));
        assert!(fig.to_tsv().contains("TP53\t2\t0.01\tSignificant"));
    }

    #[test]
    fn missing_fold_change_fails() {
        let ds = Dataset::new(
            PathBuf::from("de.csv"),
            vec!["p_value".into()],
            vec![vec!["0.01".into()]],
        );
        match volcano_plot(&ds, 1.0, 0.05, "DE").unwrap_err() {
            GenevizError::MissingColumns { plot, missing, .. } => {
                assert_eq!(plot, "Volcano Plot");
                assert_eq!(missing, vec!["log2_fold_change"]);
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bounds_cover_reference_lines() {
        let ds = dataset(&[("0.1", "0.9")]);
        let fig = volcano_plot(&ds, 2.0, 0.001, "DE").unwrap();
        let (x_min, x_max, y_max) = fig.bounds();
        assert!(x_min < -2.0 && x_max > 2.0);
        assert!(y_max > 3.0);
    }
}
