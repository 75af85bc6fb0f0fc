//! Expression heatmap: genes x conditions.

use crate::data::Dataset;
use crate::error::Result;
use crate::request::PlotKind;
use ndarray::Array2;
use std::collections::{BTreeMap, BTreeSet};

/// A rendered heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapFigure {
    /// Chart title.
    pub title: String,
    /// Row labels, sorted.
    pub genes: Vec<String>,
    /// Column labels, sorted.
    pub conditions: Vec<String>,
    /// Mean expression per (gene, condition); `NaN` where the pair is absent.
    pub values: Array2<f64>,
}

impl HeatmapFigure {
    /// Mean expression for a gene under a condition.
    pub fn get(&self, gene: &str, condition: &str) -> Option<f64> {
        let row = self.genes.iter().position(|g| g == gene)?;
        let col = self.conditions.iter().position(|c| c == condition)?;
        let v = self.values[[row, col]];
        (!v.is_nan()).then_some(v)
    }

    /// `(min, max)` over present cells.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Position of a value within the colour scale, `0.0..=1.0`.
    pub fn normalize(&self, value: f64) -> f64 {
        match self.value_range() {
            Some((lo, hi)) if (hi - lo).abs() > 1e-12 => ((value - lo) / (hi - lo)).clamp(0.0, 1.0),
            _ => 0.5,
        }
    }

    /// Tab-separated matrix with a `Gene` header column.
    pub fn to_tsv(&self) -> String {
        let mut text = format!("Gene\t{}\n", self.conditions.join("\t"));
        for (gene, row) in self.genes.iter().zip(self.values.rows()) {
            let cells: Vec<String> = row.iter().map(|v| format_cell(*v)).collect();
            text.push_str(&format!("{}\t{}\n", gene, cells.join("\t")));
        }
        text
    }
}

/// Cell annotation: two decimals, blank for a missing pair.
pub fn format_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{:.2}", value)
    }
}

/// Pivot a dataset with `Gene`, `Condition` and `Expression` columns into a
/// gene x condition matrix. Repeated pairs are averaged over their non-NaN
/// values; rows with a blank gene or condition are dropped.
pub fn heatmap(dataset: &Dataset, title: &str) -> Result<HeatmapFigure> {
    let kind = PlotKind::Heatmap;
    dataset.require_columns(kind.name(), kind.required_columns())?;

    let expression = dataset.numeric_column("Expression")?;
    let genes = dataset.text_column("Gene").unwrap_or_default();
    let conditions = dataset.text_column("Condition").unwrap_or_default();

    let mut cells: BTreeMap<(&str, &str), (f64, usize)> = BTreeMap::new();
    for ((gene, condition), value) in genes.iter().zip(&conditions).zip(&expression) {
        if gene.trim().is_empty() || condition.trim().is_empty() {
            continue;
        }
        let cell = cells.entry((*gene, *condition)).or_insert((0.0, 0));
        if !value.is_nan() {
            cell.0 += value;
            cell.1 += 1;
        }
    }

    let gene_index = sorted_index(cells.keys().map(|(g, _)| *g));
    let condition_index = sorted_index(cells.keys().map(|(_, c)| *c));

    let mut values = Array2::from_elem((gene_index.len(), condition_index.len()), f64::NAN);
    for ((gene, condition), (sum, count)) in &cells {
        if *count > 0 {
            values[[gene_index[gene], condition_index[condition]]] = sum / *count as f64;
        }
    }

    let gene_labels: Vec<String> = gene_index.keys().map(|g| g.to_string()).collect();
    let condition_labels: Vec<String> = condition_index.keys().map(|c| c.to_string()).collect();

    tracing::debug!(
        "Pivoted {} rows into {}x{} matrix",
        dataset.len(),
        gene_labels.len(),
        condition_labels.len()
    );

    Ok(HeatmapFigure {
        title: title.to_string(),
        genes: gene_labels,
        conditions: condition_labels,
        values,
    })
}

/// Distinct values in sorted order, each mapped to its position.
fn sorted_index<'a>(labels: impl Iterator<Item = &'a str>) -> BTreeMap<&'a str, usize> {
    labels
        .collect::<BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(i, label)| (label, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenevizError;
    use std::path::PathBuf;

    fn dataset(rows: &[(&str, &str, &str)]) -> Dataset {
        Dataset::new(
            PathBuf::from("expr.csv"),
            vec!["Gene".into(), "Condition".into(), "Expression".into()],
            rows.iter()
                .map(|(g, c, e)| vec![g.to_string(), c.to_string(), e.to_string()])
                .collect(),
        )
    }

    #[test]
    fn pivots_three_by_two() {
        let ds = dataset(&[
            ("TP53", "treated", "2.5"),
            ("BRCA1", "control", "1.0"),
            ("BRCA1", "treated", "3.0"),
            ("EGFR", "control", "0.5"),
            ("EGFR", "treated", "4.25"),
            ("TP53", "control", "1.5"),
        ]);
        let fig = heatmap(&ds, "Expr").unwrap();

        assert_eq!(fig.values.dim(), (3, 2));
        assert_eq!(fig.genes, vec!["BRCA1", "EGFR", "TP53"]);
        assert_eq!(fig.conditions, vec!["control", "treated"]);
        assert_eq!(fig.get("EGFR", "treated"), Some(4.25));
        assert_eq!(fig.get("TP53", "control"), Some(1.5));
        assert_eq!(fig.value_range(), Some((0.5, 4.25)));
    }

    #[test]
    fn duplicate_pairs_are_averaged() {
        let ds = dataset(&[("A", "x", "1.0"), ("A", "x", "2.0"), ("A", "x", "6.0")]);
        let fig = heatmap(&ds, "t").unwrap();
        assert_eq!(fig.get("A", "x"), Some(3.0));
    }

    #[test]
    fn nan_values_are_skipped_in_mean() {
        let ds = dataset(&[("A", "x", "1.0"), ("A", "x", "NaN"), ("A", "y", "3.0")]);
        let fig = heatmap(&ds, "t").unwrap();
        assert_eq!(fig.get("A", "x"), Some(1.0));
        assert_eq!(fig.get("A", "y"), Some(3.0));
    }

    #[test]
    fn all_nan_pair_stays_blank() {
        let ds = dataset(&[("A", "x", "nan"), ("A", "y", "2.0")]);
        let fig = heatmap(&ds, "t").unwrap();
        assert_eq!(fig.conditions, vec!["x", "y"]);
        assert_eq!(fig.get("A", "x"), None);
    }

    #[test]
    fn blank_keys_are_dropped() {
        let ds = dataset(&[("A", "x", "1.0"), ("", "x", "5.0"), ("B", " ", "7.0")]);
        let fig = heatmap(&ds, "t").unwrap();
        assert_eq!(fig.genes, vec!["A"]);
        assert_eq!(fig.conditions, vec!["x"]);
        assert_eq!(fig.get("A", "x"), Some(1.0));
    }

    #[test]
    fn absent_pairs_are_blank() {
        let ds = dataset(&[("A", "x", "1.0"), ("B", "y", "2.0")]);
        let fig = heatmap(&ds, "t").unwrap();
        assert_eq!(fig.get("A", "y"), None);
        assert!(fig.to_tsv().contains("A\t1.00\t\n"));
    }

    #[test]
    fn annotations_use_two_decimals() {
        assert_eq!(format_cell(1.0 / 3.0), "0.33");
        assert_eq!(format_cell(2.0), "2.00");
        assert_eq!(format_cell(f64::NAN), "");
    }

    #[test]
    fn missing_condition_column_fails() {
        let ds = Dataset::new(
            PathBuf::from("x.csv"),
            vec!["Gene".into(), "Expression".into()],
            vec![vec!["A".into(), "1".into()]],
        );
        assert!(matches!(
            heatmap(&ds, "t"),
            Err(GenevizError::MissingColumns { .. })
        ));
    }

    #[test]
    fn non_numeric_expression_fails() {
        let ds = dataset(&[("A", "x", "high")]);
        assert!(matches!(heatmap(&ds, "t"), Err(GenevizError::NonNumeric { .. })));
    }
}
