//! Manhattan plot: genome-wide association results by chromosome.

use super::neg_log10_p_values;
use crate::data::Dataset;
use crate::error::Result;
use crate::request::PlotKind;
use std::collections::HashMap;

/// Gray and dim gray, alternated per chromosome group.
pub const SHADES: [(u8, u8, u8); 2] = [(128, 128, 128), (105, 105, 105)];

/// One variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ManhattanPoint {
    /// Row position in the file (x coordinate).
    pub index: usize,
    /// Chromosome name as written in the file.
    pub chromosome: String,
    /// `-log10(p_value)` (y coordinate).
    pub neg_log_p: f64,
    /// Index into [`SHADES`].
    pub shade: usize,
}

/// An x-axis label for one chromosome group.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromosomeTick {
    /// Chromosome name.
    pub label: String,
    /// Midpoint between the group's first and last row index.
    pub position: f64,
}

/// A rendered Manhattan plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ManhattanFigure {
    /// Chart title.
    pub title: String,
    /// Points in file order.
    pub points: Vec<ManhattanPoint>,
    /// One tick per chromosome group, in group order.
    pub ticks: Vec<ChromosomeTick>,
}

impl ManhattanFigure {
    /// Largest x coordinate.
    pub fn x_max(&self) -> f64 {
        self.points.len().saturating_sub(1) as f64
    }

    /// Largest `-log10(p)`, or 1.0 for an empty plot.
    pub fn y_max(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.neg_log_p)
            .fold(None, |acc: Option<f64>, y| Some(acc.map_or(y, |m| m.max(y))))
            .unwrap_or(1.0)
    }

    /// Tab-separated `index, chromosome, -log10(p)`.
    pub fn to_tsv(&self) -> String {
        let mut text = String::from("index\tchromosome\tneg_log10_p\n");
        for p in &self.points {
            text.push_str(&format!("{}\t{}\t{}\n", p.index, p.chromosome, p.neg_log_p));
        }
        text
    }
}

/// Build a Manhattan plot from a dataset with `chromosome`, `position` and
/// `p_value` columns.
///
/// Chromosome groups are ordered by their sorted key: numerically when every
/// name is an integer, as strings otherwise.
pub fn manhattan_plot(dataset: &Dataset, title: &str) -> Result<ManhattanFigure> {
    let kind = PlotKind::Manhattan;
    dataset.require_columns(kind.name(), kind.required_columns())?;

    let (_, neg_log_p) = neg_log10_p_values(dataset)?;
    let chromosomes = dataset.text_column("chromosome").unwrap_or_default();

    // first and last row index per chromosome
    let mut spans: HashMap<&str, (usize, usize)> = HashMap::new();
    for (i, chr) in chromosomes.iter().enumerate() {
        spans
            .entry(*chr)
            .and_modify(|span| span.1 = i)
            .or_insert((i, i));
    }

    let group_order = sort_group_keys(spans.keys().copied().collect());
    let group_of: HashMap<&str, usize> = group_order
        .iter()
        .enumerate()
        .map(|(n, chr)| (*chr, n))
        .collect();

    let points = chromosomes
        .iter()
        .zip(neg_log_p)
        .enumerate()
        .map(|(index, (chr, y))| ManhattanPoint {
            index,
            chromosome: chr.to_string(),
            neg_log_p: y,
            shade: group_of[chr] % SHADES.len(),
        })
        .collect();

    let ticks = group_order
        .iter()
        .map(|chr| {
            let (first, last) = spans[chr];
            ChromosomeTick {
                label: chr.to_string(),
                position: (first + last) as f64 / 2.0,
            }
        })
        .collect();

    Ok(ManhattanFigure {
        title: title.to_string(),
        points,
        ticks,
    })
}

fn sort_group_keys(mut keys: Vec<&str>) -> Vec<&str> {
    let numeric: Option<Vec<i64>> = keys.iter().map(|k| k.parse::<i64>().ok()).collect();

    // equal numbers spelled differently ("01", "1") fall back to text order
    if numeric.is_some() {
        keys.sort_by_key(|k| (k.parse::<i64>().unwrap_or_default(), *k));
    } else {
        keys.sort_unstable();
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenevizError;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn dataset(rows: &[(&str, &str, &str)]) -> Dataset {
        Dataset::new(
            PathBuf::from("gwas.csv"),
            vec!["chromosome".into(), "position".into(), "p_value".into()],
            rows.iter()
                .map(|(c, pos, p)| vec![c.to_string(), pos.to_string(), p.to_string()])
                .collect(),
        )
    }

    #[test]
    fn transforms_and_groups() {
        let ds = dataset(&[
            ("1", "100", "0.01"),
            ("1", "200", "0.001"),
            ("2", "50", "1e-8"),
            ("2", "90", "0.1"),
            ("2", "95", "1"),
        ]);
        let fig = manhattan_plot(&ds, "GWAS").unwrap();

        assert_eq!(fig.title, "GWAS");
        assert_eq!(fig.points.len(), 5);
        assert!((fig.points[0].neg_log_p - 2.0).abs() < 1e-12);
        assert!((fig.points[2].neg_log_p - 8.0).abs() < 1e-12);
        assert_eq!(fig.points[4].neg_log_p, 0.0);

        assert_eq!(
            fig.ticks,
            vec![
                ChromosomeTick {
                    label: "1".into(),
                    position: 0.5
                },
                ChromosomeTick {
                    label: "2".into(),
                    position: 3.0
                },
            ]
        );
        assert_eq!(fig.points[0].shade, 0);
        assert_eq!(fig.points[3].shade, 1);
    }

    #[test]
    fn numeric_chromosomes_sort_numerically() {
        let ds = dataset(&[("10", "1", "0.5"), ("2", "1", "0.5"), ("1", "1", "0.5")]);
        let fig = manhattan_plot(&ds, "t").unwrap();
        let labels: Vec<_> = fig.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "10"]);
    }

    #[test]
    fn equal_numeric_keys_order_by_text() {
        let ds = dataset(&[
            ("2", "1", "0.5"),
            ("1", "1", "0.5"),
            ("01", "1", "0.5"),
            ("1", "2", "0.5"),
        ]);
        for _ in 0..8 {
            let fig = manhattan_plot(&ds, "t").unwrap();
            let labels: Vec<&str> = fig.ticks.iter().map(|t| t.label.as_str()).collect();
            assert_eq!(labels, vec!["01", "1", "2"]);
        }
    }

    #[test]
    fn named_chromosomes_sort_as_strings() {
        let ds = dataset(&[("chr2", "1", "0.5"), ("chr10", "1", "0.5"), ("chrX", "1", "0.5")]);
        let fig = manhattan_plot(&ds, "t").unwrap();
        let labels: Vec<_> = fig.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["chr10", "chr2", "chrX"]);
        // shade follows group order, not file order
        assert_eq!(fig.points[1].shade, 0);
        assert_eq!(fig.points[0].shade, 1);
        assert_eq!(fig.points[2].shade, 0);
    }

    #[test]
    fn one_tick_per_distinct_chromosome() {
        let ds = dataset(&[
            ("3", "1", "0.2"),
            ("1", "1", "0.2"),
            ("3", "1", "0.2"),
            ("X", "1", "0.2"),
            ("1", "1", "0.2"),
        ]);
        let fig = manhattan_plot(&ds, "t").unwrap();
        let distinct: HashSet<_> = ds.text_column("chromosome").unwrap().into_iter().collect();
        assert_eq!(fig.ticks.len(), distinct.len());
    }

    #[test]
    fn missing_position_column_fails() {
        let ds = Dataset::new(
            PathBuf::from("x.csv"),
            vec!["chromosome".into(), "p_value".into()],
            vec![vec!["1".into(), "0.5".into()]],
        );
        match manhattan_plot(&ds, "t").unwrap_err() {
            GenevizError::MissingColumns { missing, .. } => assert_eq!(missing, vec!["position"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_p_value_is_rejected() {
        let ds = dataset(&[("1", "1", "0.5"), ("1", "2", "-0.1")]);
        assert!(matches!(
            manhattan_plot(&ds, "t"),
            Err(GenevizError::PValueOutOfDomain { row: 2, .. })
        ));
    }
}
