//! Tabular dataset loaded from a CSV file.

use crate::error::{GenevizError, Result};
use std::path::PathBuf;

/// A table of string cells with a named header.
///
/// Cells stay as text until a plot asks for a column as numbers, so one
/// file can serve plots with different numeric requirements.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Path to the source file.
    pub file_path: PathBuf,
    /// Column names in file order.
    pub columns: Vec<String>,
    /// Data rows in file order.
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Create a new dataset.
    pub fn new(file_path: PathBuf, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            file_path,
            columns,
            rows,
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Check if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Fail unless every one of `required` is a column of this dataset.
    pub fn require_columns(&self, plot: &'static str, required: &[&str]) -> Result<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GenevizError::MissingColumns {
                plot,
                required: required.iter().map(|s| s.to_string()).collect(),
                missing,
            })
        }
    }

    /// Trimmed cells of a column, in row order.
    pub fn text_column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(|c| c.trim()).unwrap_or(""))
                .collect(),
        )
    }

    /// Cells of a column parsed as `f64`.
    ///
    /// Row numbers in errors are 1-based and count data rows only.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let cells = self.text_column(name).ok_or_else(|| GenevizError::MissingColumns {
            plot: "Dataset",
            required: vec![name.to_string()],
            missing: vec![name.to_string()],
        })?;

        cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| {
                cell.parse::<f64>()
                    .map_err(|_| GenevizError::non_numeric(name, i + 1, cell))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            PathBuf::from("sample.csv"),
            vec!["Gene".into(), "p_value".into()],
            vec![
                vec!["BRCA1".into(), "0.01".into()],
                vec![" TP53 ".into(), " 1e-5".into()],
            ],
        )
    }

    #[test]
    fn require_columns_reports_all_missing() {
        let ds = sample();
        assert!(ds.require_columns("Heatmap", &["Gene"]).is_ok());

        let err = ds
            .require_columns("Heatmap", &["Gene", "Condition", "Expression"])
            .unwrap_err();
        match err {
            GenevizError::MissingColumns { plot, missing, .. } => {
                assert_eq!(plot, "Heatmap");
                assert_eq!(missing, vec!["Condition", "Expression"]);
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn numeric_column_trims_cells() {
        let ds = sample();
        assert_eq!(ds.numeric_column("p_value").unwrap(), vec![0.01, 1e-5]);
        assert_eq!(ds.text_column("Gene").unwrap(), vec!["BRCA1", "TP53"]);
    }

    #[test]
    fn numeric_column_rejects_text() {
        let ds = sample();
        let err = ds.numeric_column("Gene").unwrap_err();
        assert!(matches!(
            err,
            GenevizError::NonNumeric { ref column, row: 1, ref value } if column == "Gene" && value == "BRCA1"
        ));
    }
}
