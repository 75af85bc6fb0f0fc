//! Error types for GeneViz.
//!
//! This module provides a unified error handling approach using `thiserror`.
//! Every error also maps onto one [`ErrorCategory`], which is what the
//! dialog layer uses to decide how a failure is presented.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for GeneViz operations.
pub type Result<T> = std::result::Result<T, GenevizError>;

/// Errors that can occur in GeneViz.
#[derive(Debug, Error)]
pub enum GenevizError {
    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be parsed as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file has no header row.
    #[error("No columns to parse from file: {path}")]
    EmptyFile { path: PathBuf },

    /// A dataset-based plot was requested before any file was loaded.
    #[error("No data file loaded")]
    NoDataset,

    /// A threshold field did not hold a usable number.
    #[error("Invalid value for {field}: '{value}'")]
    InvalidThreshold { field: &'static str, value: String },

    /// The dataset lacks columns the plot needs.
    #[error("{} requires the columns {}; missing: {}", .plot, quoted(.required), quoted(.missing))]
    MissingColumns {
        plot: &'static str,
        required: Vec<String>,
        missing: Vec<String>,
    },

    /// A Venn diagram was requested with an unsupported number of sets.
    #[error("Venn diagrams support only 2 or 3 sets (got {count})")]
    InvalidSetCount { count: usize },

    /// Fewer than two gene sets were entered.
    #[error("Please enter genes for at least two gene sets")]
    TooFewGeneSets,

    /// A gene set handed to the Venn renderer is empty.
    #[error("Gene set '{label}' is empty")]
    EmptyGeneSet { label: String },

    /// A gene set has no label.
    #[error("Set {set} needs a label")]
    MissingSetLabel { set: usize },

    /// The number of labels does not match the number of sets.
    #[error("Got {labels} labels for {sets} sets")]
    LabelCountMismatch { sets: usize, labels: usize },

    /// A p-value outside the domain of the logarithm.
    #[error("p_value must be positive (row {row}: {value})")]
    PValueOutOfDomain { row: usize, value: f64 },

    /// A cell that should be numeric is not.
    #[error("Column '{column}' row {row}: could not convert '{value}' to a number")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    /// Failed to write an image.
    #[error("Export error: {0}")]
    Export(String),

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How an error is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The data file could not be loaded.
    Load,
    /// A plot needs a data file and none is loaded.
    MissingSelection,
    /// A numeric parameter was rejected.
    Parameter,
    /// The data or the sets do not have the required shape.
    Validation,
    /// Anything else that went wrong while plotting.
    Render,
}

impl GenevizError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create a NonNumeric error.
    pub fn non_numeric(column: impl Into<String>, row: usize, value: impl Into<String>) -> Self {
        Self::NonNumeric {
            column: column.into(),
            row,
            value: value.into(),
        }
    }

    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileOpen { .. } | Self::Csv(_) | Self::EmptyFile { .. } => ErrorCategory::Load,
            Self::NoDataset => ErrorCategory::MissingSelection,
            Self::InvalidThreshold { .. } => ErrorCategory::Parameter,
            Self::MissingColumns { .. }
            | Self::InvalidSetCount { .. }
            | Self::TooFewGeneSets
            | Self::EmptyGeneSet { .. }
            | Self::MissingSetLabel { .. }
            | Self::LabelCountMismatch { .. }
            | Self::PValueOutOfDomain { .. } => ErrorCategory::Validation,
            Self::NonNumeric { .. } | Self::Export(_) | Self::Clipboard(_) | Self::Io(_) => {
                ErrorCategory::Render
            },
        }
    }
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{}'", n))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_names() {
        let err = GenevizError::MissingColumns {
            plot: "Volcano Plot",
            required: vec!["log2_fold_change".into(), "p_value".into()],
            missing: vec!["p_value".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'log2_fold_change', 'p_value'"));
        assert!(msg.ends_with("missing: 'p_value'"));
    }

    #[test]
    fn categories() {
        assert_eq!(GenevizError::NoDataset.category(), ErrorCategory::MissingSelection);
        assert_eq!(
            GenevizError::InvalidThreshold {
                field: "p-value threshold",
                value: "abc".into()
            }
            .category(),
            ErrorCategory::Parameter
        );
        assert_eq!(
            GenevizError::InvalidSetCount { count: 4 }.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            GenevizError::non_numeric("p_value", 3, "x").category(),
            ErrorCategory::Render
        );
    }
}
