//! CSV file reader.

use super::Dataset;
use crate::error::{GenevizError, Result};
use std::fs::File;
use std::path::Path;

/// CSV data reader.
#[derive(Debug)]
pub struct DataReader;

impl DataReader {
    /// Read a comma-separated file with a header row.
    pub fn read_file(path: &Path) -> Result<Dataset> {
        let file = File::open(path).map_err(|e| GenevizError::file_open(path.to_path_buf(), e))?;
        let dataset = Self::read_csv(file, path)?;

        tracing::debug!(
            "Read {} rows x {} columns from {}",
            dataset.len(),
            dataset.columns.len(),
            path.display()
        );

        Ok(dataset)
    }

    fn read_csv<R: std::io::Read>(source: R, path: &Path) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(source);

        let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
            return Err(GenevizError::EmptyFile {
                path: path.to_path_buf(),
            });
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        Ok(Dataset::new(path.to_path_buf(), columns, rows))
    }
}
