//! Coverage record extraction
//!
//! Turns a cleaned table into `(path, ratio)` records. The first rows of a
//! conventional coverage table are totals rather than files, so extraction
//! starts after [`SUMMARY_ROWS`] of them.

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::table::CoverageTable;

/// Leading data rows that hold summary totals, not per-file coverage
pub const SUMMARY_ROWS: usize = 3;

/// Column whose value carries the ratio
pub const LINES_COLUMN: &str = "Lines";

/// A package filter that matched a record's path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMatch {
    /// The filter string as given on the command line
    pub filter: String,
    /// The path up to and including the first occurrence of `filter`
    pub prefix: String,
}

/// Coverage of one file
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRecord {
    pub path: String,
    pub ratio: f64,
    pub package: Option<PackageMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub summary_rows: usize,
    pub packages: Vec<String>,
    pub centered_labels: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            summary_rows: SUMMARY_ROWS,
            packages: Vec::new(),
            centered_labels: false,
        }
    }
}

/// Extract one record per table row after the summary rows
pub fn extract_records(
    table: &CoverageTable,
    options: &ExtractOptions,
) -> Result<Vec<CoverageRecord>> {
    let lines = table
        .column_index(LINES_COLUMN)
        .ok_or_else(|| GraphError::MissingColumn(LINES_COLUMN.to_string()))?;

    let mut records = Vec::with_capacity(table.len().saturating_sub(options.summary_rows));
    for (row_index, row) in table.rows().iter().enumerate().skip(options.summary_rows) {
        let ratio = parse_ratio(row_index, row[lines].value())?;

        let raw_path = row[0].value();
        let path = if options.centered_labels {
            raw_path.to_string()
        } else {
            raw_path.trim().to_string()
        };

        let package = if options.packages.is_empty() {
            None
        } else {
            match_package(&path, &options.packages)
        };

        records.push(CoverageRecord {
            path,
            ratio,
            package,
        });
    }

    debug!(records = records.len(), "Extracted coverage records");
    Ok(records)
}

/// First filter, in list order, contained in `path`
pub fn match_package(path: &str, filters: &[String]) -> Option<PackageMatch> {
    filters.iter().find_map(|filter| {
        path.find(filter.as_str()).map(|start| PackageMatch {
            filter: filter.clone(),
            prefix: path[..start + filter.len()].to_string(),
        })
    })
}

fn parse_ratio(row: usize, value: &str) -> Result<f64> {
    let invalid = || GraphError::InvalidRatio {
        row,
        value: value.to_string(),
    };

    let number = value.strip_suffix('%').ok_or_else(invalid)?;
    let ratio: f64 = number.parse().map_err(|_| invalid())?;
    if !ratio.is_finite() || !(0.0..=100.0).contains(&ratio) {
        return Err(invalid());
    }
    Ok(ratio)
}
