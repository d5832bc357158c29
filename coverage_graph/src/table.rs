//! Delimited coverage table loader
//!
//! Reads tables like:
//!
//! ```text
//!                    |Lines          |Functions
//! Filename           |Rate    Num    |Rate   Num
//! src/main.cpp       |83.5% 102/122  |90.0% 9/10
//! ```
//!
//! The leading `skip_rows` lines are decoration, the next non-blank line is
//! the header. The first column is kept as-is; every other cell is split
//! into its leading value and the remaining detail.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{GraphError, Result};

/// One cleaned table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// First column, untouched
    Raw(String),
    /// Any other column: `"83.5% 102/122"` becomes `value: "83.5%"`, `detail: "102/122"`
    Split { value: String, detail: String },
}

impl Cell {
    /// Raw text for `Raw`, the leading value for `Split`
    pub fn value(&self) -> &str {
        match self {
            Cell::Raw(text) => text,
            Cell::Split { value, .. } => value,
        }
    }
}

/// A loaded table with trimmed column names and only complete rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl CoverageTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read and clean the table at `path`
pub fn load_table(path: &Path, separator: char, skip_rows: usize) -> Result<CoverageTable> {
    let content = fs::read_to_string(path).map_err(|err| GraphError::io(path, err))?;
    let table = parse_table(&content, separator, skip_rows)
        .map_err(|err| match err {
            GraphError::EmptyTable { .. } => GraphError::EmptyTable {
                path: path.to_path_buf(),
            },
            other => other,
        })?;

    debug!(
        path = %path.display(),
        columns = ?table.columns(),
        rows = table.len(),
        "Loaded coverage table"
    );
    Ok(table)
}

/// Clean an in-memory table
pub fn parse_table(content: &str, separator: char, skip_rows: usize) -> Result<CoverageTable> {
    let mut lines = content
        .lines()
        .enumerate()
        .skip(skip_rows)
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(GraphError::EmptyTable {
            path: Default::default(),
        });
    };

    let columns: Vec<String> = header
        .split(separator)
        .map(|name| name.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, line) in lines {
        let fields: Vec<&str> = line.split(separator).collect();

        if fields.len() > columns.len() {
            return Err(GraphError::ColumnCount {
                line: index + 1,
                expected: columns.len(),
                found: fields.len(),
            });
        }

        match clean_row(&fields, columns.len()) {
            Some(row) => rows.push(row),
            None => debug!(line = index + 1, text = line, "Dropping incomplete row"),
        }
    }

    Ok(CoverageTable { columns, rows })
}

/// `None` when a field is missing or a cell does not split
fn clean_row(fields: &[&str], width: usize) -> Option<Vec<Cell>> {
    if fields.len() < width {
        return None;
    }

    let mut row = Vec::with_capacity(width);
    for (position, field) in fields.iter().enumerate() {
        if position == 0 {
            row.push(Cell::Raw((*field).to_string()));
            continue;
        }

        let (value, detail) = field.trim_start().split_once(' ')?;
        row.push(Cell::Split {
            value: value.to_string(),
            detail: detail.to_string(),
        });
    }

    Some(row)
}
