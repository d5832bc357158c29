use std::{fmt, io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no header line found in {path:?}")]
    EmptyTable { path: PathBuf },
    #[error("line {line}: expected {expected} fields, saw {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("column not found: {0:?}")]
    MissingColumn(String),
    #[error("row {row}: invalid coverage ratio {value:?}")]
    InvalidRatio { row: usize, value: String },
    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;

impl GraphError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn render(details: impl fmt::Display) -> Self {
        Self::Render(details.to_string())
    }
}
