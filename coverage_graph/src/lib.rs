//! Coverage table to bar chart converter
//!
//! Reads a pipe-delimited coverage report, extracts a ratio per file and
//! draws it either as an interactive HTML chart grid or a static image.
//!
//! The pipeline runs strictly forward:
//!
//! - [`table`] loads and cleans the delimited table
//! - [`extract`] turns rows into [`extract::CoverageRecord`]s
//! - [`group`] splits records into the complete set and package subsets
//! - [`sort`] orders each group
//! - [`render`] writes the chart

pub mod app;
pub mod error;
pub mod extract;
pub mod group;
pub mod render;
pub mod sort;
pub mod table;

pub use error::{GraphError, Result};
