//! Chart rendering
//!
//! Interactive mode writes every group into one HTML page; static mode draws
//! the first group only into an image.

mod html;
mod image;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::Result;
use crate::group::{Group, GroupKind};

pub use html::{layout_rows, render_html};
pub use image::chart_width;

/// Title of the chart holding every record
pub const COMPLETE_TITLE: &str = "Code coverage ratio by file";
pub const X_LABEL: &str = "File";
pub const Y_LABEL: &str = "Ratio";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// HTML grid of Chart.js bar charts
    #[default]
    Interactive,
    /// PNG, or SVG when the output ends in `.svg`
    Static,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub mode: OutputMode,
    pub out_file: PathBuf,
}

pub fn chart_title(kind: &GroupKind) -> String {
    match kind {
        GroupKind::Complete => COMPLETE_TITLE.to_string(),
        GroupKind::Package(filter) => format!("Code coverage ratio for package {}", filter),
    }
}

/// Write `groups` to `options.out_file`
pub fn render(groups: &[Group<'_>], options: &RenderOptions) -> Result<()> {
    match options.mode {
        OutputMode::Interactive => {
            html::write_html(groups, &options.out_file)?;
            info!(
                out_file = %options.out_file.display(),
                charts = groups.len(),
                "Interactive chart written"
            );
        }
        OutputMode::Static => {
            if groups.len() > 1 {
                warn!(
                    skipped = groups.len() - 1,
                    "Static output draws the first group only"
                );
            }

            let first = groups.first();
            image::write_image(first, &options.out_file)?;
            preview(first);
            info!(out_file = %options.out_file.display(), "Static chart written");
        }
    }

    Ok(())
}

fn preview(group: Option<&Group<'_>>) {
    match group {
        Some(group) => info!(
            group = %group.kind,
            bars = group.records.len(),
            "Preview: {}",
            chart_title(&group.kind)
        ),
        None => info!("Preview: {} (no records)", COMPLETE_TITLE),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_chart_title__complete__then_generic_title() {
        assert_eq!(chart_title(&GroupKind::Complete), COMPLETE_TITLE);
    }

    #[test]
    fn test_chart_title__package__then_names_package() {
        let title = chart_title(&GroupKind::Package("net".to_string()));
        assert_eq!(title, "Code coverage ratio for package net");
    }
}
