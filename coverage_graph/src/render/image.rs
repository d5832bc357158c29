//! Static bar chart image

use std::path::Path;

use once_cell::sync::OnceCell;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle, FontTransform};

use super::{chart_title, COMPLETE_TITLE, X_LABEL, Y_LABEL};
use crate::error::{GraphError, Result};
use crate::group::Group;

pub const HEIGHT: u32 = 1000;
pub const MIN_WIDTH: u32 = 640;

/// Pixels per bar times three, so `n` bars get `n / 3` inches at 100 dpi
const PIXELS_PER_THREE_BARS: u64 = 100;

/// Bundled so PNG labels do not depend on fonts installed on the host
static SANS_SERIF: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static FONTS: OnceCell<()> = OnceCell::new();

/// Image width for `bars` bars
pub fn chart_width(bars: usize) -> u32 {
    let scaled = bars as u64 * PIXELS_PER_THREE_BARS / 3;
    u32::try_from(scaled).unwrap_or(u32::MAX).max(MIN_WIDTH)
}

fn register_fonts() -> Result<()> {
    FONTS
        .get_or_try_init(|| {
            register_font("sans-serif", FontStyle::Normal, SANS_SERIF)
                .map_err(|_| GraphError::render("invalid bundled font"))
        })
        .map(|_| ())
}

pub(super) fn write_image(group: Option<&Group<'_>>, path: &Path) -> Result<()> {
    register_fonts()?;

    let bars = group.map_or(0, |g| g.records.len());
    let size = (chart_width(bars), HEIGHT);

    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        draw(SVGBackend::new(path, size).into_drawing_area(), group)
    } else {
        draw(BitMapBackend::new(path, size).into_drawing_area(), group)
    }
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    group: Option<&Group<'_>>,
) -> Result<()> {
    let title = group.map_or_else(|| COMPLETE_TITLE.to_string(), |g| chart_title(&g.kind));
    let labels: Vec<&str> = group
        .map(|g| g.records.iter().map(|r| r.path.as_str()).collect())
        .unwrap_or_default();
    let ratios: Vec<f64> = group
        .map(|g| g.records.iter().map(|r| r.ratio).collect())
        .unwrap_or_default();

    root.fill(&WHITE).map_err(GraphError::render)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(300)
        .y_label_area_size(60)
        .build_cartesian_2d((0..labels.len().max(1)).into_segmented(), 0.0..100.0f64)
        .map_err(GraphError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|segment: &SegmentValue<usize>| match segment {
            SegmentValue::CenterOf(index) => labels
                .get(*index)
                .map(|label| label.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .draw()
        .map_err(GraphError::render)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.6).filled())
                .margin(2)
                .data(ratios.iter().enumerate().map(|(index, ratio)| (index, *ratio))),
        )
        .map_err(GraphError::render)?;

    root.present().map_err(GraphError::render)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::extract::CoverageRecord;
    use crate::group::GroupKind;

    #[test]
    fn test_chart_width__few_bars__then_minimum() {
        assert_eq!(chart_width(0), MIN_WIDTH);
        assert_eq!(chart_width(3), MIN_WIDTH);
    }

    #[test]
    fn test_chart_width__many_bars__then_scales() {
        assert_eq!(chart_width(30), 1000);
        assert_eq!(chart_width(60), 2000);
    }

    fn record(path: &str, ratio: f64) -> CoverageRecord {
        CoverageRecord {
            path: path.to_string(),
            ratio,
            package: None,
        }
    }

    fn render_png(dir: &Path, name: &str, kind: GroupKind, records: &[CoverageRecord]) -> Vec<u8> {
        let path = dir.join(name);
        let group = Group {
            kind,
            records: records.iter().collect(),
        };
        write_image(Some(&group), &path).unwrap();
        std::fs::read(&path).unwrap()
    }

    #[test]
    fn test_write_image__svg_extension__then_svg_with_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.svg");
        let owned = vec![record("src/a.cpp", 42.0)];
        let group = Group {
            kind: GroupKind::Complete,
            records: owned.iter().collect(),
        };

        write_image(Some(&group), &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(COMPLETE_TITLE));
        assert!(svg.contains(Y_LABEL));
    }

    #[test]
    fn test_write_image__png_extension__then_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.png");

        write_image(None, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_write_image__png_labels_differ__then_pixels_differ() {
        let dir = tempfile::tempdir().unwrap();
        let first = render_png(
            dir.path(),
            "first.png",
            GroupKind::Complete,
            &[record("src/alpha.cpp", 50.0)],
        );
        let second = render_png(
            dir.path(),
            "second.png",
            GroupKind::Complete,
            &[record("lib/omega_widget.cpp", 50.0)],
        );

        assert_ne!(first, second);
    }

    #[test]
    fn test_write_image__png_titles_differ__then_pixels_differ() {
        let dir = tempfile::tempdir().unwrap();
        let records = [record("src/a.cpp", 50.0)];
        let complete = render_png(dir.path(), "complete.png", GroupKind::Complete, &records);
        let package = render_png(
            dir.path(),
            "package.png",
            GroupKind::Package("pkg1".to_string()),
            &records,
        );

        assert_ne!(complete, package);
    }

    #[test]
    fn test_write_image__same_group_twice__then_byte_identical_png() {
        let dir = tempfile::tempdir().unwrap();
        let records = [record("src/a.cpp", 12.5), record("src/b.cpp", 87.5)];
        let first = render_png(dir.path(), "first.png", GroupKind::Complete, &records);
        let second = render_png(dir.path(), "second.png", GroupKind::Complete, &records);

        assert_eq!(first, second);
    }
}
