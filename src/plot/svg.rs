//! Write figures to SVG files.

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use crate::error::AppError;
use crate::plot::{Figure, Theme, draw_figure};

/// Canvas size in pixels (10x6 inches at 100 dpi).
pub const SVG_SIZE: (u32, u32) = (1000, 600);

/// Render one figure to `path`.
pub fn write_svg(path: &Path, figure: &Figure, theme: &Theme) -> Result<(), AppError> {
    let root = SVGBackend::new(path, SVG_SIZE).into_drawing_area();
    draw_figure(&root, figure, theme)
        .map_err(|e| AppError::render(format!("Failed to render chart '{}': {e}", path.display())))
}

/// Render every figure into `out_dir` as `<name>.svg`, in order.
pub fn write_figures(out_dir: &Path, figures: &[Figure], theme: &Theme) -> Result<Vec<PathBuf>, AppError> {
    create_dir_all(out_dir)
        .map_err(|e| AppError::input(format!("Failed to create chart directory '{}': {e}", out_dir.display())))?;

    let mut written = Vec::with_capacity(figures.len());
    for figure in figures {
        let path = out_dir.join(format!("{}.svg", figure.name));
        write_svg(&path, figure, theme)?;
        info!(path = %path.display(), title = %figure.title, "wrote chart");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChartStyle;
    use crate::plot::{FigureData, histogram_bins};

    #[test]
    fn writes_one_svg_per_figure() {
        let dir = tempfile::tempdir().unwrap();
        let figures = vec![
            Figure {
                name: "hist",
                title: "Sales Distribution".to_string(),
                x_label: "Sales Amount",
                y_label: "Frequency",
                data: FigureData::Histogram(histogram_bins(&[1.0, 2.0, 3.0], 2)),
            },
            Figure {
                name: "bars",
                title: "Top 2".to_string(),
                x_label: "Product",
                y_label: "Number of Sales",
                data: FigureData::Bar(vec![("Mint".to_string(), 3), ("Dark".to_string(), 1)]),
            },
            Figure {
                name: "line",
                title: "Monthly Sales Trends".to_string(),
                x_label: "Month",
                y_label: "Total Sales Amount",
                data: FigureData::Line {
                    points: vec![("2024-01".to_string(), 30.0), ("2024-02".to_string(), 10.0)],
                    series_label: "Total Sales".to_string(),
                },
            },
        ];

        let out = dir.path().join("charts");
        let written = write_figures(&out, &figures, &Theme::file(ChartStyle::Standard)).unwrap();

        assert_eq!(written.len(), 3);
        for path in &written {
            let svg = std::fs::read_to_string(path).unwrap();
            assert!(svg.contains("<svg"));
        }
        let line = std::fs::read_to_string(out.join("line.svg")).unwrap();
        assert!(line.contains("Monthly Sales Trends"));
    }
}
