//! Backend-agnostic Plotters drawing for `Figure`s.
//!
//! `draw_figure` receives the drawing area explicitly, so the same code paints
//! SVG files and the terminal viewer without any shared "current figure".

use plotters::coord::Shift;
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::domain::ChartStyle;
use crate::plot::{Figure, FigureData, HistogramBin};

/// Colors and font sizes for one rendering target.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Filled before drawing; `None` leaves the target untouched (terminal).
    pub background: Option<RGBColor>,
    pub foreground: RGBColor,
    pub grid: RGBColor,
    pub histogram: RGBColor,
    pub bar: RGBColor,
    pub line: RGBColor,
    /// Radius of the line chart's point markers; `0` disables them.
    pub marker_size: u32,
    pub caption_size: u32,
    pub label_size: u32,
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
}

const DEFAULT_BLUE: RGBColor = RGBColor(31, 119, 180);
const CHOCOLATE: RGBColor = RGBColor(210, 105, 30);

impl Theme {
    /// Light theme for image files.
    pub fn file(style: ChartStyle) -> Self {
        let (histogram, bar, line) = palette(style);
        Self {
            background: Some(WHITE),
            foreground: BLACK,
            grid: RGBColor(200, 200, 200),
            histogram,
            bar,
            line,
            marker_size: 4,
            caption_size: 24,
            label_size: 14,
            margin: 16,
            x_label_area: 48,
            y_label_area: 64,
        }
    }

    /// High-contrast theme for low-resolution terminal cells.
    pub fn terminal(style: ChartStyle) -> Self {
        let (histogram, bar, line) = palette(style);
        Self {
            background: None,
            foreground: WHITE,
            grid: RGBColor(90, 90, 90),
            histogram,
            bar,
            line: if style == ChartStyle::Chocolate { RGBColor(0, 255, 255) } else { line },
            // The ratatui backend scales circle radii as canvas units, which
            // turns markers into huge rings.
            marker_size: 0,
            caption_size: 12,
            label_size: 10,
            margin: 1,
            x_label_area: 3,
            y_label_area: 8,
        }
    }

    fn text(&self, size: u32) -> TextStyle<'static> {
        ("sans-serif", size).into_font().color(&self.foreground)
    }
}

fn palette(style: ChartStyle) -> (RGBColor, RGBColor, RGBColor) {
    match style {
        ChartStyle::Standard => (DEFAULT_BLUE, DEFAULT_BLUE, DEFAULT_BLUE),
        ChartStyle::Chocolate => (DEFAULT_BLUE, CHOCOLATE, BLUE),
    }
}

/// Draw `figure` onto `root`.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if let Some(bg) = theme.background {
        root.fill(&bg)?;
    }

    match &figure.data {
        FigureData::Histogram(bins) => draw_histogram(root, figure, bins, theme),
        FigureData::Bar(bars) => draw_bars(root, figure, bars, theme),
        FigureData::Line { points, series_label } => draw_line(root, figure, points, series_label, theme),
    }
}

fn draw_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    bins: &[HistogramBin],
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (x0, x1) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first.lo, last.hi),
        _ => (0.0, 1.0),
    };
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
    let y1 = padded_max(max_count as f64);

    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, theme.text(theme.caption_size))
        .margin(theme.margin)
        .x_label_area_size(theme.x_label_area)
        .y_label_area_size(theme.y_label_area)
        .build_cartesian_2d(x0..x1, 0.0..y1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(figure.x_label)
        .y_desc(figure.y_label)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .label_style(theme.text(theme.label_size))
        .axis_style(&theme.foreground)
        .bold_line_style(&theme.grid)
        .light_line_style(&TRANSPARENT)
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.lo, 0.0), (b.hi, b.count as f64)], theme.histogram.mix(0.7).filled())
    }))?;
    chart.draw_series(
        bins.iter()
            .filter(|b| b.count > 0)
            .map(|b| Rectangle::new([(b.lo, 0.0), (b.hi, b.count as f64)], theme.foreground.stroke_width(1))),
    )?;

    root.present()
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    bars: &[(String, usize)],
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let n = bars.len().max(1) as u32;
    let max_count = bars.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let y1 = (padded_max(max_count as f64).ceil() as u32).max(1);

    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, theme.text(theme.caption_size))
        .margin(theme.margin)
        .x_label_area_size(theme.x_label_area)
        .y_label_area_size(theme.y_label_area)
        .build_cartesian_2d((0u32..n).into_segmented(), 0u32..y1)?;

    let label_for = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => bars
            .get(*i as usize)
            .map(|(name, _)| name.clone())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(figure.x_label)
        .y_desc(figure.y_label)
        .x_labels(n as usize)
        .x_label_formatter(&label_for)
        .label_style(theme.text(theme.label_size))
        .axis_style(&theme.foreground)
        .bold_line_style(&theme.grid)
        .light_line_style(&TRANSPARENT)
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(theme.bar.mix(0.9).filled())
            .margin(8)
            .data(bars.iter().enumerate().map(|(i, (_, c))| (i as u32, *c as u32))),
    )?;

    root.present()
}

fn draw_line<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    points: &[(String, f64)],
    series_label: &str,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let n = points.len().max(1) as u32;
    let y_min = points.iter().map(|(_, v)| *v).fold(0.0_f64, f64::min);
    let y_max = points.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let y1 = padded_max(y_max);
    let y0 = if y_min < 0.0 { y_min * 1.1 } else { 0.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, theme.text(theme.caption_size))
        .margin(theme.margin)
        .x_label_area_size(theme.x_label_area)
        .y_label_area_size(theme.y_label_area)
        .build_cartesian_2d((0u32..n).into_segmented(), y0..y1)?;

    let label_for = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => points
            .get(*i as usize)
            .map(|(month, _)| month.clone())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(figure.x_label)
        .y_desc(figure.y_label)
        .x_labels(n as usize)
        .x_label_formatter(&label_for)
        .y_label_formatter(&|v| format!("{v:.0}"))
        .label_style(theme.text(theme.label_size))
        .axis_style(&theme.foreground)
        .bold_line_style(&theme.grid)
        .light_line_style(&TRANSPARENT)
        .draw()?;

    let line = theme.line;
    let series = || {
        points
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (SegmentValue::CenterOf(i as u32), *v))
    };

    chart
        .draw_series(LineSeries::new(series(), line.stroke_width(2)))?
        .label(series_label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line.stroke_width(2)));
    if theme.marker_size > 0 {
        let radius = theme.marker_size as i32;
        chart.draw_series(series().map(|p| Circle::new(p, radius, line.filled())))?;
    }

    chart
        .configure_series_labels()
        .label_font(theme.text(theme.label_size))
        .border_style(&theme.foreground)
        .draw()?;

    root.present()
}

/// Upper axis bound with 10% headroom; never below 1.
fn padded_max(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 { max * 1.1 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_max_has_headroom_and_floor() {
        assert!((padded_max(10.0) - 11.0).abs() < 1e-9);
        assert_eq!(padded_max(0.0), 1.0);
        assert_eq!(padded_max(f64::NAN), 1.0);
    }

    #[test]
    fn themes_differ_only_cosmetically() {
        let choc = Theme::file(ChartStyle::Chocolate);
        let std = Theme::file(ChartStyle::Standard);
        assert_eq!(choc.bar, CHOCOLATE);
        assert_eq!(std.bar, DEFAULT_BLUE);
        assert_eq!(choc.caption_size, std.caption_size);
        assert!(Theme::terminal(ChartStyle::Standard).background.is_none());
    }
}
