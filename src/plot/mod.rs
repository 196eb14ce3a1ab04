//! Chart descriptions and rendering.
//!
//! Each chart is an explicit `Figure` value built from the summary. Nothing is
//! drawn here; `draw` turns a figure into Plotters primitives on any backend,
//! `svg` persists figures to files and the terminal viewer (`crate::tui`)
//! shows them interactively.
//!
//! Figures are produced in a fixed order: amount histogram, top-products bar
//! chart, monthly line chart.

use crate::domain::ChartStyle;
use crate::report::SalesSummary;

pub mod draw;
pub mod svg;

pub use draw::{Theme, draw_figure};
pub use svg::write_figures;

/// One histogram bucket `[lo, hi)`; the last bucket is closed on the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Chart-type specific data.
#[derive(Debug, Clone, PartialEq)]
pub enum FigureData {
    Histogram(Vec<HistogramBin>),
    /// Categorical bars: `(label, count)`.
    Bar(Vec<(String, usize)>),
    /// Ordered line series: `(x label, value)` plus the legend label.
    Line {
        points: Vec<(String, f64)>,
        series_label: String,
    },
}

/// A self-contained chart: titles, axis labels, data and output name.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// File name without extension.
    pub name: &'static str,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub data: FigureData,
}

/// Build the three report charts.
pub fn build_figures(summary: &SalesSummary, style: ChartStyle, bins: usize) -> Vec<Figure> {
    vec![
        amount_histogram(&summary.amounts, bins),
        top_products_bar(summary, style),
        monthly_line(summary),
    ]
}

pub fn amount_histogram(amounts: &[f64], bins: usize) -> Figure {
    Figure {
        name: "sales_distribution",
        title: "Sales Distribution".to_string(),
        x_label: "Sales Amount",
        y_label: "Frequency",
        data: FigureData::Histogram(histogram_bins(amounts, bins)),
    }
}

pub fn top_products_bar(summary: &SalesSummary, style: ChartStyle) -> Figure {
    Figure {
        name: "top_products",
        title: format!("Top {} Best-Selling {}", summary.top_n, style.product_noun()),
        x_label: "Product",
        y_label: "Number of Sales",
        data: FigureData::Bar(
            summary
                .top_products
                .iter()
                .map(|p| (p.value.clone(), p.count))
                .collect(),
        ),
    }
}

pub fn monthly_line(summary: &SalesSummary) -> Figure {
    Figure {
        name: "monthly_sales",
        title: "Monthly Sales Trends".to_string(),
        x_label: "Month",
        y_label: "Total Sales Amount",
        data: FigureData::Line {
            points: summary
                .monthly
                .iter()
                .map(|m| (m.month.to_string(), m.total))
                .collect(),
            series_label: "Total Sales".to_string(),
        },
    }
}

/// Split `values` into `bins` equal-width buckets over their range.
///
/// A degenerate range (all values equal) is widened to `value ± 0.5`.
/// Non-finite values are ignored; no values yields no bins.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.clone().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }

    let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lo: lo + width * i as f64,
            hi: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{MonthlyTotal, ValueCount};
    use crate::clean::CleanStats;
    use crate::domain::YearMonth;

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [1.0, 2.0, 2.5, 4.0, 10.0, f64::NAN];
        let bins = histogram_bins(&values, 3);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[0].lo, 1.0);
        assert_eq!(bins[2].hi, 10.0);
        // [1,4) [4,7) [7,10]
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, [3, 1, 1]);
    }

    #[test]
    fn histogram_degenerate_and_empty() {
        let bins = histogram_bins(&[5.0, 5.0], 4);
        assert_eq!(bins[0].lo, 4.5);
        assert_eq!(bins[3].hi, 5.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);

        assert!(histogram_bins(&[], 20).is_empty());
    }

    #[test]
    fn figures_follow_report_order_and_style() {
        let jan = MonthlyTotal {
            month: YearMonth::new(2024, 1).unwrap(),
            total: 30.0,
            rows: 2,
            amount_rows: 2,
        };
        let feb = MonthlyTotal {
            month: YearMonth::new(2024, 2).unwrap(),
            total: 12.5,
            rows: 1,
            amount_rows: 1,
        };
        let summary = SalesSummary {
            total_boxes_shipped: 8,
            top_sales_person: "Alice".to_string(),
            top_products: vec![ValueCount { value: "Mint".to_string(), count: 2 }],
            top_n: 5,
            peak: jan,
            monthly: vec![jan, feb],
            amounts: vec![10.0, 20.0, 12.5],
            clean_stats: CleanStats::default(),
        };

        let figs = build_figures(&summary, ChartStyle::Chocolate, 20);
        let names: Vec<&str> = figs.iter().map(|f| f.name).collect();
        assert_eq!(names, ["sales_distribution", "top_products", "monthly_sales"]);
        assert_eq!(figs[1].title, "Top 5 Best-Selling Chocolate Brands");

        let standard = top_products_bar(&summary, ChartStyle::Standard);
        assert_eq!(standard.title, "Top 5 Best-Selling Products");

        match &figs[2].data {
            FigureData::Line { points, series_label } => {
                assert_eq!(series_label, "Total Sales");
                assert_eq!(points[0], ("2024-01".to_string(), 30.0));
                assert_eq!(points[1], ("2024-02".to_string(), 12.5));
            }
            other => panic!("unexpected figure data: {other:?}"),
        }
    }
}
