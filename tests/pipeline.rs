use std::fs;
use std::path::{Path, PathBuf};

use sales_report::app::{OutputMode, execute, pipeline::run_report};
use sales_report::domain::{ChartStyle, ReportConfig};
use sales_report::error::{EXIT_DATA, EXIT_INPUT};
use sales_report::report::format_report;

const HEADER: &str = "Sales Person,Country,Product,Date,Amount,Boxes Shipped\n";

fn write_csv(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("sales.csv");
    fs::write(&path, format!("{HEADER}{body}")).unwrap();
    path
}

fn config(input: PathBuf) -> ReportConfig {
    ReportConfig {
        input,
        render_charts: false,
        ..ReportConfig::default()
    }
}

#[test]
fn duplicate_row_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "Alice,UK,Product A,01-Jan-24,$10.00,5\n\
         Bob,UK,Product B,15-Jan-24,$20.00,3\n\
         Alice,UK,Product A,01-Jan-24,$10.00,5\n",
    );

    let run = run_report(&config(input)).unwrap();

    assert_eq!(run.cleaned.records.len(), 2);
    assert_eq!(run.summary.total_boxes_shipped, 8);
    assert_eq!(run.summary.monthly.len(), 1);
    assert!((run.summary.monthly[0].total - 30.0).abs() < 1e-9);
    assert_eq!(run.summary.peak.month.long_name(), "January 2024");

    let text = format_report(&run.summary, ChartStyle::Chocolate);
    assert!(text.contains("\nTop 5 chocolate brands:\n"));
    assert!(text.ends_with("Most profitable month: January 2024 - Total profit: 30.00\n"));
}

#[test]
fn unparseable_amount_is_kept_but_not_summed() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "Alice,UK,Product A,01-Jan-24,$abc,7\n\
         Bob,UK,Product B,15-Jan-24,$20.00,3\n",
    );

    let run = run_report(&config(input)).unwrap();

    assert_eq!(run.cleaned.records.len(), 2);
    assert_eq!(run.summary.clean_stats.amount_coercion_failures, 1);
    assert_eq!(run.summary.total_boxes_shipped, 10);
    assert!((run.summary.monthly[0].total - 20.0).abs() < 1e-9);
    assert_eq!(run.summary.monthly[0].rows, 2);
    assert_eq!(run.summary.monthly[0].amount_rows, 1);
}

#[test]
fn incomplete_rows_dropped_before_dedup_and_amount_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "Alice,UK,Product A,01-Jan-24,$10.00,5\n\
         Alice,,Product A,01-Jan-24,$abc,5\n\
         Alice,,Product A,01-Jan-24,$abc,5\n",
    );

    let run = run_report(&config(input)).unwrap();
    let stats = run.summary.clean_stats;

    assert_eq!(stats.rows_read, 3);
    assert_eq!(stats.incomplete_dropped, 2);
    assert_eq!(stats.duplicates_removed, 0);
    assert_eq!(stats.amount_coercion_failures, 0);
    assert!(run.cleaned.records.iter().all(|r| !r.country.is_empty()));
}

#[test]
fn cleaned_rows_are_complete_and_unique() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "A,UK,P1,01-Jan-24,$1.00,1\n\
         A,UK,P1,01-Jan-24,$1.00,1\n\
         B,UK,P2,02-Feb-24,$2.00,2\n\
         B,UK,P2,02-Feb-24,$2.00,2\n\
         C,UK,,03-Mar-24,$3.00,3\n\
         A,UK,P1,01-Jan-24,$1.00,2\n",
    );

    let run = run_report(&config(input)).unwrap();
    let records = &run.cleaned.records;

    assert_eq!(records.len(), 3);
    for (i, a) in records.iter().enumerate() {
        assert!(!a.sales_person.is_empty() && !a.product.is_empty() && !a.country.is_empty());
        for b in &records[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "Zed,UK,P3,01-Mar-24,$5.00,1\n\
         Amy,UK,P1,01-Jan-24,$5.00,1\n\
         Zed,UK,P2,01-Feb-24,$5.00,1\n\
         Amy,UK,P2,01-Feb-24,$6.00,1\n",
    );
    let cfg = config(input);

    let a = run_report(&cfg).unwrap();
    let b = run_report(&cfg).unwrap();

    assert_eq!(
        format_report(&a.summary, cfg.style),
        format_report(&b.summary, cfg.style)
    );
    assert_eq!(a.summary.monthly, b.summary.monthly);
    // Tie between Amy and Zed goes to the lexically lowest name.
    assert_eq!(a.summary.top_sales_person, "Amy");
}

#[test]
fn negative_and_unparseable_box_counts_do_not_abort() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "A,UK,P,01-Jan-24,$1.00,-3\n\
         B,UK,P,02-Jan-24,$1.00,5\n\
         C,UK,P,03-Jan-24,$1.00,5.0\n\
         D,UK,P,04-Jan-24,$1.00,lots\n",
    );

    let run = run_report(&config(input)).unwrap();

    assert_eq!(run.cleaned.records.len(), 4);
    assert_eq!(run.summary.total_boxes_shipped, 7);
    assert_eq!(run.summary.clean_stats.boxes_coercion_failures, 1);
    assert!((run.summary.monthly[0].total - 4.0).abs() < 1e-9);
}

#[test]
fn padded_cells_stay_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "A,UK,P,01-Jan-24,$1.00,1\n\
         A ,UK,P,01-Jan-24,$1.00,1\n",
    );

    let run = run_report(&config(input)).unwrap();

    assert_eq!(run.summary.clean_stats.duplicates_removed, 0);
    assert_eq!(run.cleaned.records.len(), 2);
    assert_eq!(run.summary.top_products[0].count, 2);
}

#[test]
fn missing_file_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_report(&config(dir.path().join("absent.csv"))).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_INPUT);
}

#[test]
fn missing_column_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");
    fs::write(&path, "Sales Person,Country,Product,Date,Amount\nA,UK,P,01-Jan-24,$1\n").unwrap();

    let err = run_report(&config(path)).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_INPUT);
    assert!(err.to_string().contains("BoxesShipped"));
}

#[test]
fn malformed_date_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "A,UK,P,01-Jan-24,$1.00,1\n\
         B,UK,P,Jan 2 2024,$1.00,1\n",
    );

    let err = run_report(&config(input)).unwrap_err();
    assert_eq!(err.exit_code(), EXIT_DATA);
    assert!(err.to_string().contains("Jan 2 2024"));
}

#[test]
fn bundled_dataset_report() {
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/Chocolate Sales.csv");
    let run = run_report(&config(input)).unwrap();
    let s = &run.summary;

    assert_eq!(s.clean_stats.rows_read, 20);
    assert_eq!(s.clean_stats.incomplete_dropped, 1);
    assert_eq!(s.clean_stats.duplicates_removed, 1);
    assert_eq!(s.clean_stats.amount_coercion_failures, 1);
    assert_eq!(s.clean_stats.boxes_coercion_failures, 0);
    assert_eq!(s.clean_stats.rows_kept, 18);

    assert_eq!(s.total_boxes_shipped, 2706);
    assert_eq!(s.top_sales_person, "Jehu Rudeforth");

    let top: Vec<(&str, usize)> = s.top_products.iter().map(|p| (p.value.as_str(), p.count)).collect();
    assert_eq!(
        top,
        [
            ("Peanut Butter Cubes", 5),
            ("Mint Chip Choco", 4),
            ("85% Dark Bars", 2),
            ("99% Dark & Pure", 2),
            ("Almond Choco", 2),
        ]
    );
    assert!(top.iter().map(|(_, c)| c).sum::<usize>() <= s.clean_stats.rows_kept);

    assert_eq!(s.monthly.len(), 8);
    assert_eq!(s.peak.month.long_name(), "July 2022");
    assert!((s.peak.total - 17689.0).abs() < 1e-6);
    assert!(s.monthly.iter().all(|m| s.peak.total >= m.total));
}

#[test]
fn full_run_writes_charts_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "Alice,UK,Product A,01-Jan-24,$10.00,5\n\
         Bob,UK,Product B,15-Feb-24,$20.00,3\n",
    );
    let out_dir = dir.path().join("charts");
    let monthly = dir.path().join("monthly.csv");
    let summary = dir.path().join("summary.json");

    let cfg = ReportConfig {
        input,
        out_dir: out_dir.clone(),
        export_monthly: Some(monthly.clone()),
        export_summary: Some(summary.clone()),
        ..ReportConfig::default()
    };
    execute(&cfg, OutputMode::Full).unwrap();

    for name in ["sales_distribution.svg", "top_products.svg", "monthly_sales.svg"] {
        assert!(out_dir.join(name).is_file(), "missing {name}");
    }
    let csv = fs::read_to_string(&monthly).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(fs::read_to_string(&summary).unwrap().contains("\"February 2024\""));
}
