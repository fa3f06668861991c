//! Plain-text rendering of report figures for the CLI.
//!
//! Formatting lives here so the aggregation code stays free of presentation
//! concerns and output changes stay localized.

use std::fmt::Write;

use crate::domain::ReportKind;
use crate::report::{ChartKind, ChartSpec};

/// Format every chart of a report as a small table.
pub fn format_report(report: ReportKind, year: Option<i32>, charts: &[ChartSpec]) -> String {
    let mut out = String::new();

    out.push_str("=== Automobile Sales Statistics Dashboard ===\n");
    match (report, year) {
        (ReportKind::Yearly, Some(year)) => {
            let _ = writeln!(out, "Report: {} ({year})", report.display_name());
        }
        _ => {
            let _ = writeln!(out, "Report: {}", report.display_name());
        }
    }

    for (i, chart) in charts.iter().enumerate() {
        out.push('\n');
        out.push_str(&format_chart(i + 1, chart));
    }

    out
}

fn format_chart(index: usize, chart: &ChartSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{index}] {} ({})", chart.title, kind_label(chart.kind));

    match chart.kind {
        ChartKind::Pie => {
            let total: f64 = chart
                .series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.y))
                .sum();
            let _ = writeln!(out, "  {:<24} {:>14} {:>8}", chart.x_label, chart.y_label, "share");
            for p in chart.series.iter().flat_map(|s| s.points.iter()) {
                let share = if total > 0.0 { p.y / total * 100.0 } else { 0.0 };
                let _ = writeln!(out, "  {:<24} {:>14.2} {:>7.1}%", p.x.label(), p.y, share);
            }
        }
        ChartKind::StackedBar => {
            let _ = writeln!(
                out,
                "  {:<24} {:>10} {:>14}",
                "series", chart.x_label, chart.y_label
            );
            for s in &chart.series {
                for p in &s.points {
                    let _ = writeln!(out, "  {:<24} {:>10} {:>14.2}", s.name, p.x.label(), p.y);
                }
            }
        }
        ChartKind::Line | ChartKind::Bar => {
            let _ = writeln!(out, "  {:<24} {:>14}", chart.x_label, chart.y_label);
            for p in chart.series.iter().flat_map(|s| s.points.iter()) {
                let _ = writeln!(out, "  {:<24} {:>14.2}", p.x.label(), p.y);
            }
        }
    }

    if chart.series.iter().all(|s| s.points.is_empty()) {
        out.push_str("  (no data)\n");
    }

    out
}

fn kind_label(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Line => "line",
        ChartKind::Bar => "bar",
        ChartKind::Pie => "pie",
        ChartKind::StackedBar => "stacked bar",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{fixtures, recession_graphs, year_graphs};

    #[test]
    fn yearly_summary_lists_every_chart() {
        let ds = fixtures::dataset();
        let charts = year_graphs(&ds, 2005).unwrap();
        let text = format_report(ReportKind::Yearly, Some(2005), &charts);

        assert!(text.contains("Report: Yearly Statistics (2005)"));
        assert!(text.contains("[1] Yearly Average Automobile Sales (line)"));
        assert!(text.contains("[4] Total Advertising Expenditure by Vehicle Type in 2005 (pie)"));
        assert!(text.contains("Sports Car"));
    }

    #[test]
    fn recession_summary_shows_shares() {
        let ds = fixtures::dataset();
        let charts = recession_graphs(&ds).unwrap();
        let text = format_report(ReportKind::Recession, None, &charts);

        assert!(text.contains("Report: Recession Period Statistics\n"));
        assert!(text.contains("(stacked bar)"));
        assert!(text.contains('%'));
    }
}
