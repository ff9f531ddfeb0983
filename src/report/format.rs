//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the aggregation/fitting code stays clean and testable
//! - output changes are localized (and covered by snapshot tests)

use crate::domain::{Analysis, Direction};
use crate::io::ingest::LoadedTable;

/// Format the run summary (input stats + period + trend figures + verdict).
pub fn format_summary(input_label: &str, table: &LoadedTable, analysis: &Analysis) -> String {
    let report = &analysis.report;
    let mut out = String::new();

    out.push_str("=== temp-trend - Annual Temperature Trend ===\n");
    out.push_str(&format!("Input: {input_label} (encoding: {})\n", table.encoding));
    out.push_str(&format!(
        "Rows: read={} | used={} | dropped={}\n",
        table.rows_read,
        table.rows_used(),
        table.rows_dropped
    ));
    out.push_str(&format!(
        "Period: {} - {} ({} years with data)\n",
        report.start_year,
        report.end_year,
        analysis.annual_means.len()
    ));
    out.push_str(&format!(
        "Trend: slope={:+.4} °C/year | change over period={:+.2} °C\n",
        report.slope, report.predicted_change
    ));
    out.push_str(&format!(
        "Fit: n={} SSE={:.3} RMSE={:.3} °C\n",
        analysis.quality.n, analysis.quality.sse, analysis.quality.rmse
    ));
    out.push_str(&format!("Verdict: {}\n", verdict(report.direction)));

    out
}

fn verdict(direction: Direction) -> &'static str {
    match direction {
        Direction::Rising => "rising - the data shows a clear warming trend over the period.",
        Direction::NotRising => "not rising - the data shows no clear warming trend over the period.",
    }
}

/// Format the per-year table (annual mean next to the trend value).
pub fn format_annual_table(analysis: &Analysis) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<6} {:>10} {:>10} {:>8}\n", "year", "mean", "trend", "count").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<6} {:-<10} {:-<10} {:-<8}\n", "", "", "", "").trim_end());
    out.push('\n');

    for (mean, trend) in analysis.annual_means.iter().zip(&analysis.trend_line) {
        out.push_str(
            format!(
                "{:<6} {:>10.2} {:>10.2} {:>8}\n",
                mean.year, mean.mean, trend.value, mean.count
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisReport, AnnualMean, FitQuality, TrendModel, TrendPoint};

    fn analysis(slope: f64, change: f64, direction: Direction) -> Analysis {
        Analysis {
            annual_means: vec![
                AnnualMean { year: 1910, mean: 15.0, count: 2 },
                AnnualMean { year: 2020, mean: 20.0, count: 2 },
            ],
            trend_line: vec![
                TrendPoint { year: 1910, value: 15.0 },
                TrendPoint { year: 2020, value: 20.0 },
            ],
            model: TrendModel { slope, intercept: 0.0 },
            quality: FitQuality { n: 2, sse: 0.0, rmse: 0.0 },
            report: AnalysisReport {
                start_year: 1910,
                end_year: 2020,
                predicted_change: change,
                slope,
                direction,
            },
        }
    }

    fn table() -> LoadedTable {
        LoadedTable {
            records: Vec::new(),
            encoding: "UTF-8".to_string(),
            rows_read: 5,
            rows_dropped: 1,
        }
    }

    #[test]
    fn summary_snapshot() {
        let txt = format_summary("temp.csv", &table(), &analysis(5.0 / 110.0, 5.0, Direction::Rising));
        let expected = concat!(
            "=== temp-trend - Annual Temperature Trend ===\n",
            "Input: temp.csv (encoding: UTF-8)\n",
            "Rows: read=5 | used=0 | dropped=1\n",
            "Period: 1910 - 2020 (2 years with data)\n",
            "Trend: slope=+0.0455 °C/year | change over period=+5.00 °C\n",
            "Fit: n=2 SSE=0.000 RMSE=0.000 °C\n",
            "Verdict: rising - the data shows a clear warming trend over the period.\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn summary_shows_signed_change_for_cooling() {
        let txt = format_summary("t.csv", &table(), &analysis(-0.01, -1.234, Direction::NotRising));
        assert!(txt.contains("change over period=-1.23 °C"));
        assert!(txt.contains("no clear warming trend"));
    }

    #[test]
    fn annual_table_snapshot() {
        let txt = format_annual_table(&analysis(0.0, 0.0, Direction::NotRising));
        let expected = concat!(
            "year         mean      trend    count\n",
            "------ ---------- ---------- --------\n",
            "1910        15.00      15.00        2\n",
            "2020        20.00      20.00        2\n",
        );
        assert_eq!(txt, expected);
    }
}
