//! Command-line parsing for the temperature trend analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the loading/fitting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::io::decode::DEFAULT_FALLBACK_ENCODING;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "temp-trend",
    version,
    about = "Annual mean temperature trend from a CSV of daily readings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a CSV: summary, per-year table and a terminal chart.
    Analyze(AnalyzeArgs),
    /// Print the summary only (useful for scripting).
    Summary(AnalyzeArgs),
    /// Plot a previously exported analysis JSON.
    Plot(PlotArgs),
}

/// Options shared by `analyze` and `summary`.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// CSV of daily readings with a date column and a mean temperature column.
    ///
    /// When omitted, CSV files under the current directory are listed to pick from.
    #[arg(value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Encoding retried when the file is not valid UTF-8.
    #[arg(
        long,
        env = "TEMP_TREND_FALLBACK_ENCODING",
        default_value = DEFAULT_FALLBACK_ENCODING
    )]
    pub fallback_encoding: String,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the chart data (year, annual mean, trend) to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    /// Export the full analysis to JSON (can be re-plotted with `plot`).
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for plotting a saved analysis.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Analysis JSON produced by `temp-trend analyze --export-json`.
    #[arg(value_name = "JSON")]
    pub analysis: PathBuf,

    /// Chart width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Rewrite argv so a bare `temp-trend [FILE] [FLAGS]` means `temp-trend analyze ...`.
///
/// Rules:
/// - `temp-trend`                      -> `temp-trend analyze` (file picker)
/// - `temp-trend temp.csv ...`         -> `temp-trend analyze temp.csv ...`
/// - `temp-trend --no-plot ...`        -> `temp-trend analyze --no-plot ...`
/// - `temp-trend --help/--version/-h`  -> unchanged (show top-level help/version)
pub fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("analyze".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    let is_subcommand = matches!(arg1.as_str(), "analyze" | "summary" | "plot");
    if is_top_level_help_or_version || is_subcommand {
        return argv;
    }

    argv.insert(1, "analyze".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_analyze() {
        assert_eq!(rewrite_args(argv(&["temp-trend"])), argv(&["temp-trend", "analyze"]));
        assert_eq!(
            rewrite_args(argv(&["temp-trend", "temp.csv", "--no-plot"])),
            argv(&["temp-trend", "analyze", "temp.csv", "--no-plot"])
        );
        assert_eq!(
            rewrite_args(argv(&["temp-trend", "--width", "40"])),
            argv(&["temp-trend", "analyze", "--width", "40"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["temp-trend", "summary", "a.csv"]),
            argv(&["temp-trend", "plot", "a.json"]),
            argv(&["temp-trend", "--help"]),
            argv(&["temp-trend", "-V"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn analyze_args_parse() {
        let cli = Cli::parse_from(argv(&[
            "temp-trend",
            "analyze",
            "temp.csv",
            "--fallback-encoding",
            "euc-kr",
            "--no-plot",
            "--export-csv",
            "chart.csv",
        ]));
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.file, Some(PathBuf::from("temp.csv")));
        assert_eq!(args.fallback_encoding, "euc-kr");
        assert!(args.no_plot);
        assert_eq!(args.export_csv, Some(PathBuf::from("chart.csv")));
        assert_eq!(args.export_json, None);
        assert_eq!(args.width, 72);
    }

    #[test]
    fn plot_args_parse() {
        let cli = Cli::parse_from(argv(&["temp-trend", "plot", "saved.json", "--height", "10"]));
        let Command::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        assert_eq!(args.analysis, PathBuf::from("saved.json"));
        assert_eq!(args.height, 10);
    }
}
