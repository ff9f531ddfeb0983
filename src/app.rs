//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - reads the input file once and runs the pipeline (through the cache)
//! - prints the summary, per-year table and chart
//! - writes optional exports

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::picker::{prompt_for_csv_path, validate_csv_path};
use crate::cli::{AnalyzeArgs, Command, PlotArgs, rewrite_args};
use crate::domain::AnalysisFile;
use crate::error::AppError;
use crate::io::decode::resolve_encoding;
use crate::io::ingest::LoadOptions;

pub mod cache;
pub mod pipeline;

use cache::AnalysisCache;

/// Environment variable holding the log filter (e.g. `debug`).
pub const LOG_ENV: &str = "TEMP_TREND_LOG";

/// Entry point for the `temp-trend` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args, OutputMode::Full),
        Command::Summary(args) => handle_analyze(args, OutputMode::SummaryOnly),
        Command::Plot(args) => handle_plot(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    SummaryOnly,
}

/// A run's configuration as understood by the app layer.
///
/// This is derived from CLI flags (plus env/defaults).
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub input: PathBuf,
    pub load: LoadOptions,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

pub fn analyze_config_from_args(args: &AnalyzeArgs) -> Result<AnalyzeConfig, AppError> {
    // Resolve the encoding first so a typo fails before the picker prompts.
    let fallback_encoding = resolve_encoding(&args.fallback_encoding)?;
    let input = match &args.file {
        Some(path) => validate_csv_path(path)?,
        None => prompt_for_csv_path()?,
    };

    Ok(AnalyzeConfig {
        input,
        load: LoadOptions { fallback_encoding },
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export_csv.clone(),
        export_json: args.export_json.clone(),
    })
}

fn handle_analyze(args: AnalyzeArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = analyze_config_from_args(&args)?;
    let bytes = std::fs::read(&config.input)
        .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", config.input.display())))?;

    let mut cache = AnalysisCache::new(config.load);
    let run = cache.get_or_run(&bytes).inspect_err(|err| {
        tracing::warn!(input = %config.input.display(), error = %err, "analysis failed");
    })?;
    tracing::info!(
        input = %config.input.display(),
        encoding = %run.table.encoding,
        rows_read = run.table.rows_read,
        rows_used = run.table.rows_used(),
        rows_dropped = run.table.rows_dropped,
        years = run.analysis.annual_means.len(),
        "analysis complete"
    );

    let label = input_label(&config.input);
    println!("{}", crate::report::format_summary(&label, &run.table, &run.analysis));

    if mode == OutputMode::Full {
        println!("{}", crate::report::format_annual_table(&run.analysis));
        if config.plot {
            let plot = crate::plot::render_ascii_plot(&run.analysis, config.plot_width, config.plot_height);
            println!("{plot}");
        }
    }

    if let Some(path) = &config.export_csv {
        crate::io::export::write_chart_csv(path, &run.analysis)?;
        tracing::info!(path = %path.display(), "wrote chart CSV");
    }
    if let Some(path) = &config.export_json {
        let saved = AnalysisFile {
            tool: "temp-trend".to_string(),
            input: label,
            encoding: run.table.encoding.clone(),
            rows_read: run.table.rows_read,
            rows_dropped: run.table.rows_dropped,
            analysis: run.analysis.clone(),
        };
        crate::io::export::write_analysis_json(path, &saved)?;
        tracing::info!(path = %path.display(), "wrote analysis JSON");
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let saved = crate::io::export::read_analysis_json(&args.analysis)?;
    println!("Input: {} (saved by {})", saved.input, saved.tool);
    println!(
        "{}",
        crate::plot::render_ascii_plot(&saved.analysis, args.width, args.height)
    );
    Ok(())
}

fn input_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
