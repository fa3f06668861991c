//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the dataset
//! - builds report figures
//! - prints/exports them or hands off to the TUI

use clap::Parser;
use log::info;

use crate::cli::{Command, OutputFormat, ReportArgs, SampleArgs, SourceArgs, ViewArgs};
use crate::data::{generate_sample, write_sample_csv, SampleConfig};
use crate::domain::DashboardConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `autosales` binary.
pub fn run() -> Result<(), AppError> {
    // We want `autosales` and `autosales --csv f.csv` to behave like
    // `autosales tui ...`. Clap requires a subcommand name, so rewrite argv first.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Report(args) => handle_report(args),
        Command::Years(args) => handle_years(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_tui(args: ViewArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args);
    crate::tui::run(config)
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args.view);
    let dataset = pipeline::load(&config)?;
    let run = pipeline::run_report(&dataset, &config)?;

    match args.format {
        OutputFormat::Text => {
            let year = (run.report == crate::domain::ReportKind::Yearly).then_some(run.year);
            println!("{}", crate::report::format_report(run.report, year, &run.figures));
        }
        OutputFormat::Json => {
            println!("{}", crate::io::charts_to_json(run.report, run.year, &run.figures)?);
        }
    }

    if let Some(path) = &args.out {
        crate::io::write_charts_json(path, run.report, run.year, &run.figures)?;
        info!("wrote charts to {}", path.display());
    }

    Ok(())
}

fn handle_years(args: SourceArgs) -> Result<(), AppError> {
    let config = DashboardConfig {
        source: pipeline::resolve_source(&args),
        report: crate::domain::ReportKind::Yearly,
        year: None,
    };
    let dataset = pipeline::load(&config)?;
    let years: Vec<String> = dataset.years().iter().map(|y| y.to_string()).collect();
    println!("{}", years.join("\n"));
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        seed: args.seed,
        start_year: args.start_year,
        end_year: args.end_year,
    };
    let records = generate_sample(&config)?;
    write_sample_csv(&args.out, &records)?;
    println!("Wrote {} rows to {}", records.len(), args.out.display());
    Ok(())
}

pub fn dashboard_config_from_args(args: &ViewArgs) -> DashboardConfig {
    DashboardConfig {
        source: pipeline::resolve_source(&args.source),
        report: args.report,
        year: args.year,
    }
}

/// Rewrite argv so `autosales` defaults to `autosales tui`.
///
/// Rules:
/// - `autosales`                     -> `autosales tui`
/// - `autosales --csv f.csv ...`     -> `autosales tui --csv f.csv ...`
/// - `autosales --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "report" | "years" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(args(&["autosales"])), args(&["autosales", "tui"]));
    }

    #[test]
    fn leading_flags_are_tui_flags() {
        assert_eq!(
            rewrite_args(args(&["autosales", "--csv", "a.csv"])),
            args(&["autosales", "tui", "--csv", "a.csv"])
        );
        assert_eq!(rewrite_args(args(&["autosales", "--help"])), args(&["autosales", "--help"]));
        assert_eq!(
            rewrite_args(args(&["autosales", "report", "--report", "recession"])),
            args(&["autosales", "report", "--report", "recession"])
        );
    }
}
