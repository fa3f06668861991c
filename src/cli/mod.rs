//! Command-line parsing for the automobile sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! loading, aggregation, and rendering.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::ReportKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "autosales", version, about = "Automobile Sales Statistics Dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (default).
    Tui(ViewArgs),
    /// Print or export the four charts of one report.
    Report(ReportArgs),
    /// List the years available in the dataset.
    Years(SourceArgs),
    /// Write a synthetic dataset with the same schema.
    Sample(SampleArgs),
}

/// Where to load the dataset from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Read the dataset from a local CSV instead of downloading it.
    #[arg(long, value_name = "CSV", conflicts_with = "url")]
    pub csv: Option<PathBuf>,

    /// Dataset URL (defaults to $AUTOSALES_CSV_URL, then the built-in URL).
    #[arg(long)]
    pub url: Option<String>,
}

/// Initial selection for the dashboard.
#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Report to show first.
    #[arg(long, value_enum, default_value_t = ReportKind::Yearly)]
    pub report: ReportKind,

    /// Year to select (defaults to 2005, or the earliest year if absent).
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output format on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the charts as JSON to this path.
    #[arg(long, value_name = "JSON")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Destination CSV.
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// First year to generate.
    #[arg(long, default_value_t = 1980)]
    pub start_year: i32,

    /// Last year to generate (inclusive).
    #[arg(long, default_value_t = 2023)]
    pub end_year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_subcommand() {
        let cli = Cli::parse_from([
            "autosales", "report", "--report", "recession", "--csv", "data.csv", "--format", "json",
        ]);
        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.view.report, ReportKind::Recession);
                assert_eq!(args.view.source.csv, Some(PathBuf::from("data.csv")));
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.view.year, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn csv_and_url_conflict() {
        let res = Cli::try_parse_from(["autosales", "years", "--csv", "a.csv", "--url", "https://x"]);
        assert!(res.is_err());
    }
}
