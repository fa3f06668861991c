//! Shared "load → select → aggregate" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the workflow:
//! source resolution -> fetch + ingest -> year resolution -> report figures
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::sync::Arc;

use crate::cli::SourceArgs;
use crate::data::{DataFetcher, Dataset};
use crate::domain::{DashboardConfig, DataSource, ReportKind, DEFAULT_YEAR};
use crate::error::{AppError, EXIT_INPUT};
use crate::report::{display_graphs, Figures};

/// Computed outputs of a single report run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub report: ReportKind,
    pub year: i32,
    pub figures: Figures,
}

/// CLI flags win over the environment.
pub fn resolve_source(args: &SourceArgs) -> DataSource {
    if let Some(path) = &args.csv {
        return DataSource::File(path.clone());
    }
    if let Some(url) = &args.url {
        return DataSource::Url(url.clone());
    }
    DataFetcher::source_from_env()
}

/// Load the dataset once and wrap it for sharing.
pub fn load(config: &DashboardConfig) -> Result<Arc<Dataset>, AppError> {
    let dataset = DataFetcher::new().load(&config.source)?;
    Ok(Arc::new(dataset))
}

/// Pick the year a run should use.
///
/// An explicit year must exist; otherwise the default year (or the earliest).
pub fn resolve_year(dataset: &Dataset, requested: Option<i32>) -> Result<i32, AppError> {
    match requested {
        Some(year) if dataset.contains_year(year) => Ok(year),
        Some(year) => Err(AppError::new(
            EXIT_INPUT,
            format!(
                "Year {year} is not in the dataset (available: {}..={}).",
                dataset.years()[0],
                dataset.years()[dataset.years().len() - 1]
            ),
        )),
        None => Ok(dataset.resolve_year(DEFAULT_YEAR)),
    }
}

/// Build the figures for a configuration against an already-loaded dataset.
pub fn run_report(dataset: &Dataset, config: &DashboardConfig) -> Result<RunOutput, AppError> {
    let year = match config.report {
        ReportKind::Yearly => resolve_year(dataset, config.year)?,
        ReportKind::Recession => config.year.unwrap_or_else(|| dataset.resolve_year(DEFAULT_YEAR)),
    };
    let figures = display_graphs(dataset, config.report, year)?;
    Ok(RunOutput {
        report: config.report,
        year,
        figures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    fn config(report: ReportKind, year: Option<i32>) -> DashboardConfig {
        DashboardConfig {
            source: DataSource::File("unused.csv".into()),
            report,
            year,
        }
    }

    #[test]
    fn explicit_csv_wins() {
        let args = SourceArgs {
            csv: Some("local.csv".into()),
            url: Some("https://example.invalid/data.csv".into()),
        };
        assert_eq!(resolve_source(&args), DataSource::File("local.csv".into()));
    }

    #[test]
    fn yearly_run_defaults_to_2005() {
        let ds = fixtures::dataset();
        let run = run_report(&ds, &config(ReportKind::Yearly, None)).unwrap();
        assert_eq!(run.year, 2005);
        assert_eq!(run.figures[1].title, "Total Automobile Sales per Month in 2005");
    }

    #[test]
    fn unknown_year_is_an_input_error() {
        let ds = fixtures::dataset();
        let err = run_report(&ds, &config(ReportKind::Yearly, Some(1960))).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("2005..=2010"));
    }

    #[test]
    fn recession_run_ignores_missing_year() {
        let ds = fixtures::dataset();
        let run = run_report(&ds, &config(ReportKind::Recession, Some(1960))).unwrap();
        assert_eq!(run.report, ReportKind::Recession);
    }
}
