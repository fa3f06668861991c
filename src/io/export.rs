//! Export report figures to JSON.
//!
//! The document carries the selection that produced the charts so exports can
//! be compared or re-rendered elsewhere.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::ReportKind;
use crate::error::{AppError, EXIT_RUNTIME};
use crate::report::ChartSpec;

#[derive(Debug, Serialize)]
pub struct ChartsDocument<'a> {
    pub tool: &'static str,
    pub report: ReportKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub generated_at: DateTime<Local>,
    pub charts: &'a [ChartSpec],
}

impl<'a> ChartsDocument<'a> {
    /// `year` is dropped for the recession report.
    pub fn new(report: ReportKind, year: i32, charts: &'a [ChartSpec]) -> Self {
        Self {
            tool: "autosales",
            report,
            year: (report == ReportKind::Yearly).then_some(year),
            generated_at: Local::now(),
            charts,
        }
    }
}

pub fn charts_to_json(report: ReportKind, year: i32, charts: &[ChartSpec]) -> Result<String, AppError> {
    serde_json::to_string_pretty(&ChartsDocument::new(report, year, charts))
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to serialize charts: {e}")))
}

/// Write a charts JSON file.
pub fn write_charts_json(path: &Path, report: ReportKind, year: i32, charts: &[ChartSpec]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_RUNTIME,
            format!("Failed to create charts JSON '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, &ChartsDocument::new(report, year, charts))
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to write charts JSON: {e}")))?;

    Ok(())
}

/// Timestamped export path under `exports/` (used by the TUI).
pub fn default_export_path(report: ReportKind, year: i32) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("exports");
    std::fs::create_dir_all(&dir)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to create export dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let name = match report {
        ReportKind::Yearly => format!("autosales_yearly_{year}_{ts}.json"),
        ReportKind::Recession => format!("autosales_recession_{ts}.json"),
    };
    Ok(dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{fixtures, recession_graphs, year_graphs};

    #[test]
    fn yearly_document_includes_year_and_charts() {
        let ds = fixtures::dataset();
        let charts = year_graphs(&ds, 2005).unwrap();
        let json = charts_to_json(ReportKind::Yearly, 2005, &charts).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["report"], "yearly");
        assert_eq!(value["year"], 2005);
        assert_eq!(value["charts"].as_array().unwrap().len(), 4);
        assert_eq!(value["charts"][3]["kind"], "pie");
    }

    #[test]
    fn recession_document_omits_year() {
        let ds = fixtures::dataset();
        let charts = recession_graphs(&ds).unwrap();
        let path = std::env::temp_dir().join(format!("autosales_export_{}.json", std::process::id()));
        write_charts_json(&path, ReportKind::Recession, 2005, &charts).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("year").is_none());
        assert_eq!(value["charts"][3]["kind"], "stacked_bar");
        assert_eq!(value["charts"][3]["series"][0]["legend_group"], "Medium Family Car");
    }
}
