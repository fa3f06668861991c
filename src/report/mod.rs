//! Report selection and aggregation.
//!
//! Each report turns the dataset into exactly four `ChartSpec`s:
//!
//! - `recession_graphs`: recession-flagged rows only
//! - `year_graphs`: one selected year (plus the all-years trend line)
//!
//! `display_graphs` picks between them from the dashboard inputs.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::data::Dataset;
use crate::domain::{ReportKind, VehicleType};

pub mod aggregate;
pub mod chart;
pub mod format;
pub mod recession;
pub mod yearly;

pub use chart::{ChartKind, ChartSpec, DataPoint, Series, XValue, ACCENT_COLOR};
pub use format::format_report;
pub use recession::recession_graphs;
pub use yearly::year_graphs;

/// Number of charts every report produces.
pub const CHART_COUNT: usize = 4;

/// The four figures of one report, in display order.
pub type Figures = [ChartSpec; CHART_COUNT];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("Year {year} is not present in the dataset")]
    UnknownYear { year: i32 },
    #[error("Unknown vehicle type '{raw}'")]
    UnknownVehicleType { raw: String },
}

/// Build the figures for the selected report.
///
/// `year` is only consulted for `ReportKind::Yearly`.
pub fn display_graphs(dataset: &Dataset, report: ReportKind, year: i32) -> Result<Figures, ReportError> {
    match report {
        ReportKind::Recession => recession_graphs(dataset),
        ReportKind::Yearly => year_graphs(dataset, year),
    }
}

/// Convert raw-keyed vehicle groups into display-named categorical points.
fn vehicle_points(groups: BTreeMap<String, f64>) -> Result<Vec<DataPoint>, ReportError> {
    groups
        .into_iter()
        .map(|(raw, y)| {
            let vehicle = VehicleType::from_raw(&raw)?;
            Ok(DataPoint {
                x: XValue::Category(vehicle.display_name().to_string()),
                y,
            })
        })
        .collect()
}
