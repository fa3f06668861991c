//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held in the in-memory dataset
//! - exported to JSON alongside chart specs
//! - selected from the CLI (`ValueEnum`)

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::report::ReportError;

/// Default CSV location (historical automobile sales, monthly rows).
pub const DEFAULT_DATA_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";

/// Year selected on startup when it exists in the dataset.
pub const DEFAULT_YEAR: i32 = 2005;

/// Which report the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Statistics for a single selected year.
    Yearly,
    /// Statistics across all recession-flagged rows.
    Recession,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::Yearly, ReportKind::Recession];

    pub fn display_name(self) -> &'static str {
        match self {
            ReportKind::Yearly => "Yearly Statistics",
            ReportKind::Recession => "Recession Period Statistics",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ReportKind::Yearly => ReportKind::Recession,
            ReportKind::Recession => ReportKind::Yearly,
        }
    }
}

/// Calendar month as it appears in the `Month` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Parse a three-letter label (case-insensitive).
    pub fn parse(raw: &str) -> Option<Month> {
        let raw = raw.trim();
        Month::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vehicle categories found in the `Vehicle_Type` column.
///
/// The raw keys are kept exactly as the source spells them (including its
/// typos); `display_name` is what charts show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Supperminicar,
    Mediumfamilycar,
    Smallfamiliycar,
    Sports,
    Executivecar,
}

impl VehicleType {
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Supperminicar,
        VehicleType::Mediumfamilycar,
        VehicleType::Smallfamiliycar,
        VehicleType::Sports,
        VehicleType::Executivecar,
    ];

    pub fn raw_key(self) -> &'static str {
        match self {
            VehicleType::Supperminicar => "Supperminicar",
            VehicleType::Mediumfamilycar => "Mediumfamilycar",
            VehicleType::Smallfamiliycar => "Smallfamiliycar",
            VehicleType::Sports => "Sports",
            VehicleType::Executivecar => "Executivecar",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            VehicleType::Supperminicar => "Super Mini Car",
            VehicleType::Mediumfamilycar => "Medium Family Car",
            VehicleType::Smallfamiliycar => "Small Family Car",
            VehicleType::Sports => "Sports Car",
            VehicleType::Executivecar => "Executive Car",
        }
    }

    /// Resolve a raw `Vehicle_Type` label.
    pub fn from_raw(raw: &str) -> Result<VehicleType, ReportError> {
        VehicleType::ALL
            .into_iter()
            .find(|v| v.raw_key() == raw)
            .ok_or_else(|| ReportError::UnknownVehicleType {
                raw: raw.to_string(),
            })
    }
}

/// Columns that appear on chart axes, with their display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Year,
    Month,
    VehicleType,
    AutomobileSales,
    AdvertisingExpenditure,
    UnemploymentRate,
    Recession,
}

impl Column {
    /// Every column the loader requires.
    pub const REQUIRED: [Column; 7] = [
        Column::Year,
        Column::Month,
        Column::VehicleType,
        Column::AutomobileSales,
        Column::AdvertisingExpenditure,
        Column::UnemploymentRate,
        Column::Recession,
    ];

    /// Header name in the CSV.
    pub fn header(self) -> &'static str {
        match self {
            Column::Year => "Year",
            Column::Month => "Month",
            Column::VehicleType => "Vehicle_Type",
            Column::AutomobileSales => "Automobile_Sales",
            Column::AdvertisingExpenditure => "Advertising_Expenditure",
            Column::UnemploymentRate => "unemployment_rate",
            Column::Recession => "Recession",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::Year => "Year",
            Column::Month => "Month",
            Column::VehicleType => "Vehicle Type",
            Column::AutomobileSales => "Automobile Sales",
            Column::AdvertisingExpenditure => "Advertising Expenditure",
            Column::UnemploymentRate => "Unemployment Rate",
            Column::Recession => "Recession",
        }
    }
}

/// One row of the sales dataset.
///
/// `vehicle_type` holds the raw label; the display mapping is applied only when
/// charts are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub year: i32,
    pub month: Month,
    pub vehicle_type: String,
    pub automobile_sales: f64,
    pub advertising_expenditure: f64,
    pub unemployment_rate: f64,
    pub recession: bool,
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolved run configuration shared by the CLI and the TUI.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub report: ReportKind,
    /// Requested year; `None` means "default year if present, else the first".
    pub year: Option<i32>,
}
