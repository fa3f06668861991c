//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - input selection enums (`ReportKind`)
//! - dataset row types (`SalesRecord`, `Month`, `VehicleType`)
//! - chart-facing column labels (`Column`)
//! - run configuration (`DashboardConfig`, `DataSource`)

pub mod types;

pub use types::*;
