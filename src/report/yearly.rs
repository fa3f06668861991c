//! Yearly report for a single selected year.

use crate::data::Dataset;
use crate::domain::Column;
use crate::report::aggregate::{group_mean, group_sum};
use crate::report::{
    vehicle_points, ChartKind, ChartSpec, DataPoint, Figures, ReportError, Series, XValue, ACCENT_COLOR,
};

/// Months per year; the vehicle bar divides yearly totals by this.
const MONTHS_PER_YEAR: f64 = 12.0;

/// Four charts for `year`, which must be present in the dataset.
pub fn year_graphs(dataset: &Dataset, year: i32) -> Result<Figures, ReportError> {
    if !dataset.contains_year(year) {
        return Err(ReportError::UnknownYear { year });
    }

    Ok([
        yearly_average(dataset),
        monthly_totals(dataset, year),
        monthly_average_by_vehicle(dataset, year)?,
        advertising_by_vehicle(dataset, year)?,
    ])
}

/// Always spans every year, independent of the selection.
fn yearly_average(dataset: &Dataset) -> ChartSpec {
    let points = group_mean(dataset.records(), |r| r.year, |r| r.automobile_sales)
        .into_iter()
        .map(|(year, y)| DataPoint {
            x: XValue::Number(f64::from(year)),
            y,
        })
        .collect();

    ChartSpec::new(
        ChartKind::Line,
        "Yearly Average Automobile Sales",
        Column::Year.label(),
        Column::AutomobileSales.label(),
        vec![Series::new(Column::AutomobileSales.label(), points).with_color(ACCENT_COLOR)],
    )
}

fn monthly_totals(dataset: &Dataset, year: i32) -> ChartSpec {
    let points = group_sum(dataset.year_records(year), |r| r.month, |r| r.automobile_sales)
        .into_iter()
        .map(|(month, y)| DataPoint {
            x: XValue::Category(month.label().to_string()),
            y,
        })
        .collect();

    ChartSpec::new(
        ChartKind::Line,
        format!("Total Automobile Sales per Month in {year}"),
        Column::Month.label(),
        Column::AutomobileSales.label(),
        vec![Series::new(Column::AutomobileSales.label(), points).with_color(ACCENT_COLOR)],
    )
}

fn monthly_average_by_vehicle(dataset: &Dataset, year: i32) -> Result<ChartSpec, ReportError> {
    let groups = group_sum(
        dataset.year_records(year),
        |r| r.vehicle_type.clone(),
        |r| r.automobile_sales,
    )
    .into_iter()
    .map(|(raw, total)| (raw, total / MONTHS_PER_YEAR))
    .collect();

    Ok(ChartSpec::new(
        ChartKind::Bar,
        format!("Average Monthly Automobile Sales by Vehicle Type in {year}"),
        Column::VehicleType.label(),
        Column::AutomobileSales.label(),
        vec![Series::new(Column::AutomobileSales.label(), vehicle_points(groups)?).with_color(ACCENT_COLOR)],
    ))
}

fn advertising_by_vehicle(dataset: &Dataset, year: i32) -> Result<ChartSpec, ReportError> {
    let groups = group_sum(
        dataset.year_records(year),
        |r| r.vehicle_type.clone(),
        |r| r.advertising_expenditure,
    );

    Ok(ChartSpec::new(
        ChartKind::Pie,
        format!("Total Advertising Expenditure by Vehicle Type in {year}"),
        Column::VehicleType.label(),
        Column::AdvertisingExpenditure.label(),
        vec![Series::new(Column::AdvertisingExpenditure.label(), vehicle_points(groups)?)],
    ))
}
