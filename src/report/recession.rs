//! Recession-period report.

use std::collections::BTreeMap;

use crate::data::Dataset;
use crate::domain::{Column, VehicleType};
use crate::report::aggregate::{group_mean, group_sum, FloatKey};
use crate::report::{
    vehicle_points, ChartKind, ChartSpec, DataPoint, Figures, ReportError, Series, XValue, ACCENT_COLOR,
};

/// Four charts built from the recession-flagged rows only.
pub fn recession_graphs(dataset: &Dataset) -> Result<Figures, ReportError> {
    Ok([
        sales_by_year(dataset),
        sales_by_vehicle(dataset)?,
        advertising_by_vehicle(dataset)?,
        sales_by_unemployment(dataset)?,
    ])
}

fn sales_by_year(dataset: &Dataset) -> ChartSpec {
    let points = group_mean(dataset.recession_records(), |r| r.year, |r| r.automobile_sales)
        .into_iter()
        .map(|(year, y)| DataPoint {
            x: XValue::Number(f64::from(year)),
            y,
        })
        .collect();

    ChartSpec::new(
        ChartKind::Line,
        "Average Automobile Sales by Year during Recession Periods",
        Column::Year.label(),
        Column::AutomobileSales.label(),
        vec![Series::new(Column::AutomobileSales.label(), points).with_color(ACCENT_COLOR)],
    )
}

fn sales_by_vehicle(dataset: &Dataset) -> Result<ChartSpec, ReportError> {
    let groups = group_mean(
        dataset.recession_records(),
        |r| r.vehicle_type.clone(),
        |r| r.automobile_sales,
    );

    Ok(ChartSpec::new(
        ChartKind::Bar,
        "Average Automobile Sales by Vehicle Type during Recession Periods",
        Column::VehicleType.label(),
        Column::AutomobileSales.label(),
        vec![Series::new(Column::AutomobileSales.label(), vehicle_points(groups)?).with_color(ACCENT_COLOR)],
    ))
}

fn advertising_by_vehicle(dataset: &Dataset) -> Result<ChartSpec, ReportError> {
    let groups = group_sum(
        dataset.recession_records(),
        |r| r.vehicle_type.clone(),
        |r| r.advertising_expenditure,
    );

    Ok(ChartSpec::new(
        ChartKind::Pie,
        "Total Advertising Expenditure by Vehicle Type during Recession Periods",
        Column::VehicleType.label(),
        Column::AdvertisingExpenditure.label(),
        vec![Series::new(Column::AdvertisingExpenditure.label(), vehicle_points(groups)?)],
    ))
}

/// Stacked by vehicle type: one series per type, x = unemployment rate.
fn sales_by_unemployment(dataset: &Dataset) -> Result<ChartSpec, ReportError> {
    let groups = group_sum(
        dataset.recession_records(),
        |r| (r.vehicle_type.clone(), FloatKey(r.unemployment_rate)),
        |r| r.automobile_sales,
    );

    let mut by_vehicle: BTreeMap<String, Vec<DataPoint>> = BTreeMap::new();
    for ((raw, rate), y) in groups {
        by_vehicle.entry(raw).or_default().push(DataPoint {
            x: XValue::Number(rate.0),
            y,
        });
    }

    let mut series = Vec::with_capacity(by_vehicle.len());
    for (raw, points) in by_vehicle {
        let name = VehicleType::from_raw(&raw)?.display_name().to_string();
        series.push(Series {
            legend_group: Some(name.clone()),
            hover_template: Some(format!(
                "{}={name}<br>{}=%{{x}}<br>{}=%{{y}}<extra></extra>",
                Column::VehicleType.label(),
                Column::UnemploymentRate.label(),
                Column::AutomobileSales.label(),
            )),
            name,
            color: None,
            points,
        });
    }

    Ok(ChartSpec::new(
        ChartKind::StackedBar,
        "Automobile Sales by Vehicle Type Per Unemployment Rate during Recession Periods",
        Column::UnemploymentRate.label(),
        Column::AutomobileSales.label(),
        series,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Month;
    use crate::report::fixtures::{self, record};

    #[test]
    fn sports_mean_counts_only_recession_rows() {
        let ds = Dataset::new(vec![
            record(2005, Month::Jan, "Sports", 100.0, 10.0, 5.0, true),
            record(2005, Month::Feb, "Sports", 200.0, 20.0, 6.0, false),
        ])
        .unwrap();

        let figures = recession_graphs(&ds).unwrap();
        let bar = &figures[1];
        assert_eq!(bar.kind, ChartKind::Bar);
        assert_eq!(bar.series[0].value_for("Sports Car"), Some(100.0));
        assert_eq!(bar.series[0].points.len(), 1);
    }

    #[test]
    fn mean_by_year_matches_independent_sum_over_count() {
        let ds = fixtures::dataset();
        let figures = recession_graphs(&ds).unwrap();
        let line = &figures[0];

        for point in &line.series[0].points {
            let year = point.x.as_f64().unwrap() as i32;
            let rows: Vec<_> = ds
                .records()
                .iter()
                .filter(|r| r.recession && r.year == year)
                .collect();
            let expected = rows.iter().map(|r| r.automobile_sales).sum::<f64>() / rows.len() as f64;
            assert!((point.y - expected).abs() < 1e-12);
        }

        let years: Vec<f64> = line.series[0].points.iter().filter_map(|p| p.x.as_f64()).collect();
        assert_eq!(years, vec![2005.0, 2008.0]);
    }

    #[test]
    fn non_recession_rows_never_contribute() {
        let ds = fixtures::dataset();
        let figures = recession_graphs(&ds).unwrap();

        // Executivecar and Smallfamiliycar only appear in non-recession rows.
        for chart in &figures[1..3] {
            assert_eq!(chart.series[0].value_for("Executive Car"), None);
            assert_eq!(chart.series[0].value_for("Small Family Car"), None);
        }
        assert!(figures[3].series.iter().all(|s| s.name != "Executive Car"));

        // Advertising pie totals equal the recession subset total.
        let pie_total: f64 = figures[2].series[0].points.iter().map(|p| p.y).sum();
        let expected: f64 = ds.recession_records().map(|r| r.advertising_expenditure).sum();
        assert!((pie_total - expected).abs() < 1e-12);
        assert_eq!(figures[2].series[0].value_for("Sports Car"), Some(17.0));
    }

    #[test]
    fn stacked_series_use_display_names() {
        let ds = fixtures::dataset();
        let chart = &recession_graphs(&ds).unwrap()[3];
        assert_eq!(chart.kind, ChartKind::StackedBar);

        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Medium Family Car", "Sports Car", "Super Mini Car"]);

        let sports = chart.series.iter().find(|s| s.name == "Sports Car").unwrap();
        assert_eq!(sports.legend_group.as_deref(), Some("Sports Car"));
        let hover = sports.hover_template.as_deref().unwrap();
        assert!(hover.contains("Vehicle Type=Sports Car"));
        assert!(!hover.contains("=Sports<"));
        let xs: Vec<f64> = sports.points.iter().filter_map(|p| p.x.as_f64()).collect();
        assert_eq!(xs, vec![5.0, 7.5]);
    }

    #[test]
    fn unknown_vehicle_type_surfaces_as_error() {
        let ds = Dataset::new(vec![record(2008, Month::Jan, "Hovercraft", 1.0, 1.0, 5.0, true)]).unwrap();
        let err = recession_graphs(&ds).unwrap_err();
        assert_eq!(
            err,
            ReportError::UnknownVehicleType {
                raw: "Hovercraft".to_string()
            }
        );
    }
}
