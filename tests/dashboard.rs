use std::sync::Arc;

use autosales_dash::{
    binding::{Dashboard, InputId, InputValue, Output},
    data::{load_dataset, Dataset},
    domain::{DataSource, ReportKind},
    report::{display_graphs, ChartKind, CHART_COUNT},
};

fn load_fixture() -> Dataset {
    load_dataset(&DataSource::File("tests/data/sample_sales.csv".into())).expect("Failed to load test data")
}

fn figures(outputs: &[Output]) -> Option<&Output> {
    outputs.iter().find(|o| matches!(o, Output::Figures(_)))
}

#[test]
fn test_fixture_loads_with_extra_columns() {
    let ds = load_fixture();
    assert_eq!(ds.len(), 8);
    assert_eq!(ds.recession_len(), 4);
    assert_eq!(ds.years(), &[2005, 2008, 2010]);
}

#[test]
fn test_every_report_has_four_charts_in_fixed_kinds() {
    let ds = load_fixture();

    let yearly = display_graphs(&ds, ReportKind::Yearly, 2005).expect("yearly report");
    let kinds: Vec<ChartKind> = yearly.iter().map(|c| c.kind).collect();
    assert_eq!(yearly.len(), CHART_COUNT);
    assert_eq!(kinds, vec![ChartKind::Line, ChartKind::Line, ChartKind::Bar, ChartKind::Pie]);

    let recession = display_graphs(&ds, ReportKind::Recession, 2005).expect("recession report");
    let kinds: Vec<ChartKind> = recession.iter().map(|c| c.kind).collect();
    assert_eq!(recession.len(), CHART_COUNT);
    assert_eq!(kinds, vec![ChartKind::Line, ChartKind::Bar, ChartKind::Pie, ChartKind::StackedBar]);
}

#[test]
fn test_sports_car_recession_mean_counts_only_recession_rows() {
    let ds = load_fixture();
    let charts = display_graphs(&ds, ReportKind::Recession, 2005).expect("recession report");

    // Sports: 100 (2005, recession) and 50 (2008, recession); 200 is not a recession row.
    assert_eq!(charts[1].series[0].value_for("Sports Car"), Some(75.0));
}

#[test]
fn test_dashboard_toggles_year_control() {
    let mut dash = Dashboard::new(Arc::new(load_fixture()), ReportKind::Yearly, None);

    let initial = dash.initial().expect("initial outputs");
    assert!(initial.contains(&Output::YearDisabled(false)));
    assert!(figures(&initial).is_some());

    let outputs = dash
        .dispatch(InputId::Report, InputValue::Report(ReportKind::Recession))
        .expect("switch to recession");
    assert!(outputs.contains(&Output::YearDisabled(true)));

    let outputs = dash
        .dispatch(InputId::Report, InputValue::Report(ReportKind::Yearly))
        .expect("switch to yearly");
    assert!(outputs.contains(&Output::YearDisabled(false)));

    let outputs = dash.dispatch(InputId::Year, InputValue::Year(2010)).expect("select 2010");
    match figures(&outputs) {
        Some(Output::Figures(charts)) => {
            assert_eq!(charts[2].series[0].value_for("Medium Family Car"), Some(400.0 / 12.0));
        }
        other => panic!("expected figures, got {other:?}"),
    }
}
