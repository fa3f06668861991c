//! Renderable chart descriptors.
//!
//! A `ChartSpec` is pure data: the TUI draws it, the CLI prints or exports it.

use serde::Serialize;

/// Accent color for single-series line and bar charts.
pub const ACCENT_COLOR: &str = "#C45A9A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    StackedBar,
}

/// X coordinate: numeric (years, rates) or categorical (months, vehicle names).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Category(String),
}

impl XValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            XValue::Number(v) => Some(*v),
            XValue::Category(_) => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            XValue::Number(v) if v.fract() == 0.0 => format!("{v:.0}"),
            XValue::Number(v) => format!("{v}"),
            XValue::Category(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub x: XValue,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub points: Vec<DataPoint>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            legend_group: None,
            hover_template: None,
            color: None,
            points,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Value for a categorical x label, if present.
    pub fn value_for(&self, label: &str) -> Option<f64> {
        self.points
            .iter()
            .find(|p| matches!(&p.x, XValue::Category(c) if c == label))
            .map(|p| p.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn new(
        kind: ChartKind,
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        series: Vec<Series>,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            x_label: x_label.into(),
            y_label: y_label.into(),
            series,
        }
    }

    /// Min/max over every y value (stacked charts use per-x totals).
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let values: Vec<f64> = if self.kind == ChartKind::StackedBar {
            self.stacked_totals().into_iter().map(|(_, total)| total).collect()
        } else {
            self.series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.y))
                .collect()
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min.is_finite() && max.is_finite()).then_some((min, max))
    }

    /// Sum of y per numeric x across all series, ascending by x.
    pub fn stacked_totals(&self) -> Vec<(f64, f64)> {
        let mut totals: Vec<(f64, f64)> = Vec::new();
        for p in self.series.iter().flat_map(|s| s.points.iter()) {
            let Some(x) = p.x.as_f64() else { continue };
            match totals.iter_mut().find(|(tx, _)| *tx == x) {
                Some((_, total)) => *total += p.y,
                None => totals.push((x, p.y)),
            }
        }
        totals.sort_by(|a, b| a.0.total_cmp(&b.0));
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(x: f64, y: f64) -> DataPoint {
        DataPoint {
            x: XValue::Number(x),
            y,
        }
    }

    #[test]
    fn stacked_totals_sum_across_series() {
        let chart = ChartSpec::new(
            ChartKind::StackedBar,
            "t",
            "x",
            "y",
            vec![
                Series::new("a", vec![num(5.0, 10.0), num(6.0, 1.0)]),
                Series::new("b", vec![num(5.0, 2.0)]),
            ],
        );
        assert_eq!(chart.stacked_totals(), vec![(5.0, 12.0), (6.0, 1.0)]);
        assert_eq!(chart.y_range(), Some((1.0, 12.0)));
    }

    #[test]
    fn serializes_untagged_x_values() {
        let series = Series::new(
            "s",
            vec![
                num(2005.0, 1.0),
                DataPoint {
                    x: XValue::Category("Jan".into()),
                    y: 2.0,
                },
            ],
        );
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["points"][0]["x"], serde_json::json!(2005.0));
        assert_eq!(json["points"][1]["x"], serde_json::json!("Jan"));
        assert!(json.get("color").is_none());
    }
}
