//! Chart widgets for the dashboard grid.
//!
//! Line and bar charts are drawn with Plotters into the Ratatui buffer via
//! `plotters-ratatui-backend`. Pie charts have no good terminal rendering in
//! Plotters, so they are drawn as a share table with proportional bars.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::report::{ChartKind, ChartSpec, XValue};

/// Series palette for multi-series charts (terminal-friendly, high contrast).
const PALETTE: [(u8, u8, u8); 5] = [
    (0, 200, 255),
    (255, 170, 0),
    (120, 220, 90),
    (255, 90, 90),
    (200, 140, 255),
];

/// Fraction of the slot width a bar occupies.
const BAR_FILL: f64 = 0.7;

/// A render-only chart widget over a `ChartSpec`.
pub struct SalesChart<'a> {
    pub spec: &'a ChartSpec,
}

impl<'a> Widget for SalesChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.spec.series.iter().all(|s| s.points.is_empty()) {
            buf.set_string(area.x, area.y, "No data for this selection.", Style::default().fg(Color::Yellow));
            return;
        }

        match self.spec.kind {
            ChartKind::Pie => render_pie(self.spec, area, buf),
            ChartKind::Line | ChartKind::Bar | ChartKind::StackedBar => render_cartesian(self.spec, area, buf),
        }
    }
}

/// Plot-ready geometry computed outside the draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Category names by index; `None` for numeric x axes.
    pub x_labels: Option<Vec<String>>,
    pub lines: Vec<(RGBColor, Vec<(f64, f64)>)>,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub color: RGBColor,
}

/// Map a spec onto plot coordinates. Categorical x values become indices.
pub fn prepare(spec: &ChartSpec) -> Option<PlotData> {
    let categorical = spec
        .series
        .iter()
        .flat_map(|s| s.points.iter())
        .any(|p| matches!(p.x, XValue::Category(_)));

    let mut categories: Vec<String> = Vec::new();
    let mut position = |x: &XValue| -> f64 {
        match x {
            XValue::Number(v) => *v,
            XValue::Category(c) => match categories.iter().position(|k| k == c) {
                Some(i) => i as f64,
                None => {
                    categories.push(c.clone());
                    (categories.len() - 1) as f64
                }
            },
        }
    };

    let mut lines: Vec<(RGBColor, Vec<(f64, f64)>)> = Vec::new();
    let mut bars: Vec<Bar> = Vec::new();

    match spec.kind {
        ChartKind::Line => {
            for (i, s) in spec.series.iter().enumerate() {
                let color = series_color(s.color.as_deref(), i);
                let pts: Vec<(f64, f64)> = s.points.iter().map(|p| (position(&p.x), p.y)).collect();
                lines.push((color, pts));
            }
        }
        ChartKind::Bar | ChartKind::StackedBar => {
            let xs: Vec<f64> = spec
                .series
                .iter()
                .flat_map(|s| s.points.iter())
                .map(|p| position(&p.x))
                .collect();
            let half = bar_slot_width(&xs) * BAR_FILL / 2.0;

            // Running stack height per x (plain bars never share an x within a series).
            let mut stacks: Vec<(f64, f64)> = Vec::new();
            for (i, s) in spec.series.iter().enumerate() {
                let color = series_color(s.color.as_deref(), i);
                for p in &s.points {
                    let x = position(&p.x);
                    let base = match stacks.iter_mut().find(|(sx, _)| *sx == x) {
                        Some((_, top)) => {
                            let base = *top;
                            *top += p.y;
                            base
                        }
                        None => {
                            stacks.push((x, p.y));
                            0.0
                        }
                    };
                    bars.push(Bar {
                        x0: x - half,
                        x1: x + half,
                        y0: base,
                        y1: base + p.y,
                        color,
                    });
                }
            }
        }
        ChartKind::Pie => return None,
    }

    let xs: Vec<f64> = lines
        .iter()
        .flat_map(|(_, pts)| pts.iter().map(|&(x, _)| x))
        .chain(bars.iter().flat_map(|b| [b.x0, b.x1]))
        .collect();
    let (mut x0, mut x1) = min_max(&xs)?;
    if categorical {
        x0 = -0.5;
        x1 = categories.len() as f64 - 0.5;
    } else if x1 - x0 < 1e-9 {
        x0 -= 0.5;
        x1 += 0.5;
    }

    let (y_min, y_max) = spec.y_range()?;
    let y_min = if bars.is_empty() { y_min } else { y_min.min(0.0) };
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-6);
    let y0 = if bars.is_empty() { y_min - pad } else { y_min };

    Some(PlotData {
        x_bounds: [x0, x1],
        y_bounds: [y0, y_max + pad],
        x_labels: categorical.then_some(categories),
        lines,
        bars,
    })
}

fn render_cartesian(spec: &ChartSpec, area: Rect, buf: &mut Buffer) {
    // When the available area is too small, Plotters may fail to build a chart.
    // In that case, we render a small hint rather than panicking.
    if area.width < 20 || area.height < 8 {
        buf.set_string(
            area.x,
            area.y,
            "Chart area too small (resize terminal).",
            Style::default().fg(Color::Yellow),
        );
        return;
    }

    let Some(data) = prepare(spec) else {
        return;
    };
    let [x0, x1] = data.x_bounds;
    let [y0, y1] = data.y_bounds;
    if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
        return;
    }

    let x_desc = spec.x_label.clone();
    let y_desc = spec.y_label.clone();
    let x_label_count = data.x_labels.as_ref().map(|l| l.len() + 1).unwrap_or(5);

    let widget = widget_fn(move |root| {
        let mut chart = ChartBuilder::on(&root)
            .margin(1)
            .set_label_area_size(LabelAreaPosition::Left, 7)
            .set_label_area_size(LabelAreaPosition::Bottom, 3)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        let labels = data.x_labels.as_deref();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(x_desc.as_str())
            .y_desc(y_desc.as_str())
            .x_labels(x_label_count)
            .y_labels(4)
            .x_label_formatter(&|v| fmt_axis_x(labels, *v))
            .y_label_formatter(&|v| fmt_axis_y(*v))
            .label_style(("sans-serif", 10).into_font().color(&WHITE))
            .axis_style(&WHITE)
            .bold_line_style(&WHITE)
            .draw()?;

        chart.draw_series(
            data.bars
                .iter()
                .map(|b| Rectangle::new([(b.x0, b.y0), (b.x1, b.y1)], b.color.filled())),
        )?;

        for (color, pts) in &data.lines {
            chart.draw_series(LineSeries::new(pts.iter().copied(), color))?;
        }

        Ok(())
    });

    widget.render(area, buf);
}

fn render_pie(spec: &ChartSpec, area: Rect, buf: &mut Buffer) {
    let slices: Vec<(String, f64)> = spec
        .series
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|p| (p.x.label(), p.y))
        .collect();
    let total: f64 = slices.iter().map(|(_, v)| v).sum();

    let name_width = slices.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    // name + value + pct + spacing
    let fixed = name_width + 12 + 8 + 3;
    let bar_width = (area.width as usize).saturating_sub(fixed).max(1);

    let mut lines = Vec::with_capacity(slices.len() + 1);
    for (i, (name, value)) in slices.iter().enumerate() {
        let share = if total > 0.0 { value / total } else { 0.0 };
        let filled = (share * bar_width as f64).round() as usize;
        let (r, g, b) = PALETTE[i % PALETTE.len()];
        lines.push(Line::from(vec![
            Span::raw(format!("{name:<name_width$} ")),
            Span::styled(format!("{value:>11.0} "), Style::default().fg(Color::Gray)),
            Span::raw(format!("{:>6.1}% ", share * 100.0)),
            Span::styled("█".repeat(filled), Style::default().fg(Color::Rgb(r, g, b))),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("{:<name_width$} {total:>11.0}", "total"),
        Style::default().fg(Color::DarkGray),
    )));

    Paragraph::new(lines).render(area, buf);
}

fn series_color(hex: Option<&str>, index: usize) -> RGBColor {
    hex.and_then(parse_hex_color).unwrap_or_else(|| {
        let (r, g, b) = PALETTE[index % PALETTE.len()];
        RGBColor(r, g, b)
    })
}

/// Parse `#RRGGBB`.
pub fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Width of one bar slot: the smallest gap between distinct x positions.
fn bar_slot_width(xs: &[f64]) -> f64 {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|gap| *gap > 1e-12)
        .fold(f64::INFINITY, f64::min)
        .min(1.0)
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

fn fmt_axis_x(labels: Option<&[String]>, v: f64) -> String {
    match labels {
        Some(labels) => {
            let idx = v.round();
            if (v - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        }
        None if v.fract().abs() < 1e-9 => format!("{v:.0}"),
        None => format!("{v:.1}"),
    }
}

fn fmt_axis_y(v: f64) -> String {
    if v.abs() >= 10_000.0 {
        format!("{:.0}k", v / 1_000.0)
    } else {
        format!("{v:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{DataPoint, Series};

    fn cat(label: &str, y: f64) -> DataPoint {
        DataPoint {
            x: XValue::Category(label.to_string()),
            y,
        }
    }

    fn num(x: f64, y: f64) -> DataPoint {
        DataPoint {
            x: XValue::Number(x),
            y,
        }
    }

    #[test]
    fn categorical_bars_use_indices() {
        let spec = ChartSpec::new(
            ChartKind::Bar,
            "t",
            "x",
            "y",
            vec![Series::new("s", vec![cat("A", 10.0), cat("B", 20.0)]).with_color("#C45A9A")],
        );
        let data = prepare(&spec).unwrap();
        assert_eq!(data.x_bounds, [-0.5, 1.5]);
        assert_eq!(data.x_labels, Some(vec!["A".to_string(), "B".to_string()]));
        assert_eq!(data.bars.len(), 2);
        assert_eq!(data.bars[1].y1, 20.0);
        assert_eq!(data.bars[0].color, RGBColor(0xC4, 0x5A, 0x9A));
        assert_eq!(data.y_bounds[0], 0.0);
    }

    #[test]
    fn stacked_bars_accumulate_per_x() {
        let spec = ChartSpec::new(
            ChartKind::StackedBar,
            "t",
            "x",
            "y",
            vec![
                Series::new("a", vec![num(5.0, 10.0), num(7.5, 4.0)]),
                Series::new("b", vec![num(5.0, 3.0)]),
            ],
        );
        let data = prepare(&spec).unwrap();
        let top = data
            .bars
            .iter()
            .filter(|b| ((b.x0 + b.x1) / 2.0 - 5.0).abs() < 1e-9)
            .map(|b| b.y1)
            .fold(0.0, f64::max);
        assert_eq!(top, 13.0);
        assert!(data.bars.iter().all(|b| b.x1 > b.x0));
    }

    #[test]
    fn pie_has_no_cartesian_geometry() {
        let spec = ChartSpec::new(ChartKind::Pie, "t", "x", "y", vec![Series::new("s", vec![cat("A", 1.0)])]);
        assert!(prepare(&spec).is_none());
    }

    #[test]
    fn axis_labels_for_categories() {
        let labels = vec!["Jan".to_string(), "Feb".to_string()];
        assert_eq!(fmt_axis_x(Some(labels.as_slice()), 1.0), "Feb");
        assert_eq!(fmt_axis_x(Some(labels.as_slice()), 0.5), "");
        assert_eq!(fmt_axis_x(None, 2005.0), "2005");
        assert_eq!(parse_hex_color("#zz0000"), None);
    }
}
