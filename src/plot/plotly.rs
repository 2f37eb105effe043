//! Plotly JSON output for [`PlotFigure`]
//!
//! One scatter trace per panel, each bound to its own x-axis, all sharing a
//! single reversed y-axis. Missing samples become `null` so Plotly draws gaps.

use serde_json::{json, Map, Value};

use crate::types::{AxisRange, Panel, PlotFigure};

/// Horizontal gap between tracks, in paper coordinates.
const TRACK_GAP: f64 = 0.02;
/// Relative padding applied to a single-valued x-range.
const FLAT_RANGE_PAD: f64 = 0.05;
/// Figure height in pixels.
const FIGURE_HEIGHT: u32 = 800;

impl PlotFigure {
    /// Plotly figure (`{"data": [...], "layout": {...}}`) for this description.
    pub fn to_plotly(&self) -> Value {
        let n = self.panels.len();
        let mut layout = Map::new();
        layout.insert("title".into(), json!({ "text": self.title }));
        layout.insert("showlegend".into(), json!(false));
        layout.insert("height".into(), json!(FIGURE_HEIGHT));
        layout.insert(
            "yaxis".into(),
            json!({
                "title": { "text": self.depth_label },
                "autorange": "reversed",
            }),
        );

        let mut data = Vec::with_capacity(n);
        for (i, panel) in self.panels.iter().enumerate() {
            let (axis_ref, axis_key) = axis_names(i);
            layout.insert(axis_key, x_axis(panel, domain(i, n)));
            data.push(json!({
                "type": "scatter",
                "mode": "lines",
                "name": panel.title,
                "x": nullable(&panel.x_values),
                "y": nullable(&panel.y_values),
                "xaxis": axis_ref,
                "yaxis": "y",
            }));
        }

        json!({ "data": data, "layout": Value::Object(layout) })
    }
}

/// Trace axis reference and layout key: ("x", "xaxis"), ("x2", "xaxis2"), ...
fn axis_names(i: usize) -> (String, String) {
    if i == 0 {
        ("x".to_string(), "xaxis".to_string())
    } else {
        (format!("x{}", i + 1), format!("xaxis{}", i + 1))
    }
}

/// Paper-coordinate span of track `i` out of `n`. The gap shrinks with the
/// track count so the gaps never take more than half the width.
fn domain(i: usize, n: usize) -> [f64; 2] {
    let n_f = n.max(1) as f64;
    let gap = TRACK_GAP.min(0.5 / n_f);
    let width = (1.0 - gap * (n_f - 1.0)) / n_f;
    let start = (i as f64 * (width + gap)).clamp(0.0, 1.0);
    [start, (start + width).min(1.0)]
}

/// Axis bounds for Plotly. A flat column is widened around its value so the
/// axis never collapses to zero width.
fn padded_range(range: AxisRange) -> [f64; 2] {
    if range.max > range.min {
        return [range.min, range.max];
    }
    let pad = if range.min == 0.0 {
        0.5
    } else {
        range.min.abs() * FLAT_RANGE_PAD
    };
    [range.min - pad, range.max + pad]
}

fn x_axis(panel: &Panel, domain: [f64; 2]) -> Value {
    let label = if panel.unit.is_empty() {
        panel.title.clone()
    } else {
        format!("{} ({})", panel.title, panel.unit)
    };
    let mut axis = json!({
        "domain": domain,
        "anchor": "y",
        "side": "top",
        "title": { "text": label },
    });
    if let (Some(range), Some(obj)) = (panel.x_range, axis.as_object_mut()) {
        obj.insert("range".into(), json!(padded_range(range)));
    }
    axis
}

fn nullable(values: &[f64]) -> Vec<Value> {
    values
        .iter()
        .map(|v| if v.is_finite() { json!(v) } else { Value::Null })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::build_figure;
    use crate::types::{Column, PlotRequest, Table};

    fn figure() -> crate::types::PlotFigure {
        let table = Table::new("DEPT", "m", vec![10.0, 11.0])
            .with_column(Column::measured("GR", "gAPI", vec![50.0, f64::NAN]))
            .unwrap()
            .with_column(Column::measured("SW", "", vec![0.2, 0.3]))
            .unwrap();
        build_figure(&table, table.depth(), &PlotRequest::new(["GR", "SW"]))
            .unwrap()
            .figure
    }

    #[test]
    fn test_one_trace_per_panel_on_own_axis() {
        let json = figure().to_plotly();
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["xaxis"], "x");
        assert_eq!(data[1]["xaxis"], "x2");
        assert_eq!(data[1]["yaxis"], "y");
        assert_eq!(json["layout"]["xaxis2"]["title"]["text"], "SW");
        assert_eq!(json["layout"]["xaxis"]["title"]["text"], "GR (gAPI)");
    }

    #[test]
    fn test_depth_axis_reversed_and_labelled() {
        let json = figure().to_plotly();
        assert_eq!(json["layout"]["yaxis"]["autorange"], "reversed");
        assert_eq!(json["layout"]["yaxis"]["title"]["text"], "DEPT (m)");
    }

    #[test]
    fn test_missing_values_become_null() {
        let json = figure().to_plotly();
        assert!(json["data"][0]["x"][1].is_null());
        assert_eq!(json["data"][0]["x"][0], 50.0);
    }

    #[test]
    fn test_domains_do_not_overlap() {
        let [a0, a1] = super::domain(0, 3);
        let [b0, b1] = super::domain(1, 3);
        let [_, c1] = super::domain(2, 3);
        assert!(a0.abs() < 1e-12);
        assert!(a1 < b0 && b0 < b1);
        assert!((c1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_domains_stay_inside_paper_for_many_tracks() {
        for n in [1, 5, 51, 60, 100] {
            let mut previous_end = 0.0;
            for i in 0..n {
                let [start, end] = domain(i, n);
                assert!(0.0 <= start && start < end && end <= 1.0, "n={n} i={i}: [{start}, {end}]");
                assert!(start >= previous_end, "n={n} i={i} overlaps previous track");
                previous_end = end;
            }
        }
    }

    #[test]
    fn test_duplicate_tracks_get_valid_layout() {
        let table = Table::new("DEPT", "m", vec![10.0, 11.0])
            .with_column(Column::measured("A", "", vec![1.0, 2.0]))
            .unwrap();
        let request = PlotRequest::new(vec!["A"; 60]);
        let json = build_figure(&table, table.depth(), &request)
            .unwrap()
            .figure
            .to_plotly();
        for key in ["xaxis", "xaxis60"] {
            let domain = json["layout"][key]["domain"].as_array().unwrap();
            let (start, end) = (domain[0].as_f64().unwrap(), domain[1].as_f64().unwrap());
            assert!(0.0 <= start && start < end && end <= 1.0, "{key}: [{start}, {end}]");
        }
    }

    #[test]
    fn test_flat_column_range_is_padded() {
        let table = Table::new("DEPT", "m", vec![10.0, 11.0, 12.0])
            .with_column(Column::measured("SAND_FLAG", "", vec![1.0, 1.0, f64::NAN]))
            .unwrap()
            .with_column(Column::measured("ZERO", "", vec![0.0, 0.0, 0.0]))
            .unwrap();
        let json = build_figure(&table, table.depth(), &PlotRequest::new(["SAND_FLAG", "ZERO"]))
            .unwrap()
            .figure
            .to_plotly();
        let range = |key: &str| -> Vec<f64> {
            json["layout"][key]["range"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_f64().unwrap())
                .collect()
        };
        let flag = range("xaxis");
        assert!((flag[0] - 0.95).abs() < 1e-12 && (flag[1] - 1.05).abs() < 1e-12);
        assert_eq!(range("xaxis2"), vec![-0.5, 0.5]);
    }

    #[test]
    fn test_spread_range_unchanged() {
        assert_eq!(padded_range(AxisRange { min: 0.1, max: 0.4 }), [0.1, 0.4]);
    }
}
