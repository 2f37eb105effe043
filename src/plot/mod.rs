//! Multi-track depth plot builder
//!
//! Turns a table plus an ordered list of curve names into a figure with one
//! panel per track. All panels share a single depth axis that increases
//! downward; each panel keeps its own x scale.
//!
//! Unknown track names follow the request's [`UnknownTrackPolicy`]:
//! - `Skip`: drop the name, keep rendering, list it in `FigureBuild::unresolved`
//! - `Reject`: fail with `PetroError::UnknownTrack`
//!
//! A request that resolves to zero panels is `PetroError::EmptyRequest`
//! under either policy.

mod plotly;

use tracing::{debug, warn};

use crate::error::PetroError;
use crate::types::{
    finite_range, AxisRange, FigureBuild, Panel, PlotFigure, PlotRequest, Table, UnknownTrackPolicy,
};

/// Build a figure of `request.tracks` plotted against `depth`.
///
/// `depth` is normally `table.depth()`, but any column aligned with the
/// table (e.g. TVD) can serve as the vertical axis.
pub fn build_figure(
    table: &Table,
    depth: &[f64],
    request: &PlotRequest,
) -> Result<FigureBuild, PetroError> {
    if depth.len() != table.row_count() {
        return Err(PetroError::ColumnLength {
            column: "depth axis".to_string(),
            expected: table.row_count(),
            actual: depth.len(),
        });
    }

    let depth_label = request
        .depth_label
        .clone()
        .unwrap_or_else(|| default_depth_label(table));
    let y_range = AxisRange::from_bounds(finite_range(depth));

    let mut panels: Vec<Panel> = Vec::with_capacity(request.tracks.len());
    let mut unresolved: Vec<String> = Vec::new();

    for track in &request.tracks {
        let name = track.trim();
        let Some(column) = table.column(name) else {
            match request.policy {
                UnknownTrackPolicy::Reject => {
                    return Err(PetroError::UnknownTrack {
                        track: name.to_string(),
                    });
                }
                UnknownTrackPolicy::Skip => {
                    warn!(track = name, "Requested track not in table, skipping");
                    unresolved.push(name.to_string());
                    continue;
                }
            }
        };

        panels.push(Panel {
            title: column.name.clone(),
            unit: column.unit.clone(),
            x_values: column.values.clone(),
            y_values: depth.to_vec(),
            y_axis_inverted: true,
            y_axis_label: panels.is_empty().then(|| depth_label.clone()),
            x_range: AxisRange::from_bounds(column.finite_range()),
            y_range,
        });
    }

    if panels.is_empty() {
        return Err(PetroError::EmptyRequest { unresolved });
    }

    debug!(
        panels = panels.len(),
        skipped = unresolved.len(),
        "Figure built"
    );

    let title = request
        .title
        .clone()
        .unwrap_or_else(|| format!("Well log tracks vs {}", table.index_name()));

    Ok(FigureBuild {
        figure: PlotFigure {
            title,
            depth_label,
            panels,
        },
        unresolved,
    })
}

fn default_depth_label(table: &Table) -> String {
    if table.index_unit().is_empty() {
        table.index_name().to_string()
    } else {
        format!("{} ({})", table.index_name(), table.index_unit())
    }
}

/// Convert each unresolved track of a partial build into its error, for
/// callers that surface per-track messages.
pub fn unresolved_errors(build: &FigureBuild) -> Vec<PetroError> {
    build
        .unresolved
        .iter()
        .map(|track| PetroError::UnknownTrack {
            track: track.clone(),
        })
        .collect()
}
