//! Multi-track plot request and figure description types

use serde::{Deserialize, Serialize};

use crate::config::defaults::DEFAULT_TRACKS;

/// What to do with a requested track that is not a column of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTrackPolicy {
    /// Drop the unknown track, render the rest, report what was dropped
    #[default]
    Skip,
    /// Fail the whole request on the first unknown track
    Reject,
}

/// Ordered list of curves to plot against depth.
///
/// Duplicates are allowed and produce duplicate panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRequest {
    pub tracks: Vec<String>,
    /// Figure title. `None` lets the builder title it after the depth index.
    pub title: Option<String>,
    /// Depth-axis label for the first panel. `None` uses `INDEX (unit)`.
    pub depth_label: Option<String>,
    pub policy: UnknownTrackPolicy,
}

impl PlotRequest {
    pub fn new<I, S>(tracks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tracks: tracks.into_iter().map(Into::into).collect(),
            title: None,
            depth_label: None,
            policy: UnknownTrackPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_depth_label(mut self, label: impl Into<String>) -> Self {
        self.depth_label = Some(label.into());
        self
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: UnknownTrackPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for PlotRequest {
    fn default() -> Self {
        Self::new(DEFAULT_TRACKS.iter().copied())
    }
}

/// Closed numeric interval for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub(crate) fn from_bounds(bounds: Option<(f64, f64)>) -> Option<Self> {
        bounds.map(|(min, max)| Self { min, max })
    }
}

/// One depth track: a curve plotted against depth.
#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    /// Curve name
    pub title: String,
    pub unit: String,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    /// Always true: depth increases downward
    pub y_axis_inverted: bool,
    /// Only the first panel carries the shared depth label
    pub y_axis_label: Option<String>,
    /// Finite extent of this track, independent of every other track
    pub x_range: Option<AxisRange>,
    pub y_range: Option<AxisRange>,
}

/// Renderable multi-panel figure sharing one inverted depth axis.
#[derive(Debug, Clone, Serialize)]
pub struct PlotFigure {
    pub title: String,
    pub depth_label: String,
    pub panels: Vec<Panel>,
}

impl PlotFigure {
    pub fn panel_titles(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.title.as_str()).collect()
    }
}

/// Figure plus the requested tracks that could not be resolved.
#[derive(Debug, Clone, Serialize)]
pub struct FigureBuild {
    pub figure: PlotFigure,
    pub unresolved: Vec<String>,
}

impl FigureBuild {
    pub fn is_partial(&self) -> bool {
        !self.unresolved.is_empty()
    }
}
