//! Parsed LAS file types

use serde::{Deserialize, Serialize};

/// One `MNEM.UNIT  VALUE : DESCRIPTION` line from a LAS header section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

/// Curve definition from the `~C` section plus its aligned samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curve {
    pub mnemonic: String,
    pub unit: String,
    pub description: String,
    /// One entry per depth step. NaN marks a missing sample.
    pub values: Vec<f64>,
}

/// Immutable, validated view of a LAS file.
///
/// Built only by [`crate::las::parse`], which guarantees:
/// - `depth` is strictly monotonic (increasing or decreasing) and finite
/// - every curve has exactly `depth.len()` samples
/// - curve order follows `~C` declaration order
#[derive(Debug, Clone, Serialize)]
pub struct ParsedLogFile {
    pub(crate) version: String,
    pub(crate) wrapped: bool,
    pub(crate) well_name: String,
    pub(crate) null_value: Option<f64>,
    pub(crate) version_items: Vec<HeaderItem>,
    pub(crate) well_items: Vec<HeaderItem>,
    pub(crate) parameters: Vec<HeaderItem>,
    pub(crate) other: String,
    pub(crate) index: Curve,
    pub(crate) curves: Vec<Curve>,
}

impl ParsedLogFile {
    /// `VERS` value from `~V`, e.g. `"2.0"`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether the `~A` section was written in wrapped mode.
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// `WELL` value from `~W`.
    pub fn well_name(&self) -> &str {
        &self.well_name
    }

    /// `NULL` value declared in `~W`, if any.
    pub fn null_value(&self) -> Option<f64> {
        self.null_value
    }

    pub fn version_items(&self) -> &[HeaderItem] {
        &self.version_items
    }

    pub fn well_items(&self) -> &[HeaderItem] {
        &self.well_items
    }

    /// Look up a `~W` item by mnemonic (case-insensitive).
    pub fn well_item(&self, mnemonic: &str) -> Option<&HeaderItem> {
        self.well_items
            .iter()
            .find(|item| item.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    pub fn parameters(&self) -> &[HeaderItem] {
        &self.parameters
    }

    /// Free text of the `~O` section.
    pub fn other(&self) -> &str {
        &self.other
    }

    /// The primary index curve (first curve in `~C`).
    pub fn index(&self) -> &Curve {
        &self.index
    }

    pub fn depth_index(&self) -> &[f64] {
        &self.index.values
    }

    /// Data curves in declaration order, excluding the index.
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn curve_names(&self) -> Vec<&str> {
        self.curves.iter().map(|c| c.mnemonic.as_str()).collect()
    }

    pub fn curve(&self, mnemonic: &str) -> Option<&Curve> {
        self.curves.iter().find(|c| c.mnemonic == mnemonic)
    }

    pub fn row_count(&self) -> usize {
        self.index.values.len()
    }
}
