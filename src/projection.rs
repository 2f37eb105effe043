//! Tabular projection of a parsed LAS file
//!
//! One column per data curve, rows in the order of the depth index.

use crate::types::{Column, ParsedLogFile, Table};

/// Convert a parsed log into a depth-indexed table.
///
/// Total: `ParsedLogFile` can only be built with aligned curves, so every
/// column matches the row count by construction.
pub fn project(parsed: &ParsedLogFile) -> Table {
    let index = parsed.index();
    let columns = parsed
        .curves()
        .iter()
        .map(|curve| Column::measured(curve.mnemonic.clone(), curve.unit.clone(), curve.values.clone()))
        .collect();
    Table::from_parts(
        index.mnemonic.clone(),
        index.unit.clone(),
        index.values.clone(),
        columns,
    )
}
