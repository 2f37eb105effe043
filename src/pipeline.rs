//! Upload-to-report pipeline
//!
//! ```text
//! bytes ──► las::parse ──► projection::project ──► petrophysics::derive_parameters
//!                                                        │
//!                                   WellReport { summary, table }
//!                                      │                    │
//!                               figure(request)       export(options)
//! ```
//!
//! Each stage either succeeds completely or returns its error; no partial
//! table ever reaches the plot builder or the serializer.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::error::PetroError;
use crate::export::{self, ExportOptions};
use crate::las::{self, ParseOptions};
use crate::petrophysics::derive_parameters;
use crate::plot::build_figure;
use crate::projection::project;
use crate::types::{FigureBuild, ParsedLogFile, PlotRequest, Table};

/// Header facts shown next to the upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellSummary {
    pub version: String,
    pub well_name: String,
    pub index_name: String,
    /// Measured curves in file order, index excluded
    pub curves: Vec<String>,
    pub rows: usize,
    /// (shallowest, deepest)
    pub depth_range: Option<(f64, f64)>,
    /// Declared `NULL` value, if the file has one
    pub null_value: Option<f64>,
}

impl WellSummary {
    fn from_parsed(parsed: &ParsedLogFile, table: &Table) -> Self {
        Self {
            version: parsed.version().to_string(),
            well_name: parsed.well_name().to_string(),
            index_name: parsed.index().mnemonic.clone(),
            curves: parsed.curve_names().iter().map(|c| (*c).to_string()).collect(),
            rows: table.row_count(),
            depth_range: table.depth_range(),
            null_value: parsed.null_value(),
        }
    }
}

impl fmt::Display for WellSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Well: {} ===", self.well_name)?;
        writeln!(f, "  LAS version: {}", self.version)?;
        writeln!(f, "  Index:       {}", self.index_name)?;
        writeln!(f, "  Rows:        {}", self.rows)?;
        if let Some((top, bottom)) = self.depth_range {
            writeln!(f, "  Depth:       {top} - {bottom}")?;
        }
        if let Some(null) = self.null_value {
            writeln!(f, "  NULL:        {null}")?;
        }
        write!(f, "  Curves:      {}", self.curves.join(", "))
    }
}

/// Result of a successful upload: summary plus the enriched table.
#[derive(Debug, Clone)]
pub struct WellReport {
    pub summary: WellSummary,
    pub table: Table,
}

/// Parse, project and enrich one uploaded file.
pub fn load_well(bytes: &[u8], options: &ParseOptions) -> Result<WellReport, PetroError> {
    let parsed = las::parse(bytes, options)?;
    let table = derive_parameters(project(&parsed))?;
    let summary = WellSummary::from_parsed(&parsed, &table);

    info!(
        well = %summary.well_name,
        rows = summary.rows,
        columns = table.columns().len(),
        "Well loaded"
    );

    Ok(WellReport { summary, table })
}

impl WellReport {
    /// Multi-track figure against the table's own depth index.
    pub fn figure(&self, request: &PlotRequest) -> Result<FigureBuild, PetroError> {
        build_figure(&self.table, self.table.depth(), request)
    }

    /// Delimited export of the enriched table.
    pub fn export(&self, options: &ExportOptions) -> Result<Vec<u8>, PetroError> {
        export::serialize(&self.table, options)
    }

    /// First `n` rows as a fixed-width text grid.
    pub fn preview(&self, n: usize) -> String {
        format_table(&self.table.head(n))
    }
}

/// Render a table as right-aligned text columns, missing samples as `NaN`.
pub fn format_table(table: &Table) -> String {
    let headers: Vec<&str> = std::iter::once(table.index_name())
        .chain(table.column_names())
        .collect();
    let rows: Vec<Vec<String>> = table
        .rows()
        .map(|row| {
            std::iter::once(row.depth())
                .chain(table.columns().iter().map(|c| row.get(&c.name).unwrap_or(f64::NAN)))
                .map(format_cell)
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_line(headers.iter(), &widths));
    for row in &rows {
        lines.push(render_line(row.iter(), &widths));
    }
    lines.join("\n")
}

fn render_line<S: AsRef<str>>(cells: impl Iterator<Item = S>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, w)| format!("{:>w$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ")
}

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.4}")
    }
}
