//! Delimited-text export of the enriched table
//!
//! Header row: index name, then every column in table order. One record per
//! depth step. Numbers use Rust's shortest round-trip formatting so a
//! re-read reproduces the exact values; missing samples are written as
//! `ExportOptions::missing` (empty by default).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PetroError;
use crate::types::{Column, Table};

/// MIME type handed to the download collaborator.
pub const EXPORT_MIME: &str = "text/csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub delimiter: char,
    /// Text written for a missing sample
    pub missing: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            missing: String::new(),
        }
    }
}

impl ExportOptions {
    fn delimiter_byte(&self) -> Result<u8, PetroError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                PetroError::Export(format!(
                    "delimiter '{}' is not a single ASCII character",
                    self.delimiter
                ))
            })
    }
}

/// Serialize the table to delimited text.
pub fn serialize(table: &Table, options: &ExportOptions) -> Result<Vec<u8>, PetroError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .from_writer(Vec::new());

    let mut header: Vec<&str> = Vec::with_capacity(table.columns().len() + 1);
    header.push(table.index_name());
    header.extend(table.column_names());
    writer.write_record(&header)?;

    let format = |v: f64| {
        if v.is_nan() {
            options.missing.clone()
        } else {
            v.to_string()
        }
    };

    for (i, depth) in table.depth().iter().enumerate() {
        let record = std::iter::once(format(*depth))
            .chain(table.columns().iter().map(|c| format(c.values[i])));
        writer.write_record(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PetroError::Export(e.to_string()))?;
    debug!(
        rows = table.row_count(),
        columns = header.len(),
        bytes = bytes.len(),
        "Table serialized"
    );
    Ok(bytes)
}

/// Read delimited text written by [`serialize`] back into a table.
///
/// The first column becomes the depth index. A field equal to
/// `options.missing` (or empty) reads as a missing sample. Units are not
/// part of the export and come back empty.
pub fn read_csv(bytes: &[u8], options: &ExportOptions) -> Result<Table, PetroError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let Some((index_name, column_names)) = headers.split_first() else {
        return Err(PetroError::Export("export has no header row".to_string()));
    };

    let mut depth = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); column_names.len()];
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let mut fields = record.iter();
        depth.push(parse_field(fields.next().unwrap_or(""), row, index_name, options)?);
        for (name, values) in column_names.iter().zip(columns.iter_mut()) {
            values.push(parse_field(fields.next().unwrap_or(""), row, name, options)?);
        }
    }

    column_names
        .iter()
        .zip(columns)
        .try_fold(Table::new(index_name.clone(), "", depth), |table, (name, values)| {
            table.with_column(Column::measured(name.clone(), "", values))
        })
}

fn parse_field(
    field: &str,
    row: usize,
    column: &str,
    options: &ExportOptions,
) -> Result<f64, PetroError> {
    let field = field.trim();
    if field.is_empty() || field == options.missing {
        return Ok(f64::NAN);
    }
    field.parse().map_err(|_| {
        PetroError::Export(format!(
            "row {row}, column {column}: '{field}' is not a number"
        ))
    })
}
