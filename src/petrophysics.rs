//! Derived petrophysical parameters
//!
//! Fixed, column-wise formulas over the projected table:
//! - SWIRR (irreducible water saturation proxy)
//! - PHIE (effective porosity), which reads SWIRR and so runs after it
//!
//! Missing inputs propagate: a row with any missing input yields a missing
//! derived value, never a value computed from a stand-in.

use tracing::debug;

use crate::error::PetroError;
use crate::types::{Column, Table};

/// Water saturation column
pub const SW: &str = "SW";
/// Bulk volume water column
pub const BVW: &str = "BVW";
/// Total porosity column
pub const PHIF: &str = "PHIF";
/// Derived irreducible water saturation column
pub const SWIRR: &str = "SWIRR";
/// Derived effective porosity column
pub const PHIE: &str = "PHIE";

/// A named column computed row-wise from other columns.
#[derive(Debug, Clone, Copy)]
pub struct DerivedField {
    pub name: &'static str,
    pub inputs: &'static [&'static str],
    pub unit: &'static str,
    /// Receives the row's inputs in `inputs` order, all finite.
    pub formula: fn(&[f64]) -> f64,
}

impl DerivedField {
    /// Evaluate for one row, propagating missing inputs.
    pub fn evaluate(&self, inputs: &[f64]) -> f64 {
        if inputs.iter().any(|v| !v.is_finite()) {
            return f64::NAN;
        }
        (self.formula)(inputs)
    }
}

/// Irreducible water saturation proxy
///
/// Formula: SWIRR = SW × BVW
pub fn swirr(sw: f64, bvw: f64) -> f64 {
    sw * bvw
}

/// Effective porosity
///
/// Formula: PHIE = PHIF × (1 − SWIRR)
pub fn phie(phif: f64, swirr: f64) -> f64 {
    phif * (1.0 - swirr)
}

/// Derived fields in dependency order.
pub const DERIVED_FIELDS: [DerivedField; 2] = [
    DerivedField {
        name: SWIRR,
        inputs: &[SW, BVW],
        unit: "v/v",
        formula: |v| swirr(v[0], v[1]),
    },
    DerivedField {
        name: PHIE,
        inputs: &[PHIF, SWIRR],
        unit: "v/v",
        formula: |v| phie(v[0], v[1]),
    },
];

/// Input columns that must come from the table itself (not from an earlier
/// derived field), in first-use order.
pub fn required_inputs() -> Vec<&'static str> {
    let mut required: Vec<&'static str> = Vec::new();
    for (i, field) in DERIVED_FIELDS.iter().enumerate() {
        for input in field.inputs {
            let produced_earlier = DERIVED_FIELDS[..i].iter().any(|f| f.name == *input);
            if !produced_earlier && !required.contains(input) {
                required.push(input);
            }
        }
    }
    required
}

/// Append SWIRR and PHIE to the table.
///
/// Every input is checked before anything is computed; a missing column
/// fails the whole derivation with [`PetroError::MissingColumn`] naming all
/// absent inputs. Running this on a table that already has the derived
/// columns recomputes them in place from SW, BVW and PHIF.
pub fn derive_parameters(mut table: Table) -> Result<Table, PetroError> {
    let missing: Vec<String> = required_inputs()
        .into_iter()
        .filter(|name| !table.contains(name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(PetroError::MissingColumn { columns: missing });
    }

    for field in &DERIVED_FIELDS {
        let values = compute(&table, field)?;
        let missing_rows = values.iter().filter(|v| v.is_nan()).count();
        debug!(
            field = field.name,
            rows = values.len(),
            missing = missing_rows,
            "Derived column computed"
        );
        table.upsert_column(Column::derived(field.name, field.unit, values))?;
    }
    Ok(table)
}

fn compute(table: &Table, field: &DerivedField) -> Result<Vec<f64>, PetroError> {
    let inputs: Vec<&[f64]> = field
        .inputs
        .iter()
        .map(|name| {
            table
                .column(name)
                .map(|c| c.values.as_slice())
                .ok_or_else(|| PetroError::MissingColumn {
                    columns: vec![(*name).to_string()],
                })
        })
        .collect::<Result<_, _>>()?;

    let mut row = vec![0.0; inputs.len()];
    Ok((0..table.row_count())
        .map(|i| {
            for (slot, column) in row.iter_mut().zip(&inputs) {
                *slot = column[i];
            }
            field.evaluate(&row)
        })
        .collect())
}
