//! Depth-indexed table of curve columns

use serde::{Deserialize, Serialize};

use crate::error::PetroError;

/// Where a column came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnOrigin {
    /// Read from the source file
    Measured,
    /// Computed by the derived-parameter calculator
    Derived,
}

/// A named numeric column aligned with the table's depth index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub unit: String,
    pub origin: ColumnOrigin,
    /// NaN marks a missing sample.
    pub values: Vec<f64>,
}

impl Column {
    pub fn measured(name: impl Into<String>, unit: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            origin: ColumnOrigin::Measured,
            values,
        }
    }

    pub fn derived(name: impl Into<String>, unit: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            origin: ColumnOrigin::Derived,
            values,
        }
    }

    /// Finite (min, max) of the column, `None` when every sample is missing.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        finite_range(&self.values)
    }
}

/// One row of a table, borrowed.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    position: usize,
}

impl Row<'_> {
    pub fn depth(&self) -> f64 {
        self.table.depth[self.position]
    }

    /// Value of a named column at this row. `None` if the column does not exist.
    pub fn get(&self, column: &str) -> Option<f64> {
        self.table
            .column(column)
            .map(|c| c.values[self.position])
    }
}

/// Table keyed by depth, one column per curve plus derived columns.
///
/// Rows keep the order of the source depth index. Columns are only ever
/// added or replaced in place, never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    index_name: String,
    index_unit: String,
    depth: Vec<f64>,
    columns: Vec<Column>,
}

/// Wire shape of [`Table`]; rebuilt through [`Table::with_column`] so a
/// deserialized table holds the same row-count invariant as a built one.
#[derive(Deserialize)]
struct RawTable {
    index_name: String,
    index_unit: String,
    depth: Vec<f64>,
    columns: Vec<Column>,
}

impl TryFrom<RawTable> for Table {
    type Error = PetroError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        raw.columns
            .into_iter()
            .try_fold(Table::new(raw.index_name, raw.index_unit, raw.depth), Table::with_column)
    }
}

impl Table {
    pub fn new(index_name: impl Into<String>, index_unit: impl Into<String>, depth: Vec<f64>) -> Self {
        Self {
            index_name: index_name.into(),
            index_unit: index_unit.into(),
            depth,
            columns: Vec::new(),
        }
    }

    /// Assemble a table from columns already known to be aligned with `depth`.
    pub(crate) fn from_parts(
        index_name: String,
        index_unit: String,
        depth: Vec<f64>,
        columns: Vec<Column>,
    ) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == depth.len()));
        Self {
            index_name,
            index_unit,
            depth,
            columns,
        }
    }

    /// Builder-style column append. Fails if the column length differs from the row count.
    pub fn with_column(mut self, column: Column) -> Result<Self, PetroError> {
        self.upsert_column(column)?;
        Ok(self)
    }

    /// Append a column, or replace the values of an existing column with the
    /// same name while keeping its position.
    pub fn upsert_column(&mut self, column: Column) -> Result<(), PetroError> {
        if column.values.len() != self.depth.len() {
            return Err(PetroError::ColumnLength {
                column: column.name,
                expected: self.depth.len(),
                actual: column.values.len(),
            });
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn index_unit(&self) -> &str {
        &self.index_unit
    }

    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    pub fn row_count(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row(&self, position: usize) -> Option<Row<'_>> {
        (position < self.depth.len()).then_some(Row {
            table: self,
            position,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.depth.len()).map(move |position| Row {
            table: self,
            position,
        })
    }

    /// Copy of the first `n` rows, for preview display.
    pub fn head(&self, n: usize) -> Self {
        let n = n.min(self.depth.len());
        Self {
            index_name: self.index_name.clone(),
            index_unit: self.index_unit.clone(),
            depth: self.depth[..n].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    unit: c.unit.clone(),
                    origin: c.origin,
                    values: c.values[..n].to_vec(),
                })
                .collect(),
        }
    }

    /// Shallowest and deepest depth, regardless of file ordering.
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        finite_range(&self.depth)
    }
}

/// Finite (min, max) of a slice, skipping missing samples.
pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
