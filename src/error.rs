//! Error taxonomy for the well-log pipeline
//!
//! `FormatError` covers everything that can go wrong while turning raw bytes
//! into a `ParsedLogFile`. `PetroError` is what the public pipeline returns:
//! it wraps format failures and adds the table, derivation, plotting and
//! export failures.
//!
//! Every variant is recoverable at the presentation boundary. None of them
//! are transient, so retrying the same input gives the same error.

use thiserror::Error;

/// Structural or lexical problems in an uploaded LAS file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("could not decode file as text: {reason}")]
    Decode { reason: String },

    #[error("required section {section} not found")]
    MissingSection { section: &'static str },

    #[error("required header item {mnemonic} missing from {section} section")]
    MissingHeaderItem {
        section: &'static str,
        mnemonic: &'static str,
    },

    #[error("line {line}: malformed header line '{content}'")]
    InvalidHeaderLine { line: usize, content: String },

    #[error("header item {mnemonic} has invalid value '{value}'")]
    InvalidHeaderValue { mnemonic: String, value: String },

    #[error("line {line}: curve {curve} has non-numeric value '{token}'")]
    InvalidNumber {
        line: usize,
        curve: String,
        token: String,
    },

    #[error("line {line}: expected {expected} values, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("wrapped data has {found} values, not a multiple of {expected} curves")]
    WrappedRemainder { expected: usize, found: usize },

    #[error("row {row}: depth index value is missing")]
    MissingDepth { row: usize },

    #[error("row {row}: depth {current} breaks monotonic order after {previous}")]
    NonMonotonicDepth {
        row: usize,
        previous: f64,
        current: f64,
    },

    #[error("~A section contains no data rows")]
    NoData,
}

/// Errors surfaced by the parse -> project -> derive -> plot/export pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PetroError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("missing input column(s) for derived parameters: {}", .columns.join(", "))]
    MissingColumn { columns: Vec<String> },

    #[error("track '{track}' is not a column of the table")]
    UnknownTrack { track: String },

    #[error("nothing to plot: none of the requested tracks could be resolved")]
    EmptyRequest { unresolved: Vec<String> },

    #[error("column '{column}' has {actual} values but the table has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("delimited export failed: {0}")]
    Export(String),
}

impl From<csv::Error> for PetroError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}
