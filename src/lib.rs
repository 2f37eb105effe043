//! Petrolog: LAS well-log viewer and petrophysics toolkit
//!
//! Turns an uploaded LAS file into an enriched depth table, a multi-track
//! log plot and a delimited export.
//!
//! ## Architecture
//!
//! - **LAS Parser** (`las`): bytes to header items and curves
//! - **Projection** (`projection`): curves to a depth-indexed table
//! - **Petrophysics** (`petrophysics`): derived SWIRR and PHIE columns
//! - **Plot Builder** (`plot`): multi-track figure sharing one depth axis
//! - **Export** (`export`): delimited text, index column first
//! - **Pipeline** (`pipeline`): the stages above, chained for one upload

pub mod config;
pub mod error;
pub mod export;
pub mod las;
pub mod petrophysics;
pub mod pipeline;
pub mod plot;
pub mod projection;
pub mod types;

// Re-export configuration
pub use config::{AppConfig, ConfigError};

// Re-export errors
pub use error::{FormatError, PetroError};

// Re-export commonly used types
pub use types::{
    AxisRange, Column, ColumnOrigin, Curve, FigureBuild, HeaderItem, Panel, ParsedLogFile,
    PlotFigure, PlotRequest, Row, Table, UnknownTrackPolicy,
};

// Re-export pipeline stages
pub use export::{read_csv, serialize, ExportOptions};
pub use las::{parse, NullPolicy, ParseOptions, TextEncoding};
pub use petrophysics::{derive_parameters, DerivedField};
pub use pipeline::{load_well, WellReport, WellSummary};
pub use plot::build_figure;
pub use projection::project;
