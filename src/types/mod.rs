//! Shared data structures for the well-log pipeline
//!
//! - `ParsedLogFile`: immutable result of parsing a LAS file
//! - `Table`: depth-indexed columns, grown by the derived-parameter calculator
//! - `PlotRequest` / `PlotFigure`: multi-track depth plot description

mod figure;
mod log_file;
mod table;

pub use figure::*;
pub use log_file::*;
pub use table::*;
