//! Application Configuration
//!
//! Display labels, default plot tracks, export settings and parser knobs,
//! loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. An explicit path (the `--config` flag)
//! 2. `petrolog.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The loaded value is owned by the caller and passed to whatever needs it:
//!
//! ```ignore
//! let config = AppConfig::load(cli.config.as_deref())?;
//! let report = load_well(&bytes, &config.parse_options())?;
//! let build = report.figure(&config.plot_request())?;
//! ```

mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::*;
