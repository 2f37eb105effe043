//! Application configuration as operator-editable TOML
//!
//! Every section is optional; missing sections and fields take the values in
//! [`super::defaults`], so an empty file behaves exactly like no file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use super::validation;
use crate::export::ExportOptions;
use crate::las::ParseOptions;
use crate::types::{PlotRequest, UnknownTrackPolicy};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for the well-log viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Titles, labels and preview size
    #[serde(default)]
    pub display: DisplayConfig,

    /// Default multi-track plot
    #[serde(default)]
    pub plot: PlotConfig,

    /// Delimited export
    #[serde(default)]
    pub export: ExportConfig,

    /// LAS parser knobs
    #[serde(default)]
    pub parser: ParseOptions,
}

impl AppConfig {
    /// Load configuration using the standard search order, relative to the
    /// current working directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_in(explicit, Path::new("."))
    }

    /// Load configuration using the standard search order:
    /// 1. `explicit`, if given (errors are returned, not swallowed)
    /// 2. `petrolog.toml` inside `dir`
    /// 3. Built-in defaults
    pub fn load_in(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), "Loaded config");
            return Ok(config);
        }

        let local = dir.join(defaults::CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(path = %local.display(), "Loaded config");
                    return Ok(config);
                }
                Err(e) => {
                    warn!(path = %local.display(), error = %e, "Failed to load config, using defaults");
                }
            }
        } else {
            info!("No {} found, using built-in defaults", defaults::CONFIG_FILE_NAME);
        }

        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text.
    ///
    /// Unknown keys are logged as warnings; they never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to `path`, e.g. as a starter file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Check every value that would make the pipeline misbehave.
    ///
    /// Suspicious-but-usable values are logged as warnings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    // ========================================================================
    // Pipeline inputs
    // ========================================================================

    pub fn parse_options(&self) -> ParseOptions {
        self.parser
    }

    /// Plot request for the configured default tracks.
    pub fn plot_request(&self) -> PlotRequest {
        let mut request = PlotRequest::new(self.plot.tracks.iter().cloned())
            .with_policy(self.plot.unknown_track_policy);
        if let Some(title) = &self.plot.title {
            request = request.with_title(title.clone());
        }
        if let Some(label) = &self.plot.depth_label {
            request = request.with_depth_label(label.clone());
        }
        request
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            delimiter: self.export.delimiter,
            missing: self.export.missing.clone(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Display
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub page_title: String,
    pub app_title: String,
    /// Printed before the well summary
    pub field_label: String,
    /// Rows shown in the table preview
    pub preview_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_title: defaults::PAGE_TITLE.to_string(),
            app_title: defaults::APP_TITLE.to_string(),
            field_label: defaults::FIELD_LABEL.to_string(),
            preview_rows: defaults::PREVIEW_ROWS,
        }
    }
}

impl DisplayConfig {
    /// Header lines printed above a report.
    pub fn banner(&self) -> String {
        format!(
            "{} | {}\nField: {}",
            self.page_title, self.app_title, self.field_label
        )
    }
}

// ============================================================================
// Plot
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Curves plotted left to right
    pub tracks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_label: Option<String>,
    pub unknown_track_policy: UnknownTrackPolicy,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            tracks: defaults::DEFAULT_TRACKS.iter().map(|t| (*t).to_string()).collect(),
            title: None,
            depth_label: None,
            unknown_track_policy: UnknownTrackPolicy::default(),
        }
    }
}

// ============================================================================
// Export
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Suggested download filename
    pub filename: String,
    pub delimiter: char,
    /// Text written for a missing sample
    pub missing: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let options = ExportOptions::default();
        Self {
            filename: defaults::DEFAULT_EXPORT_FILENAME.to_string(),
            delimiter: options.delimiter,
            missing: options.missing,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
