//! Built-in default values.
//!
//! Used by the `Default` impls in [`super::AppConfig`] and by callers that
//! run without a config file.

// ============================================================================
// Display
// ============================================================================

/// Browser tab / window title.
pub const PAGE_TITLE: &str = "Petro APP";

/// Heading shown above the upload prompt.
pub const APP_TITLE: &str = "Petrophysics App";

/// Field label printed before the well summary.
pub const FIELD_LABEL: &str = "Volve (Noruega)";

/// Number of rows shown in the table preview.
pub const PREVIEW_ROWS: usize = 10;

// ============================================================================
// Plot
// ============================================================================

/// Tracks plotted when the caller does not choose any.
pub const DEFAULT_TRACKS: [&str; 5] = ["KLOGH", "PHIF", "SAND_FLAG", "SW", "VSH"];

// ============================================================================
// Export
// ============================================================================

/// Suggested download filename for the delimited export.
pub const DEFAULT_EXPORT_FILENAME: &str = "datos_volve.csv";

// ============================================================================
// Files
// ============================================================================

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "petrolog.toml";
