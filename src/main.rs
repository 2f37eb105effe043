//! Petrolog - LAS well-log viewer
//!
//! Loads one LAS file, prints its header summary and a preview of the
//! enriched table (SWIRR and PHIE appended), and optionally writes the
//! delimited export and a Plotly JSON multi-track figure.
//!
//! # Usage
//!
//! ```bash
//! # Summary and preview
//! petrolog data/las/15_9-F-11_A.las
//!
//! # Custom tracks, export with the configured filename, figure JSON
//! petrolog well.las --tracks GR,PHIE,SW --csv --figure tracks.json
//!
//! # Write a starter config
//! petrolog --write-config petrolog.toml
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use petrolog::config::AppConfig;
use petrolog::export::EXPORT_MIME;
use petrolog::las::{NullPolicy, TextEncoding};
use petrolog::pipeline::{load_well, WellReport};
use petrolog::plot::unresolved_errors;
use petrolog::types::{PlotRequest, UnknownTrackPolicy};
use petrolog::PetroError;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "petrolog")]
#[command(about = "LAS well-log viewer with derived petrophysical parameters")]
#[command(version)]
struct CliArgs {
    /// LAS file to load
    #[arg(value_name = "FILE", required_unless_present = "write_config")]
    file: Option<PathBuf>,

    /// Config file (default: ./petrolog.toml if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Comma-separated curves to plot, left to right
    #[arg(long, value_delimiter = ',', value_name = "A,B,...")]
    tracks: Option<Vec<String>>,

    /// Write the delimited export (bare flag uses the configured filename)
    #[arg(long, value_name = "PATH")]
    csv: Option<Option<PathBuf>>,

    /// Write the multi-track figure as Plotly JSON
    #[arg(long, value_name = "PATH")]
    figure: Option<PathBuf>,

    /// Number of rows to preview
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Which numeric values count as missing
    #[arg(long, value_enum)]
    null_policy: Option<CliNullPolicy>,

    /// Text encoding of the LAS file
    #[arg(long, value_enum)]
    encoding: Option<CliEncoding>,

    /// Fail instead of skipping tracks that are not in the file
    #[arg(long)]
    reject_unknown_tracks: bool,

    /// Write the effective config to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliNullPolicy {
    Strict,
    Common,
}

impl From<CliNullPolicy> for NullPolicy {
    fn from(value: CliNullPolicy) -> Self {
        match value {
            CliNullPolicy::Strict => Self::Strict,
            CliNullPolicy::Common => Self::Common,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliEncoding {
    Auto,
    Utf8,
    Latin1,
}

impl From<CliEncoding> for TextEncoding {
    fn from(value: CliEncoding) -> Self {
        match value {
            CliEncoding::Auto => Self::Auto,
            CliEncoding::Utf8 => Self::Utf8,
            CliEncoding::Latin1 => Self::Latin1,
        }
    }
}

// ============================================================================
// Config Overrides
// ============================================================================

/// Fold CLI flags over the loaded config. Flags win.
fn apply_overrides(mut config: AppConfig, args: &CliArgs) -> AppConfig {
    if let Some(tracks) = &args.tracks {
        config.plot.tracks = tracks
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }
    if let Some(n) = args.preview {
        config.display.preview_rows = n;
    }
    if let Some(policy) = args.null_policy {
        config.parser.null_policy = policy.into();
    }
    if let Some(encoding) = args.encoding {
        config.parser.encoding = encoding.into();
    }
    if args.reject_unknown_tracks {
        config.plot.unknown_track_policy = UnknownTrackPolicy::Reject;
    }
    config
}

// ============================================================================
// Output
// ============================================================================

fn print_report(config: &AppConfig, report: &WellReport) {
    println!("{}", config.display.banner());
    println!();
    println!("{}", report.summary);
    println!();
    println!(
        "First {} rows:",
        config.display.preview_rows.min(report.table.row_count())
    );
    println!("{}", report.preview(config.display.preview_rows));
}

fn write_csv(config: &AppConfig, report: &WellReport, target: Option<&Path>) -> Result<()> {
    let path = target.map_or_else(|| PathBuf::from(&config.export.filename), Path::to_path_buf);
    let bytes = report
        .export(&config.export_options())
        .context("Failed to serialize table")?;
    std::fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), mime = EXPORT_MIME, "Export written");
    println!("Export written to {}", path.display());
    Ok(())
}

fn write_figure(report: &WellReport, request: &PlotRequest, path: &Path) -> Result<()> {
    let build = match report.figure(request) {
        Ok(build) => build,
        Err(PetroError::EmptyRequest { unresolved }) => {
            bail!(
                "None of the requested tracks exist in this file (requested: {}; available: {})",
                unresolved.join(", "),
                report.table.column_names().join(", ")
            );
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to build figure")),
    };
    for err in unresolved_errors(&build) {
        warn!("{err}");
        eprintln!("Warning: {err}");
    }

    let json = serde_json::to_string_pretty(&build.figure.to_plotly())
        .context("Failed to encode figure")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(
        path = %path.display(),
        panels = build.figure.panels.len(),
        "Figure written"
    );
    println!("Figure written to {}", path.display());
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let config = AppConfig::load(args.config.as_deref()).context("Failed to load config")?;
    let config = apply_overrides(config, &args);
    config.validate().context("Invalid settings")?;

    if let Some(path) = &args.write_config {
        config.save_to_file(path).context("Failed to write config")?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    let Some(file) = &args.file else {
        bail!("No LAS file given");
    };

    let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let report = load_well(&bytes, &config.parse_options())
        .with_context(|| format!("Could not load {}", file.display()))?;

    print_report(&config, &report);

    if let Some(target) = &args.csv {
        write_csv(&config, &report, target.as_deref())?;
    }
    if let Some(path) = &args.figure {
        write_figure(&report, &config.plot_request(), path)?;
    }

    Ok(())
}
