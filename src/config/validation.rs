//! Config validation: unknown-key detection with Levenshtein suggestions
//! and value range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Unknown keys never break a config.

use std::collections::HashSet;

use super::AppConfig;

/// Preview sizes above this are accepted but flagged.
const PREVIEW_ROWS_WARNING: usize = 1_000;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `AppConfig`.
///
/// Must be kept in step with the structs in app_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [display]
        "display",
        "display.page_title",
        "display.app_title",
        "display.field_label",
        "display.preview_rows",
        // [plot]
        "plot",
        "plot.tracks",
        "plot.title",
        "plot.depth_label",
        "plot.unknown_track_policy",
        // [export]
        "export",
        "export.filename",
        "export.delimiter",
        "export.missing",
        // [parser]
        "parser",
        "parser.null_policy",
        "parser.encoding",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (*k, levenshtein(unknown, k)))
        .filter(|(_, dist)| *dist <= 3)
        // Ties broken alphabetically so the suggestion is stable
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        // parse errors are reported by serde afterwards
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate value ranges on a parsed config.
///
/// Returns (errors, warnings): errors are values the pipeline cannot work
/// with, warnings are suspicious but usable.
pub fn validate_ranges(config: &AppConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let rows = config.display.preview_rows;
    if rows == 0 {
        errors.push("display.preview_rows must be > 0".to_string());
    } else if rows > PREVIEW_ROWS_WARNING {
        warnings.push(ValidationWarning {
            field: "display.preview_rows".to_string(),
            message: format!(
                "display.preview_rows = {rows} is above {PREVIEW_ROWS_WARNING}, the preview will be long"
            ),
            suggestion: None,
        });
    }

    let tracks = &config.plot.tracks;
    if tracks.is_empty() {
        errors.push("plot.tracks must name at least one curve".to_string());
    }
    if tracks.iter().any(|t| t.trim().is_empty()) {
        errors.push("plot.tracks contains an empty curve name".to_string());
    }
    let mut seen = HashSet::new();
    for track in tracks {
        if !seen.insert(track.as_str()) {
            warnings.push(ValidationWarning {
                field: "plot.tracks".to_string(),
                message: format!("plot.tracks lists '{track}' more than once, it will be plotted twice"),
                suggestion: None,
            });
        }
    }

    let delimiter = config.export.delimiter;
    if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        errors.push(format!(
            "export.delimiter = {delimiter:?} must be a single ASCII character other than a quote or newline"
        ));
    }
    if config.export.filename.trim().is_empty() {
        errors.push("export.filename must not be empty".to_string());
    }
    if config.export.missing.contains(delimiter) {
        errors.push(format!(
            "export.missing = {:?} contains the delimiter {delimiter:?}",
            config.export.missing
        ));
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
