//! LAS (Log ASCII Standard) Parser
//!
//! Decodes the raw bytes of an uploaded LAS 1.2 / 2.0 file into a
//! [`ParsedLogFile`]. Supported sections:
//!
//! - `~V` version information (`VERS`, `WRAP`), required
//! - `~W` well information (`WELL`, `NULL`, `STRT`/`STOP`/`STEP`, ...), required
//! - `~C` curve definitions, required; the first curve is the depth index
//! - `~P` parameters, optional
//! - `~O` free text, optional
//! - `~A` data, required
//!
//! Curve order comes from `~C`. LAS ties data columns to `~C` order, so the
//! mnemonics repeated on the `~A` line are ignored.
//!
//! # Usage
//!
//! ```ignore
//! use petrolog::las::{parse, ParseOptions};
//!
//! let parsed = parse(&bytes, &ParseOptions::default())?;
//! println!("{} curves in {}", parsed.curves().len(), parsed.well_name());
//! ```

mod data;
mod decode;
mod header;

pub use data::{NullPolicy, COMMON_NULL_VALUES};
pub use decode::{decode, TextEncoding};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::FormatError;
use crate::types::{Curve, HeaderItem, ParsedLogFile};
use data::NullSet;
use header::{disambiguate_mnemonics, parse_header_line, swap_legacy_well_item};

/// Parser knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub null_policy: NullPolicy,
    pub encoding: TextEncoding,
}

// ============================================================================
// Section Splitting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Version,
    Well,
    Curve,
    Parameter,
    Other,
    Ascii,
    Unknown,
}

impl SectionKind {
    fn from_marker(line: &str) -> Self {
        match line
            .trim_start()
            .trim_start_matches('~')
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
        {
            Some('V') => Self::Version,
            Some('W') => Self::Well,
            Some('C') => Self::Curve,
            Some('P') => Self::Parameter,
            Some('O') => Self::Other,
            Some('A') => Self::Ascii,
            _ => Self::Unknown,
        }
    }
}

/// Lines of each section, keyed by 1-based line number.
#[derive(Debug, Default)]
struct Sections<'a> {
    version: Option<Vec<(usize, &'a str)>>,
    well: Option<Vec<(usize, &'a str)>>,
    curve: Option<Vec<(usize, &'a str)>>,
    parameter: Vec<(usize, &'a str)>,
    other: Vec<&'a str>,
    ascii: Option<Vec<(usize, &'a str)>>,
}

impl<'a> Sections<'a> {
    fn split(text: &'a str) -> Self {
        let mut sections = Self::default();
        let mut current: Option<SectionKind> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_end_matches('\r');
            let trimmed = line.trim();

            if trimmed.starts_with('~') {
                let kind = SectionKind::from_marker(trimmed);
                if kind == SectionKind::Unknown {
                    debug!(line = line_no, marker = trimmed, "Ignoring unsupported LAS section");
                }
                // Touch the slot so an empty but present section still counts as present.
                match kind {
                    SectionKind::Version => {
                        sections.version.get_or_insert_with(Vec::new);
                    }
                    SectionKind::Well => {
                        sections.well.get_or_insert_with(Vec::new);
                    }
                    SectionKind::Curve => {
                        sections.curve.get_or_insert_with(Vec::new);
                    }
                    SectionKind::Ascii => {
                        sections.ascii.get_or_insert_with(Vec::new);
                    }
                    SectionKind::Parameter | SectionKind::Other | SectionKind::Unknown => {}
                }
                current = Some(kind);
                continue;
            }

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let entry = (line_no, line);
            match current {
                Some(SectionKind::Version) => sections.version.get_or_insert_with(Vec::new).push(entry),
                Some(SectionKind::Well) => sections.well.get_or_insert_with(Vec::new).push(entry),
                Some(SectionKind::Curve) => sections.curve.get_or_insert_with(Vec::new).push(entry),
                Some(SectionKind::Parameter) => sections.parameter.push(entry),
                Some(SectionKind::Other) => sections.other.push(trimmed),
                Some(SectionKind::Ascii) => sections.ascii.get_or_insert_with(Vec::new).push(entry),
                Some(SectionKind::Unknown) => {}
                None => debug!(line = line_no, "Ignoring text before first LAS section"),
            }
        }
        sections
    }
}

fn parse_items(lines: &[(usize, &str)]) -> Result<Vec<HeaderItem>, FormatError> {
    lines
        .iter()
        .map(|(line, text)| parse_header_line(text, *line))
        .collect()
}

fn find_item<'a>(items: &'a [HeaderItem], mnemonic: &str) -> Option<&'a HeaderItem> {
    items
        .iter()
        .find(|i| i.mnemonic.eq_ignore_ascii_case(mnemonic))
}

// ============================================================================
// Entry Point
// ============================================================================

/// Parse raw LAS bytes.
///
/// Fails with [`FormatError`] when the bytes are not text, a required
/// section or header item is missing, or the data section is malformed.
pub fn parse(bytes: &[u8], options: &ParseOptions) -> Result<ParsedLogFile, FormatError> {
    let text = decode(bytes, options.encoding)?;
    parse_str(&text, options)
}

/// Parse already-decoded LAS text.
pub fn parse_str(text: &str, options: &ParseOptions) -> Result<ParsedLogFile, FormatError> {
    let sections = Sections::split(text);

    // --- ~V ---
    let version_lines = sections
        .version
        .ok_or(FormatError::MissingSection { section: "~V" })?;
    let version_items = parse_items(&version_lines)?;
    let version = find_item(&version_items, "VERS")
        .map(|i| i.value.clone())
        .filter(|v| !v.is_empty())
        .ok_or(FormatError::MissingHeaderItem {
            section: "~V",
            mnemonic: "VERS",
        })?;
    let wrapped = find_item(&version_items, "WRAP")
        .is_some_and(|i| i.value.trim().to_ascii_uppercase().starts_with("YES"));

    let legacy = version.trim().starts_with('1');
    if !legacy && !version.trim().starts_with('2') {
        warn!(version = %version, "LAS version is not 1.x or 2.x, parsing as 2.0");
    }

    // --- ~W ---
    let well_lines = sections
        .well
        .ok_or(FormatError::MissingSection { section: "~W" })?;
    let mut well_items = parse_items(&well_lines)?;
    if legacy {
        well_items.iter_mut().for_each(swap_legacy_well_item);
    }
    let well_name = find_item(&well_items, "WELL")
        .map(|i| i.value.clone())
        .ok_or(FormatError::MissingHeaderItem {
            section: "~W",
            mnemonic: "WELL",
        })?;
    let null_value = match find_item(&well_items, "NULL") {
        Some(item) if !item.value.is_empty() => {
            Some(item.value.parse::<f64>().map_err(|_| FormatError::InvalidHeaderValue {
                mnemonic: item.mnemonic.clone(),
                value: item.value.clone(),
            })?)
        }
        _ => None,
    };

    // --- ~C ---
    let curve_lines = sections
        .curve
        .ok_or(FormatError::MissingSection { section: "~C" })?;
    let mut curve_items = parse_items(&curve_lines)?;
    if curve_items.is_empty() {
        return Err(FormatError::MissingSection { section: "~C" });
    }
    disambiguate_mnemonics(&mut curve_items);
    let curve_names: Vec<String> = curve_items.iter().map(|c| c.mnemonic.clone()).collect();

    // --- ~P (lenient: a bad parameter line never blocks the curves) ---
    let parameters: Vec<HeaderItem> = sections
        .parameter
        .iter()
        .filter_map(|(line, text)| match parse_header_line(text, *line) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "Skipping malformed ~P line");
                None
            }
        })
        .collect();

    // --- ~A ---
    let ascii_lines = sections
        .ascii
        .ok_or(FormatError::MissingSection { section: "~A" })?;
    let nulls = NullSet::new(null_value, options.null_policy);
    let mut columns = data::parse_ascii(&ascii_lines, &curve_names, wrapped, &nulls)?;

    let depth = columns.remove(0);
    validate_depth(&depth)?;

    let mut curves: Vec<Curve> = curve_items
        .into_iter()
        .zip(std::iter::once(depth).chain(columns))
        .map(|(item, values)| Curve {
            mnemonic: item.mnemonic,
            unit: item.unit,
            description: item.description,
            values,
        })
        .collect();
    let index = curves.remove(0);

    info!(
        well = %well_name,
        version = %version,
        index = %index.mnemonic,
        curves = curves.len(),
        rows = index.values.len(),
        wrapped,
        "LAS file parsed"
    );

    Ok(ParsedLogFile {
        version,
        wrapped,
        well_name,
        null_value,
        version_items,
        well_items,
        parameters,
        other: sections.other.join("\n"),
        index,
        curves,
    })
}

/// Depth must be present on every row and strictly monotonic in one direction.
fn validate_depth(depth: &[f64]) -> Result<(), FormatError> {
    if depth.is_empty() {
        return Err(FormatError::NoData);
    }
    if let Some(row) = depth.iter().position(|d| d.is_nan()) {
        return Err(FormatError::MissingDepth { row });
    }

    let increasing = depth.len() < 2 || depth[1] > depth[0];
    for (row, pair) in depth.windows(2).enumerate() {
        let ordered = if increasing {
            pair[1] > pair[0]
        } else {
            pair[1] < pair[0]
        };
        if !ordered {
            return Err(FormatError::NonMonotonicDepth {
                row: row + 1,
                previous: pair[0],
                current: pair[1],
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "\
~VERSION INFORMATION
 VERS.                  2.0 : CWLS LOG ASCII STANDARD -VERSION 2.0
 WRAP.                   NO : ONE LINE PER DEPTH STEP
~WELL INFORMATION
 STRT.M              100.0 :
 STOP.M              101.0 :
 STEP.M                0.5 :
 NULL.             -999.25 :
 WELL.        15/9-F-11 A : WELL
~CURVE INFORMATION
 DEPT.M                    : Measured depth
 PHIF.m3/m3                : Porosity
 SW  .                     : Water saturation
~PARAMETER
 BHT .DEGC   91.0 : Bottom hole temperature
~OTHER
 Volve field
~A  DEPT  PHIF  SW
100.0   0.25  0.30
100.5   0.22  -999.25
101.0   0.20  0.45
";

    #[test]
    fn test_minimal_file() {
        let parsed = parse_str(MINIMAL, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.version(), "2.0");
        assert_eq!(parsed.well_name(), "15/9-F-11 A");
        assert_eq!(parsed.null_value(), Some(-999.25));
        assert!(!parsed.is_wrapped());
        assert_eq!(parsed.index().mnemonic, "DEPT");
        assert_eq!(parsed.curve_names(), vec!["PHIF", "SW"]);
        assert_eq!(parsed.depth_index(), &[100.0, 100.5, 101.0]);
        assert!(parsed.curve("SW").unwrap().values[1].is_nan());
        assert_eq!(parsed.curve("PHIF").unwrap().unit, "m3/m3");
        assert_eq!(parsed.parameters()[0].mnemonic, "BHT");
        assert_eq!(parsed.other(), "Volve field");
        assert_eq!(parsed.well_item("step").unwrap().value, "0.5");
    }

    #[test]
    fn test_every_curve_aligned_with_depth() {
        let parsed = parse_str(MINIMAL, &ParseOptions::default()).unwrap();
        for curve in parsed.curves() {
            assert_eq!(curve.values.len(), parsed.row_count());
        }
    }

    #[test]
    fn test_missing_version_section() {
        let text = MINIMAL.replace("~VERSION INFORMATION", "# no version");
        // VERS line now sits before any section and is ignored
        let err = parse_str(&text, &ParseOptions::default()).unwrap_err();
        assert_eq!(err, FormatError::MissingSection { section: "~V" });
    }

    #[test]
    fn test_missing_well_item() {
        let text = MINIMAL.replace(" WELL.        15/9-F-11 A : WELL\n", "");
        let err = parse_str(&text, &ParseOptions::default()).unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingHeaderItem {
                section: "~W",
                mnemonic: "WELL",
            }
        );
    }

    #[test]
    fn test_missing_data_section() {
        let cut = MINIMAL.find("~A").unwrap();
        let err = parse_str(&MINIMAL[..cut], &ParseOptions::default()).unwrap_err();
        assert_eq!(err, FormatError::MissingSection { section: "~A" });
    }

    #[test]
    fn test_empty_data_section() {
        let cut = MINIMAL.find("100.0   0.25").unwrap();
        let err = parse_str(&MINIMAL[..cut], &ParseOptions::default()).unwrap_err();
        assert_eq!(err, FormatError::NoData);
    }

    #[test]
    fn test_invalid_null_value() {
        let text = MINIMAL.replace("-999.25 :", "none :");
        assert!(matches!(
            parse_str(&text, &ParseOptions::default()),
            Err(FormatError::InvalidHeaderValue { .. })
        ));
    }

    #[test]
    fn test_decreasing_depth_accepted() {
        let text = MINIMAL
            .replace("100.0   0.25", "102.0   0.25")
            .replace("100.5   0.22", "101.5   0.22");
        let parsed = parse_str(&text, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.depth_index(), &[102.0, 101.5, 101.0]);
    }

    #[test]
    fn test_non_monotonic_depth_rejected() {
        let text = MINIMAL.replace("101.0   0.20", "100.2   0.20");
        let err = parse_str(&text, &ParseOptions::default()).unwrap_err();
        assert_eq!(
            err,
            FormatError::NonMonotonicDepth {
                row: 2,
                previous: 100.5,
                current: 100.2,
            }
        );
    }

    #[test]
    fn test_missing_depth_rejected() {
        let text = MINIMAL.replace("100.5   0.22", "-999.25   0.22");
        assert_eq!(
            parse_str(&text, &ParseOptions::default()).unwrap_err(),
            FormatError::MissingDepth { row: 1 }
        );
    }

    #[test]
    fn test_legacy_well_section_swapped() {
        let text = MINIMAL
            .replace("VERS.                  2.0", "VERS.                  1.2")
            .replace(" WELL.        15/9-F-11 A : WELL", " WELL.   WELL : 15/9-F-11 A");
        let parsed = parse_str(&text, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.well_name(), "15/9-F-11 A");
        assert_eq!(parsed.null_value(), Some(-999.25));
    }

    #[test]
    fn test_depth_index_taken_from_first_curve_whatever_its_name() {
        let text = MINIMAL.replace(" DEPT.M ", " MD  .M ");
        let parsed = parse_str(&text, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.index().mnemonic, "MD");
        assert_eq!(parsed.depth_index().len(), 3);
    }
}
