//! Header line parsing for `~V`, `~W`, `~C` and `~P` sections
//!
//! Grammar: `MNEM.UNIT  VALUE : DESCRIPTION`
//! - mnemonic: everything before the first `.`
//! - unit: from the `.` up to the first whitespace (may be empty)
//! - value: up to the last `:`
//! - description: after the last `:`

use std::sync::OnceLock;

use regex::Regex;

use crate::error::FormatError;
use crate::types::HeaderItem;

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        #[allow(clippy::expect_used)]
        Regex::new(r"^\s*(?P<mnem>[^.]*?)\s*\.(?P<unit>\S*)(?P<rest>.*)$")
            .expect("header pattern is a valid regex")
    })
}

/// Parse one header line. `line` is the 1-based line number for error reporting.
pub(crate) fn parse_header_line(text: &str, line: usize) -> Result<HeaderItem, FormatError> {
    let caps = header_pattern()
        .captures(text)
        .ok_or_else(|| FormatError::InvalidHeaderLine {
            line,
            content: text.trim().to_string(),
        })?;

    let mnemonic = caps.name("mnem").map_or("", |m| m.as_str()).trim();
    let (unit_start, unit) = caps.name("unit").map_or((0, ""), |m| (m.start(), m.as_str()));
    let rest = caps.name("rest").map_or("", |m| m.as_str());

    // "DEPT.M: depth" has no space before the colon; the unit stops there.
    let (unit, rest) = match unit.find(':') {
        Some(pos) => (&unit[..pos], &text[unit_start + pos..]),
        None => (unit, rest),
    };

    let (value, description) = match rest.rfind(':') {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => (rest, ""),
    };

    Ok(HeaderItem {
        mnemonic: mnemonic.to_string(),
        unit: unit.to_string(),
        value: value.trim().to_string(),
        description: description.trim().to_string(),
    })
}

/// LAS 1.x puts the value of most `~W` items in the description slot.
pub(crate) fn swap_legacy_well_item(item: &mut HeaderItem) {
    const INDEX_ITEMS: [&str; 4] = ["STRT", "STOP", "STEP", "NULL"];
    if INDEX_ITEMS
        .iter()
        .any(|m| item.mnemonic.eq_ignore_ascii_case(m))
    {
        return;
    }
    std::mem::swap(&mut item.value, &mut item.description);
}

/// Rename repeated mnemonics to `NAME:1`, `NAME:2`, ... and blank ones to `UNKNOWN`.
pub(crate) fn disambiguate_mnemonics(items: &mut [HeaderItem]) {
    for item in items.iter_mut() {
        if item.mnemonic.is_empty() {
            item.mnemonic = "UNKNOWN".to_string();
        }
    }

    let names: Vec<String> = items.iter().map(|i| i.mnemonic.clone()).collect();
    let mut seen: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for (item, name) in items.iter_mut().zip(names.iter()) {
        let total = names.iter().filter(|n| *n == name).count();
        if total > 1 {
            let occurrence = seen.entry(name.as_str()).or_insert(0);
            *occurrence += 1;
            item.mnemonic = format!("{name}:{occurrence}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_line() {
        let item = parse_header_line(" STRT.M        145.9000 : START DEPTH", 3).unwrap();
        assert_eq!(item.mnemonic, "STRT");
        assert_eq!(item.unit, "M");
        assert_eq!(item.value, "145.9000");
        assert_eq!(item.description, "START DEPTH");
    }

    #[test]
    fn test_empty_unit_and_value() {
        let item = parse_header_line(" NULL.        -999.25 :", 1).unwrap();
        assert_eq!(item.unit, "");
        assert_eq!(item.value, "-999.25");
        assert_eq!(item.description, "");

        let curve = parse_header_line(" SW .                    : Water saturation", 1).unwrap();
        assert_eq!(curve.mnemonic, "SW");
        assert_eq!(curve.unit, "");
        assert_eq!(curve.value, "");
        assert_eq!(curve.description, "Water saturation");
    }

    #[test]
    fn test_value_with_colon_uses_last_colon() {
        let item = parse_header_line(" TIME.     13:45:12 : LOG TIME", 1).unwrap();
        assert_eq!(item.value, "13:45:12");
        assert_eq!(item.description, "LOG TIME");
    }

    #[test]
    fn test_unit_glued_to_colon() {
        let item = parse_header_line("DEPT.M: Measured depth", 1).unwrap();
        assert_eq!(item.mnemonic, "DEPT");
        assert_eq!(item.unit, "M");
        assert_eq!(item.value, "");
        assert_eq!(item.description, "Measured depth");
    }

    #[test]
    fn test_missing_dot_is_error() {
        let err = parse_header_line("WELL 15/9-F-11 A", 7).unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidHeaderLine {
                line: 7,
                content: "WELL 15/9-F-11 A".to_string(),
            }
        );
    }

    #[test]
    fn test_legacy_swap_skips_index_items() {
        let mut well = parse_header_line("WELL.   WELL : 15/9-F-11 A", 1).unwrap();
        swap_legacy_well_item(&mut well);
        assert_eq!(well.value, "15/9-F-11 A");

        let mut strt = parse_header_line("STRT.M  100.0 : START", 1).unwrap();
        swap_legacy_well_item(&mut strt);
        assert_eq!(strt.value, "100.0");
    }

    #[test]
    fn test_duplicate_mnemonics_numbered() {
        let mut items: Vec<HeaderItem> = ["DEPT", "GR", "RT", "GR", ""]
            .iter()
            .map(|m| HeaderItem {
                mnemonic: (*m).to_string(),
                unit: String::new(),
                value: String::new(),
                description: String::new(),
            })
            .collect();
        disambiguate_mnemonics(&mut items);
        let names: Vec<&str> = items.iter().map(|i| i.mnemonic.as_str()).collect();
        assert_eq!(names, vec!["DEPT", "GR:1", "RT", "GR:2", "UNKNOWN"]);
    }
}
