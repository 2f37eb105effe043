//! LAS Parsing Tests
//!
//! Exercises the public parser against the Volve fixture shipped under
//! data/las/ and against small inline variants (wrapped data, legacy 1.2
//! headers, 8-bit encodings, malformed input).

use std::path::PathBuf;

use petrolog::las::{parse, parse_str, NullPolicy, ParseOptions, TextEncoding};
use petrolog::FormatError;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/las/15_9-F-11_A.las")
}

fn fixture_bytes() -> Vec<u8> {
    std::fs::read(fixture_path()).expect("fixture LAS file should be readable")
}

const WRAPPED: &str = "\
~V
 VERS.   2.0 :
 WRAP.   YES : Multiple lines per depth step
~W
 NULL.   -999.25 :
 WELL.   WRAPPED-1 :
~C
 DEPT.M  :
 GR  .GAPI :
 RHOB.G/CC :
 NPHI.V/V :
~A
 1000.0
   45.1  2.31
   0.22
 1000.5
   -999.25  2.29
   0.24
";

// ============================================================================
// Fixture
// ============================================================================

#[test]
fn fixture_header_and_curves() {
    let parsed = parse(&fixture_bytes(), &ParseOptions::default()).unwrap();

    assert_eq!(parsed.version(), "2.0");
    assert_eq!(parsed.well_name(), "15/9-F-11 A");
    assert_eq!(parsed.null_value(), Some(-999.25));
    assert_eq!(parsed.well_item("FLD").unwrap().value, "VOLVE");
    assert_eq!(parsed.well_item("comp").unwrap().description, "COMPANY");

    assert_eq!(parsed.index().mnemonic, "DEPT");
    assert_eq!(parsed.index().unit, "M");
    assert_eq!(
        parsed.curve_names(),
        vec!["BVW", "KLOGH", "PHIF", "SAND_FLAG", "SW", "VSH"]
    );
    assert_eq!(parsed.curve("KLOGH").unwrap().unit, "mD");
    assert_eq!(parsed.curve("SAND_FLAG").unwrap().unit, "");
    assert_eq!(parsed.row_count(), 10);
}

#[test]
fn fixture_parameters_and_other_kept() {
    let parsed = parse(&fixture_bytes(), &ParseOptions::default()).unwrap();
    let bht = &parsed.parameters()[0];
    assert_eq!(bht.mnemonic, "BHT");
    assert_eq!(bht.unit, "DEGC");
    assert_eq!(bht.value, "95.0");
    assert!(parsed.other().contains("Hugin"));
}

#[test]
fn fixture_null_values_become_missing() {
    let parsed = parse(&fixture_bytes(), &ParseOptions::default()).unwrap();
    assert!(parsed.curve("BVW").unwrap().values[2].is_nan());
    assert!(parsed.curve("PHIF").unwrap().values[6].is_nan());
    let missing: usize = parsed
        .curves()
        .iter()
        .map(|c| c.values.iter().filter(|v| v.is_nan()).count())
        .sum();
    assert_eq!(missing, 2);
}

#[test]
fn fixture_depth_strictly_increasing() {
    let parsed = parse(&fixture_bytes(), &ParseOptions::default()).unwrap();
    let depth = parsed.depth_index();
    assert_eq!(depth.first(), Some(&3100.0));
    assert_eq!(depth.last(), Some(&3104.5));
    assert!(depth.windows(2).all(|w| w[1] > w[0]));
}

// ============================================================================
// Wrapped Data
// ============================================================================

#[test]
fn wrapped_data_rechunked_by_curve_count() {
    let parsed = parse_str(WRAPPED, &ParseOptions::default()).unwrap();
    assert!(parsed.is_wrapped());
    assert_eq!(parsed.depth_index(), &[1000.0, 1000.5]);
    assert_eq!(parsed.curve("RHOB").unwrap().values, vec![2.31, 2.29]);
    assert!(parsed.curve("GR").unwrap().values[1].is_nan());
    assert_eq!(parsed.curve("NPHI").unwrap().values, vec![0.22, 0.24]);
}

#[test]
fn wrapped_data_with_leftover_values_rejected() {
    let text = WRAPPED.replace("   0.24\n", "   0.24  9.9\n");
    assert!(matches!(
        parse_str(&text, &ParseOptions::default()),
        Err(FormatError::WrappedRemainder { .. })
    ));
}

// ============================================================================
// Malformed Input
// ============================================================================

#[test]
fn short_data_line_reports_column_count() {
    let text = String::from_utf8(fixture_bytes())
        .unwrap()
        .replace(" 3102.0000   0.0800    12.1000", " 3102.0000   0.0800");
    match parse_str(&text, &ParseOptions::default()) {
        Err(FormatError::ColumnCount { expected, found, .. }) => {
            assert_eq!(expected, 7);
            assert_eq!(found, 6);
        }
        other => panic!("expected ColumnCount, got {other:?}"),
    }
}

#[test]
fn non_numeric_token_names_curve() {
    let text = String::from_utf8(fixture_bytes())
        .unwrap()
        .replace("140.2000", "high");
    match parse_str(&text, &ParseOptions::default()) {
        Err(FormatError::InvalidNumber { curve, token, .. }) => {
            assert_eq!(curve, "KLOGH");
            assert_eq!(token, "high");
        }
        other => panic!("expected InvalidNumber, got {other:?}"),
    }
}

#[test]
fn missing_curve_section_rejected() {
    let text = String::from_utf8(fixture_bytes()).unwrap();
    let start = text.find("~Curve").unwrap();
    let end = text.find("~Parameter").unwrap();
    let cut = format!("{}{}", &text[..start], &text[end..]);
    assert_eq!(
        parse_str(&cut, &ParseOptions::default()).unwrap_err(),
        FormatError::MissingSection { section: "~C" }
    );
}

#[test]
fn binary_upload_rejected() {
    let bytes = [0x89, b'P', b'N', b'G', 0x00, 0x00, 0x1A, 0x0A];
    assert!(matches!(
        parse(&bytes, &ParseOptions::default()),
        Err(FormatError::Decode { .. })
    ));
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn common_null_policy_catches_undeclared_sentinel() {
    let text = String::from_utf8(fixture_bytes())
        .unwrap()
        .replace("98.2000", "-9999.0000");

    let strict = parse_str(&text, &ParseOptions::default()).unwrap();
    assert_eq!(strict.curve("KLOGH").unwrap().values[1], -9999.0);

    let options = ParseOptions {
        null_policy: NullPolicy::Common,
        ..ParseOptions::default()
    };
    let common = parse_str(&text, &options).unwrap();
    assert!(common.curve("KLOGH").unwrap().values[1].is_nan());
}

#[test]
fn latin1_header_decoded_in_auto_mode() {
    let mut bytes = fixture_bytes();
    // Latin-1 'Ø' is 0xD8, which is never valid UTF-8 on its own
    let at = bytes
        .windows(7)
        .position(|w| w == b"Equinor")
        .unwrap();
    bytes.splice(at..at + 7, b"St\xD8til".iter().copied());

    let parsed = parse(&bytes, &ParseOptions::default()).unwrap();
    assert_eq!(parsed.well_item("COMP").unwrap().value, "St\u{d8}til");

    let strict = ParseOptions {
        encoding: TextEncoding::Utf8,
        ..ParseOptions::default()
    };
    assert!(matches!(parse(&bytes, &strict), Err(FormatError::Decode { .. })));
}

#[test]
fn utf8_bom_is_ignored() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend(fixture_bytes());
    let parsed = parse(&bytes, &ParseOptions::default()).unwrap();
    assert_eq!(parsed.version(), "2.0");
}

#[test]
fn legacy_version_well_values_read_from_description() {
    let text = String::from_utf8(fixture_bytes())
        .unwrap()
        .replace("VERS.                 2.0", "VERS.                 1.2")
        .replace(
            " WELL.                    15/9-F-11 A : WELL",
            " WELL.                           WELL : 15/9-F-11 A",
        );
    let parsed = parse_str(&text, &ParseOptions::default()).unwrap();
    assert_eq!(parsed.version(), "1.2");
    assert_eq!(parsed.well_name(), "15/9-F-11 A");
    // Index items keep their value slot
    assert_eq!(parsed.well_item("STEP").unwrap().value, "0.5000");
}
