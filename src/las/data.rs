//! `~A` (ASCII data) section parsing

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Null values many LAS writers use regardless of the declared `NULL`.
pub const COMMON_NULL_VALUES: [f64; 6] = [-999.25, -999.0, -9999.25, -9999.0, 999.25, 9999.25];

/// Non-numeric tokens that always mean "no sample".
const MISSING_TOKENS: [&str; 6] = ["nan", "-nan", "+nan", "null", "n/a", "-"];

/// Which numeric values are replaced by the missing sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Only the `NULL` value declared in `~W`
    #[default]
    Strict,
    /// Declared `NULL` plus [`COMMON_NULL_VALUES`]
    Common,
}

/// The concrete set of numeric null markers for one file.
#[derive(Debug, Clone, Default)]
pub(crate) struct NullSet {
    values: Vec<f64>,
}

impl NullSet {
    pub(crate) fn new(declared: Option<f64>, policy: NullPolicy) -> Self {
        let mut values: Vec<f64> = declared.into_iter().collect();
        if policy == NullPolicy::Common {
            values.extend(COMMON_NULL_VALUES);
        }
        Self { values }
    }

    fn is_null(&self, value: f64) -> bool {
        self.values.iter().any(|n| *n == value)
    }
}

/// Parse one data token. `None` means the token is not a number and not a
/// recognised missing marker.
fn parse_token(token: &str, nulls: &NullSet) -> Option<f64> {
    if MISSING_TOKENS.iter().any(|m| token.eq_ignore_ascii_case(m)) {
        return Some(f64::NAN);
    }
    let value: f64 = token.parse().ok()?;
    if !value.is_finite() || nulls.is_null(value) {
        return Some(f64::NAN);
    }
    Some(value)
}

/// Parse `~A` lines into one value vector per curve.
///
/// `lines` holds `(line_number, text)` pairs with comments and blanks already
/// removed. Unwrapped data needs exactly one depth step per line; wrapped
/// data is flattened and re-chunked by curve count.
pub(crate) fn parse_ascii(
    lines: &[(usize, &str)],
    curve_names: &[String],
    wrapped: bool,
    nulls: &NullSet,
) -> Result<Vec<Vec<f64>>, FormatError> {
    let n_curves = curve_names.len();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); n_curves];

    if wrapped {
        let tokens: Vec<(usize, &str)> = lines
            .iter()
            .flat_map(|(line, text)| text.split_whitespace().map(move |t| (*line, t)))
            .collect();
        if tokens.len() % n_curves != 0 {
            return Err(FormatError::WrappedRemainder {
                expected: n_curves,
                found: tokens.len(),
            });
        }
        for (i, (line, token)) in tokens.iter().enumerate() {
            let curve = i % n_curves;
            columns[curve].push(value_or_error(token, *line, &curve_names[curve], nulls)?);
        }
        return Ok(columns);
    }

    for (line, text) in lines {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() != n_curves {
            return Err(FormatError::ColumnCount {
                line: *line,
                expected: n_curves,
                found: tokens.len(),
            });
        }
        for (curve, token) in tokens.iter().enumerate() {
            columns[curve].push(value_or_error(token, *line, &curve_names[curve], nulls)?);
        }
    }
    Ok(columns)
}

fn value_or_error(
    token: &str,
    line: usize,
    curve: &str,
    nulls: &NullSet,
) -> Result<f64, FormatError> {
    parse_token(token, nulls).ok_or_else(|| FormatError::InvalidNumber {
        line,
        curve: curve.to_string(),
        token: token.to_string(),
    })
}
