//! Byte-to-text decoding for uploaded LAS files
//!
//! Upload widgets hand over raw bytes with no declared charset. Most LAS
//! files are ASCII, but exports from Windows tools are often Latin-1 or
//! UTF-16 with a byte-order mark.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::FormatError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Text encoding to assume when decoding the upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// BOM sniffing, then UTF-8, then Latin-1 fallback
    #[default]
    Auto,
    /// Strict UTF-8 (BOMs are still honoured)
    Utf8,
    /// ISO-8859-1, every byte is a character
    Latin1,
}

/// Decode raw upload bytes into text.
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> Result<String, FormatError> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return utf8(rest).and_then(reject_binary);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return utf16(rest, u16::from_be_bytes);
    }

    let text = match encoding {
        TextEncoding::Utf8 => utf8(bytes)?,
        TextEncoding::Latin1 => latin1(bytes),
        TextEncoding::Auto => match utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Upload is not valid UTF-8, decoding as Latin-1");
                latin1(bytes)
            }
        },
    };
    reject_binary(text)
}

fn utf8(bytes: &[u8]) -> Result<String, FormatError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| FormatError::Decode {
        reason: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, FormatError> {
    if bytes.len() % 2 != 0 {
        return Err(FormatError::Decode {
            reason: "UTF-16 stream has an odd number of bytes".to_string(),
        });
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| FormatError::Decode {
        reason: format!("invalid UTF-16: {e}"),
    })
}

/// NUL characters never appear in a text log; their presence means the
/// upload is a binary file (DLIS, zip, image) under a `.las` name.
fn reject_binary(text: String) -> Result<String, FormatError> {
    if text.contains('\0') {
        return Err(FormatError::Decode {
            reason: "file contains NUL bytes and looks binary".to_string(),
        });
    }
    Ok(text)
}
