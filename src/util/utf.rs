use std::string::{FromUtf8Error, FromUtf16Error};
use thiserror::Error;

/// Specific error details regarding `UTF`.
#[derive(Error, Debug)]
pub enum UtfError {
    /// A UTF-16 byte order mark is present, although the payload is not
    /// made up of whole code units.
    #[error("UTF-16 data needs to contain an even amount of bytes")]
    UnevenByteCount,
    /// Invalid UTF-8 data.
    #[error(transparent)]
    InvalidUtf8(FromUtf8Error),
    /// Invalid UTF-16 data.
    #[error(transparent)]
    InvalidUtf16(FromUtf16Error),
}

/// Decodes fetched bytes as text.
///
/// UTF-16 is honored only when a byte order mark (BOM) is present;
/// a UTF-8 BOM is stripped, as JSON parsers reject it.
pub(crate) fn decode_text(data: Vec<u8>) -> Result<String, UtfError> {
    if let Some(endian) = utf16_endian(&data) {
        decode_utf16(&data[2..], endian)
    } else if data.starts_with(UTF8_BOM) {
        String::from_utf8(data[UTF8_BOM.len()..].to_vec()).map_err(UtfError::InvalidUtf8)
    } else {
        String::from_utf8(data).map_err(UtfError::InvalidUtf8)
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn utf16_endian(data: &[u8]) -> Option<fn([u8; 2]) -> u16> {
    if data.starts_with(b"\xFF\xFE") {
        Some(u16::from_le_bytes)
    } else if data.starts_with(b"\xFE\xFF") {
        Some(u16::from_be_bytes)
    } else {
        None
    }
}

fn decode_utf16(payload: &[u8], endian: fn([u8; 2]) -> u16) -> Result<String, UtfError> {
    let units = payload
        .chunks(2)
        .map(|chunk| chunk.try_into().map(endian))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| UtfError::UnevenByteCount)?;

    String::from_utf16(&units).map_err(UtfError::InvalidUtf16)
}
