//! Small string codecs.
//!
//! Provides:
//! - [`xor_encode`] / [`xor_decode`] - symmetric XOR obfuscation as hex units
//! - [`string_hash`] - 32-bit rolling string hash
//! - [`binary_to_hex`] / [`to_binary_string`] - bit-string conversion
//!
//! Strings are processed as UTF-16 code units so encoded values stay
//! interchangeable with what browser code produces from `charCodeAt`.

use crate::config::XOR_SEPARATOR;
use crate::core::error::CodecError;

// =============================================================================
// XOR Codec
// =============================================================================

/// XOR-encode `raw` with `mask`, joining hex units with `|`.
pub fn xor_encode(raw: &str, mask: &str) -> Result<String, CodecError> {
    xor_encode_with(raw, mask, XOR_SEPARATOR)
}

/// XOR-encode `raw` with `mask`, joining hex units with `separator`.
///
/// Each UTF-16 unit is XORed with the mask unit at the same index modulo the
/// mask length and written as unpadded lowercase hex.
pub fn xor_encode_with(raw: &str, mask: &str, separator: &str) -> Result<String, CodecError> {
    let mask: Vec<u16> = mask.encode_utf16().collect();
    if mask.is_empty() {
        return Err(CodecError::EmptyMask);
    }

    let units: Vec<String> = raw
        .encode_utf16()
        .zip(mask.iter().cycle())
        .map(|(unit, key)| format!("{:x}", unit ^ key))
        .collect();

    Ok(units.join(separator))
}

/// Decode a string produced by [`xor_encode`].
pub fn xor_decode(encoded: &str, mask: &str) -> Result<String, CodecError> {
    xor_decode_with(encoded, mask, XOR_SEPARATOR)
}

/// Decode a string produced by [`xor_encode_with`] using the same separator.
pub fn xor_decode_with(encoded: &str, mask: &str, separator: &str) -> Result<String, CodecError> {
    let mask: Vec<u16> = mask.encode_utf16().collect();
    if mask.is_empty() {
        return Err(CodecError::EmptyMask);
    }
    if encoded.is_empty() {
        return Ok(String::new());
    }

    let units = encoded
        .split(separator)
        .zip(mask.iter().cycle())
        .map(|(hex, key)| {
            u16::from_str_radix(hex, 16)
                .map(|unit| unit ^ key)
                .map_err(|_| CodecError::InvalidHex(hex.to_string()))
        })
        .collect::<Result<Vec<u16>, _>>()?;

    Ok(String::from_utf16_lossy(&units))
}

// =============================================================================
// Hashing
// =============================================================================

/// 32-bit rolling hash (`h = h * 31 + unit`, wrapping) over UTF-16 units.
pub fn string_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

// =============================================================================
// Binary / Hex
// =============================================================================

/// Convert a string of binary digits to lowercase hex, one digit per nibble.
///
/// A trailing group shorter than four digits is ignored.
pub fn binary_to_hex(bits: &str) -> Result<String, CodecError> {
    let digits = bits
        .chars()
        .map(|c| match c {
            '0' => Ok(0u8),
            '1' => Ok(1u8),
            other => Err(CodecError::InvalidBinaryDigit(other)),
        })
        .collect::<Result<Vec<u8>, _>>()?;

    Ok(digits
        .chunks_exact(4)
        .map(|nibble| {
            let value = nibble.iter().fold(0u8, |acc, bit| (acc << 1) | bit);
            char::from_digit(u32::from(value), 16).unwrap_or('0')
        })
        .collect())
}

/// Render bytes as a string of binary digits, eight per byte.
pub fn to_binary_string(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{:08b}", byte)).collect()
}
