use super::{from_24bit, to_24bit};
use crate::error::ColorFormatError;
use crate::Float;

/// Parse a 24-bit color in hexadecimal format. If successful, this function
/// returns the three coordinates as unsigned bytes. It transparently handles
/// single-digit coordinates.
fn parse_hex_digits(s: &str) -> Result<[u8; 3], ColorFormatError> {
    if !s.is_ascii() || (s.len() != 3 && s.len() != 6) {
        return Err(ColorFormatError::UnexpectedCharacters);
    } else if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorFormatError::MalformedHex);
    }

    fn parse_coordinate(s: &str, index: usize) -> Result<u8, ColorFormatError> {
        let factor = s.len() / 3;
        let t = s
            .get(factor * index..factor * (index + 1))
            .ok_or(ColorFormatError::UnexpectedCharacters)?;
        let n = u8::from_str_radix(t, 16).map_err(|_| ColorFormatError::MalformedHex)?;

        Ok(if factor == 1 { 16 * n + n } else { n })
    }

    let c1 = parse_coordinate(s, 0)?;
    let c2 = parse_coordinate(s, 1)?;
    let c3 = parse_coordinate(s, 2)?;
    Ok([c1, c2, c3])
}

/// Parse the string as a hexadecimal sRGB color.
///
/// This function recognizes the six and three digit formats, with or without
/// leading hash. It trims leading and trailing white space and accepts upper
/// and lower case digits alike.
pub(crate) fn parse_hex(s: &str) -> Result<[Float; 3], ColorFormatError> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.is_empty() {
        return Err(ColorFormatError::UnknownFormat);
    }

    let [r, g, b] = parse_hex_digits(digits)?;
    Ok(from_24bit(r, g, b))
}

/// Format the sRGB coordinates as a lower case `#rrggbb` string.
///
/// Coordinates are clamped to unit range and rounded to the nearest byte.
pub(crate) fn format_hex(coordinates: &[Float; 3]) -> String {
    let [r, g, b] = to_24bit(coordinates);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

// ====================================================================================================================
