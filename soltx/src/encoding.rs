//! Fixed-width little-endian `u64` encoding.
//!
//! On-chain programs commonly take amounts and identifiers as 8-byte
//! little-endian fields. [`buffer_from_u64`] accepts the loosely typed values
//! callers tend to have at hand (signed integers, floats, numeric strings)
//! and rejects anything that is not a non-negative integer in `u64` range.

use std::fmt;

/// Width in bytes of an encoded `u64`.
pub const U64_LENGTH: usize = 8;

/// Errors produced while encoding or decoding a `u64` buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The value is negative.
    #[error("Value must be non-negative: {0}")]
    Negative(String),
    /// The value has a fractional part or is not finite.
    #[error("Value must be an integer: {0}")]
    NonIntegral(String),
    /// The value exceeds `u64::MAX`.
    #[error("Value exceeds u64 range: {0}")]
    Overflow(String),
    /// The text could not be parsed as a number.
    #[error("Value is not a number: {0:?}")]
    Invalid(String),
    /// The buffer to decode is not exactly 8 bytes long.
    #[error("Buffer must be {U64_LENGTH} bytes, got {0}")]
    BufferLength(usize),
}

/// A value accepted by [`buffer_from_u64`].
#[derive(Debug, Clone, PartialEq)]
pub enum U64Input<'a> {
    /// Any integer, signed or unsigned, widened to `i128`.
    Integer(i128),
    /// A floating point number; must be integral.
    Float(f64),
    /// A decimal string with optional sign, or a `0x`, `0o`, or `0b`
    /// prefixed literal. Blank text is zero.
    Text(&'a str),
}

impl fmt::Display for U64Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_integer_input {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for U64Input<'_> {
                fn from(value: $ty) -> Self {
                    Self::Integer(i128::from(value))
                }
            }
        )*
    };
}

impl_integer_input!(u8, u16, u32, u64, i8, i16, i32, i64, i128);

impl From<usize> for U64Input<'_> {
    fn from(value: usize) -> Self {
        Self::Integer(i128::try_from(value).unwrap_or(i128::MAX))
    }
}

impl From<f64> for U64Input<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<'a> From<&'a str> for U64Input<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for U64Input<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl U64Input<'_> {
    /// Resolves the input to a `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError`] if the value is negative, fractional, out of
    /// range, or unparseable.
    pub fn to_u64(&self) -> Result<u64, EncodeError> {
        match *self {
            Self::Integer(v) => integer_to_u64(v),
            Self::Float(v) => float_to_u64(v),
            Self::Text(s) => text_to_u64(s),
        }
    }
}

fn integer_to_u64(value: i128) -> Result<u64, EncodeError> {
    if value < 0 {
        return Err(EncodeError::Negative(value.to_string()));
    }
    u64::try_from(value).map_err(|_| EncodeError::Overflow(value.to_string()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_u64(value: f64) -> Result<u64, EncodeError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(EncodeError::NonIntegral(value.to_string()));
    }
    if value < 0.0 {
        return Err(EncodeError::Negative(value.to_string()));
    }
    // 2^64 is exactly representable; anything at or above it overflows.
    if value >= 18_446_744_073_709_551_616.0 {
        return Err(EncodeError::Overflow(value.to_string()));
    }
    Ok(value as u64)
}

fn text_to_u64(text: &str) -> Result<u64, EncodeError> {
    let trimmed = text.trim();
    // Blank text is zero, as in big-integer literal parsing.
    if trimmed.is_empty() {
        return Ok(0);
    }
    let value = if let Some((digits, radix)) = radix_prefixed(trimmed) {
        parse_digits(digits, radix, text)?
    } else if let Some(digits) = trimmed.strip_prefix('-') {
        // "-0" is zero.
        return match parse_digits(digits, 10, text)? {
            0 => Ok(0),
            _ => Err(EncodeError::Negative(trimmed.to_owned())),
        };
    } else {
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        parse_digits(digits, 10, text)?
    };
    u64::try_from(value).map_err(|_| EncodeError::Overflow(trimmed.to_owned()))
}

/// Splits a `0x`, `0o`, or `0b` prefix off `text`. Prefixed literals take no sign.
fn radix_prefixed(text: &str) -> Option<(&str, u32)> {
    let rest = text.strip_prefix('0')?;
    let mut chars = rest.chars();
    let radix = match chars.next()? {
        'x' | 'X' => 16,
        'o' | 'O' => 8,
        'b' | 'B' => 2,
        _ => return None,
    };
    Some((chars.as_str(), radix))
}

/// Parses unsigned digits in `radix` into a `u128`, classifying failures.
fn parse_digits(digits: &str, radix: u32, original: &str) -> Result<u128, EncodeError> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        if radix == 10 && is_fractional(digits) {
            return Err(EncodeError::NonIntegral(original.trim().to_owned()));
        }
        return Err(EncodeError::Invalid(original.to_owned()));
    }
    // Digits are validated above, so the only possible failure is overflow.
    u128::from_str_radix(digits, radix)
        .map_err(|_| EncodeError::Overflow(original.trim().to_owned()))
}

fn is_fractional(digits: &str) -> bool {
    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    !fraction.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
}

/// Encodes `value` as an 8-byte little-endian buffer.
///
/// # Errors
///
/// Returns [`EncodeError`] if `value` is negative, non-integral, above
/// `u64::MAX`, or not a number.
///
/// # Example
///
/// ```rust
/// use soltx::buffer_from_u64;
///
/// assert_eq!(buffer_from_u64(1u64).unwrap(), [1, 0, 0, 0, 0, 0, 0, 0]);
/// assert_eq!(buffer_from_u64("256").unwrap(), [0, 1, 0, 0, 0, 0, 0, 0]);
/// assert!(buffer_from_u64(-1i64).is_err());
/// ```
pub fn buffer_from_u64<'a>(
    value: impl Into<U64Input<'a>>,
) -> Result<[u8; U64_LENGTH], EncodeError> {
    let value = value.into().to_u64()?;
    Ok(value.to_le_bytes())
}

/// Decodes an 8-byte little-endian buffer back into a `u64`.
///
/// # Errors
///
/// Returns [`EncodeError::BufferLength`] if `bytes` is not exactly 8 bytes.
pub fn u64_from_buffer(bytes: &[u8]) -> Result<u64, EncodeError> {
    let array: [u8; U64_LENGTH] = bytes
        .try_into()
        .map_err(|_| EncodeError::BufferLength(bytes.len()))?;
    Ok(u64::from_le_bytes(array))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_boundaries() {
        for value in [0u64, 1, 255, 256, u64::from(u32::MAX), u64::MAX - 1, u64::MAX] {
            let buffer = buffer_from_u64(value).unwrap();
            assert_eq!(u64_from_buffer(&buffer).unwrap(), value);
        }
    }

    #[test]
    fn test_roundtrip_pseudo_random_values() {
        // xorshift64 over a fixed seed covers the whole range reproducibly.
        let mut state = 0x9e37_79b9_7f4a_7c15u64;
        for _ in 0..10_000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let buffer = buffer_from_u64(state).unwrap();
            assert_eq!(u64_from_buffer(&buffer).unwrap(), state);
            assert_eq!(buffer_from_u64(&state.to_string()).unwrap(), buffer);
        }
    }

    #[test]
    fn test_layout_is_little_endian() {
        let buffer = buffer_from_u64(0x0102_0304_0506_0708u64).unwrap();
        assert_eq!(buffer, [8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_string_inputs() {
        assert_eq!(buffer_from_u64("1000").unwrap(), 1000u64.to_le_bytes());
        assert_eq!(buffer_from_u64(" 42 ").unwrap(), 42u64.to_le_bytes());
        assert_eq!(buffer_from_u64("0xff").unwrap(), 255u64.to_le_bytes());
        assert_eq!(
            buffer_from_u64("18446744073709551615").unwrap(),
            u64::MAX.to_le_bytes()
        );
        assert_eq!(buffer_from_u64("-0").unwrap(), [0u8; 8]);
    }

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(buffer_from_u64(-1i64), Err(EncodeError::Negative(_))));
        assert!(matches!(buffer_from_u64("-5"), Err(EncodeError::Negative(_))));
        assert!(matches!(buffer_from_u64(-3.0), Err(EncodeError::Negative(_))));
    }

    #[test]
    fn test_rejects_overflow() {
        let above = i128::from(u64::MAX) + 1;
        assert!(matches!(buffer_from_u64(above), Err(EncodeError::Overflow(_))));
        assert!(matches!(
            buffer_from_u64("18446744073709551616"),
            Err(EncodeError::Overflow(_))
        ));
        assert!(matches!(
            buffer_from_u64(18_446_744_073_709_551_616.0),
            Err(EncodeError::Overflow(_))
        ));
    }

    #[test]
    fn test_rejects_non_integral() {
        assert!(matches!(buffer_from_u64(1.5), Err(EncodeError::NonIntegral(_))));
        assert!(matches!(buffer_from_u64(f64::NAN), Err(EncodeError::NonIntegral(_))));
        assert!(matches!(buffer_from_u64("2.5"), Err(EncodeError::NonIntegral(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(buffer_from_u64("abc"), Err(EncodeError::Invalid(_))));
        assert!(matches!(buffer_from_u64("0x"), Err(EncodeError::Invalid(_))));
        assert!(matches!(buffer_from_u64("0b102"), Err(EncodeError::Invalid(_))));
        assert!(matches!(buffer_from_u64("0o8"), Err(EncodeError::Invalid(_))));
        assert!(matches!(buffer_from_u64("+-5"), Err(EncodeError::Invalid(_))));
        assert!(matches!(buffer_from_u64("-0x5"), Err(EncodeError::Invalid(_))));
        assert!(matches!(buffer_from_u64("+0x5"), Err(EncodeError::Invalid(_))));
    }

    #[test]
    fn test_literal_grammar() {
        assert_eq!(buffer_from_u64("").unwrap(), [0u8; 8]);
        assert_eq!(buffer_from_u64("  \t").unwrap(), [0u8; 8]);
        assert_eq!(buffer_from_u64("+5").unwrap(), 5u64.to_le_bytes());
        assert_eq!(buffer_from_u64("0b101").unwrap(), 5u64.to_le_bytes());
        assert_eq!(buffer_from_u64("0B11").unwrap(), 3u64.to_le_bytes());
        assert_eq!(buffer_from_u64("0o17").unwrap(), 15u64.to_le_bytes());
        assert_eq!(buffer_from_u64("0XFF").unwrap(), 255u64.to_le_bytes());
        assert_eq!(
            buffer_from_u64("0xffffffffffffffff").unwrap(),
            u64::MAX.to_le_bytes()
        );
        assert!(matches!(
            buffer_from_u64("0x10000000000000000"),
            Err(EncodeError::Overflow(_))
        ));
    }

    #[test]
    fn test_integral_float_is_accepted() {
        assert_eq!(buffer_from_u64(5000.0).unwrap(), 5000u64.to_le_bytes());
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert_eq!(u64_from_buffer(&[0u8; 7]), Err(EncodeError::BufferLength(7)));
        assert_eq!(u64_from_buffer(&[0u8; 9]), Err(EncodeError::BufferLength(9)));
    }
}
