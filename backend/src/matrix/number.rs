//! Decimal integer tokens.
//!
//! A token is valid when it is an optional `+`/`-` followed by one or more
//! ASCII digits, with nothing else around it. Magnitude is unbounded.

use num_bigint::{BigInt, BigUint, Sign};

/// Split a token into its sign and digit run, or `None` if it is not an integer.
fn split_sign(token: &str) -> Option<(Sign, &str)> {
    let (sign, digits) = match token.as_bytes().first() {
        Some(b'-') => (Sign::Minus, &token[1..]),
        Some(b'+') => (Sign::Plus, &token[1..]),
        _ => (Sign::Plus, token),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some((sign, digits))
}

/// Whether `token` is a base-10 signed integer.
pub fn is_integer(token: &str) -> bool {
    split_sign(token).is_some()
}

/// Parse `token` as an arbitrary-precision base-10 integer.
///
/// Rejects empty strings, surrounding or embedded whitespace, digit
/// separators and any non-digit character.
///
/// # Example
/// ```
/// use matrixops::matrix::number::{parse_integer, canonical};
///
/// let big = parse_integer("-000123456789012345678901234567890").unwrap();
/// assert_eq!(canonical(&big), "-123456789012345678901234567890");
/// assert!(parse_integer(" 1").is_none());
/// assert!(parse_integer("1_000").is_none());
/// ```
pub fn parse_integer(token: &str) -> Option<BigInt> {
    let (sign, digits) = split_sign(token)?;
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), 10)?;
    // from_biguint normalizes a zero magnitude to NoSign, so "-0" is plain zero
    Some(BigInt::from_biguint(sign, magnitude))
}

/// Canonical base-10 text: no leading zeros, `-` only for negative values.
pub fn canonical(value: &BigInt) -> String {
    value.to_str_radix(10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    #[test]
    fn test_accepts_signed_integers() {
        assert_eq!(parse_integer("42"), Some(BigInt::from(42)));
        assert_eq!(parse_integer("-42"), Some(BigInt::from(-42)));
        assert_eq!(parse_integer("+42"), Some(BigInt::from(42)));
        assert_eq!(parse_integer("0"), Some(BigInt::zero()));
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        for token in ["", "-", "+", " 1", "1 ", "1 2", "abc", "1.5", "1e3", "1_000", "--1", "+-1", "0x10", "1,2", "1\n"] {
            assert!(parse_integer(token).is_none(), "accepted {:?}", token);
            assert!(!is_integer(token), "accepted {:?}", token);
        }
    }

    #[test]
    fn test_rejects_non_ascii_digits() {
        // Arabic-Indic digit three
        assert!(parse_integer("\u{0663}").is_none());
    }

    #[test]
    fn test_canonical_form() {
        assert_eq!(canonical(&parse_integer("0007").unwrap()), "7");
        assert_eq!(canonical(&parse_integer("-0").unwrap()), "0");
        assert_eq!(canonical(&parse_integer("-000").unwrap()), "0");
        assert_eq!(canonical(&parse_integer("+15").unwrap()), "15");
        assert!(parse_integer("-0").unwrap().is_zero());
    }

    #[test]
    fn test_beyond_128_bits() {
        let token = "340282366920938463463374607431768211457"; // 2^128 + 1
        let value = parse_integer(token).unwrap();
        assert_eq!(canonical(&value), token);
    }
}
