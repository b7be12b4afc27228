//! Base-62 (duosexagesimal) encoding of non-negative integers.
//!
//! Digits are `0-9`, `A-Z`, `a-z` for values 0 through 61, most significant
//! digit first. Zero encodes to `"0"` and no other output has a leading zero.
//! Values that fit in a `u64` take a machine-word path; larger ones go
//! through [`BigUint`]. Both paths produce identical strings.

use crate::Error;
use crate::consts::{ALPHABET, BASE};
use num_bigint::{BigUint, ToBigUint};
use num_traits::ToPrimitive;
use std::fmt;

/// Marks bytes outside the alphabet in [`DIGIT_VALUES`]
const INVALID: u8 = 0xFF;

/// Maps each ASCII byte to its digit value, or `INVALID`
const DIGIT_VALUES: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Longest string that always decodes into a `u64` (62^10 < 2^64 < 62^11)
const U64_SAFE_DIGITS: usize = 10;

/// Encodes any non-negative integer: every primitive integer, `BigUint`
/// and `BigInt`.
///
/// # Errors
/// Returns `Error::NegativeValue` for values below zero.
pub fn encode<T>(value: &T) -> Result<String, Error>
where
    T: ToBigUint + fmt::Display + ?Sized,
{
    let n = value
        .to_biguint()
        .ok_or_else(|| Error::NegativeValue(value.to_string()))?;
    Ok(match n.to_u64() {
        Some(small) => encode_u64(small),
        None => encode_biguint(&n),
    })
}

/// Encodes a machine word
pub fn encode_u64(mut n: u64) -> String {
    if n == 0 {
        return "0".to_owned();
    }
    // 11 digits cover u64::MAX
    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(ALPHABET[(n % u64::from(BASE)) as usize]);
        n /= u64::from(BASE);
    }
    digits.iter().rev().map(|&d| char::from(d)).collect()
}

/// Encodes an arbitrary-precision integer
pub fn encode_biguint(n: &BigUint) -> String {
    n.to_radix_be(BASE)
        .into_iter()
        .map(|d| char::from(ALPHABET[usize::from(d)]))
        .collect()
}

/// Decodes into an arbitrary-precision integer. Leading zeros are accepted.
///
/// # Errors
/// Returns `Error::Empty` for an empty string, or `Error::InvalidCharacter`
/// for anything outside `0-9A-Za-z`.
pub fn decode(s: &str) -> Result<BigUint, Error> {
    let digits = digit_values(s)?;
    if digits.len() <= U64_SAFE_DIGITS {
        return Ok(BigUint::from(accumulate_u64(&digits)?));
    }
    BigUint::from_radix_be(&digits, BASE).ok_or_else(|| Error::Malformed {
        kind:   "base-62 string",
        reason: s.to_owned(),
    })
}

/// Decodes into a machine word.
///
/// # Errors
/// Returns `Error::Overflow` when the value exceeds `u64::MAX`, plus every
/// error of [`decode`].
pub fn decode_u64(s: &str) -> Result<u64, Error> {
    accumulate_u64(&digit_values(s)?)
}

/// Left-pads `s` with `'0'` to at least `width` characters
pub fn pad(s: &str, width: usize) -> String {
    format!("{s:0>width$}")
}

fn accumulate_u64(digits: &[u8]) -> Result<u64, Error> {
    digits.iter().try_fold(0u64, |acc, &d| {
        acc.checked_mul(u64::from(BASE))
            .and_then(|acc| acc.checked_add(u64::from(d)))
            .ok_or(Error::Overflow("u64"))
    })
}

fn digit_values(s: &str) -> Result<Vec<u8>, Error> {
    if s.is_empty() {
        return Err(Error::Empty);
    }
    s.char_indices()
        .map(|(position, character)| {
            let value = if character.is_ascii() {
                DIGIT_VALUES[character as usize]
            } else {
                INVALID
            };
            if value == INVALID {
                return Err(Error::InvalidCharacter {
                    character,
                    position,
                });
            }
            Ok(value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    /// 2^53 - 1, the largest integer an IEEE double holds exactly
    const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

    #[test]
    fn test_length_boundaries() {
        let cases: [(u64, &str); 18] = [
            (0, "0"),
            (1, "1"),
            (61, "z"),
            (62, "10"),
            (3843, "zz"),
            (3844, "100"),
            (238_327, "zzz"),
            (238_328, "1000"),
            (14_776_335, "zzzz"),
            (14_776_336, "10000"),
            (916_132_831, "zzzzz"),
            (916_132_832, "100000"),
            (56_800_235_583, "zzzzzz"),
            (56_800_235_584, "1000000"),
            (3_521_614_606_207, "zzzzzzz"),
            (3_521_614_606_208, "10000000"),
            (218_340_105_584_895, "zzzzzzzz"),
            (218_340_105_584_896, "100000000"),
        ];

        for (decimal, expected) in cases {
            assert_eq!(encode_u64(decimal), expected, "encode_u64({decimal})");
            assert_eq!(encode(&decimal).unwrap(), expected, "encode({decimal})");
            assert_eq!(
                encode_biguint(&BigUint::from(decimal)),
                expected,
                "encode_biguint({decimal})"
            );
            assert_eq!(decode_u64(expected).unwrap(), decimal);
            assert_eq!(decode(expected).unwrap(), BigUint::from(decimal));
        }
    }

    #[test]
    fn test_max_safe_integer() {
        assert_eq!(encode_u64(MAX_SAFE_INTEGER), "fFgnDxSe7");
        assert_eq!(encode(&BigInt::from(MAX_SAFE_INTEGER)).unwrap(), "fFgnDxSe7");
        assert_eq!(encode_u64(MAX_SAFE_INTEGER + 1), "fFgnDxSe8");
        assert_eq!(decode_u64("fFgnDxSe7").unwrap(), MAX_SAFE_INTEGER);
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(encode(&-1i64), Err(Error::NegativeValue("-1".to_owned())));
        assert!(matches!(
            encode(&BigInt::from(-5)),
            Err(Error::NegativeValue(_))
        ));
    }

    #[test]
    fn test_primitive_types() {
        assert_eq!(encode(&61u8).unwrap(), "z");
        assert_eq!(encode(&62i32).unwrap(), "10");
        assert_eq!(encode(&0i64).unwrap(), "0");
    }

    #[test]
    fn test_beyond_u64() {
        let big = BigUint::from(u128::MAX);
        let text = encode(&big).unwrap();
        assert_eq!(encode(&u128::MAX).unwrap(), text);
        assert_eq!(decode(&text).unwrap(), big);
        assert_eq!(decode_u64(&text), Err(Error::Overflow("u64")));

        let huge = BigUint::from(1u8) << 300u32;
        assert_eq!(decode(&encode_biguint(&huge)).unwrap(), huge);
    }

    #[test]
    fn test_u64_max() {
        let text = encode_u64(u64::MAX);
        assert_eq!(text.len(), 11);
        assert_eq!(decode_u64(&text).unwrap(), u64::MAX);
        assert_eq!(decode(&text).unwrap(), BigUint::from(u64::MAX));
    }

    #[test]
    fn test_canonical_form() {
        for n in (0..100_000u64).step_by(7) {
            let text = encode_u64(n);
            assert!(n == 0 || !text.starts_with('0'), "{n} => {text}");
        }
    }

    #[test]
    fn test_leading_zeros_accepted() {
        assert_eq!(decode_u64("007").unwrap(), 7);
        assert_eq!(decode("0000000000000010").unwrap(), BigUint::from(62u8));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            decode("12-4"),
            Err(Error::InvalidCharacter {
                character: '-',
                position:  2,
            })
        );
        assert!(matches!(
            decode_u64("ab é"),
            Err(Error::InvalidCharacter { character: ' ', .. })
        ));
        assert!(matches!(
            decode("é"),
            Err(Error::InvalidCharacter { character: 'é', .. })
        ));
        assert_eq!(decode(""), Err(Error::Empty));
        assert_eq!(decode_u64(""), Err(Error::Empty));
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("z", 8), "0000000z");
        assert_eq!(pad("123456789", 8), "123456789");
    }

    #[test]
    fn test_alphabet_order() {
        for (value, &c) in ALPHABET.iter().enumerate() {
            assert_eq!(usize::from(DIGIT_VALUES[usize::from(c)]), value);
        }
        assert_eq!(DIGIT_VALUES[usize::from(b'/')], INVALID);
    }
}
