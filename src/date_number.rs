//! Legacy year/month/day packing with a self-describing year width.
//!
//! From the most significant bit down, a date number holds a constant
//! marker `1`, the day (5 bits), the month (4 bits) and the year in as few
//! bits as it needs (at least one). The marker's position tells the decoder
//! how wide the year is. This layout is fixed; it is not bit-compatible with
//! [`DateTimeNumber`](crate::DateTimeNumber).

use crate::consts::{DATE_NUMBER_MAX_YEAR_BITS, DAY_BITS, MONTH_BITS};
use crate::{Error, Unit};

const MARKER_BITS: u32 = 1;

/// Bits a year occupies in a date number
pub const fn year_width(year: u64) -> u32 {
    let width = u64::BITS - year.leading_zeros();
    if width == 0 { 1 } else { width }
}

/// Packs a date into a date number.
///
/// # Errors
/// Returns `Error::OutOfRange` for a month outside `1..=12` or a day outside
/// `1..=31`, and `Error::Overflow` for a year wider than 54 bits.
pub fn encode(year: u64, month: u64, day: u64) -> Result<u64, Error> {
    let month = Unit::Month.validate(month)?;
    let day = Unit::Day.validate(day)?;
    let width = year_width(year);
    if width > DATE_NUMBER_MAX_YEAR_BITS {
        return Err(Error::Overflow("u64 date number"));
    }
    let marker = 1 << (width + MONTH_BITS + DAY_BITS);
    Ok(marker | (day << (width + MONTH_BITS)) | (month << width) | year)
}

/// Unpacks a date number into `(year, month, day)`.
///
/// # Errors
/// Returns `Error::Malformed` when `n` is too short to hold every field or
/// carries a month or day no encoder produces.
pub fn decode(n: u64) -> Result<(u64, u8, u8), Error> {
    let malformed = |reason: &str| Error::Malformed {
        kind:   "date number",
        reason: format!("{reason} in {n:#b}"),
    };

    let total = u64::BITS - n.leading_zeros();
    let width = total
        .checked_sub(MARKER_BITS + DAY_BITS + MONTH_BITS)
        .filter(|&width| width > 0)
        .ok_or_else(|| malformed("too few bits"))?;

    let year = n & ((1 << width) - 1);
    let month = (n >> width) & ((1 << MONTH_BITS) - 1);
    let day = (n >> (width + MONTH_BITS)) & ((1 << DAY_BITS) - 1);

    let month = Unit::Month
        .validate(month)
        .map_err(|_| malformed("month out of range"))?;
    let day = Unit::Day
        .validate(day)
        .map_err(|_| malformed("day out of range"))?;

    // both fit: month < 2^4, day < 2^5
    Ok((year, month as u8, day as u8))
}
