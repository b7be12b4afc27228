//! Fixed 47-bit packing of the time of day down to the nanosecond.
//!
//! Hour sits in the least significant bits, nanosecond in the most
//! significant. There is no resolution tag; all six fields are always
//! present.

use crate::consts::{
    HOUR_BITS, MAX_TIME_NUMBER, MINUTE_BITS, SECOND_BITS, SUBSECOND_BITS, TIME_NUMBER_BITS,
};
use crate::{Error, Unit};

/// Fields in packing order, least significant first
const LAYOUT: [(Unit, u32); 6] = [
    (Unit::Hour, HOUR_BITS),
    (Unit::Minute, MINUTE_BITS),
    (Unit::Second, SECOND_BITS),
    (Unit::Millisecond, SUBSECOND_BITS),
    (Unit::Microsecond, SUBSECOND_BITS),
    (Unit::Nanosecond, SUBSECOND_BITS),
];

/// Packs a time of day into a time number.
///
/// # Errors
/// Returns `Error::OutOfRange` naming the first field outside its range.
pub fn encode(
    hour: u64,
    minute: u64,
    second: u64,
    millisecond: u64,
    microsecond: u64,
    nanosecond: u64,
) -> Result<u64, Error> {
    let values = [hour, minute, second, millisecond, microsecond, nanosecond];
    let mut n = 0;
    let mut shift = 0;
    for (&(unit, bits), value) in LAYOUT.iter().zip(values) {
        n |= unit.validate(value)? << shift;
        shift += bits;
    }
    Ok(n)
}

/// Unpacks a time number into
/// `(hour, minute, second, millisecond, microsecond, nanosecond)`.
///
/// # Errors
/// Returns `Error::Malformed` for bits above bit 46 or a field no encoder
/// produces, such as hour 31.
pub fn decode(n: u64) -> Result<(u8, u8, u8, u16, u16, u16), Error> {
    if n > MAX_TIME_NUMBER {
        return Err(Error::Malformed {
            kind:   "time number",
            reason: format!("{n} is wider than {TIME_NUMBER_BITS} bits"),
        });
    }

    let mut fields = [0u16; 6];
    let mut rest = n;
    for (field, &(unit, bits)) in fields.iter_mut().zip(&LAYOUT) {
        let value = rest & ((1 << bits) - 1);
        rest >>= bits;
        let value = unit.validate(value).map_err(|err| Error::Malformed {
            kind:   "time number",
            reason: err.to_string(),
        })?;
        // every field is at most 10 bits wide
        *field = value as u16;
    }

    let [hour, minute, second, millisecond, microsecond, nanosecond] = fields;
    Ok((
        hour as u8,
        minute as u8,
        second as u8,
        millisecond,
        microsecond,
        nanosecond,
    ))
}
