use crate::consts::{MODE_BITS, SUBFIELD_COUNT};
use crate::prelude::*;
use crate::{CalendarTuple, Error, Unit, base62};
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// A calendar value packed into one integer, tagged with its resolution.
///
/// The year fills the most significant bits, each finer field follows in
/// its fixed width, and the low 4 bits hold the resolution mode (`0` for
/// year only up to `15` for quectosecond). Within one resolution, numeric
/// order is chronological order. Across resolutions it is not; decode first.
///
/// The number itself is arbitrary precision, but [`CalendarTuple`] holds the
/// year as a `u64`: any year up to `u64::MAX` round-trips, and decoding a
/// number with a wider year fails with `Error::Overflow`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deref, From, Into)]
pub struct DateTimeNumber(BigUint);

impl DateTimeNumber {
    /// Packs a calendar tuple and appends its resolution tag
    pub fn encode(tuple: &CalendarTuple) -> Self {
        let tag = BigUint::from(tuple.resolution().mode());
        Self((Self::encode_untagged(tuple) << MODE_BITS) | tag)
    }

    /// Packs a calendar tuple without the resolution tag.
    ///
    /// The result cannot be decoded on its own; callers must know the
    /// resolution out of band.
    pub fn encode_untagged(tuple: &CalendarTuple) -> BigUint {
        Unit::ALL[1..tuple.field_count()]
            .iter()
            .fold(BigUint::from(tuple.year()), |n, &unit| {
                (n << unit.width()) | BigUint::from(tuple.get_or_min(unit))
            })
    }

    /// Resolution recorded in the tag
    pub fn resolution(&self) -> Unit {
        Unit::ALL[low_bits(&self.0, MODE_BITS) as usize]
    }

    /// Unpacks into the calendar tuple that produced this number.
    ///
    /// # Errors
    /// Returns `Error::Overflow` when the year does not fit in a `u64`, or
    /// `Error::Malformed` when a field is outside its range (only possible
    /// for numbers that did not come from [`DateTimeNumber::encode`]).
    pub fn decode(&self) -> Result<CalendarTuple, Error> {
        let count = self.resolution().mode() as usize + 1;
        let mut fields = [0u64; SUBFIELD_COUNT + 1];
        let mut rest = &self.0 >> MODE_BITS;

        // finest field sits lowest
        for (&unit, slot) in Unit::ALL[1..count].iter().zip(&mut fields[1..count]).rev() {
            *slot = low_bits(&rest, unit.width());
            rest >>= unit.width();
        }
        fields[0] = rest.to_u64().ok_or(Error::Overflow("u64 year"))?;

        CalendarTuple::from_fields(&fields[..count]).map_err(|err| Error::Malformed {
            kind:   "date-time number",
            reason: err.to_string(),
        })
    }

    /// Base-62 text of the tagged number
    pub fn to_base62(&self) -> String {
        base62::encode_biguint(&self.0)
    }

    /// Parses base-62 text produced by [`DateTimeNumber::to_base62`].
    ///
    /// # Errors
    /// Returns the errors of [`base62::decode`].
    pub fn from_base62(s: &str) -> Result<Self, Error> {
        base62::decode(s).map(Self)
    }
}

impl From<&CalendarTuple> for DateTimeNumber {
    fn from(tuple: &CalendarTuple) -> Self {
        Self::encode(tuple)
    }
}

impl TryFrom<&DateTimeNumber> for CalendarTuple {
    type Error = Error;

    fn try_from(value: &DateTimeNumber) -> Result<Self, Self::Error> {
        value.decode()
    }
}

impl serde::Serialize for DateTimeNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_base62())
    }
}

impl<'de> serde::Deserialize<'de> for DateTimeNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_base62(&s).map_err(serde::de::Error::custom)
    }
}

/// Lowest `bits` bits of `n` (`bits <= 64`)
fn low_bits(n: &BigUint, bits: u32) -> u64 {
    let low = n.iter_u64_digits().next().unwrap_or(0);
    low & u64::MAX.checked_shr(u64::BITS - bits).unwrap_or(0)
}
