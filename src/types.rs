use crate::Error;
use crate::consts::{
    DAY_BITS, HOUR_BITS, MAX_DAY, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MAX_SUBSECOND, MIN_DAY,
    MIN_MONTH, MINUTE_BITS, MONTH_BITS, SECOND_BITS, SUBFIELD_COUNT, SUBSECOND_BITS,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One calendar field, from year down to quectosecond.
///
/// The discriminant doubles as the resolution mode: a value whose finest
/// field is `Unit::Second` is tagged with mode `5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Unit {
    Year = 0,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
    Picosecond,
    Femtosecond,
    Attosecond,
    Zeptosecond,
    Yoctosecond,
    Rontosecond,
    Quectosecond,
}

/// Width and inclusive range of a field finer than year
#[derive(Clone, Copy)]
struct FieldSpec {
    name: &'static str,
    bits: u32,
    min:  u16,
    max:  u16,
}

const fn subsecond(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        bits: SUBSECOND_BITS,
        min: 0,
        max: MAX_SUBSECOND,
    }
}

/// Field table indexed by `Unit as usize - 1`
const FIELDS: [FieldSpec; SUBFIELD_COUNT] = [
    FieldSpec {
        name: "month",
        bits: MONTH_BITS,
        min:  MIN_MONTH,
        max:  MAX_MONTH,
    },
    FieldSpec {
        name: "day",
        bits: DAY_BITS,
        min:  MIN_DAY,
        max:  MAX_DAY,
    },
    FieldSpec {
        name: "hour",
        bits: HOUR_BITS,
        min:  0,
        max:  MAX_HOUR,
    },
    FieldSpec {
        name: "minute",
        bits: MINUTE_BITS,
        min:  0,
        max:  MAX_MINUTE,
    },
    FieldSpec {
        name: "second",
        bits: SECOND_BITS,
        min:  0,
        max:  MAX_MINUTE,
    },
    subsecond("millisecond"),
    subsecond("microsecond"),
    subsecond("nanosecond"),
    subsecond("picosecond"),
    subsecond("femtosecond"),
    subsecond("attosecond"),
    subsecond("zeptosecond"),
    subsecond("yoctosecond"),
    subsecond("rontosecond"),
    subsecond("quectosecond"),
];

impl Unit {
    /// Every unit, coarsest first
    pub const ALL: [Self; SUBFIELD_COUNT + 1] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
        Self::Microsecond,
        Self::Nanosecond,
        Self::Picosecond,
        Self::Femtosecond,
        Self::Attosecond,
        Self::Zeptosecond,
        Self::Yoctosecond,
        Self::Rontosecond,
        Self::Quectosecond,
    ];

    const fn field(self) -> Option<FieldSpec> {
        match self {
            Self::Year => None,
            _ => Some(FIELDS[self as usize - 1]),
        }
    }

    /// Lowercase field name, as used in error messages
    pub const fn name(self) -> &'static str {
        match self.field() {
            Some(field) => field.name,
            None => "year",
        }
    }

    /// Fixed bit width of the field. Year has none: its width follows its value.
    pub const fn bits(self) -> Option<u32> {
        match self.field() {
            Some(field) => Some(field.bits),
            None => None,
        }
    }

    /// Packed width, `0` for year which takes whatever bits remain
    pub(crate) const fn width(self) -> u32 {
        match self.bits() {
            Some(bits) => bits,
            None => 0,
        }
    }

    /// Smallest legal value (inclusive)
    pub const fn min_value(self) -> u64 {
        match self.field() {
            Some(field) => field.min as u64,
            None => 0,
        }
    }

    /// Largest legal value (inclusive)
    pub const fn max_value(self) -> u64 {
        match self.field() {
            Some(field) => field.max as u64,
            None => u64::MAX,
        }
    }

    /// Resolution tag carried by a date-time number whose finest field is `self`
    #[inline]
    pub const fn mode(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Unit::mode`]
    pub fn from_mode(mode: u8) -> Option<Self> {
        Self::ALL.get(usize::from(mode)).copied()
    }

    /// Next finer unit, `None` after quectosecond
    pub fn finer(self) -> Option<Self> {
        Self::from_mode(self.mode() + 1)
    }

    /// Next coarser unit, `None` before year
    pub fn coarser(self) -> Option<Self> {
        self.mode().checked_sub(1).and_then(Self::from_mode)
    }

    /// Checks `value` against this field's range
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` naming the field and its range.
    pub fn validate(self, value: u64) -> Result<u64, Error> {
        if value < self.min_value() || value > self.max_value() {
            return Err(self.out_of_range(value));
        }
        Ok(value)
    }

    pub(crate) const fn out_of_range(self, value: u64) -> Error {
        Error::OutOfRange {
            unit: self,
            value,
            min: self.min_value(),
            max: self.max_value(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A calendar value given from year down to some resolution.
///
/// Fields are always a contiguous prefix starting at year, so "a day
/// without a month" cannot be represented. Every stored field is within
/// its documented range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct CalendarTuple {
    year:       u64,
    subfields:  [u16; SUBFIELD_COUNT],
    resolution: Unit,
}

impl CalendarTuple {
    /// Creates a year-only tuple. Every `u64` is a valid year.
    pub const fn from_year(year: u64) -> Self {
        Self {
            year,
            subfields: [0; SUBFIELD_COUNT],
            resolution: Unit::Year,
        }
    }

    /// Appends the next finer field.
    ///
    /// # Errors
    /// Returns `Error::TooManyFields` past quectosecond, or
    /// `Error::OutOfRange` when `value` is outside the field's range.
    pub fn push(mut self, value: u64) -> Result<Self, Error> {
        let unit = self
            .resolution
            .finer()
            .ok_or(Error::TooManyFields(SUBFIELD_COUNT + 2))?;
        let value = unit.validate(value)?;
        self.subfields[unit as usize - 1] =
            u16::try_from(value).map_err(|_| unit.out_of_range(value))?;
        self.resolution = unit;
        Ok(self)
    }

    /// Creates a tuple from fields ordered year first.
    ///
    /// # Errors
    /// Returns `Error::Empty` for an empty slice, `Error::TooManyFields` for
    /// more than sixteen fields, or `Error::OutOfRange` for any bad field.
    pub fn from_fields(fields: &[u64]) -> Result<Self, Error> {
        let (&year, rest) = fields.split_first().ok_or(Error::Empty)?;
        if rest.len() > SUBFIELD_COUNT {
            return Err(Error::TooManyFields(fields.len()));
        }
        rest.iter()
            .try_fold(Self::from_year(year), |tuple, &value| tuple.push(value))
    }

    /// Creates a tuple from a year and optional finer fields (month first).
    ///
    /// # Errors
    /// Returns `Error::MissingField` when a field is given after an absent
    /// coarser one, plus every error of [`CalendarTuple::from_fields`].
    pub fn from_options(year: u64, rest: &[Option<u64>]) -> Result<Self, Error> {
        if rest.len() > SUBFIELD_COUNT {
            return Err(Error::TooManyFields(rest.len() + 1));
        }
        let mut tuple = Self::from_year(year);
        let mut missing = None;
        for (&unit, value) in Unit::ALL[1..].iter().zip(rest) {
            match (value, missing) {
                (Some(_), Some(missing)) => return Err(Error::MissingField { unit, missing }),
                (Some(value), None) => tuple = tuple.push(*value)?,
                (None, None) => missing = Some(unit),
                (None, Some(_)) => {}
            }
        }
        Ok(tuple)
    }

    /// Year, month and day
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` for a bad month or day.
    pub fn ymd(year: u64, month: u64, day: u64) -> Result<Self, Error> {
        Self::from_fields(&[year, month, day])
    }

    /// Year through second
    ///
    /// # Errors
    /// Returns `Error::OutOfRange` for any bad field.
    pub fn ymd_hms(
        year: u64,
        month: u64,
        day: u64,
        hour: u64,
        minute: u64,
        second: u64,
    ) -> Result<Self, Error> {
        Self::from_fields(&[year, month, day, hour, minute, second])
    }

    /// Returns the year (always present)
    #[inline]
    pub const fn year(&self) -> u64 {
        self.year
    }

    /// Returns the value of `unit` if this tuple carries it
    pub const fn get(&self, unit: Unit) -> Option<u64> {
        match unit {
            Unit::Year => Some(self.year),
            _ if (unit as u8) <= (self.resolution as u8) => {
                Some(self.subfields[unit as usize - 1] as u64)
            }
            _ => None,
        }
    }

    /// Value of `unit`, or its minimum when absent
    pub(crate) const fn get_or_min(&self, unit: Unit) -> u64 {
        match self.get(unit) {
            Some(value) => value,
            None => unit.min_value(),
        }
    }

    fn narrow<T: TryFrom<u64>>(&self, unit: Unit) -> Option<T> {
        self.get(unit).and_then(|value| T::try_from(value).ok())
    }

    /// Returns the month component if present
    pub fn month(&self) -> Option<u8> {
        self.narrow(Unit::Month)
    }

    /// Returns the day component if present
    pub fn day(&self) -> Option<u8> {
        self.narrow(Unit::Day)
    }

    pub fn hour(&self) -> Option<u8> {
        self.narrow(Unit::Hour)
    }

    pub fn minute(&self) -> Option<u8> {
        self.narrow(Unit::Minute)
    }

    pub fn second(&self) -> Option<u8> {
        self.narrow(Unit::Second)
    }

    pub fn millisecond(&self) -> Option<u16> {
        self.narrow(Unit::Millisecond)
    }

    pub fn microsecond(&self) -> Option<u16> {
        self.narrow(Unit::Microsecond)
    }

    pub fn nanosecond(&self) -> Option<u16> {
        self.narrow(Unit::Nanosecond)
    }

    /// Finest unit present
    #[inline]
    pub const fn resolution(&self) -> Unit {
        self.resolution
    }

    /// Number of fields including year, `1..=16`
    #[inline]
    pub const fn field_count(&self) -> usize {
        self.resolution as usize + 1
    }

    /// All fields, year first
    pub fn fields(&self) -> Vec<u64> {
        Unit::ALL[..self.field_count()]
            .iter()
            .map(|&unit| self.get_or_min(unit))
            .collect()
    }

    /// Drops every field finer than `unit`
    pub fn truncate(mut self, unit: Unit) -> Self {
        if unit < self.resolution {
            self.subfields[unit as usize..].fill(0);
            self.resolution = unit;
        }
        self
    }

    /// Converts to a `chrono` date-time. Missing month and day read as `1`,
    /// missing time fields as `0`.
    ///
    /// # Errors
    /// Returns `Error::SubNanosecond` when any field finer than nanosecond is
    /// present, or `Error::InvalidDate` when the fields do not name a real
    /// calendar instant (February 30th, a year beyond `chrono`'s range).
    pub fn to_naive_datetime(&self) -> Result<NaiveDateTime, Error> {
        if self.resolution > Unit::Nanosecond {
            return Err(Error::SubNanosecond(self.resolution));
        }
        self.to_naive_datetime_lossy()
    }

    /// Like [`CalendarTuple::to_naive_datetime`], but silently drops fields
    /// finer than nanosecond.
    ///
    /// # Errors
    /// Returns `Error::InvalidDate` when the fields do not name a real
    /// calendar instant.
    pub fn to_naive_datetime_lossy(&self) -> Result<NaiveDateTime, Error> {
        let invalid = || Error::InvalidDate(self.fields());
        let field = |unit| {
            u32::try_from(self.get_or_min(unit)).map_err(|_| invalid())
        };

        let year = i32::try_from(self.year).map_err(|_| invalid())?;
        let nano = field(Unit::Millisecond)? * 1_000_000
            + field(Unit::Microsecond)? * 1_000
            + field(Unit::Nanosecond)?;

        NaiveDate::from_ymd_opt(year, field(Unit::Month)?, field(Unit::Day)?)
            .and_then(|date| {
                date.and_hms_nano_opt(
                    field(Unit::Hour).ok()?,
                    field(Unit::Minute).ok()?,
                    field(Unit::Second).ok()?,
                    nano,
                )
            })
            .ok_or_else(invalid)
    }
}

impl PartialOrd for CalendarTuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarTuple {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare earliest instant covered first…
        Unit::ALL
            .iter()
            .map(|&unit| self.get_or_min(unit).cmp(&other.get_or_min(unit)))
            .find(|ord| ord.is_ne())
            // …then break ties by precision (less precise first).
            .unwrap_or_else(|| self.resolution.cmp(&other.resolution))
    }
}

impl TryFrom<&[u64]> for CalendarTuple {
    type Error = Error;

    fn try_from(value: &[u64]) -> Result<Self, Self::Error> {
        Self::from_fields(value)
    }
}

impl TryFrom<Vec<u64>> for CalendarTuple {
    type Error = Error;

    fn try_from(value: Vec<u64>) -> Result<Self, Self::Error> {
        Self::from_fields(&value)
    }
}

impl TryFrom<&[i64]> for CalendarTuple {
    type Error = Error;

    /// Accepts signed fields, rejecting any negative one
    fn try_from(value: &[i64]) -> Result<Self, Self::Error> {
        let fields = value
            .iter()
            .map(|&field| u64::try_from(field).map_err(|_| Error::NegativeValue(field.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_fields(&fields)
    }
}

impl From<CalendarTuple> for Vec<u64> {
    fn from(tuple: CalendarTuple) -> Self {
        tuple.fields()
    }
}

impl TryFrom<NaiveDateTime> for CalendarTuple {
    type Error = Error;

    /// Produces a nanosecond-resolution tuple.
    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        let year = u64::try_from(value.year())
            .map_err(|_| Error::NegativeValue(value.year().to_string()))?;
        // chrono reports a leap second as nanosecond >= 1e9
        let nano = u64::from(value.nanosecond().min(999_999_999));
        Self::from_fields(&[
            year,
            u64::from(value.month()),
            u64::from(value.day()),
            u64::from(value.hour()),
            u64::from(value.minute()),
            u64::from(value.second()),
            nano / 1_000_000,
            nano / 1_000 % 1_000,
            nano % 1_000,
        ])
    }
}
