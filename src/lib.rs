//! Sortable integer encodings of calendar date-times.
//!
//! Three codecs pack calendar fields into integers, and a base-62 codec turns
//! those integers into compact strings:
//!
//! - [`DateTimeNumber`]: year down to quectosecond, with a 4-bit resolution
//!   tag in the low bits, arbitrary precision.
//! - [`date_number`]: year, month and day with a self-describing year width.
//! - [`time_number`]: hour down to nanosecond in a fixed 47-bit layout.
//! - [`base62`]: non-negative integers to and from `0-9A-Za-z` strings.
//!
//! [`generate_unique_string`] chains them into a random-prefixed,
//! time-suffixed identifier.

pub mod base62;
mod consts;
pub mod date_number;
mod datetime_number;
mod prelude;
pub mod time_number;
mod types;
mod unique;

pub use consts::*;
pub use datetime_number::DateTimeNumber;
pub use types::{CalendarTuple, Unit};
pub use unique::{
    Clock, GeneratorConfig, SystemClock, UniqueStringGenerator, generate_unique_string,
    random_string,
};

/// Errors raised by every codec in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A field is outside its documented range.
    #[error("{unit} = {value} is outside {min}..={max}")]
    OutOfRange {
        unit:  Unit,
        value: u64,
        min:   u64,
        max:   u64,
    },

    /// A finer field was given while a coarser one is absent.
    #[error("Cannot have {unit} without {missing}")]
    MissingField { unit: Unit, missing: Unit },

    /// More fields than year through quectosecond.
    #[error("Too many calendar fields: expected 1-16, found {0}")]
    TooManyFields(usize),

    /// A negative value where only non-negative integers are accepted.
    #[error("Negative value: {0}")]
    NegativeValue(String),

    /// Empty input.
    #[error("Empty input")]
    Empty,

    /// A character outside `0-9A-Za-z` in a base-62 string.
    #[error("Invalid base-62 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// A value does not fit the fixed-width integer it must be stored in.
    #[error("Value does not fit in {0}")]
    Overflow(&'static str),

    /// An encoded integer that no conforming encoder could have produced.
    #[error("Malformed {kind}: {reason}")]
    Malformed { kind: &'static str, reason: String },

    /// A calendar tuple carries fields finer than `chrono` can hold.
    #[error("Resolution {0} is not representable as a calendar type with sub-nanosecond fields")]
    SubNanosecond(Unit),

    /// The fields do not name a real calendar instant.
    #[error("Invalid calendar date: {0:?}")]
    InvalidDate(Vec<u64>),

    /// A caller-supplied parameter is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
