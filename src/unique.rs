use crate::consts::{ALPHABET, DEFAULT_RANDOM_LENGTH, TIME_DIGITS};
use crate::{CalendarTuple, Error, Unit, base62, date_number, time_number};
use rand::Rng;
use rand::rngs::ThreadRng;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Source of the current wall-clock time in UTC.
///
/// Fields the returned tuple does not carry are read as their minimum, so
/// a clock may report at any resolution.
pub trait Clock {
    /// # Errors
    /// Returns an error when the current time cannot be expressed as a
    /// calendar tuple.
    fn now(&self) -> Result<CalendarTuple, Error>;
}

/// Reads the system clock through `chrono`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<CalendarTuple, Error> {
        CalendarTuple::try_from(chrono::Utc::now().naive_utc())
    }
}

impl<F> Clock for F
where
    F: Fn() -> Result<CalendarTuple, Error>,
{
    fn now(&self) -> Result<CalendarTuple, Error> {
        self()
    }
}

/// Draws `length` characters uniformly from `0-9A-Za-z`
pub fn random_string<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

/// Settings for [`UniqueStringGenerator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Characters in the random prefix
    pub random_length: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            random_length: DEFAULT_RANDOM_LENGTH,
        }
    }
}

/// Builds strings of the form `random + time + date`.
///
/// The time part is the [`time_number`] of the clock reading in base 62,
/// zero-padded to 8 characters. The date part is its [`date_number`] in
/// base 62, unpadded. The random prefix spreads keys across shards; the
/// suffix orders strings that share a prefix roughly by time.
#[derive(Debug, Clone)]
pub struct UniqueStringGenerator<C = SystemClock, R = ThreadRng> {
    clock:  C,
    rng:    R,
    config: GeneratorConfig,
}

impl UniqueStringGenerator {
    /// System clock and thread-local RNG
    pub fn new() -> Self {
        Self::with_parts(SystemClock, rand::thread_rng())
    }
}

impl Default for UniqueStringGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, R: Rng> UniqueStringGenerator<C, R> {
    pub fn with_parts(clock: C, rng: R) -> Self {
        Self {
            clock,
            rng,
            config: GeneratorConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a string with the configured prefix length.
    ///
    /// # Errors
    /// See [`UniqueStringGenerator::generate_with_length`].
    pub fn generate(&mut self) -> Result<String, Error> {
        self.generate_with_length(self.config.random_length)
    }

    /// Generates a string with a `random_length`-character prefix.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` for a zero length, the clock's own
    /// errors, and `Error::Overflow` for a year too wide for a date number.
    pub fn generate_with_length(&mut self, random_length: usize) -> Result<String, Error> {
        if random_length == 0 {
            return Err(Error::InvalidArgument(
                "random length must be positive".to_owned(),
            ));
        }

        let now = self.clock.now()?;
        let time = time_number::encode(
            now.get_or_min(Unit::Hour),
            now.get_or_min(Unit::Minute),
            now.get_or_min(Unit::Second),
            now.get_or_min(Unit::Millisecond),
            now.get_or_min(Unit::Microsecond),
            now.get_or_min(Unit::Nanosecond),
        )?;
        let date = date_number::encode(
            now.year(),
            now.get_or_min(Unit::Month),
            now.get_or_min(Unit::Day),
        )?;

        let mut out = random_string(&mut self.rng, random_length);
        out.push_str(&base62::pad(&base62::encode_u64(time), TIME_DIGITS));
        out.push_str(&base62::encode_u64(date));

        trace!(?now, time, date, length = out.len(), "generated unique string");
        Ok(out)
    }
}

/// Generates a unique string from the system clock and thread-local RNG.
///
/// # Errors
/// See [`UniqueStringGenerator::generate_with_length`].
pub fn generate_unique_string(random_length: usize) -> Result<String, Error> {
    UniqueStringGenerator::new().generate_with_length(random_length)
}
