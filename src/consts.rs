/// Base-62 digits in ascending value order
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Radix of the base-62 encoding
pub const BASE: u32 = 62;

/// Width of the resolution tag in the low bits of a date-time number
pub const MODE_BITS: u32 = 4;

/// Bit width of the month field
pub const MONTH_BITS: u32 = 4;
/// Bit width of the day field
pub const DAY_BITS: u32 = 5;
/// Bit width of the hour field
pub const HOUR_BITS: u32 = 5;
/// Bit width of the minute field
pub const MINUTE_BITS: u32 = 6;
/// Bit width of the second field
pub const SECOND_BITS: u32 = 6;
/// Bit width of each sub-second field (millisecond and finer)
pub const SUBSECOND_BITS: u32 = 10;

/// Maximum valid month (December)
pub const MAX_MONTH: u16 = 12;
/// Maximum day of any month
pub const MAX_DAY: u16 = 31;
/// Maximum hour of the day
pub const MAX_HOUR: u16 = 23;
/// Maximum minute or second
pub const MAX_MINUTE: u16 = 59;
/// Maximum value of each sub-second field
pub const MAX_SUBSECOND: u16 = 999;

/// First month of the year, used for lower bounds
pub const MIN_MONTH: u16 = 1;
/// First day of month, used for lower bounds
pub const MIN_DAY: u16 = 1;

/// Number of fields finer than year
pub const SUBFIELD_COUNT: usize = 15;

/// Widest year the date number can carry while the packed value still fits in `u64`
pub const DATE_NUMBER_MAX_YEAR_BITS: u32 = u64::BITS - 1 - DAY_BITS - MONTH_BITS;

/// Total width of a time number
pub const TIME_NUMBER_BITS: u32 = HOUR_BITS + MINUTE_BITS + SECOND_BITS + 3 * SUBSECOND_BITS;
/// Largest value a time number can take
pub const MAX_TIME_NUMBER: u64 = (1 << TIME_NUMBER_BITS) - 1;
/// Base-62 width of the time component of a unique string (62^8 > 2^47)
pub const TIME_DIGITS: usize = 8;

/// Default length of the random prefix of a unique string
pub const DEFAULT_RANDOM_LENGTH: usize = 14;
