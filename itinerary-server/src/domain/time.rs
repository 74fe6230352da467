//! Wall-clock time handling for timetabled stops.
//!
//! Stops carry a time of day as an "HH:MM" string with no date component.
//! All arithmetic here is modulo one day: a leg that departs at 23:30 and
//! arrives at 00:15 takes 45 minutes.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day on a timetable, with minute precision.
///
/// Ordering is plain time-of-day ordering: 00:10 sorts before 23:50 even
/// when the former is reached "the next day". Callers that need a duration
/// should use [`ClockTime::minutes_until`], which wraps at midnight.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::ClockTime;
///
/// let dep = ClockTime::parse_hhmm("09:00").unwrap();
/// let arr = ClockTime::parse_hhmm("15:30").unwrap();
/// assert_eq!(dep.minutes_until(arr), 390);
/// assert_eq!(arr.to_string(), "15:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a time from hour and minute, if both are in range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Create a time from minutes after midnight, wrapping past one day.
    pub fn from_minutes(minutes: u32) -> Self {
        let m = minutes % u32::from(MINUTES_PER_DAY);
        // m < 1440 so both components are in range
        Self(NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap_or(NaiveTime::MIN))
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// ```
    /// use itinerary_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("0900").is_err());
    /// assert!(ClockTime::parse_hhmm("9:00").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(&self) -> u16 {
        (self.hour() * 60 + self.minute()) as u16
    }

    /// Minutes from `self` forward to `later`, wrapping at midnight.
    ///
    /// Always in `0..1440`. Equal times give zero, not a full day.
    pub fn minutes_until(&self, later: ClockTime) -> u16 {
        let from = i32::from(self.minutes_since_midnight());
        let to = i32::from(later.minutes_since_midnight());
        (to - from).rem_euclid(i32::from(MINUTES_PER_DAY)) as u16
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
