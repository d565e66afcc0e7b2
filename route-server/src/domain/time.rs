//! Wall-clock time handling for timetabled legs.
//!
//! Legs carry departure and arrival times as "HH:MM" strings with no date.
//! This module parses them into minute-of-day values and does the small
//! amount of arithmetic the planner needs: leg durations and connection
//! gaps, each allowing a single wrap past midnight.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A time of day with minute precision and no date.
///
/// # Examples
///
/// ```
/// use route_server::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("14:30").unwrap();
/// assert_eq!(t.minutes_since_midnight(), 870);
/// assert_eq!(t.to_string(), "14:30");
///
/// assert!(ClockTime::parse_hhmm("1430").is_err());
/// assert!(ClockTime::parse_hhmm("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parse a time from strict "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new(s, "expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new(s, "expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new(s, "invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new(s, "hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new(s, "invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new(s, "minute must be 0-59"));
        }

        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::new(s, "invalid time"))
    }

    /// Build from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Minutes elapsed since midnight (0..1440).
    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Running time of a leg departing at `self` and arriving at `arrival`.
    ///
    /// An arrival earlier than the departure is taken to be on the next
    /// day. Equal times give a zero duration.
    ///
    /// ```
    /// use route_server::domain::ClockTime;
    ///
    /// let dep = ClockTime::parse_hhmm("23:00").unwrap();
    /// let arr = ClockTime::parse_hhmm("01:00").unwrap();
    /// let d = dep.duration_until(arr);
    /// assert_eq!((d.hrs, d.min), (2, 0));
    /// ```
    pub fn duration_until(&self, arrival: ClockTime) -> TravelDuration {
        TravelDuration::from_minutes(wrapped_delta(
            self.minutes_since_midnight(),
            arrival.minutes_since_midnight(),
        ))
    }

    /// Minutes spent waiting between arriving at `self` and a departure.
    ///
    /// Same wrap rule as [`ClockTime::duration_until`]: a departure earlier
    /// in the day than the arrival is assumed to be tomorrow.
    pub fn connection_gap(&self, departure: ClockTime) -> u32 {
        wrapped_delta(
            self.minutes_since_midnight(),
            departure.minutes_since_midnight(),
        )
    }
}

/// `to - from` in minutes, adding one day if negative.
fn wrapped_delta(from: u32, to: u32) -> u32 {
    if to < from {
        to + MINUTES_PER_DAY - from
    } else {
        to - from
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

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An elapsed time split into whole hours and remaining minutes.
///
/// `min` is always below 60. The derived ordering compares hours first,
/// then minutes, which for normalized values is the same as comparing
/// total minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TravelDuration {
    pub hrs: u32,
    pub min: u32,
}

impl TravelDuration {
    /// Normalize a minute count into hours and minutes.
    pub fn from_minutes(total: u32) -> Self {
        Self {
            hrs: total / 60,
            min: total % 60,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.hrs * 60 + self.min
    }
}

impl fmt::Display for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h{:02}m", self.hrs, self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        assert_eq!(t("00:00").minutes_since_midnight(), 0);
        assert_eq!(t("09:05").minutes_since_midnight(), 545);
        assert_eq!(t("23:59").minutes_since_midnight(), 1439);
    }

    #[test]
    fn reject_malformed_times() {
        assert!(ClockTime::parse_hhmm("").is_err());
        assert!(ClockTime::parse_hhmm("9:00").is_err());
        assert!(ClockTime::parse_hhmm("0900").is_err());
        assert!(ClockTime::parse_hhmm("09-00").is_err());
        assert!(ClockTime::parse_hhmm("ab:cd").is_err());
        assert!(ClockTime::parse_hhmm("24:00").is_err());
        assert!(ClockTime::parse_hhmm("12:60").is_err());
        assert!(ClockTime::parse_hhmm(" 9:00").is_err());
    }

    #[test]
    fn error_keeps_input() {
        let err = ClockTime::parse_hhmm("25:00").unwrap_err();
        assert_eq!(err.input(), "25:00");
        assert_eq!(err.to_string(), "invalid time \"25:00\": hour must be 0-23");
    }

    #[test]
    fn same_day_duration() {
        let d = t("09:00").duration_until(t("11:30"));
        assert_eq!(d, TravelDuration { hrs: 2, min: 30 });
    }

    #[test]
    fn overnight_duration() {
        let d = t("23:00").duration_until(t("01:00"));
        assert_eq!(d, TravelDuration { hrs: 2, min: 0 });

        let d = t("22:45").duration_until(t("00:10"));
        assert_eq!(d, TravelDuration { hrs: 1, min: 25 });
    }

    #[test]
    fn equal_times_are_zero() {
        assert_eq!(t("10:00").duration_until(t("10:00")).total_minutes(), 0);
        assert_eq!(t("10:00").connection_gap(t("10:00")), 0);
    }

    #[test]
    fn connection_gap_wraps() {
        assert_eq!(t("10:00").connection_gap(t("10:05")), 5);
        assert_eq!(t("23:50").connection_gap(t("00:20")), 30);
        // Departure just before the arrival means nearly a full day's wait.
        assert_eq!(t("10:00").connection_gap(t("09:59")), 1439);
    }

    #[test]
    fn duration_normalization() {
        assert_eq!(TravelDuration::from_minutes(0), TravelDuration { hrs: 0, min: 0 });
        assert_eq!(TravelDuration::from_minutes(59), TravelDuration { hrs: 0, min: 59 });
        assert_eq!(TravelDuration::from_minutes(60), TravelDuration { hrs: 1, min: 0 });
        assert_eq!(TravelDuration::from_minutes(1505).total_minutes(), 1505);
    }

    #[test]
    fn display() {
        assert_eq!(t("07:04").to_string(), "07:04");
        assert_eq!(format!("{:?}", t("07:04")), "ClockTime(07:04)");
        assert_eq!(TravelDuration::from_minutes(125).to_string(), "2h05m");
    }

    #[test]
    fn serializes_as_string() {
        assert_eq!(serde_json::to_string(&t("18:20")).unwrap(), "\"18:20\"");
        assert_eq!(
            serde_json::to_string(&TravelDuration::from_minutes(95)).unwrap(),
            r#"{"hrs":1,"min":35}"#
        );
    }
}
