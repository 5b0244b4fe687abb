// src/progress/calculator.rs
//! Worked-hours arithmetic over `HH:MM` time-of-day strings.
//!
//! Everything here is total: malformed input contributes zero hours instead
//! of failing, so a single bad row can never break a progress summary.

use chrono::{NaiveTime, Timelike};
use std::num::IntErrorKind;

pub const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Minutes since midnight for a 24-hour `HH:MM` string.
///
/// Returns `None` for empty input, missing parts, non-numeric parts, or
/// values outside 00:00..=23:59.
pub fn parse_time_of_day(raw: &str) -> Option<u32> {
    let time = NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()?;

    let total = time.hour() * MINUTES_PER_HOUR + time.minute();
    debug_assert!(total < MINUTES_PER_DAY);
    Some(total)
}

/// Canonical zero-padded `HH:MM` form of a valid time string
pub fn canonical_time(raw: &str) -> Option<String> {
    parse_time_of_day(raw).map(|m| format!("{:02}:{:02}", m / MINUTES_PER_HOUR, m % MINUTES_PER_HOUR))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BreakParseError {
    #[error("'{0}' is not a whole number of minutes")]
    NotANumber(String),

    #[error("break cannot be negative ({0})")]
    Negative(i64),

    #[error("break of {0} minutes is out of range")]
    OutOfRange(String),
}

fn is_overflow(kind: &IntErrorKind) -> bool {
    matches!(kind, IntErrorKind::PosOverflow | IntErrorKind::NegOverflow)
}

/// Unpaid break length in whole minutes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct BreakMinutes(u32);

impl BreakMinutes {
    pub const ZERO: BreakMinutes = BreakMinutes(0);

    #[cfg(test)]
    pub fn new(minutes: u32) -> Self {
        Self(minutes)
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Boundary parsing: empty means zero, anything else must be a
    /// non-negative integer.
    pub fn parse_strict(raw: &str) -> Result<Self, BreakParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }

        match trimmed.parse::<i64>() {
            Ok(v) if v < 0 => Err(BreakParseError::Negative(v)),
            Ok(v) => u32::try_from(v)
                .map(Self)
                .map_err(|_| BreakParseError::OutOfRange(trimmed.to_string())),
            Err(e) if is_overflow(e.kind()) => Err(BreakParseError::OutOfRange(trimmed.to_string())),
            Err(_) => Err(BreakParseError::NotANumber(trimmed.to_string())),
        }
    }

    /// Consumption-time parsing for stored rows: anything unusable is zero
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|r| Self::parse_strict(r).ok())
            .unwrap_or(Self::ZERO)
    }

    /// Storage form: empty string for no break
    pub fn to_storage(self) -> String {
        if self.0 == 0 {
            String::new()
        } else {
            self.0.to_string()
        }
    }
}

/// Worked hours for one session.
///
/// `(out - in - break) / 60`, clamped at zero. A `time_out` earlier than
/// `time_in` is not treated as an overnight shift; it yields zero.
pub fn compute_hours(time_in: &str, time_out: &str, break_minutes: Option<&str>) -> f64 {
    let (Some(in_minutes), Some(out_minutes)) =
        (parse_time_of_day(time_in), parse_time_of_day(time_out))
    else {
        return 0.0;
    };

    let breaks = BreakMinutes::parse_lenient(break_minutes);
    let worked = i64::from(out_minutes) - i64::from(in_minutes) - i64::from(breaks.minutes());

    if worked <= 0 {
        return 0.0;
    }

    worked as f64 / f64::from(MINUTES_PER_HOUR)
}
