//! Date and time parsing for the CFG timestamp lines.
//!
//! Dates are `D{1,2}/D{1,2}/D{2,4}` and times `D{1,2}:D{2}:D{1,2}` with an
//! optional fraction of 1 to 12 digits. The digit groups are validated by
//! hand before any value reaches chrono. The fraction is a literal integer
//! whose digit count sets its unit (3 digits are milliseconds, 6 are
//! microseconds, 9 are nanoseconds); it is rescaled to nanoseconds, and
//! digits beyond nanosecond precision are truncated.

use crate::constants::{DATE_GROUP_DIGITS, FRACTION_DIGITS, NANOSECOND_DIGITS, TIME_GROUP_DIGITS};
use crate::models::DateOrder;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    #[error("date '{0}' does not match the dd/dd/dddd digit pattern")]
    DatePattern(String),

    #[error("time '{0}' does not match the dd:dd:dd[.fraction] digit pattern")]
    TimePattern(String),

    #[error("date '{0}' is not a valid calendar date")]
    DateOutOfRange(String),

    #[error("time '{0}' is not a valid time of day")]
    TimeOutOfRange(String),
}

/// Check that a group is all ASCII digits with a length inside the bounds
fn is_digit_group(group: &str, (min, max): (usize, usize)) -> bool {
    (min..=max).contains(&group.len()) && group.bytes().all(|b| b.is_ascii_digit())
}

/// Split a token on `separator` and validate each group's digit count
fn digit_groups<'a>(
    token: &'a str,
    separator: char,
    bounds: &[(usize, usize)],
) -> Option<Vec<&'a str>> {
    let groups: Vec<&str> = token.split(separator).collect();
    if groups.len() != bounds.len() {
        return None;
    }

    groups
        .iter()
        .zip(bounds)
        .all(|(group, bound)| is_digit_group(group, *bound))
        .then_some(groups)
}

/// Parse a CFG date token using the revision's day/month order
pub fn parse_date(token: &str, order: DateOrder) -> Result<NaiveDate, DateTimeError> {
    let groups = digit_groups(token, '/', &DATE_GROUP_DIGITS)
        .ok_or_else(|| DateTimeError::DatePattern(token.to_string()))?;

    let out_of_range = || DateTimeError::DateOutOfRange(token.to_string());
    let first: u32 = groups[0].parse().map_err(|_| out_of_range())?;
    let second: u32 = groups[1].parse().map_err(|_| out_of_range())?;
    let year: i32 = groups[2].parse().map_err(|_| out_of_range())?;

    let (month, day) = match order {
        DateOrder::MonthDayYear => (first, second),
        DateOrder::DayMonthYear => (second, first),
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(out_of_range)
}

/// Rescale a fractional-second digit string to nanoseconds
fn fraction_to_nanos(digits: &str) -> Option<u32> {
    let value: u64 = digits.parse().ok()?;
    let nanos = if digits.len() <= NANOSECOND_DIGITS {
        value * 10u64.pow((NANOSECOND_DIGITS - digits.len()) as u32)
    } else {
        value / 10u64.pow((digits.len() - NANOSECOND_DIGITS) as u32)
    };
    u32::try_from(nanos).ok()
}

/// Parse a CFG time token
pub fn parse_time(token: &str) -> Result<NaiveTime, DateTimeError> {
    let pattern_error = || DateTimeError::TimePattern(token.to_string());

    let (clock, fraction) = match token.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (token, None),
    };

    let groups = digit_groups(clock, ':', &TIME_GROUP_DIGITS).ok_or_else(pattern_error)?;

    let nanos = match fraction {
        Some(digits) if is_digit_group(digits, FRACTION_DIGITS) => {
            fraction_to_nanos(digits).ok_or_else(pattern_error)?
        }
        Some(_) => return Err(pattern_error()),
        None => 0,
    };

    let out_of_range = || DateTimeError::TimeOutOfRange(token.to_string());
    let hour: u32 = groups[0].parse().map_err(|_| out_of_range())?;
    let minute: u32 = groups[1].parse().map_err(|_| out_of_range())?;
    let second: u32 = groups[2].parse().map_err(|_| out_of_range())?;

    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).ok_or_else(out_of_range)
}

/// Parse the `(date, time)` pair of a timestamp line
pub fn parse_timestamp(
    date: &str,
    time: &str,
    order: DateOrder,
) -> Result<NaiveDateTime, DateTimeError> {
    let date = parse_date(date, order)?;
    let time = parse_time(time)?;
    Ok(NaiveDateTime::new(date, time))
}
