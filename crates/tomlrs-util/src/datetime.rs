//! RFC-3339-derived date/time value model and parser (spec §3, §4.3).
//!
//! The lexer only classifies a candidate slice as *shaped like* a
//! date/time and hands the raw bytes to [`parse`]; all calendar and
//! range validation happens here, matching spec §4.1's "the lexer accepts
//! the whole candidate; structural validation is deferred to §4.3."

use std::fmt;

/// A calendar date. Fields are validated on construction via [`parse`] —
/// there is no public constructor that skips validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// A time of day with optional sub-second precision and UTC offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    /// 0-59, or 60 to tolerate a leap second (spec §3).
    pub second: u8,
    pub nanosecond: u32,
    pub offset: Option<TimeOffset>,
}

/// A time zone offset: either literal UTC (`Z`/`z`) or a signed minute
/// count derived from `±HH:MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeOffset {
    Utc,
    Minutes(i16),
}

/// At least one of `date`/`time` is always `Some` (spec §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateTime {
    pub date: Option<Date>,
    pub time: Option<Time>,
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn digit(b: u8) -> Option<u32> {
    if b.is_ascii_digit() {
        Some((b - b'0') as u32)
    } else {
        None
    }
}

fn parse_decimal(bytes: &[u8]) -> Option<u32> {
    let mut value: u32 = 0;
    for &b in bytes {
        value = value.checked_mul(10)?.checked_add(digit(b)?)?;
    }
    Some(value)
}

/// Parses `bytes` as a TOML date/time literal, per spec §4.3.
///
/// Accepts full date-times, date-only, and time-only forms. A single
/// separating space between date and time must already have been
/// normalized to `T`/`t` by the lexer (spec §4.1).
pub fn parse(bytes: &[u8]) -> Result<DateTime, String> {
    let mut date = None;
    let mut rest = bytes;

    if bytes.len() >= 10 && bytes[4] == b'-' && bytes[7] == b'-' {
        let year = parse_decimal(&bytes[0..4]).ok_or("bad date/time format")?;
        let month = parse_decimal(&bytes[5..7]).ok_or("bad date/time format")?;
        let day = parse_decimal(&bytes[8..10]).ok_or("bad date/time format")?;
        if !(1..=12).contains(&month) {
            return Err(format!("bad date/time format: month {month} out of range"));
        }
        let max_day = days_in_month(year as u16, month as u8);
        if day == 0 || day > max_day as u32 {
            return Err(format!("bad date/time format: day {day} invalid for {year:04}-{month:02}"));
        }
        date = Some(Date {
            year: year as u16,
            month: month as u8,
            day: day as u8,
        });
        rest = &bytes[10..];

        if rest.is_empty() {
            return Ok(DateTime { date, time: None });
        }
        if rest[0] != b'T' && rest[0] != b't' {
            return Err("bad date/time format: expected 'T' between date and time".to_string());
        }
        rest = &rest[1..];
        if rest.is_empty() {
            return Err("bad date/time format: 'T' with no following time".to_string());
        }
    }

    if rest.is_empty() {
        if date.is_some() {
            return Ok(DateTime { date, time: None });
        }
        return Err("bad date/time format".to_string());
    }

    let time = parse_time(rest)?;
    Ok(DateTime {
        date,
        time: Some(time),
    })
}

fn parse_time(bytes: &[u8]) -> Result<Time, String> {
    if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
        return Err("bad date/time format".to_string());
    }
    let hour = parse_decimal(&bytes[0..2]).ok_or("bad date/time format")?;
    let minute = parse_decimal(&bytes[3..5]).ok_or("bad date/time format")?;
    let second = parse_decimal(&bytes[6..8]).ok_or("bad date/time format")?;
    if hour > 23 {
        return Err(format!("bad date/time format: hour {hour} out of range"));
    }
    if minute > 59 {
        return Err(format!("bad date/time format: minute {minute} out of range"));
    }
    if second > 60 {
        return Err(format!("bad date/time format: second {second} out of range"));
    }

    let mut rest = &bytes[8..];
    let mut nanosecond = 0u32;

    if let Some(&b'.') = rest.first() {
        rest = &rest[1..];
        let mut digits_len = 0usize;
        while digits_len < rest.len() && rest[digits_len].is_ascii_digit() {
            digits_len += 1;
        }
        if digits_len == 0 {
            return Err("bad date/time format: empty fractional seconds".to_string());
        }
        let used = digits_len.min(9);
        let mut scaled = parse_decimal(&rest[..used]).ok_or("bad date/time format")?;
        for _ in used..9 {
            scaled = scaled.saturating_mul(10);
        }
        nanosecond = scaled;
        rest = &rest[digits_len..];
    }

    let offset = if rest.is_empty() {
        None
    } else {
        Some(parse_offset(rest)?)
    };

    Ok(Time {
        hour: hour as u8,
        minute: minute as u8,
        second: second as u8,
        nanosecond,
        offset,
    })
}

fn parse_offset(bytes: &[u8]) -> Result<TimeOffset, String> {
    if bytes == b"Z" || bytes == b"z" {
        return Ok(TimeOffset::Utc);
    }
    if bytes.len() != 6 || bytes[3] != b':' {
        return Err("bad date/time format: invalid time offset".to_string());
    }
    let sign = match bytes[0] {
        b'+' => 1i16,
        b'-' => -1i16,
        _ => return Err("bad date/time format: invalid time offset sign".to_string()),
    };
    let hours = parse_decimal(&bytes[1..3]).ok_or("bad date/time format")?;
    let minutes = parse_decimal(&bytes[4..6]).ok_or("bad date/time format")?;
    if hours > 23 || minutes > 59 {
        return Err("bad date/time format: offset out of range".to_string());
    }
    Ok(TimeOffset::Minutes(sign * (hours as i16 * 60 + minutes as i16)))
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(d) = self.date {
            write!(f, "{:04}-{:02}-{:02}", d.year, d.month, d.day)?;
            if self.time.is_some() {
                write!(f, "T")?;
            }
        }
        if let Some(t) = self.time {
            write!(f, "{:02}:{:02}:{:02}", t.hour, t.minute, t.second)?;
            if t.nanosecond != 0 {
                write!(f, ".{:09}", t.nanosecond)?;
            }
            match t.offset {
                Some(TimeOffset::Utc) => write!(f, "Z")?,
                Some(TimeOffset::Minutes(m)) => {
                    let sign = if m < 0 { '-' } else { '+' };
                    let abs = m.unsigned_abs();
                    write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)?;
                }
                None => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_offset_datetime() {
        let dt = parse(b"1979-05-27T07:32:00Z").unwrap();
        assert_eq!(
            dt.date,
            Some(Date {
                year: 1979,
                month: 5,
                day: 27
            })
        );
        let t = dt.time.unwrap();
        assert_eq!((t.hour, t.minute, t.second, t.nanosecond), (7, 32, 0, 0));
        assert_eq!(t.offset, Some(TimeOffset::Utc));
    }

    #[test]
    fn parses_date_only() {
        let dt = parse(b"1979-05-27").unwrap();
        assert!(dt.date.is_some());
        assert!(dt.time.is_none());
    }

    #[test]
    fn parses_time_only_with_nanoseconds() {
        let dt = parse(b"07:32:00.999999999").unwrap();
        assert!(dt.date.is_none());
        assert_eq!(dt.time.unwrap().nanosecond, 999_999_999);
    }

    #[test]
    fn truncates_fractional_seconds_beyond_nine_digits() {
        let dt = parse(b"07:32:00.1234567891").unwrap();
        assert_eq!(dt.time.unwrap().nanosecond, 123_456_789);
    }

    #[test]
    fn rejects_invalid_leap_day() {
        assert!(parse(b"1977-02-29T07:32:00").is_err());
    }

    #[test]
    fn accepts_leap_day_on_leap_year() {
        assert!(parse(b"2000-02-29").is_ok());
    }

    #[test]
    fn accepts_leap_second() {
        let dt = parse(b"23:59:60Z").unwrap();
        assert_eq!(dt.time.unwrap().second, 60);
    }

    #[test]
    fn rejects_date_with_dangling_t() {
        assert!(parse(b"1979-05-27T").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse(b"not-a-date").is_err());
    }

    #[test]
    fn parses_negative_offset() {
        let dt = parse(b"1979-05-27T00:32:00-07:00").unwrap();
        assert_eq!(
            dt.time.unwrap().offset,
            Some(TimeOffset::Minutes(-7 * 60))
        );
    }
}
