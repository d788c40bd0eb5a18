//! Civil timestamps, Julian dates, and output file naming

use std::fmt;

use crate::error::RenderError;

/// A civil calendar timestamp (UTC assumed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Timestamp {
    /// Parse `YYYY-MM-DDTHH:MM:SS` (a space also separates date and time;
    /// fractional seconds are ignored).
    pub fn parse_iso(s: &str) -> Result<Self, RenderError> {
        let bad = || RenderError::Configuration(format!("invalid timestamp {s:?}"));
        let (date, time) = s
            .split_once(&['T', ' '][..])
            .ok_or_else(bad)?;
        let mut date_parts = date.split('-');
        let mut time_parts = time.split('.').next().unwrap_or(time).split(':');
        let next_i32 = |parts: &mut dyn Iterator<Item = &str>| -> Result<i32, RenderError> {
            parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or_else(bad)
        };
        let year = next_i32(&mut date_parts)?;
        let month = next_i32(&mut date_parts)? as u32;
        let day = next_i32(&mut date_parts)? as u32;
        let hour = next_i32(&mut time_parts)? as u32;
        let minute = next_i32(&mut time_parts)? as u32;
        let second = next_i32(&mut time_parts)? as u32;
        if !(1..=12).contains(&month)
            || !(1..=days_in_month(year, month)).contains(&day)
            || hour > 23
            || minute > 59
            || second > 59
        {
            return Err(bad());
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Julian date: day number at this instant, including the day fraction.
    ///
    /// Uses the standard Gregorian day-number conversion; the date part
    /// yields the JD of that civil midnight, then the time of day is added
    /// as a fraction.
    pub fn julian_date(&self) -> f64 {
        let a = (14 - self.month as i64) / 12;
        let y = self.year as i64 + 4800 - a;
        let m = self.month as i64 + 12 * a - 3;
        let jdn = self.day as i64 + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045;
        let fraction =
            (self.hour * 3600 + self.minute * 60 + self.second) as f64 / (24.0 * 3600.0);
        // jdn is the day number at noon; midnight is half a day earlier
        (jdn as f64 - 0.5) + fraction
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        _ => 28,
    }
}

/// Deterministic output name for a rendered map: `{object}-{iso}.png`.
pub fn output_file_name(object_name: &str, timestamp: &Timestamp) -> String {
    format!("{object_name}-{timestamp}.png")
}

/// Output name for the full-field overview companion map.
pub fn overview_file_name(object_name: &str, timestamp: &Timestamp) -> String {
    format!("{object_name}-{timestamp}-field.png")
}
