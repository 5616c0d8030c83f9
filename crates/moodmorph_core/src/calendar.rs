//! crates/moodmorph_core/src/calendar.rs
//!
//! Calendar adapters that turn an absolute instant into a comparable
//! day-string for one calendar system.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

use crate::domain::Locale;

/// Converts instants into the day-strings of a single calendar system.
pub trait CalendarAdapter: Send + Sync {
    /// The canonical day-string of `instant` in this calendar.
    fn day_string(&self, instant: DateTime<Utc>) -> String;

    /// Normalizes user input into the canonical day-string, or `None` if the
    /// input is not a valid day in this calendar.
    fn parse_day(&self, input: &str) -> Option<String>;
}

//=========================================================================================
// Gregorian
//=========================================================================================

/// Gregorian days formatted as `YYYY-MM-DD`, taken in UTC to match the date
/// prefix of stored timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct GregorianCalendar;

impl CalendarAdapter for GregorianCalendar {
    fn day_string(&self, instant: DateTime<Utc>) -> String {
        instant.format("%Y-%m-%d").to_string()
    }

    fn parse_day(&self, input: &str) -> Option<String> {
        let (year, month, day) = split_day(input)?;
        let date = chrono::NaiveDate::from_ymd_opt(year, month, day)?;
        Some(date.format("%Y-%m-%d").to_string())
    }
}

//=========================================================================================
// Solar Hijri (Jalali)
//=========================================================================================

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Iran Standard Time, +03:30.
pub const TEHRAN_OFFSET_SECONDS: i32 = 3 * 3600 + 30 * 60;

/// Solar Hijri days formatted as `YYYY/MM/DD` with Persian digits.
#[derive(Debug, Clone, Copy)]
pub struct PersianCalendar {
    offset: FixedOffset,
}

impl PersianCalendar {
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Default for PersianCalendar {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(TEHRAN_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix()),
        }
    }
}

impl CalendarAdapter for PersianCalendar {
    fn day_string(&self, instant: DateTime<Utc>) -> String {
        let local = instant.with_timezone(&self.offset);
        let (jy, jm, jd) = gregorian_to_jalali(local.year() as i64, local.month(), local.day());
        format_persian_day(jy, jm, jd)
    }

    fn parse_day(&self, input: &str) -> Option<String> {
        let (year, month, day) = split_day(input)?;
        if year < 1 || !(1..=12).contains(&month) || day < 1 || day > jalali_month_length(year as i64, month) {
            return None;
        }
        Some(format_persian_day(year as i64, month, day))
    }
}

//=========================================================================================
// Locale selection
//=========================================================================================

/// One adapter per supported calendar system, selected by the active locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calendars {
    pub gregorian: GregorianCalendar,
    pub persian: PersianCalendar,
}

impl Calendars {
    pub fn for_locale(&self, locale: Locale) -> &dyn CalendarAdapter {
        match locale {
            Locale::En => &self.gregorian,
            Locale::Fa => &self.persian,
        }
    }
}

/// Converts a Gregorian date to the Jalali calendar.
///
/// Arithmetic form of the 33-year cycle; exact for the Gregorian years 1600
/// onwards.
pub fn gregorian_to_jalali(gy: i64, gm: u32, gd: u32) -> (i64, u32, u32) {
    const DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    let gy2 = if gm > 2 { gy + 1 } else { gy };
    let mut days = 355_666 + 365 * gy + (gy2 + 3) / 4 - (gy2 + 99) / 100 + (gy2 + 399) / 400
        + gd as i64
        + DAYS_BEFORE_MONTH[(gm as usize).saturating_sub(1).min(11)];

    let mut jy = -1595 + 33 * (days / 12053);
    days %= 12053;
    jy += 4 * (days / 1461);
    days %= 1461;
    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    let (jm, jd) = if days < 186 {
        (1 + days / 31, 1 + days % 31)
    } else {
        (7 + (days - 186) / 30, 1 + (days - 186) % 30)
    };
    (jy, jm as u32, jd as u32)
}

fn jalali_month_length(year: i64, month: u32) -> u32 {
    match month {
        1..=6 => 31,
        12 if !is_jalali_leap_year(year) => 29,
        _ => 30,
    }
}

/// A Jalali year is leap when its Esfand 30 exists. Nowruz of the following
/// year falls between 19 and 22 March, so Esfand 30 can only sit in that window.
pub fn is_jalali_leap_year(year: i64) -> bool {
    let gy = year + 622;
    (18..=22).any(|gd| gregorian_to_jalali(gy, 3, gd) == (year, 12, 30))
}

fn format_persian_day(year: i64, month: u32, day: u32) -> String {
    to_persian_digits(&format!("{:04}/{:02}/{:02}", year, month, day))
}

pub fn to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => PERSIAN_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

fn to_ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| match PERSIAN_DIGITS.iter().position(|&p| p == c) {
            Some(d) => char::from(b'0' + d as u8),
            None => c,
        })
        .collect()
}

/// Splits `Y/M/D` or `Y-M-D` in either digit set into its numeric parts.
fn split_day(input: &str) -> Option<(i32, u32, u32)> {
    let normalized = to_ascii_digits(input.trim());
    let mut parts = normalized.split(|c: char| c == '/' || c == '-');
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((year, month, day))
}
