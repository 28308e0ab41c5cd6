//! Calendar arithmetic helpers that bypass jiff's `Span` machinery.
//!
//! Day offsets use Rata Die day-numbering, so adding a payment delay or
//! measuring how late a payment is costs O(1) with no `Span` normalisation.
//!
//! Payment rules were written against JavaScript `Date` semantics, where a
//! day or month past the end of its range spills over into the next one
//! (`2024-02-30` is `2024-03-01`). [`overflowing_date`] reproduces that
//! behaviour so roll-forward results land on the same calendar day.

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Fast inline days-in-month calculation without creating a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Convert a civil date to a Rata Die day number (days since 0001-01-01).
///
/// Uses the proleptic Gregorian calendar algorithm from Baum (2017).
#[inline]
fn rata_die(d: Date) -> i32 {
    let y = d.year() as i32;
    let m = d.month() as i32;
    let day = d.day() as i32;

    // Shift March = month 1 so Feb (end of "year") is month 12
    let a = (14 - m) / 12;
    let y2 = y - a;
    let m2 = m + 12 * a - 3;

    day + (153 * m2 + 2) / 5 + 365 * y2 + y2 / 4 - y2 / 100 + y2 / 400 - 306
}

/// Convert a Rata Die day number back to a `jiff::civil::Date`.
///
/// `None` outside jiff's supported range (years -9999 to 9999).
#[inline]
fn rd_to_date(rd: i32) -> Option<Date> {
    if rd < rata_die(Date::MIN) || rd > rata_die(Date::MAX) {
        return None;
    }

    // Shift so day 0 = March 1, year 0
    let z = rd + 306;
    let h = 100 * z - 25;
    let a = h / 3_652_425;
    let b = a - a / 4;
    let y = (100 * b + h) / 36_525;
    let c = b + z - 365 * y - y / 4;
    let m = (5 * c + 456) / 153;
    let day = c - (153 * m - 457) / 5;

    let (year, month) = if m > 12 { (y + 1, m - 12) } else { (y, m) };

    Date::new(i16::try_from(year).ok()?, month as i8, day as i8).ok()
}

/// Number of days between two dates (`d2 - d1`), positive when `d2 > d1`.
#[inline]
pub fn days_between(d1: Date, d2: Date) -> i32 {
    rata_die(d2) - rata_die(d1)
}

/// Add `n` days to a date without going through `jiff::Span`.
///
/// `None` when the result is not a representable date.
#[inline]
pub fn checked_add_days(d: Date, n: i32) -> Option<Date> {
    rd_to_date(rata_die(d).checked_add(n)?)
}

/// Add `n` days, clamping to [`Date::MIN`]/[`Date::MAX`].
#[inline]
pub fn add_days(d: Date, n: i32) -> Date {
    checked_add_days(d, n).unwrap_or(if n < 0 { Date::MIN } else { Date::MAX })
}

/// Build a date the way `new Date(year, month - 1, day)` does in JavaScript.
///
/// `month` may run past 12 (or below 1) and carries into the year; `day` may
/// run past the end of the month (or be zero/negative) and carries into the
/// neighbouring months. `overflowing_date(y, m + 1, 0)` is therefore the last
/// day of month `m`. Returns `None` where JavaScript would give an invalid
/// date.
pub fn overflowing_date(year: i32, month: i32, day: i32) -> Option<Date> {
    let y = year.checked_add((month - 1).div_euclid(12))?;
    let m = (month - 1).rem_euclid(12) + 1;
    let first = Date::new(i16::try_from(y).ok()?, m as i8, 1).ok()?;
    checked_add_days(first, day.checked_sub(1)?)
}

/// Move a date forward by `months`, keeping its day-of-month and letting it
/// overflow like `Date.prototype.setMonth`.
#[inline]
pub fn add_months_overflowing(d: Date, months: i32) -> Option<Date> {
    overflowing_date(d.year() as i32, (d.month() as i32).checked_add(months)?, d.day() as i32)
}

/// A calendar month, the bucket every report is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i16,
    pub month: i8,
}

impl YearMonth {
    pub const MIN: YearMonth = YearMonth { year: 1, month: 1 };
    pub const MAX: YearMonth = YearMonth {
        year: 9999,
        month: 12,
    };

    /// Build a month from constant parts, like `jiff::civil::date`.
    ///
    /// # Panics
    ///
    /// When `month` is not in `1..=12` or `year` is not in `1..=9999`. Use
    /// [`YearMonth::try_new`] for values that come from outside.
    pub const fn new(year: i16, month: i8) -> Self {
        match Self::try_new(year, month) {
            Some(ym) => ym,
            None => panic!("year-month out of range"),
        }
    }

    pub const fn try_new(year: i16, month: i8) -> Option<Self> {
        if year < Self::MIN.year || year > Self::MAX.year || month < 1 || month > 12 {
            None
        } else {
            Some(Self { year, month })
        }
    }

    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(self) -> Date {
        Date::new(self.year, self.month, 1).unwrap_or(Date::MIN)
    }

    pub fn last_day(self) -> Date {
        Date::new(self.year, self.month, days_in_month(self.year, self.month)).unwrap_or(Date::MAX)
    }

    /// Shift by a signed number of months, clamped to `MIN..=MAX`.
    pub fn offset(self, months: i32) -> Self {
        let index = (self.year as i32 * 12 + (self.month as i32 - 1)).saturating_add(months);
        let clamped = index.clamp(Self::MIN.index(), Self::MAX.index());
        Self {
            year: clamped.div_euclid(12) as i16,
            month: (clamped.rem_euclid(12) + 1) as i8,
        }
    }

    const fn index(self) -> i32 {
        self.year as i32 * 12 + (self.month as i32 - 1)
    }

    #[inline]
    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i16 = year.parse().map_err(|_| invalid())?;
        let month: i8 = month.parse().map_err(|_| invalid())?;
        Self::try_new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_days_between_same_date() {
        let d = date(2025, 6, 15);
        assert_eq!(days_between(d, d), 0);
    }

    #[test]
    fn test_days_between_across_year() {
        // 2024 is a leap year → 366 days
        assert_eq!(days_between(date(2024, 1, 1), date(2025, 1, 1)), 366);
        assert_eq!(days_between(date(2025, 1, 1), date(2026, 1, 1)), 365);
        assert_eq!(days_between(date(2025, 1, 2), date(2025, 1, 1)), -1);
    }

    #[test]
    fn test_days_between_matches_jiff() {
        let pairs = [
            (date(2020, 1, 1), date(2030, 6, 15)),
            (date(2024, 2, 29), date(2025, 2, 28)),
            (date(2025, 12, 31), date(2026, 1, 1)),
        ];
        for (d1, d2) in pairs {
            let jiff_days = (d2 - d1).get_days();
            assert_eq!(days_between(d1, d2), jiff_days, "mismatch for {d1} → {d2}");
        }
    }

    #[test]
    fn test_add_days_leap_year() {
        assert_eq!(add_days(date(2024, 2, 28), 1), date(2024, 2, 29));
        assert_eq!(add_days(date(2024, 2, 29), 1), date(2024, 3, 1));
        assert_eq!(add_days(date(2025, 1, 1), -1), date(2024, 12, 31));
        assert_eq!(add_days(date(2024, 1, 31), 30), date(2024, 3, 1));
    }

    #[test]
    fn test_overflowing_date_spills_days() {
        assert_eq!(overflowing_date(2024, 2, 30), Some(date(2024, 3, 1)));
        assert_eq!(overflowing_date(2023, 2, 30), Some(date(2023, 3, 2)));
        assert_eq!(overflowing_date(2024, 4, 31), Some(date(2024, 5, 1)));
        assert_eq!(overflowing_date(2024, 6, 15), Some(date(2024, 6, 15)));
    }

    #[test]
    fn test_overflowing_date_spills_months() {
        assert_eq!(overflowing_date(2024, 13, 5), Some(date(2025, 1, 5)));
        assert_eq!(overflowing_date(2024, 0, 10), Some(date(2023, 12, 10)));
        // Day zero is the last day of the previous month
        assert_eq!(overflowing_date(2024, 3, 0), Some(date(2024, 2, 29)));
        assert_eq!(overflowing_date(2024, 13, 0), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_add_months_overflowing() {
        assert_eq!(add_months_overflowing(date(2024, 1, 31), 1), Some(date(2024, 3, 2)));
        assert_eq!(add_months_overflowing(date(2024, 12, 5), 1), Some(date(2025, 1, 5)));
    }

    #[test]
    fn test_out_of_range_dates_are_none() {
        assert_eq!(checked_add_days(date(2024, 3, 1), 9_999_999), None);
        assert_eq!(checked_add_days(date(2024, 3, 1), i32::MAX), None);
        assert_eq!(checked_add_days(date(2024, 3, 1), i32::MIN), None);
        assert_eq!(checked_add_days(Date::MAX, 1), None);
        assert_eq!(checked_add_days(date(9999, 12, 30), 1), Some(Date::MAX));
        assert_eq!(add_days(date(2024, 3, 1), i32::MAX), Date::MAX);

        assert_eq!(overflowing_date(9999, 13, 1), None);
        assert_eq!(overflowing_date(2024, 3, i32::MIN), None);
        assert_eq!(overflowing_date(i32::MAX, 12, 1), None);
        assert_eq!(add_months_overflowing(date(9999, 12, 5), 1), None);
    }

    #[test]
    fn test_year_month_offset_and_bounds() {
        let march = YearMonth::new(2024, 3);
        assert_eq!(march.offset(-3), YearMonth::new(2023, 12));
        assert_eq!(march.offset(10), YearMonth::new(2025, 1));
        assert_eq!(march.first_day(), date(2024, 3, 1));
        assert_eq!(YearMonth::new(2024, 2).last_day(), date(2024, 2, 29));
        assert!(march.contains(date(2024, 3, 31)));
        assert!(!march.contains(date(2024, 4, 1)));
    }

    #[test]
    fn test_year_month_parse() {
        assert_eq!("2024-03".parse::<YearMonth>().unwrap(), YearMonth::new(2024, 3));
        assert_eq!(YearMonth::new(2024, 3).to_string(), "2024-03");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("march".parse::<YearMonth>().is_err());
        assert!("30000-01".parse::<YearMonth>().is_err());
        assert!("0-06".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_bounds() {
        assert_eq!(YearMonth::try_new(2024, 0), None);
        assert_eq!(YearMonth::try_new(10_000, 1), None);
        assert_eq!(YearMonth::MIN.offset(-3), YearMonth::MIN);
        assert_eq!(YearMonth::MAX.offset(1), YearMonth::MAX);
        assert_eq!(YearMonth::MAX.last_day(), Date::MAX);
    }

    #[test]
    #[should_panic(expected = "year-month out of range")]
    fn test_year_month_new_panics_on_bad_month() {
        let _ = YearMonth::new(2024, 13);
    }
}
