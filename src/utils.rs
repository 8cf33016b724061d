use std::{fmt, str::FromStr};

use chrono::{Datelike as _, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::pay::PayError;

/// A calendar month, written as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PayMonth {
    first_day: NaiveDate,
}

impl PayMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Exclusive upper bound of the month
    pub fn next_first_day(&self) -> NaiveDate {
        let (year, month) = match self.first_day.month() {
            12 => (self.first_day.year() + 1, 1),
            m => (self.first_day.year(), m + 1),
        };

        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }

    /// Every date of the month, inclusive on both ends
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.next_first_day();
        self.first_day.iter_days().take_while(move |day| *day < end)
    }
}

impl FromStr for PayMonth {
    type Err = PayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PayError::InvalidMonth(s.to_owned());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;

        Self::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for PayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.first_day.year(), self.first_day.month())
    }
}

impl Serialize for PayMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PayMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Lowercased English weekday name, e.g. `monday`
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Fractional hours from `start` to `end` on the same reference day.
///
/// Negative when `end` is earlier than `start`.
pub fn hours_between(start: NaiveTime, end: NaiveTime) -> Decimal {
    let seconds = (end - start).num_seconds();

    Decimal::from(seconds) / Decimal::from(3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pay_month() {
        let month: PayMonth = "2024-06".parse().unwrap();

        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(month.days().last(), NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(month.next_first_day(), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(month.to_string(), "2024-06");

        assert!("2024-13".parse::<PayMonth>().is_err());
        assert!("2024-6".parse::<PayMonth>().is_err());
        assert!("June".parse::<PayMonth>().is_err());
    }

    #[test]
    fn test_pay_month_boundaries() {
        let december: PayMonth = "2023-12".parse().unwrap();
        assert_eq!(december.next_first_day(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(december.days().count(), 31);

        let leap_february: PayMonth = "2024-02".parse().unwrap();
        assert_eq!(leap_february.days().count(), 29);
        assert_eq!(leap_february.days().last(), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_hours_between() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let half_past_five = NaiveTime::from_hms_opt(17, 30, 0).unwrap();

        assert_eq!(hours_between(nine, half_past_five), Decimal::new(85, 1));
        assert_eq!(hours_between(half_past_five, nine), Decimal::new(-85, 1));
    }

    #[test]
    fn test_weekday_name() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(weekday_name(monday.weekday()), "monday");
        assert_eq!(weekday_name(Weekday::Sun), "sunday");
    }
}
