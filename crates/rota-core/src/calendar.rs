//! Week numbering and date formatting on the host's local calendar.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTHS_TR: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

/// ISO-8601 week number of `date`.
///
/// The date is moved to the Thursday of its Monday-based week; the week
/// number is the count of 7-day blocks between January 1 of that Thursday's
/// year and the Thursday itself.
pub fn week_number(date: NaiveDate) -> u32 {
    let from_monday = date.weekday().num_days_from_monday() as i64;
    let thursday = date + Duration::days(3 - from_monday);
    thursday.ordinal0() / 7 + 1
}

/// A week as the rotation counts it: ISO week number plus the calendar year
/// of the date it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Week {
    pub number: u32,
    pub year: i32,
}

impl Week {
    pub fn new(number: u32, year: i32) -> Self {
        Self { number, year }
    }

    /// The week containing `date`. The year is `date.year()`, not the ISO
    /// year, so 1 January 2027 yields week 53 of 2027.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            number: week_number(date),
            year: date.year(),
        }
    }

    /// The following week number in the same year. Does not roll over into
    /// the next year.
    pub fn next(self) -> Self {
        Self {
            number: self.number + 1,
            year: self.year,
        }
    }

    pub fn date_range(self) -> WeekRange {
        week_date_range(self.number, self.year)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/W{:02}", self.year, self.number)
    }
}

/// Monday-to-Sunday span of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for WeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", format_date(self.start), format_date(self.end))
    }
}

/// Monday-to-Sunday range for `week` of `year`.
///
/// Starts from January 1 plus `(week - 1) * 7` days and snaps to a Monday:
/// backwards when that day falls on Sunday..Thursday (Sunday moves forward
/// one day), forwards to the next Monday otherwise. Around year boundaries
/// `week_number(range.start)` may differ from `week`.
pub fn week_date_range(week: u32, year: i32) -> WeekRange {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    let simple = jan_first + Duration::days((week as i64 - 1) * 7);
    let dow = simple.weekday().num_days_from_sunday() as i64;
    let start = if dow <= 4 {
        simple - Duration::days(dow - 1)
    } else {
        simple + Duration::days(8 - dow)
    };
    WeekRange {
        start,
        end: start + Duration::days(6),
    }
}

/// Long-form Turkish date, e.g. `14 Mart 2025`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS_TR[date.month0() as usize],
        date.year()
    )
}
