//! Grouping of the request history by local calendar day.

use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate};

use crate::domain::RequestRecord;

/// Groups records by their local calendar day.
///
/// Keys are day-granularity dates in local time; values keep the slice
/// order of `records` (newest first when fed from the store).
#[must_use]
pub fn group_by_day(records: &[RequestRecord]) -> BTreeMap<NaiveDate, Vec<&RequestRecord>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&RequestRecord>> = BTreeMap::new();
    for record in records {
        let day = record.created_at.with_timezone(&Local).date_naive();
        groups.entry(day).or_default().push(record);
    }
    groups
}

/// One month of the activity calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    year: i32,
    /// 1 through 12.
    month: u32,
}

impl CalendarMonth {
    /// A calendar month. Out-of-range months are clamped into 1..=12.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Self {
        let month = if month < 1 {
            1
        } else if month > 12 {
            12
        } else {
            month
        };
        Self { year, month }
    }

    /// The month containing today, in local time.
    #[must_use]
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self::new(today.year(), today.month())
    }

    /// The year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The month number, 1 through 12.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// English month name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self.month as usize - 1]
    }

    /// The month before this one.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// The month after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Number of days in the month.
    #[must_use]
    pub fn days(self) -> u32 {
        let this = self.first_day();
        let next = self.next().first_day();
        u32::try_from((next - this).num_days()).unwrap_or(30)
    }

    /// Blank cells before day 1 in a Sunday-first week grid.
    #[must_use]
    pub fn leading_blanks(self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    /// The date of `day` within this month, if the day exists.
    #[must_use]
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    fn first_day(self) -> NaiveDate {
        // Month is clamped at construction, so the first always exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }
}

/// English month names, indexed by month number minus one.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
