//! Holiday calendar for the sales dataset.
//!
//! Holiday-week windows are listed per year for the years the dataset covers
//! (2010–2012). Any date outside every listed window is not a holiday week;
//! extending coverage means adding rows to [`HolidayWeek::windows`].
//!
//! Day counts are measured to a single anchor per holiday in
//! [`ANCHOR_YEAR`], whatever the year of the row.

use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference year of the day-count anchors.
pub const ANCHOR_YEAR: i32 = 2012;

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

const UNIX_EPOCH: NaiveDate = ymd(1970, 1, 1);

/// Days since 1970-01-01, the physical representation of a polars `Date`.
pub fn epoch_days(date: NaiveDate) -> i32 {
    date.signed_duration_since(UNIX_EPOCH).num_days() as i32
}

/// The `Date` column as days since the epoch.
///
/// The column must already be of type `Date`.
pub fn day_number(date_column: &str) -> Expr {
    col(date_column).cast(DataType::Int32)
}

/// Inclusive date range in which a holiday week falls for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayWindow {
    /// Calendar year of the window
    pub year: i32,
    /// First day in the window
    pub start: NaiveDate,
    /// Last day in the window
    pub end: NaiveDate,
}

impl HolidayWindow {
    const fn new(year: i32, start: NaiveDate, end: NaiveDate) -> Self {
        Self { year, start, end }
    }

    const fn day(year: i32, month: u32, day: u32) -> Self {
        let date = ymd(year, month, day);
        Self::new(year, date, date)
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Polars predicate over a day-number expression.
    fn predicate(&self, day: Expr) -> Expr {
        day.clone()
            .gt_eq(lit(epoch_days(self.start)))
            .and(day.lt_eq(lit(epoch_days(self.end))))
    }
}

const SUPER_BOWL: [HolidayWindow; 3] = [
    HolidayWindow::new(2010, ymd(2010, 2, 1), ymd(2010, 2, 7)),
    HolidayWindow::new(2011, ymd(2011, 2, 7), ymd(2011, 2, 13)),
    HolidayWindow::new(2012, ymd(2012, 1, 30), ymd(2012, 2, 5)),
];

const LABOR_DAY: [HolidayWindow; 3] = [
    HolidayWindow::day(2010, 9, 6),
    HolidayWindow::day(2011, 9, 5),
    HolidayWindow::day(2012, 9, 3),
];

const THANKSGIVING: [HolidayWindow; 3] = [
    HolidayWindow::day(2010, 11, 25),
    HolidayWindow::day(2011, 11, 24),
    HolidayWindow::day(2012, 11, 22),
];

const CHRISTMAS: [HolidayWindow; 3] = [
    HolidayWindow::day(2010, 12, 25),
    HolidayWindow::day(2011, 12, 25),
    HolidayWindow::day(2012, 12, 25),
];

/// Named holiday weeks flagged as boolean features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolidayWeek {
    /// Week of the Super Bowl
    SuperBowl,
    /// Labor Day
    LaborDay,
    /// Thanksgiving Day
    Thanksgiving,
    /// Christmas Day
    Christmas,
}

impl HolidayWeek {
    /// All holiday weeks, in output column order.
    pub const ALL: [Self; 4] = [
        Self::SuperBowl,
        Self::LaborDay,
        Self::Thanksgiving,
        Self::Christmas,
    ];

    /// Output column name of the flag.
    pub const fn column(self) -> &'static str {
        match self {
            Self::SuperBowl => "SuperBowlWeek",
            Self::LaborDay => "LaborDay",
            Self::Thanksgiving => "Thanksgiving",
            Self::Christmas => "Christmas",
        }
    }

    /// Year-specific windows of this holiday.
    pub const fn windows(self) -> &'static [HolidayWindow] {
        match self {
            Self::SuperBowl => &SUPER_BOWL,
            Self::LaborDay => &LABOR_DAY,
            Self::Thanksgiving => &THANKSGIVING,
            Self::Christmas => &CHRISTMAS,
        }
    }

    /// Window for a given year, if the year is covered.
    pub fn window_for(self, year: i32) -> Option<&'static HolidayWindow> {
        self.windows().iter().find(|w| w.year == year)
    }

    /// Whether `date` falls inside any window of this holiday.
    pub fn contains(self, date: NaiveDate) -> bool {
        self.windows().iter().any(|w| w.contains(date))
    }

    /// Polars flag expression over a day-number expression.
    pub fn flag(self, day: Expr) -> Expr {
        self.windows()
            .iter()
            .fold(lit(false), |acc, window| acc.or(window.predicate(day.clone())))
    }
}

impl fmt::Display for HolidayWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Holidays with a day-count feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolidayAnchor {
    /// Thanksgiving, 2012-11-22
    Thanksgiving,
    /// Christmas, 2012-12-25
    Christmas,
}

impl HolidayAnchor {
    /// All anchors, in output column order.
    pub const ALL: [Self; 2] = [Self::Thanksgiving, Self::Christmas];

    /// Output column name of the day count.
    pub const fn column(self) -> &'static str {
        match self {
            Self::Thanksgiving => "Days_to_Thanksgiving",
            Self::Christmas => "Days_to_Christmas",
        }
    }

    /// Fixed anchor date in [`ANCHOR_YEAR`].
    pub const fn date(self) -> NaiveDate {
        match self {
            Self::Thanksgiving => ymd(ANCHOR_YEAR, 11, 22),
            Self::Christmas => ymd(ANCHOR_YEAR, 12, 25),
        }
    }

    /// Signed number of days from `date` to the anchor.
    pub fn days_from(self, date: NaiveDate) -> i64 {
        self.date().signed_duration_since(date).num_days()
    }

    /// Polars day-count expression over a day-number expression.
    pub fn days_until(self, day: Expr) -> Expr {
        (lit(epoch_days(self.date())) - day).cast(DataType::Int64)
    }
}
