use anyhow::{anyhow, Context};
use chrono::{Datelike, NaiveDate};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Years that can be stored. Dates outside of them do not keep their order once written as text.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Date {0} is outside of the supported years 1 to 9999")]
pub struct DateOutOfRange(pub NaiveDate);

/// Calendar month used as the grouping key for expenses and income.
///
/// Ordering is chronological. The `"YYYY-MM"` form is only produced when displaying or
/// serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    /// `None` unless `month` is in 1..=12 and `year` is within [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(year: i32, month: u32) -> Option<YearMonth> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(YearMonth { first_day })
    }

    /// Month of any date, including dates outside of the supported years. Use `try_from` to
    /// check the range.
    pub fn of(date: NaiveDate) -> YearMonth {
        // day 1 exists in every month
        let first_day = date.with_day(1).unwrap_or(date);
        YearMonth { first_day }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }
}

impl TryFrom<NaiveDate> for YearMonth {
    type Error = DateOutOfRange;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        YearMonth::new(date.year(), date.month()).ok_or(DateOutOfRange(date))
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| anyhow!("Expected month in YYYY-MM format, got {:?}", s))?;
        let year: i32 = year
            .parse()
            .with_context(|| format!("Invalid year in {:?}", s))?;
        let month: u32 = month
            .parse()
            .with_context(|| format!("Invalid month in {:?}", s))?;
        YearMonth::new(year, month).ok_or_else(|| anyhow!("Month out of range in {:?}", s))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: anyhow::Error| D::Error::custom(e))
    }
}
