//! Calendar-day keys used by every log.
//!
//! A `DateKey` is a zero-padded `YYYY-MM-DD` string, so ordering the strings
//! orders the days. Keys read from imported documents are kept as-is; any
//! calendar arithmetic parses them on demand.

use crate::{Error, Result};
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical identifier of a calendar day
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Key for the current local calendar date
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(KEY_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the key back into a calendar date, if it is one
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, KEY_FORMAT).ok()
    }

    /// Shift the key by `delta_days`, wrapping months and years
    pub fn offset(&self, delta_days: i64) -> Result<DateKey> {
        let date = self
            .to_date()
            .ok_or_else(|| Error::InvalidDateKey(self.0.clone()))?;

        let shifted = if delta_days >= 0 {
            date.checked_add_days(Days::new(delta_days.unsigned_abs()))
        } else {
            date.checked_sub_days(Days::new(delta_days.unsigned_abs()))
        };

        shifted
            .map(Self::from_date)
            .ok_or_else(|| Error::InvalidDateKey(format!("{} {:+} days", self.0, delta_days)))
    }

    /// True iff the two days are exactly one calendar day apart, in either order
    ///
    /// Keys that are not calendar days are never consecutive.
    pub fn is_consecutive(&self, other: &DateKey) -> bool {
        match (self.to_date(), other.to_date()) {
            (Some(a), Some(b)) => a.signed_duration_since(b).num_days().abs() == 1,
            _ => false,
        }
    }

    pub fn compare_to_today(&self) -> Ordering {
        self.compare_to(&DateKey::today())
    }

    /// Compare against an explicit "today"
    pub fn compare_to(&self, today: &DateKey) -> Ordering {
        self.cmp(today)
    }

    pub fn is_after(&self, today: &DateKey) -> bool {
        self.compare_to(today) == Ordering::Greater
    }

    pub fn day_of_month(&self) -> Option<u32> {
        self.to_date().map(|d| d.day())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl FromStr for DateKey {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for DateKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for DateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
