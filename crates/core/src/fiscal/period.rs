//! Fiscal period types.
//!
//! Opening and closing entries are generated once per account per period;
//! the period is the idempotence key for supersession.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// An annual fiscal period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    /// Calendar year covered by the period.
    pub year: i32,
}

impl Period {
    /// Returns the period containing the given date.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self { year: date.year() }
    }

    /// First day of the period.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        // Jan 1 is valid for every representable year.
        NaiveDate::from_ymd_opt(self.year, 1, 1).expect("valid period start")
    }

    /// Last day of the period.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, 12, 31).expect("valid period end")
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year
    }

    /// The period immediately following this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            year: self.year + 1,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY{}", self.year)
    }
}
