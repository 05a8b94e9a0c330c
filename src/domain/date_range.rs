use crate::domain::{AvailabilityError, format_date};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt;

/// An inclusive span of calendar days with `start_date <= end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AvailabilityError> {
        if start > end {
            return Err(AvailabilityError::InvalidRange { start, end });
        }
        Ok(Self {
            start_date: start,
            end_date: end,
        })
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start_date: date,
            end_date: date,
        }
    }

    pub fn month(year: i32, month: u32) -> Result<Self, AvailabilityError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AvailabilityError::malformed(format!("{year:04}-{month:02}")))?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .and_then(|next| next.pred_opt())
        .ok_or(AvailabilityError::DateOverflow(start))?;

        Ok(Self {
            start_date: start,
            end_date: end,
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end(&self) -> NaiveDate {
        self.end_date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Both ends are inclusive, so a shared boundary day counts.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start_date <= other.end_date && self.end_date >= other.start_date
    }

    /// True when `other` begins the day after `self` ends, or the reverse.
    pub fn is_adjacent_to(&self, other: &DateRange) -> bool {
        self.end_date.succ_opt() == Some(other.start_date)
            || other.end_date.succ_opt() == Some(self.start_date)
    }

    pub fn len_days(&self) -> u64 {
        (self.end_date - self.start_date).num_days() as u64 + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let start = self.start_date;
        (0..self.len_days()).filter_map(move |i| start.checked_add_days(Days::new(i)))
    }

    /// Grow the range so it also ends at `date`, if `date` is later.
    pub(crate) fn extend_to(&mut self, date: NaiveDate) {
        if date > self.end_date {
            self.end_date = date;
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_date == self.end_date {
            write!(f, "{}", format_date(self.start_date))
        } else {
            write!(
                f,
                "{} to {}",
                format_date(self.start_date),
                format_date(self.end_date)
            )
        }
    }
}
