use crate::domain::{AvailabilityError, DateRange, format_date, parse_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One owner-declared blocked period, exactly as it is stored on a listing.
///
/// Entries are kept as entered. Overlapping or adjacent entries are
/// redundant rather than invalid; display goes through the merged view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UnavailableDateRecord", into = "UnavailableDateRecord")]
pub enum UnavailableDate {
    Single(NaiveDate),
    Range(DateRange),
}

impl UnavailableDate {
    pub fn range(start: NaiveDate, end: NaiveDate) -> Result<Self, AvailabilityError> {
        DateRange::new(start, end).map(Self::Range)
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range(_))
    }

    pub fn span(&self) -> DateRange {
        match self {
            Self::Single(date) => DateRange::single(*date),
            Self::Range(range) => *range,
        }
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.span().contains(date)
    }

    /// Inclusive on both sides: a window ending on the first blocked day conflicts.
    pub fn overlaps_window(&self, window_start: NaiveDate, window_end: NaiveDate) -> bool {
        match self {
            Self::Single(date) => window_start <= *date && *date <= window_end,
            Self::Range(range) => {
                window_start <= range.end() && window_end >= range.start()
            }
        }
    }
}

/// Listing-payload shape: `{ isRange, date?, rangeStart?, rangeEnd? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UnavailableDateRecord {
    pub(crate) is_range: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) range_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) range_end: Option<String>,
}

impl TryFrom<UnavailableDateRecord> for UnavailableDate {
    type Error = AvailabilityError;

    fn try_from(record: UnavailableDateRecord) -> Result<Self, Self::Error> {
        if !record.is_range {
            let date = record
                .date
                .ok_or(AvailabilityError::IncompleteEntry("date"))?;
            return Ok(Self::Single(parse_date(&date)?));
        }

        let start = record
            .range_start
            .ok_or(AvailabilityError::IncompleteEntry("rangeStart"))?;
        let end = record
            .range_end
            .ok_or(AvailabilityError::IncompleteEntry("rangeEnd"))?;

        Self::range(parse_date(&start)?, parse_date(&end)?)
    }
}

impl From<UnavailableDate> for UnavailableDateRecord {
    fn from(entry: UnavailableDate) -> Self {
        match entry {
            UnavailableDate::Single(date) => Self {
                is_range: false,
                date: Some(format_date(date)),
                range_start: None,
                range_end: None,
            },
            UnavailableDate::Range(range) => Self {
                is_range: true,
                date: None,
                range_start: Some(format_date(range.start())),
                range_end: Some(format_date(range.end())),
            },
        }
    }
}
