use chrono::NaiveDate;
use thiserror::Error;

/// Rejections raised by the availability model before any collection is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("malformed date: {input:?}")]
    MalformedDate { input: String },

    #[error("rental duration must be at least one day")]
    InvalidDuration,

    #[error("unavailable range entry is missing `{0}`")]
    IncompleteEntry(&'static str),

    #[error("date arithmetic overflowed past {0}")]
    DateOverflow(NaiveDate),
}

impl AvailabilityError {
    pub fn malformed(input: impl Into<String>) -> Self {
        Self::MalformedDate {
            input: input.into(),
        }
    }
}
