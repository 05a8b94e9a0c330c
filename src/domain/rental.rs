use crate::domain::{
    AvailabilityError, DateRange, UnavailableDate, conflicting_entries, is_window_unavailable,
};
use chrono::{Days, NaiveDate};
use serde::Serialize;

pub const DEFAULT_MAX_RENTAL_DAYS: u32 = 90;

/// A renter's proposed inclusive window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalRequest {
    window: DateRange,
}

impl RentalRequest {
    /// `days` days starting at `start`, i.e. `[start, start + days)`.
    pub fn for_duration(start: NaiveDate, days: u32) -> Result<Self, AvailabilityError> {
        if days == 0 {
            return Err(AvailabilityError::InvalidDuration);
        }
        let end = start
            .checked_add_days(Days::new(u64::from(days) - 1))
            .ok_or(AvailabilityError::DateOverflow(start))?;
        Ok(Self {
            window: DateRange::new(start, end)?,
        })
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, AvailabilityError> {
        Ok(Self {
            window: DateRange::new(start, end)?,
        })
    }

    pub fn window(&self) -> DateRange {
        self.window
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RejectionReason {
    StartsInPast,
    TooLong { max_days: u32 },
    DatesUnavailable { conflicts: Vec<DateRange> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RentalDecision {
    Accepted { window: DateRange },
    Rejected(RejectionReason),
}

impl RentalDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPolicy {
    pub max_duration_days: u32,
}

impl Default for RentalPolicy {
    fn default() -> Self {
        Self {
            max_duration_days: DEFAULT_MAX_RENTAL_DAYS,
        }
    }
}

impl RentalPolicy {
    pub fn new(max_duration_days: u32) -> Self {
        Self { max_duration_days }
    }

    /// Checks run in order: start date, length, then owner unavailability.
    pub fn validate(
        &self,
        entries: &[UnavailableDate],
        request: &RentalRequest,
        today: NaiveDate,
    ) -> RentalDecision {
        let window = request.window();

        if window.start() < today {
            return RentalDecision::Rejected(RejectionReason::StartsInPast);
        }

        if window.len_days() > u64::from(self.max_duration_days) {
            return RentalDecision::Rejected(RejectionReason::TooLong {
                max_days: self.max_duration_days,
            });
        }

        if is_window_unavailable(entries, window.start(), window.end()) {
            let conflicts = conflicting_entries(entries, &window)
                .iter()
                .map(UnavailableDate::span)
                .collect();
            return RentalDecision::Rejected(RejectionReason::DatesUnavailable { conflicts });
        }

        RentalDecision::Accepted { window }
    }
}
