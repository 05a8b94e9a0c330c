use crate::domain::{AvailabilityError, DateRange, is_date_unavailable};
use chrono::{Datelike, Days, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from neighbouring months.
    pub in_month: bool,
    pub unavailable: bool,
}

/// Sunday-first week grid for one month with each cell's unavailability flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub month: DateRange,
    pub weeks: Vec<[CalendarDay; 7]>,
}

impl CalendarMonth {
    /// Fails with `DateOverflow` when the padded grid would leave chrono's date range.
    pub fn build(
        year: i32,
        month: u32,
        unavailable: &[NaiveDate],
    ) -> Result<Self, AvailabilityError> {
        let bounds = DateRange::month(year, month)?;
        let grid = DateRange::new(
            sunday_on_or_before(bounds.start())?,
            saturday_on_or_after(bounds.end())?,
        )?;

        let days: Vec<CalendarDay> = grid
            .days()
            .map(|date| CalendarDay {
                date,
                in_month: bounds.contains(date),
                unavailable: is_date_unavailable(unavailable, date),
            })
            .collect();
        let weeks = days
            .chunks_exact(7)
            .filter_map(|week| <[CalendarDay; 7]>::try_from(week).ok())
            .collect();

        Ok(Self {
            month: bounds,
            weeks,
        })
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten()
    }

    pub fn unavailable_in_month(&self) -> Vec<NaiveDate> {
        self.days()
            .filter(|day| day.in_month && day.unavailable)
            .map(|day| day.date)
            .collect()
    }
}

fn sunday_on_or_before(date: NaiveDate) -> Result<NaiveDate, AvailabilityError> {
    let back = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(u64::from(back)))
        .ok_or(AvailabilityError::DateOverflow(date))
}

fn saturday_on_or_after(date: NaiveDate) -> Result<NaiveDate, AvailabilityError> {
    let ahead = 6 - date.weekday().num_days_from_sunday();
    date.checked_add_days(Days::new(u64::from(ahead)))
        .ok_or(AvailabilityError::DateOverflow(date))
}
