use crate::domain::{AvailabilityError, DateRange, UnavailableDate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Group discrete dates into maximal runs of consecutive calendar days.
///
/// Duplicates are ignored. The result is sorted by start date and no two
/// returned ranges overlap or touch.
pub fn derive_ranges<I>(dates: I) -> Vec<DateRange>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut sorted: Vec<NaiveDate> = dates.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut ranges = Vec::new();
    let mut dates = sorted.into_iter();
    let Some(first) = dates.next() else {
        return ranges;
    };

    let mut current = DateRange::single(first);
    for date in dates {
        if current.end().succ_opt() == Some(date) {
            current.extend_to(date);
        } else {
            ranges.push(current);
            current = DateRange::single(date);
        }
    }
    ranges.push(current);

    ranges
}

/// Coalesce overlapping or adjacent ranges into the minimal sorted set.
pub fn merge_ranges<I>(ranges: I) -> Vec<DateRange>
where
    I: IntoIterator<Item = DateRange>,
{
    let mut sorted: Vec<DateRange> = ranges.into_iter().collect();
    sorted.sort_unstable();

    let mut merged: Vec<DateRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if last.overlaps(&range) || last.is_adjacent_to(&range) => {
                last.extend_to(range.end());
            }
            _ => merged.push(range),
        }
    }

    merged
}

/// Display view of mixed single/range entries.
pub fn derive_entry_ranges(entries: &[UnavailableDate]) -> Vec<DateRange> {
    merge_ranges(entries.iter().map(UnavailableDate::span))
}

/// Exact membership against the flat date list used for calendar cells.
pub fn is_date_unavailable(dates: &[NaiveDate], candidate: NaiveDate) -> bool {
    dates.contains(&candidate)
}

/// Does the inclusive window `[window_start, window_end]` touch any entry?
///
/// Callers must pass `window_start <= window_end`.
pub fn is_window_unavailable(
    entries: &[UnavailableDate],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> bool {
    debug_assert!(window_start <= window_end, "rental window is inverted");
    entries
        .iter()
        .any(|entry| entry.overlaps_window(window_start, window_end))
}

pub fn conflicting_entries(
    entries: &[UnavailableDate],
    window: &DateRange,
) -> Vec<UnavailableDate> {
    entries
        .iter()
        .filter(|entry| entry.overlaps_window(window.start(), window.end()))
        .copied()
        .collect()
}

/// Append a range entry. Existing entries are left as they are, unmerged.
pub fn add_range(
    current: &[UnavailableDate],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<UnavailableDate>, AvailabilityError> {
    let entry = UnavailableDate::range(start, end)?;
    let mut updated = current.to_vec();
    updated.push(entry);
    Ok(updated)
}

/// Remove single dates inside `[start, end]` and ranges stored with exactly
/// these bounds. Ranges that only partly overlap are kept.
pub fn remove_range(
    current: &[UnavailableDate],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<UnavailableDate>, AvailabilityError> {
    let target = DateRange::new(start, end)?;
    Ok(current
        .iter()
        .filter(|entry| match entry {
            UnavailableDate::Single(date) => !target.contains(*date),
            UnavailableDate::Range(range) => *range != target,
        })
        .copied()
        .collect())
}

/// Single dates are unique by date, so adding one twice is a no-op.
pub fn add_date(current: &[UnavailableDate], date: NaiveDate) -> Vec<UnavailableDate> {
    let mut updated = current.to_vec();
    if !updated.contains(&UnavailableDate::Single(date)) {
        updated.push(UnavailableDate::Single(date));
    }
    updated
}

pub fn remove_date(current: &[UnavailableDate], date: NaiveDate) -> Vec<UnavailableDate> {
    current
        .iter()
        .filter(|entry| **entry != UnavailableDate::Single(date))
        .copied()
        .collect()
}

/// Every blocked day, sorted and unique.
pub fn unavailable_days(entries: &[UnavailableDate]) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = entries
        .iter()
        .flat_map(|entry| entry.span().days())
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// The availability part of a listing: the raw entries for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAvailability {
    pub item_id: String,
    #[serde(default)]
    pub unavailable_dates: Vec<UnavailableDate>,
}

impl ItemAvailability {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            unavailable_dates: Vec::new(),
        }
    }

    pub fn with_entries(item_id: impl Into<String>, entries: Vec<UnavailableDate>) -> Self {
        Self {
            item_id: item_id.into(),
            unavailable_dates: entries,
        }
    }

    pub fn block_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<&mut Self, AvailabilityError> {
        self.unavailable_dates = add_range(&self.unavailable_dates, start, end)?;
        Ok(self)
    }

    pub fn unblock_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<&mut Self, AvailabilityError> {
        self.unavailable_dates = remove_range(&self.unavailable_dates, start, end)?;
        Ok(self)
    }

    pub fn block_date(&mut self, date: NaiveDate) -> &mut Self {
        self.unavailable_dates = add_date(&self.unavailable_dates, date);
        self
    }

    pub fn unblock_date(&mut self, date: NaiveDate) -> &mut Self {
        self.unavailable_dates = remove_date(&self.unavailable_dates, date);
        self
    }

    pub fn ranges(&self) -> Vec<DateRange> {
        derive_entry_ranges(&self.unavailable_dates)
    }

    pub fn flat_dates(&self) -> Vec<NaiveDate> {
        unavailable_days(&self.unavailable_dates)
    }

    pub fn is_window_unavailable(&self, window: &DateRange) -> bool {
        is_window_unavailable(&self.unavailable_dates, window.start(), window.end())
    }

    pub fn is_empty(&self) -> bool {
        self.unavailable_dates.is_empty()
    }
}
