use crate::domain::DateRange;
use anyhow::Result;
use chrono::NaiveDate;

/// Cross-item queries over stored availability
pub trait AvailabilityIndex {
    /// Items with any entry covering `date`
    fn items_unavailable_on(&self, date: NaiveDate) -> Result<Vec<String>>;

    /// Items with any entry overlapping the inclusive `window`
    fn items_conflicting_with(&self, window: &DateRange) -> Result<Vec<String>>;

    fn count_entries(&self) -> Result<u64>;
}
