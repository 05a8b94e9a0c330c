use crate::domain::ItemAvailability;
use anyhow::{Context, Result};

/// Reads and writes the availability part of a listing payload.
pub struct AvailabilityParser;

impl AvailabilityParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, content: &str) -> Result<ItemAvailability> {
        serde_json::from_str(content).context("Failed to parse availability payload")
    }

    pub fn serialize(&self, item: &ItemAvailability) -> Result<String> {
        serde_json::to_string_pretty(item).context("Failed to serialize availability payload")
    }
}

impl Default for AvailabilityParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UnavailableDate;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_listing_payload() {
        let content = r#"{
            "itemId": "kayak",
            "unavailableDates": [
                {"isRange": false, "date": "2024-06-01T00:00:00.000Z"},
                {"isRange": true, "rangeStart": "2024-06-02", "rangeEnd": "2024-06-05"}
            ]
        }"#;

        let item = AvailabilityParser::new().parse(content).unwrap();
        assert_eq!(item.item_id, "kayak");
        assert_eq!(item.unavailable_dates.len(), 2);
        assert_eq!(item.unavailable_dates[0], UnavailableDate::Single(ymd(2024, 6, 1)));
    }

    #[test]
    fn test_serialize_then_parse_keeps_raw_entries() {
        let parser = AvailabilityParser::new();
        let mut item = ItemAvailability::new("kayak");
        item.block_range(ymd(2024, 6, 1), ymd(2024, 6, 3))
            .unwrap()
            .block_range(ymd(2024, 6, 2), ymd(2024, 6, 4))
            .unwrap();

        let content = parser.serialize(&item).unwrap();
        assert_eq!(parser.parse(&content).unwrap(), item);
    }

    #[test]
    fn test_parse_reports_malformed_dates() {
        let err = AvailabilityParser::new()
            .parse(r#"{"itemId": "bike", "unavailableDates": [{"isRange": false, "date": "x"}]}"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("malformed date"));
    }
}
