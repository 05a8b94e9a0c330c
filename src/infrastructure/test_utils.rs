/// Test utilities for DuckDB-based tests
///
/// Each `TestStorage` owns a fresh DuckDB file inside a temporary directory
/// that disappears with it, so tests never share state.
///
/// ```ignore
/// let test_storage = TestStorage::new();
/// test_storage.create_sample_items()?;
/// let storage = test_storage.storage();
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::domain::{ItemAvailability, UnavailableDate};
    use crate::infrastructure::{AvailabilityRepository, DuckDbStorage};
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;

    pub struct TestStorage {
        pub storage: DuckDbStorage,
        temp_dir: TempDir,
    }

    impl TestStorage {
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp directory");
            let db_path = temp_dir.path().join("test.db");

            let storage =
                DuckDbStorage::new(&db_path).expect("Failed to initialize test DuckDB storage");

            Self { storage, temp_dir }
        }

        pub fn storage(&self) -> &DuckDbStorage {
            &self.storage
        }

        pub fn db_path(&self) -> PathBuf {
            self.temp_dir.path().join("test.db")
        }

        /// Three items in June 2024:
        /// bike on the 1st and 3rd, kayak from the 2nd to the 8th, drill on the 10th.
        pub fn create_sample_items(&self) -> Result<Vec<ItemAvailability>> {
            let june = |d| NaiveDate::from_ymd_opt(2024, 6, d).expect("valid June date");

            let items = vec![
                ItemAvailability::with_entries(
                    "bike",
                    vec![UnavailableDate::Single(june(1)), UnavailableDate::Single(june(3))],
                ),
                ItemAvailability::with_entries(
                    "kayak",
                    vec![UnavailableDate::range(june(2), june(8))?],
                ),
                ItemAvailability::with_entries("drill", vec![UnavailableDate::Single(june(10))]),
            ];

            for item in &items {
                self.storage.save(item)?;
            }
            Ok(items)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_harness::*;
    use crate::infrastructure::AvailabilityRepository;

    #[test]
    fn test_harness_basic_functionality() {
        let test_storage = TestStorage::new();
        assert!(test_storage.storage().load("bike").unwrap().is_none());

        let items = test_storage.create_sample_items().unwrap();
        assert_eq!(items.len(), 3);

        let loaded = test_storage.storage().load("kayak").unwrap().unwrap();
        assert_eq!(loaded, items[1]);
    }

    #[test]
    fn test_harness_isolation() {
        let first = TestStorage::new();
        let second = TestStorage::new();

        first.create_sample_items().unwrap();

        assert!(second.storage().list_items().unwrap().is_empty());
        assert_ne!(first.db_path(), second.db_path());
    }
}
