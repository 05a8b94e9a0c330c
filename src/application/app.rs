use crate::application::Config;
use crate::domain::{
    CalendarMonth, DateRange, ItemAvailability, RentalDecision, RentalPolicy, RentalRequest,
    is_date_unavailable,
};
use crate::infrastructure::{
    AvailabilityIndex, AvailabilityRepository, DuckDbStorage, DuckDbSyncHook,
    FileSystemRepository, HookRegistry, SimpleLoggerHook,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::sync::Arc;

pub struct AvailabilityApp {
    config: Config,
    repository: Box<dyn AvailabilityRepository>,
    index: Option<Arc<DuckDbStorage>>,
    policy: RentalPolicy,
}

impl AvailabilityApp {
    pub fn new() -> Result<Self> {
        Self::with_default_plugins(Config::from_env())
    }

    pub fn with_default_plugins(config: Config) -> Result<Self> {
        let index = if config.duckdb_sync {
            std::fs::create_dir_all(&config.root_dir)
                .with_context(|| format!("Failed to create {}", config.root_dir.display()))?;
            let storage = DuckDbStorage::new(&config.index_path).with_context(|| {
                format!("Failed to open index at {}", config.index_path.display())
            })?;
            // Writes made with sync off, or whose sync hook failed, never reached the index.
            let on_disk =
                FileSystemRepository::new(config.data_dir.clone(), config.root_dir.clone());
            let indexed = storage
                .rebuild_from(&on_disk)
                .context("Failed to rebuild availability index")?;
            log::debug!("Indexed {indexed} items from {}", config.data_dir.display());
            Some(Arc::new(storage))
        } else {
            None
        };

        let mut hook_registry = HookRegistry::new();
        hook_registry.register(SimpleLoggerHook);
        if let Some(index) = &index {
            hook_registry.register(DuckDbSyncHook::with_storage(index.clone()));
        }

        let repository = FileSystemRepository::with_hooks(
            config.data_dir.clone(),
            config.root_dir.clone(),
            hook_registry,
        );
        let mut app = Self::with_repository(config, Box::new(repository));
        app.index = index;
        Ok(app)
    }

    pub fn without_plugins(config: Config) -> Self {
        let repository =
            FileSystemRepository::new(config.data_dir.clone(), config.root_dir.clone());
        Self::with_repository(config, Box::new(repository))
    }

    pub fn with_repository(config: Config, repository: Box<dyn AvailabilityRepository>) -> Self {
        let policy = RentalPolicy::new(config.max_rental_days);
        Self {
            config,
            repository,
            index: None,
            policy,
        }
    }

    /// An item nobody has blocked yet is simply fully available.
    pub fn availability(&self, item_id: &str) -> Result<ItemAvailability> {
        Ok(self
            .repository
            .load(item_id)?
            .unwrap_or_else(|| ItemAvailability::new(item_id)))
    }

    pub fn items(&self) -> Result<Vec<String>> {
        self.repository.list_items()
    }

    pub fn ranges(&self, item_id: &str) -> Result<Vec<DateRange>> {
        Ok(self.availability(item_id)?.ranges())
    }

    /// Block `[start, end]`, or just `start` when no end is given.
    pub fn block(
        &self,
        item_id: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<ItemAvailability> {
        let mut item = self.availability(item_id)?;
        match end {
            Some(end) => {
                item.block_range(start, end)?;
            }
            None => {
                item.block_date(start);
            }
        }

        self.repository
            .save(&item)
            .with_context(|| format!("Failed to save availability for {item_id}"))?;
        log::info!("Blocked {} for {item_id}", describe(start, end));
        Ok(item)
    }

    /// Remove an exactly matching range (or single day). A miss changes nothing.
    pub fn unblock(
        &self,
        item_id: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<ItemAvailability> {
        let mut item = self.availability(item_id)?;
        let before = item.unavailable_dates.len();
        match end {
            Some(end) => {
                item.unblock_range(start, end)?;
            }
            None => {
                item.unblock_date(start);
            }
        }

        if item.unavailable_dates.len() == before {
            log::info!("Nothing blocked exactly at {} for {item_id}", describe(start, end));
            return Ok(item);
        }

        self.repository
            .save(&item)
            .with_context(|| format!("Failed to save availability for {item_id}"))?;
        log::info!("Unblocked {} for {item_id}", describe(start, end));
        Ok(item)
    }

    pub fn is_day_unavailable(&self, item_id: &str, date: NaiveDate) -> Result<bool> {
        let flat = self.availability(item_id)?.flat_dates();
        Ok(is_date_unavailable(&flat, date))
    }

    pub fn check_rental(
        &self,
        item_id: &str,
        request: &RentalRequest,
        today: NaiveDate,
    ) -> Result<RentalDecision> {
        let item = self.availability(item_id)?;
        Ok(self.policy.validate(&item.unavailable_dates, request, today))
    }

    pub fn month(&self, item_id: &str, year: i32, month: u32) -> Result<CalendarMonth> {
        let flat = self.availability(item_id)?.flat_dates();
        Ok(CalendarMonth::build(year, month, &flat)?)
    }

    /// Items blocked on `date`, from the index when sync is enabled.
    pub fn unavailable_on(&self, date: NaiveDate) -> Result<Vec<String>> {
        if let Some(index) = &self.index {
            return index.items_unavailable_on(date);
        }

        let mut blocked = Vec::new();
        for item_id in self.repository.list_items()? {
            let item = self.availability(&item_id)?;
            if item.unavailable_dates.iter().any(|entry| entry.covers(date)) {
                blocked.push(item_id);
            }
        }
        Ok(blocked)
    }

    /// Items whose unavailability overlaps `window`.
    ///
    /// Uses the DuckDB index when sync is enabled, otherwise scans every stored item.
    pub fn conflicts(&self, window: &DateRange) -> Result<Vec<String>> {
        if let Some(index) = &self.index {
            return index.items_conflicting_with(window);
        }

        let mut conflicting = Vec::new();
        for item_id in self.repository.list_items()? {
            if self.availability(&item_id)?.is_window_unavailable(window) {
                conflicting.push(item_id);
            }
        }
        Ok(conflicting)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn describe(start: NaiveDate, end: Option<NaiveDate>) -> String {
    match end {
        Some(end) if end != start => format!("{start} to {end}"),
        _ => start.to_string(),
    }
}
