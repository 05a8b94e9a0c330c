use crate::domain::ItemAvailability;
use crate::infrastructure::{AvailabilityRepository, DuckDbStorage, WriteContext, WriteHook};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Mirrors every filesystem write into the DuckDB index
pub struct DuckDbSyncHook {
    storage: Arc<DuckDbStorage>,
}

impl DuckDbSyncHook {
    pub fn with_storage(storage: Arc<DuckDbStorage>) -> Self {
        Self { storage }
    }
}

impl WriteHook for DuckDbSyncHook {
    fn on_availability_written(
        &self,
        _context: &WriteContext,
        item: &ItemAvailability,
    ) -> Result<()> {
        self.storage
            .save(item)
            .context("Failed to sync availability to DuckDB")
    }

    fn name(&self) -> &str {
        "DuckDB Sync"
    }
}
