use crate::domain::ItemAvailability;
use crate::infrastructure::{WriteContext, WriteHook};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;

/// Appends one line per availability write to `<root>/write_log.txt`.
pub struct SimpleLoggerHook;

impl WriteHook for SimpleLoggerHook {
    fn on_availability_written(
        &self,
        context: &WriteContext,
        item: &ItemAvailability,
    ) -> Result<()> {
        let log_path = context.root_dir.join("write_log.txt");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open {}", log_path.display()))?;

        let ranges = item.ranges();
        writeln!(
            file,
            "[{}] Availability written for {} - Path: {} - Entries: {} - Blocked ranges: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            context.item_id,
            context.item_path.display(),
            item.unavailable_dates.len(),
            ranges.len()
        )?;

        log::info!(
            "{} now has {} blocked range(s)",
            context.item_id,
            ranges.len()
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "Simple Logger"
    }
}
