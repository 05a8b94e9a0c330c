use crate::domain::unavailable_date::UnavailableDateRecord;
use crate::domain::{DateRange, ItemAvailability, UnavailableDate, format_date};
use crate::infrastructure::{AvailabilityIndex, AvailabilityRepository, validate_item_id};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use duckdb::{Connection, params};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const MIGRATIONS: &[(i32, &str, &str)] = &[
    (
        1,
        "001_create_unavailable_dates",
        include_str!("../../migrations/001_create_unavailable_dates.sql"),
    ),
    (
        2,
        "002_index_unavailable_dates",
        include_str!("../../migrations/002_index_unavailable_dates.sql"),
    ),
];

type EntryRow = (bool, Option<String>, Option<String>, Option<String>);

pub struct DuckDbStorage {
    conn: Mutex<Connection>,
}

impl DuckDbStorage {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path).context("Failed to open DuckDB connection")?;

        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.initialize()?;
        Ok(storage)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .context("Failed to create in-memory DuckDB connection")?;

        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.initialize()?;
        Ok(storage)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("DuckDB connection lock poisoned"))
    }

    /// Replace the whole index with the items currently held by `source`.
    ///
    /// Returns the number of items copied.
    pub fn rebuild_from(&self, source: &dyn AvailabilityRepository) -> Result<usize> {
        self.conn()?
            .execute_batch("DELETE FROM unavailable_dates; DELETE FROM items;")
            .context("Failed to clear availability index")?;

        let mut copied = 0;
        for item_id in source.list_items()? {
            let Some(item) = source.load(&item_id)? else {
                continue;
            };
            self.save(&item)
                .with_context(|| format!("Failed to index {item_id}"))?;
            copied += 1;
        }

        log::debug!(
            "Rebuilt availability index: {copied} items, {} entries",
            self.count_entries()?
        );
        Ok(copied)
    }

    fn initialize(&self) -> Result<()> {
        self.setup_migration_system()?;
        self.run_migrations()?;
        Ok(())
    }

    fn entry_from_row(
        (is_range, date, range_start, range_end): EntryRow,
    ) -> Result<UnavailableDate> {
        let record = UnavailableDateRecord {
            is_range,
            date,
            range_start,
            range_end,
        };
        UnavailableDate::try_from(record).context("Invalid unavailable date row")
    }

    fn collect_item_ids(&self, sql: &str, params: &[&dyn duckdb::ToSql]) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(sql)
            .context("Failed to prepare item query")?;

        let rows = stmt.query_map(params, |row| row.get::<_, String>(0))?;

        let mut items = Vec::new();
        for item_id in rows {
            items.push(item_id?);
        }
        Ok(items)
    }
}

impl AvailabilityRepository for DuckDbStorage {
    fn load(&self, item_id: &str) -> Result<Option<ItemAvailability>> {
        let conn = self.conn()?;

        let known: i64 = conn.query_row(
            "SELECT COUNT(*) FROM items WHERE item_id = ?",
            params![item_id],
            |row| row.get(0),
        )?;
        if known == 0 {
            return Ok(None);
        }

        let mut stmt = conn
            .prepare(
                "SELECT is_range, date, range_start, range_end FROM unavailable_dates \
                 WHERE item_id = ? ORDER BY entry_order",
            )
            .context("Failed to prepare select statement")?;

        let rows = stmt.query_map(params![item_id], |row| {
            let entry: EntryRow = (row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?);
            Ok(entry)
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(Self::entry_from_row(row?)?);
        }

        Ok(Some(ItemAvailability::with_entries(item_id, entries)))
    }

    fn save(&self, item: &ItemAvailability) -> Result<()> {
        validate_item_id(&item.item_id)?;

        let mut conn = self.conn()?;
        let tx = conn.transaction().context("Failed to start transaction")?;

        tx.execute(
            "DELETE FROM unavailable_dates WHERE item_id = ?",
            params![item.item_id],
        )
        .context("Failed to clear previous entries")?;

        tx.execute(
            "INSERT OR REPLACE INTO items (item_id, updated_at) VALUES (?, CURRENT_TIMESTAMP)",
            params![item.item_id],
        )
        .context("Failed to record item")?;

        for (entry_order, entry) in item.unavailable_dates.iter().enumerate() {
            let record = UnavailableDateRecord::from(*entry);
            tx.execute(
                r#"
                INSERT INTO unavailable_dates (
                    item_id, entry_order, is_range, date, range_start, range_end
                ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
                params![
                    item.item_id,
                    entry_order as i32,
                    record.is_range,
                    record.date,
                    record.range_start,
                    record.range_end
                ],
            )
            .context("Failed to save unavailable date")?;
        }

        tx.commit().context("Failed to commit availability")?;
        Ok(())
    }

    fn list_items(&self) -> Result<Vec<String>> {
        self.collect_item_ids("SELECT item_id FROM items ORDER BY item_id", &[])
    }
}

impl AvailabilityIndex for DuckDbStorage {
    fn items_unavailable_on(&self, date: NaiveDate) -> Result<Vec<String>> {
        let day = format_date(date);
        self.collect_item_ids(
            r#"
            SELECT DISTINCT item_id FROM unavailable_dates
            WHERE (NOT is_range AND date = ?)
               OR (is_range AND range_start <= ? AND range_end >= ?)
            ORDER BY item_id
        "#,
            &[&day, &day, &day],
        )
    }

    fn items_conflicting_with(&self, window: &DateRange) -> Result<Vec<String>> {
        let start = format_date(window.start());
        let end = format_date(window.end());
        self.collect_item_ids(
            r#"
            SELECT DISTINCT item_id FROM unavailable_dates
            WHERE (NOT is_range AND date BETWEEN ? AND ?)
               OR (is_range AND range_start <= ? AND range_end >= ?)
            ORDER BY item_id
        "#,
            &[&start, &end, &end, &start],
        )
    }

    fn count_entries(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM unavailable_dates", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl DuckDbStorage {
    fn setup_migration_system(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
        "#,
        )
        .context("Failed to create migrations table")?;
        Ok(())
    }

    fn run_migrations(&self) -> Result<()> {
        let applied = self.get_applied_migrations()?;

        for (version, name, sql_content) in MIGRATIONS {
            if !applied.contains(version) {
                self.apply_migration(*version, name, sql_content)
                    .with_context(|| format!("Failed to apply migration {}: {}", version, name))?;
                log::debug!("Applied migration {name}");
            }
        }

        Ok(())
    }

    fn get_applied_migrations(&self) -> Result<HashSet<i32>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT version FROM migrations ORDER BY version")
            .context("Failed to prepare migration query")?;

        let rows = stmt.query_map([], |row| row.get::<_, i32>(0))?;

        let mut applied = HashSet::new();
        for version in rows {
            applied.insert(version?);
        }

        Ok(applied)
    }

    fn apply_migration(&self, version: i32, name: &str, sql_content: &str) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(sql_content)
            .with_context(|| format!("Failed to execute migration SQL for {}", name))?;

        conn.execute(
            "INSERT INTO migrations (version, name) VALUES (?, ?)",
            params![version, name],
        )
        .with_context(|| format!("Failed to record migration {} as applied", name))?;

        Ok(())
    }
}
