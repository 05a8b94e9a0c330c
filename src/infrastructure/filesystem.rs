use crate::domain::ItemAvailability;
use crate::infrastructure::{
    AvailabilityParser, AvailabilityRepository, HookRegistry, WriteContext, validate_item_id,
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// One pretty-printed JSON file per item under `<data_dir>/items/`.
pub struct FileSystemRepository {
    data_dir: PathBuf,
    root_dir: PathBuf,
    parser: AvailabilityParser,
    hook_registry: HookRegistry,
}

impl FileSystemRepository {
    pub fn new(data_dir: PathBuf, root_dir: PathBuf) -> Self {
        Self::with_hooks(data_dir, root_dir, HookRegistry::new())
    }

    pub fn with_hooks(data_dir: PathBuf, root_dir: PathBuf, hook_registry: HookRegistry) -> Self {
        Self {
            data_dir,
            root_dir,
            parser: AvailabilityParser::new(),
            hook_registry,
        }
    }

    fn items_dir(&self) -> PathBuf {
        self.data_dir.join("items")
    }

    fn item_path(&self, item_id: &str) -> Result<PathBuf> {
        validate_item_id(item_id)?;
        Ok(self.items_dir().join(format!("{item_id}.json")))
    }
}

impl AvailabilityRepository for FileSystemRepository {
    fn load(&self, item_id: &str) -> Result<Option<ItemAvailability>> {
        let path = self.item_path(item_id)?;

        if !path.exists() {
            log::debug!("No availability stored for {item_id}");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let item = self
            .parser
            .parse(&content)
            .with_context(|| format!("Corrupt availability file {}", path.display()))?;

        if item.item_id != item_id {
            anyhow::bail!(
                "{} holds availability for {:?}, expected {:?}",
                path.display(),
                item.item_id,
                item_id
            );
        }

        log::debug!("Loaded {} entries for {item_id}", item.unavailable_dates.len());
        Ok(Some(item))
    }

    fn save(&self, item: &ItemAvailability) -> Result<()> {
        let path = self.item_path(&item.item_id)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = self.parser.serialize(item)?;
        std::fs::write(&path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("Saved {} entries for {}", item.unavailable_dates.len(), item.item_id);

        let context = WriteContext {
            item_id: item.item_id.clone(),
            item_path: path,
            root_dir: self.root_dir.clone(),
        };
        self.hook_registry.execute_write_hooks(&context, item);

        Ok(())
    }

    fn list_items(&self) -> Result<Vec<String>> {
        let dir = self.items_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to read {}", dir.display()))?
        {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                items.push(stem.to_string());
            }
        }

        items.sort();
        Ok(items)
    }
}
