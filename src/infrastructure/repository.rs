use crate::domain::ItemAvailability;
use anyhow::Result;

pub trait AvailabilityRepository {
    fn load(&self, item_id: &str) -> Result<Option<ItemAvailability>>;
    fn save(&self, item: &ItemAvailability) -> Result<()>;
    fn list_items(&self) -> Result<Vec<String>>;
}

/// Item ids double as file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn validate_item_id(item_id: &str) -> Result<()> {
    let valid = !item_id.is_empty()
        && item_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !valid {
        anyhow::bail!("invalid item id {item_id:?}: use letters, digits, '-' or '_'");
    }
    Ok(())
}
