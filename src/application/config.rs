use crate::domain::DEFAULT_MAX_RENTAL_DAYS;
use std::path::PathBuf;

pub struct Config {
    pub root_dir: PathBuf,
    pub data_dir: PathBuf,
    pub index_path: PathBuf,
    pub max_rental_days: u32,
    pub duckdb_sync: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let root_dir = lookup("LENDABLE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("lendable")
            });

        let data_dir = root_dir.join("data");
        let index_path = root_dir.join("availability.db");

        let max_rental_days = match lookup("LENDABLE_MAX_RENTAL_DAYS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(days) if days > 0 => days,
                _ => {
                    log::warn!(
                        "Ignoring LENDABLE_MAX_RENTAL_DAYS={raw:?}; using {DEFAULT_MAX_RENTAL_DAYS}"
                    );
                    DEFAULT_MAX_RENTAL_DAYS
                }
            },
            None => DEFAULT_MAX_RENTAL_DAYS,
        };

        let duckdb_sync = match lookup("LENDABLE_DUCKDB_SYNC").as_deref().map(str::trim) {
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") | Some("") | None => false,
            Some(other) => {
                log::warn!("Ignoring LENDABLE_DUCKDB_SYNC={other:?}; sync stays off");
                false
            }
        };

        Self {
            root_dir,
            data_dir,
            index_path,
            max_rental_days,
            duckdb_sync,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_paths_derive_from_root() {
        let config = config_from(&[("LENDABLE_DIR", "/tmp/lendable-test")]);
        assert_eq!(config.root_dir, PathBuf::from("/tmp/lendable-test"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/lendable-test/data"));
        assert_eq!(
            config.index_path,
            PathBuf::from("/tmp/lendable-test/availability.db")
        );
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert!(config.root_dir.ends_with("lendable"));
        assert_eq!(config.max_rental_days, DEFAULT_MAX_RENTAL_DAYS);
        assert!(!config.duckdb_sync);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("LENDABLE_MAX_RENTAL_DAYS", "zero"),
            ("LENDABLE_DUCKDB_SYNC", "maybe"),
        ]);
        assert_eq!(config.max_rental_days, DEFAULT_MAX_RENTAL_DAYS);
        assert!(!config.duckdb_sync);

        let config = config_from(&[
            ("LENDABLE_MAX_RENTAL_DAYS", "14"),
            ("LENDABLE_DUCKDB_SYNC", "true"),
        ]);
        assert_eq!(config.max_rental_days, 14);
        assert!(config.duckdb_sync);
    }
}
