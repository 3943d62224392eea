use crate::model::MapObjectType;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DataConfig {
    /// Path of the JSON map asset (floors + objects).
    pub map_path: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchConfig {
    /// Types searched when a request carries no type filter.
    pub default_types: Vec<MapObjectType>,
    pub case_insensitive: bool,
    /// 0 means unlimited.
    pub max_results: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WayfinderConfig {
    pub data: DataConfig,
    pub search: SearchConfig,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            map_path: "data/map.json".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_types: vec![MapObjectType::Room],
            case_insensitive: true,
            max_results: 0,
        }
    }
}

impl Default for WayfinderConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl WayfinderConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix("WAYFINDER")
                    .prefix_separator("_")
                    .separator("__"),
            );

        Self::from_builder(builder)
    }

    /// Loads a single config file on top of the built-in defaults.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::with_name(path));
        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let defaults = WayfinderConfig::default();
        let default_types: Vec<String> = defaults
            .search
            .default_types
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();

        builder
            .set_default("data.map_path", defaults.data.map_path)?
            .set_default("search.default_types", default_types)?
            .set_default("search.case_insensitive", defaults.search.case_insensitive)?
            .set_default("search.max_results", defaults.search.max_results as i64)?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_search_rooms() {
        let cfg = WayfinderConfig::default();
        assert_eq!(cfg.search.default_types, vec![MapObjectType::Room]);
        assert!(cfg.search.case_insensitive);
        assert_eq!(cfg.search.max_results, 0);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wayfinder.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[data]\nmap_path = \"campus.json\"\n\n[search]\ndefault_types = [\"room\", \"lecture\"]"
        )
        .unwrap();

        let cfg = WayfinderConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.data.map_path, "campus.json");
        assert_eq!(
            cfg.search.default_types,
            vec![MapObjectType::Room, MapObjectType::Lecture]
        );
        assert!(cfg.search.case_insensitive);
    }

    #[test]
    fn test_env_overrides_use_single_underscore_after_prefix() {
        std::env::set_var("WAYFINDER_SEARCH__MAX_RESULTS", "7");
        let cfg = WayfinderConfig::load();
        std::env::remove_var("WAYFINDER_SEARCH__MAX_RESULTS");

        assert_eq!(cfg.unwrap().search.max_results, 7);
    }
}
