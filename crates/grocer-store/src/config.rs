//! # Store Configuration
//!
//! Where the snapshot lives, whether it is saved automatically, and the
//! engine settings.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults                                                            │
//! │  2. grocer.toml        (platform config dir, or an explicit path)       │
//! │  3. GROCER_* env vars  SNAPSHOT_PATH, AUTOSAVE, VARIANT, TOP_N,         │
//! │                        TRACK_CUSTOM                                     │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use grocer_core::StoreSettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// File name of the config inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "grocer.toml";

/// File name of the snapshot inside the platform data directory.
pub const SNAPSHOT_FILE_NAME: &str = "cart_data.json";

// =============================================================================
// Snapshot Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSettings {
    /// Snapshot file. Falls back to the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Save after every successful mutation.
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_autosave() -> bool {
    true
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        SnapshotSettings {
            path: None,
            autosave: default_autosave(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete configuration.
///
/// ## Example Config File
/// ```toml
/// [snapshot]
/// path = "/var/lib/grocer/cart_data.json"
/// autosave = true
///
/// [store]
/// variant = "priced"
/// top_n = 10
/// track_custom_items = true
///
/// [store.receipt]
/// tax_rate_bps = 800
/// discount_threshold_cents = 50000
/// discount_bps = 500
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub snapshot: SnapshotSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> StoreResult<()> {
        if let Some(path) = &self.snapshot.path {
            if path.as_os_str().is_empty() {
                return Err(StoreError::InvalidConfig(
                    "snapshot.path must not be empty".into(),
                ));
            }
        }

        self.store.validate()?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `GROCER_*` overrides read through `var`.
    ///
    /// Values that do not parse are logged and ignored.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("GROCER_SNAPSHOT_PATH") {
            debug!(path = %path, "Overriding snapshot path from environment");
            self.snapshot.path = Some(PathBuf::from(path));
        }

        if let Some(value) = var("GROCER_AUTOSAVE") {
            match parse_flag(&value) {
                Some(flag) => self.snapshot.autosave = flag,
                None => warn!(value = %value, "Ignoring GROCER_AUTOSAVE"),
            }
        }

        if let Some(value) = var("GROCER_VARIANT") {
            match value.parse() {
                Ok(variant) => {
                    debug!(variant = %value, "Overriding catalog variant from environment");
                    self.store.variant = variant;
                }
                Err(e) => warn!(value = %value, error = %e, "Ignoring GROCER_VARIANT"),
            }
        }

        if let Some(value) = var("GROCER_TOP_N") {
            match value.parse::<usize>() {
                Ok(n) => self.store.top_n = n,
                Err(_) => warn!(value = %value, "Ignoring GROCER_TOP_N"),
            }
        }

        if let Some(value) = var("GROCER_TRACK_CUSTOM") {
            match parse_flag(&value) {
                Some(flag) => self.store.track_custom_items = flag,
                None => warn!(value = %value, "Ignoring GROCER_TRACK_CUSTOM"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "grocer", "cart")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Returns the default snapshot file path.
    pub fn default_snapshot_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "grocer", "cart")
            .map(|dirs| dirs.data_dir().join(SNAPSHOT_FILE_NAME))
    }

    /// The snapshot file in effect: configured, else platform default.
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot
            .path
            .clone()
            .or_else(Self::default_snapshot_path)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_core::CatalogVariant;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert!(config.snapshot.autosave);
        assert_eq!(config.snapshot.path, None);
        assert_eq!(config.store.top_n, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StoreConfig::default();
        config.apply_overrides(env(&[
            ("GROCER_SNAPSHOT_PATH", "/tmp/grocer.json"),
            ("GROCER_AUTOSAVE", "off"),
            ("GROCER_VARIANT", "shopping_list"),
            ("GROCER_TOP_N", "5"),
            ("GROCER_TRACK_CUSTOM", "false"),
        ]));

        assert_eq!(config.snapshot.path, Some(PathBuf::from("/tmp/grocer.json")));
        assert!(!config.snapshot.autosave);
        assert_eq!(config.store.variant, CatalogVariant::ShoppingList);
        assert_eq!(config.store.top_n, 5);
        assert!(!config.store.track_custom_items);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = StoreConfig::default();
        config.apply_overrides(env(&[
            ("GROCER_AUTOSAVE", "maybe"),
            ("GROCER_VARIANT", "wholesale"),
            ("GROCER_TOP_N", "ten"),
        ]));
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig::default();
        config.store.top_n = 0;
        assert!(matches!(config.validate(), Err(StoreError::InvalidConfig(_))));

        config.store.top_n = 3;
        config.snapshot.path = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_sections() {
        let text = r#"
            [snapshot]
            path = "data/cart.json"
            autosave = false

            [store]
            variant = "shopping_list"

            [store.receipt]
            tax_rate_bps = 500
        "#;
        let config: StoreConfig = toml::from_str(text).unwrap();

        assert_eq!(config.snapshot.path, Some(PathBuf::from("data/cart.json")));
        assert!(!config.snapshot.autosave);
        assert_eq!(config.store.variant, CatalogVariant::ShoppingList);
        assert_eq!(config.store.top_n, 10);
        assert_eq!(config.store.receipt.tax_rate_bps, 500);
        assert_eq!(config.store.receipt.discount_bps, 500);

        let out = toml::to_string_pretty(&config).unwrap();
        assert!(out.contains("[snapshot]"));
        assert!(out.contains("[store.receipt]"));
    }
}
