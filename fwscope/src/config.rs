//! Run configuration
//!
//! All tunables of a run live in one [`Config`]: target clock, memory
//! capacities, UART tag, reference scheme prefix, the module catalog and the
//! baseline cycle table. Defaults come from `fwscope-common`; a TOML file can
//! override any subset of them:
//!
//! ```toml
//! clock_hz = 168000000
//! flash_capacity_bytes = 1048576
//!
//! [[categories]]
//! name = "Kyber"
//! patterns = ["kyber"]
//!
//! [[baselines]]
//! algorithm = "Kyber"
//! operation = "Keygen"
//! cycles = 4000000
//! ```
//!
//! A file that sets `categories` or `baselines` replaces the whole list;
//! order in the file is match order.

use crate::classification::{default_categories, Catalog, CategorySpec};
use crate::domain::{ClockHz, ConfigError, GroupKey};
use fwscope_common::{
    DEFAULT_BASELINES, DEFAULT_CLOCK_HZ, DEFAULT_FLASH_CAPACITY_BYTES, DEFAULT_LOG_TAG,
    DEFAULT_RAM_CAPACITY_BYTES, DEFAULT_REFERENCE_PREFIX,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Reference cycle count for one (algorithm, operation) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineEntry {
    pub algorithm: String,
    pub operation: String,
    pub cycles: u64,
}

/// Lookup table for speedup comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaselineTable {
    cycles: HashMap<GroupKey, u64>,
}

impl BaselineTable {
    /// Build a table; later entries for the same key win.
    pub fn new<'a>(entries: impl IntoIterator<Item = &'a BaselineEntry>) -> Self {
        let cycles = entries
            .into_iter()
            .map(|e| (GroupKey::new(&e.algorithm, &e.operation), e.cycles))
            .collect();
        Self { cycles }
    }

    /// Baseline cycles for a key, if any
    #[must_use]
    pub fn get(&self, algorithm: &str, operation: &str) -> Option<u64> {
        self.cycles.get(&GroupKey::new(algorithm, operation)).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Every overridable constant of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Core clock used to convert cycles to milliseconds
    pub clock_hz: u64,
    /// Flash size for the utilization column
    pub flash_capacity_bytes: u64,
    /// RAM size for the utilization column
    pub ram_capacity_bytes: u64,
    /// Literal tag in front of every UART result line
    pub log_tag: String,
    /// Algorithm prefix of the classical reference scheme
    pub reference_prefix: String,
    /// Module catalog, in match priority order
    pub categories: Vec<CategorySpec>,
    /// Reference cycle counts for the speedup column
    pub baselines: Vec<BaselineEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            flash_capacity_bytes: DEFAULT_FLASH_CAPACITY_BYTES,
            ram_capacity_bytes: DEFAULT_RAM_CAPACITY_BYTES,
            log_tag: DEFAULT_LOG_TAG.to_owned(),
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_owned(),
            categories: default_categories(),
            baselines: DEFAULT_BASELINES
                .iter()
                .map(|b| BaselineEntry {
                    algorithm: b.algorithm.to_owned(),
                    operation: b.operation.to_owned(),
                    cycles: b.cycles,
                })
                .collect(),
        }
    }
}

impl Config {
    /// Load a TOML config file over the defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::ReadFailed { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML text over the defaults.
    ///
    /// # Errors
    /// Returns an error on invalid TOML or failed validation.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Render this config as TOML (for `--dump-config`).
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check invariants the engine relies on.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock_hz == 0 {
            return Err(ConfigError::ZeroClock);
        }
        if self.flash_capacity_bytes == 0 {
            return Err(ConfigError::ZeroCapacity("Flash"));
        }
        if self.ram_capacity_bytes == 0 {
            return Err(ConfigError::ZeroCapacity("RAM"));
        }
        if self.log_tag.trim().is_empty() {
            return Err(ConfigError::EmptyLogTag);
        }
        self.catalog().map(|_| ())
    }

    #[must_use]
    pub fn clock(&self) -> ClockHz {
        ClockHz(self.clock_hz)
    }

    /// Validated module catalog
    ///
    /// # Errors
    /// Returns an error for duplicate or empty category names.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        Catalog::new(self.categories.clone())
    }

    #[must_use]
    pub fn baseline_table(&self) -> BaselineTable {
        BaselineTable::new(&self.baselines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwscope_common::OTHER_CATEGORY;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.clock_hz, 216_000_000);
        assert_eq!(config.flash_capacity_bytes, 2048 * 1024);
        assert_eq!(config.ram_capacity_bytes, 512 * 1024);
        assert_eq!(config.baseline_table().get("ML-KEM-512", "Encaps"), Some(6_264_054));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = Config::from_toml_str("clock_hz = 168000000\nlog_tag = \"[M4]\"").unwrap();
        assert_eq!(config.clock_hz, 168_000_000);
        assert_eq!(config.log_tag, "[M4]");
        assert_eq!(config.ram_capacity_bytes, 512 * 1024);
        assert_eq!(config.categories, default_categories());
    }

    #[test]
    fn test_category_list_replaces_catalog_in_file_order() {
        let text = r#"
            [[categories]]
            name = "Kyber"
            patterns = ["kyber"]

            [[categories]]
            name = "Runtime"
            patterns = ["Core", "libc"]
        "#;
        let catalog = Config::from_toml_str(text).unwrap().catalog().unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Kyber", "Runtime", OTHER_CATEGORY]);
        assert_eq!(catalog.classify("Core/kyber/poly.o"), "Kyber");
    }

    #[test]
    fn test_zero_clock_is_rejected() {
        assert!(matches!(Config::from_toml_str("clock_hz = 0"), Err(ConfigError::ZeroClock)));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("clock_mhz = 216"),
            Err(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn test_dump_roundtrips_defaults() {
        let config = Config::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_baseline_lookup_misses() {
        let table = Config::default().baseline_table();
        assert_eq!(table.get("RSA", "KeyGen"), None);
        assert_eq!(table.len(), 4);
    }
}
