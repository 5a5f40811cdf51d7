//! Module classification for attributing object files to libraries.
//!
//! Every section contribution in the map names the object file (or archive
//! member) it came from. This module maps that path onto one of a fixed,
//! ordered list of module categories so the resource table can show how much
//! flash and RAM each cryptographic library, the HAL and the runtime cost.
//!
//! # Classification Strategy
//!
//! 1. Walk the catalog **in declared order**, skipping the catch-all.
//! 2. A category matches when any of its patterns is a substring of the path.
//! 3. The first matching category wins.
//! 4. No match → the catch-all category ("Other").
//!
//! Order is policy: small, specific libraries are declared before generic
//! buckets, so `Core/Src/ml-kem-512/poly.o` lands in `ML-KEM-512` even though
//! it also contains `Core`.
//!
//! The catalog is data ([`CategorySpec`] list from config), not logic, so
//! pointing the tool at another firmware project means editing a TOML file.

use crate::domain::ConfigError;
use fwscope_common::{CategoryDef, DEFAULT_CATEGORIES, OTHER_CATEGORY};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One module category: display name plus substring patterns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.iter().map(|p| (*p).to_owned()).collect(),
        }
    }

    /// Returns true if any pattern occurs in `path`.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| path.contains(pattern.as_str()))
    }

    /// Returns true for the catch-all category.
    #[must_use]
    pub fn is_catch_all(&self) -> bool {
        self.name == OTHER_CATEGORY
    }
}

impl From<&CategoryDef> for CategorySpec {
    fn from(def: &CategoryDef) -> Self {
        CategorySpec::new(def.name, def.patterns)
    }
}

/// Classify a path against an ordered category list.
///
/// Total and deterministic: every path maps to exactly one name, defaulting
/// to [`OTHER_CATEGORY`]. The catch-all is never matched by pattern, even if
/// a caller handed it some.
///
/// # Examples
///
/// ```
/// use fwscope::classification::{classify, default_categories};
///
/// let catalog = default_categories();
/// assert_eq!(classify("build/ml-kem-512/kem.o", &catalog), "ML-KEM-512");
/// assert_eq!(classify("Core/Src/main.o", &catalog), "Core & System");
/// assert_eq!(classify("build/unknown.o", &catalog), "Other");
/// ```
#[must_use]
pub fn classify<'a>(path: &str, categories: &'a [CategorySpec]) -> &'a str {
    categories
        .iter()
        .filter(|category| !category.is_catch_all())
        .find(|category| category.matches(path))
        .map_or(OTHER_CATEGORY, |category| category.name.as_str())
}

/// The built-in catalog from `fwscope-common`, in declared order
#[must_use]
pub fn default_categories() -> Vec<CategorySpec> {
    DEFAULT_CATEGORIES.iter().map(CategorySpec::from).collect()
}

/// A validated, ordered module catalog
///
/// Guarantees unique names and exactly one catch-all, placed last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<CategorySpec>,
}

impl Catalog {
    /// Validate a category list.
    ///
    /// The catch-all is appended when the list does not declare it and moved
    /// to the end when it does.
    ///
    /// # Errors
    /// Returns an error for empty or duplicate names, or for patterns on the
    /// catch-all.
    pub fn new(categories: Vec<CategorySpec>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::with_capacity(categories.len() + 1);
        let mut catch_all = None;

        for category in categories {
            if category.name.trim().is_empty() {
                return Err(ConfigError::EmptyCategoryName);
            }
            if !seen.insert(category.name.clone()) {
                return Err(ConfigError::DuplicateCategory(category.name));
            }
            if category.is_catch_all() {
                if !category.patterns.is_empty() {
                    return Err(ConfigError::PatternsOnCatchAll(category.name));
                }
                catch_all = Some(category);
                continue;
            }
            if category.patterns.is_empty() {
                warn!("Module category \"{}\" has no patterns and will never match", category.name);
            }
            ordered.push(category);
        }

        ordered.push(catch_all.unwrap_or_else(|| CategorySpec::new(OTHER_CATEGORY, &[])));
        Ok(Self { categories: ordered })
    }

    /// Classify a path; see [`classify`].
    #[must_use]
    pub fn classify(&self, path: &str) -> &str {
        classify(path, &self.categories)
    }

    /// Categories in declared order, catch-all last
    #[must_use]
    pub fn categories(&self) -> &[CategorySpec] {
        &self.categories
    }

    /// Category names in declared order, catch-all last
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }

    /// Position of a category in the catalog
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|category| category.name == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self { categories: default_categories() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_library_beats_core() {
        let catalog = Catalog::default();
        assert_eq!(catalog.classify("Core/Src/ml-kem-512/poly.o"), "ML-KEM-512");
        assert_eq!(catalog.classify("Core/Src/crypto_harness.o"), "Core & System");
    }

    #[test]
    fn test_rsa_sources_and_mbedtls() {
        let catalog = Catalog::default();
        assert_eq!(catalog.classify("RSA/Src/bigint.o"), "mbedTLS (RSA)");
        assert_eq!(catalog.classify("Middlewares/mbedtls/library/bignum.o"), "mbedTLS (RSA)");
    }

    #[test]
    fn test_toolchain_libraries_are_core() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.classify("/opt/arm-none-eabi/lib/thumb/v7e-m/libc_nano.a(lib_a-memcpy.o)"),
            "Core & System"
        );
        assert_eq!(catalog.classify("Drivers/STM32F7xx_HAL_Driver/Src/stm32f7xx_hal_uart.o"), "STM32 HAL");
    }

    #[test]
    fn test_unmatched_defaults_to_other() {
        let catalog = Catalog::default();
        assert_eq!(catalog.classify("build/whatever.o"), OTHER_CATEGORY);
        assert_eq!(catalog.classify(""), OTHER_CATEGORY);
    }

    #[test]
    fn test_declared_order_decides_ambiguous_paths() {
        let path = "Core/ml-kem-512/indcpa.o";
        let kem_first = vec![
            CategorySpec::new("ML-KEM-512", &["ml-kem-512"]),
            CategorySpec::new("Core & System", &["Core"]),
        ];
        let core_first = vec![
            CategorySpec::new("Core & System", &["Core"]),
            CategorySpec::new("ML-KEM-512", &["ml-kem-512"]),
        ];
        assert_eq!(classify(path, &kem_first), "ML-KEM-512");
        assert_eq!(classify(path, &core_first), "Core & System");
    }

    #[test]
    fn test_catch_all_never_matches_by_pattern() {
        let categories = vec![CategorySpec::new(OTHER_CATEGORY, &["build"])];
        assert_eq!(classify("build/a.o", &categories), OTHER_CATEGORY);
    }

    #[test]
    fn test_catalog_appends_catch_all() {
        let catalog = Catalog::new(vec![CategorySpec::new("Falcon-512", &["falcon-512"])]).unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Falcon-512", OTHER_CATEGORY]);
    }

    #[test]
    fn test_catalog_moves_catch_all_last() {
        let catalog = Catalog::new(vec![
            CategorySpec::new(OTHER_CATEGORY, &[]),
            CategorySpec::new("SPHINCS+", &["sphincs"]),
        ])
        .unwrap();
        assert_eq!(catalog.index_of(OTHER_CATEGORY), Some(1));
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let result = Catalog::new(vec![
            CategorySpec::new("ML-DSA-44", &["ml-dsa-44"]),
            CategorySpec::new("ML-DSA-44", &["dilithium"]),
        ]);
        assert!(matches!(result, Err(ConfigError::DuplicateCategory(name)) if name == "ML-DSA-44"));
    }

    #[test]
    fn test_catalog_rejects_patterns_on_catch_all() {
        let result = Catalog::new(vec![CategorySpec::new(OTHER_CATEGORY, &["x"])]);
        assert!(matches!(result, Err(ConfigError::PatternsOnCatchAll(_))));
    }
}
