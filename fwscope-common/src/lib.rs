//! # Shared Data Tables (firmware project ↔ report engine)
//!
//! Defines the constants and catalogs that describe one firmware benchmark
//! project: the target clock, the memory capacities of the part, the module
//! catalog used to attribute object files, and the reference cycle counts
//! used for speedup comparison.
//!
//! Everything here is plain `'static` data. The `fwscope` crate copies these
//! tables into its runtime `Config`, where a TOML file can override them when
//! the engine is pointed at a different firmware project.
//!
//! ## Key Tables
//!
//! - [`DEFAULT_CATEGORIES`] - Ordered module catalog (first match wins)
//! - [`DEFAULT_BASELINES`] - Reference cycle counts keyed by (algorithm, operation)
//! - [`TABLE_MARKERS`] - Report sections that can be substituted

#![cfg_attr(not(test), no_std)]

// ============================================================================
// Target Constants
// ============================================================================

/// Core clock of the benchmark target (STM32F7 at 216 MHz)
///
/// Used to derive wall time from cycle counts: `ms = cycles / hz * 1000`.
pub const DEFAULT_CLOCK_HZ: u64 = 216_000_000;

/// On-chip flash capacity in bytes (2,048 KiB)
pub const DEFAULT_FLASH_CAPACITY_BYTES: u64 = 2048 * 1024;

/// On-chip SRAM capacity in bytes (512 KiB)
pub const DEFAULT_RAM_CAPACITY_BYTES: u64 = 512 * 1024;

/// Tag the firmware prints in front of every UART line
///
/// The capture tool sometimes repeats it, e.g. `UART >> UART >> RSA: ...`.
pub const DEFAULT_LOG_TAG: &str = "UART >>";

/// Algorithm prefix of the classical reference scheme
///
/// Rows for this scheme sort before the post-quantum schemes in every table.
pub const DEFAULT_REFERENCE_PREFIX: &str = "RSA";

/// Name of the catch-all module category
///
/// Never matched by pattern; receives every path no other category claims.
pub const OTHER_CATEGORY: &str = "Other";

// ============================================================================
// Module Catalog
// ============================================================================

/// A module category definition: display name plus substring patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDef {
    pub name: &'static str,
    pub patterns: &'static [&'static str],
}

/// Default module catalog, in match priority order
///
/// Cryptographic libraries come before the generic HAL and core buckets so
/// that e.g. `Core/Src/ml-kem-512/poly.o` is charged to ML-KEM-512 rather
/// than to `Core & System`.
pub const DEFAULT_CATEGORIES: &[CategoryDef] = &[
    CategoryDef { name: "mbedTLS (RSA)", patterns: &["mbedtls", "RSA/Src"] },
    CategoryDef { name: "ML-KEM-512", patterns: &["ml-kem-512"] },
    CategoryDef { name: "ML-DSA-44", patterns: &["ml-dsa-44"] },
    CategoryDef { name: "Falcon-512", patterns: &["falcon-512"] },
    CategoryDef { name: "SPHINCS+", patterns: &["sphincs"] },
    CategoryDef { name: "STM32 HAL", patterns: &["STM32F7xx_HAL_Driver"] },
    CategoryDef {
        name: "Core & System",
        patterns: &["Core", "startup", "libc", "libgcc", "libnosys"],
    },
    CategoryDef { name: OTHER_CATEGORY, patterns: &[] },
];

// ============================================================================
// Baseline Cycle Counts
// ============================================================================

/// Reference cycle count for one (algorithm, operation) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineDef {
    pub algorithm: &'static str,
    pub operation: &'static str,
    pub cycles: u64,
}

/// Cycle counts of the portable C build, used as the speedup denominator
pub const DEFAULT_BASELINES: &[BaselineDef] = &[
    BaselineDef { algorithm: "ML-KEM-512", operation: "Keygen", cycles: 5_152_020 },
    BaselineDef { algorithm: "ML-KEM-512", operation: "Encaps", cycles: 6_264_054 },
    BaselineDef { algorithm: "ML-DSA-44", operation: "Keygen", cycles: 15_542_697 },
    BaselineDef { algorithm: "ML-DSA-44", operation: "Sign", cycles: 57_625_468 },
];

// ============================================================================
// Report Markers
// ============================================================================

/// Performance (cycles + speedup) table marker name
pub const PERFORMANCE_TABLE: &str = "PERFORMANCE_TABLE";

/// Peak stack usage table marker name
pub const STACK_TABLE: &str = "STACK_TABLE";

/// Flash / RAM footprint table marker name
pub const RESOURCE_TABLE: &str = "RESOURCE_TABLE";

/// All substitutable sections, in the order they are rendered
///
/// A report delimits each one with `<!-- NAME_START -->` and `<!-- NAME_END -->`.
pub const TABLE_MARKERS: [&str; 3] = [PERFORMANCE_TABLE, STACK_TABLE, RESOURCE_TABLE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_is_last_and_patternless() {
        let last = DEFAULT_CATEGORIES.last().unwrap();
        assert_eq!(last.name, OTHER_CATEGORY);
        assert!(last.patterns.is_empty());
    }

    #[test]
    fn test_crypto_categories_precede_core() {
        let pos = |name: &str| DEFAULT_CATEGORIES.iter().position(|c| c.name == name).unwrap();
        assert!(pos("ML-KEM-512") < pos("Core & System"));
        assert!(pos("mbedTLS (RSA)") < pos("STM32 HAL"));
    }
}
