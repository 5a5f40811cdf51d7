//! Domain types providing compile-time safety and self-documentation
//!
//! These types carry the facts extracted from the two inputs: `MapEntry` from
//! the linker map and `BenchmarkRecord` from the UART log. Derived values
//! (wall time, section accounting class) are computed here once so that no
//! caller can read them from untrusted input.

use serde::Serialize;
use std::fmt;

/// Core clock frequency in Hz
///
/// Only used to turn cycle counts into milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockHz(pub u64);

impl ClockHz {
    /// Convert a cycle count to milliseconds, rounded to 2 decimal places.
    ///
    /// A zero clock is rejected by config validation; it yields 0.0 here
    /// instead of infinity.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Cycle counts fit comfortably in f64 mantissa
    pub fn cycles_to_ms(self, cycles: u64) -> f64 {
        if self.0 == 0 {
            return 0.0;
        }
        let ms = cycles as f64 / self.0 as f64 * 1000.0;
        (ms * 100.0).round() / 100.0
    }
}

impl fmt::Display for ClockHz {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MHz", self.0 as f64 / 1_000_000.0)
    }
}

/// One contribution line from the linker map
///
/// Ephemeral: produced by the map parser and consumed by the resource
/// aggregator straight away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    /// Output section name, e.g. `.text.poly_ntt` or `.bss`
    pub section: String,
    /// Size in bytes (already decoded from hex)
    pub size_bytes: u64,
    /// Object file / archive member that contributed the bytes
    pub symbol_path: String,
}

/// How a section counts toward the static memory footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// `.text*`, `.rodata*`, `.isr_vector` - flash only
    Code,
    /// `.data*` - flash image plus RAM copy
    InitData,
    /// `.bss*` - RAM only
    ZeroData,
    /// Debug info, comments, ARM attributes, ...
    Ignored,
}

impl SectionKind {
    /// Classify a section name by its prefix.
    #[must_use]
    pub fn from_section_name(section: &str) -> Self {
        if section.starts_with(".text") || section.starts_with(".rodata") || section == ".isr_vector" {
            SectionKind::Code
        } else if section.starts_with(".data") {
            SectionKind::InitData
        } else if section.starts_with(".bss") {
            SectionKind::ZeroData
        } else {
            SectionKind::Ignored
        }
    }

    /// Returns true if bytes in this section occupy flash.
    #[must_use]
    pub fn counts_rom(self) -> bool {
        matches!(self, SectionKind::Code | SectionKind::InitData)
    }

    /// Returns true if bytes in this section occupy RAM at runtime.
    #[must_use]
    pub fn counts_ram(self) -> bool {
        matches!(self, SectionKind::InitData | SectionKind::ZeroData)
    }
}

/// One timed operation reported by the benchmark firmware
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRecord {
    pub algorithm: String,
    pub operation: String,
    pub cycles: u64,
    pub stack_bytes: u64,
    /// Always `cycles / clock * 1000`, rounded to 2 decimal places
    pub time_ms: f64,
}

impl BenchmarkRecord {
    /// Build a record, deriving wall time from the cycle count.
    pub fn new(
        algorithm: impl Into<String>,
        operation: impl Into<String>,
        cycles: u64,
        stack_bytes: u64,
        clock: ClockHz,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            operation: operation.into(),
            cycles,
            stack_bytes,
            time_ms: clock.cycles_to_ms(cycles),
        }
    }

    /// Grouping key of this record
    #[must_use]
    pub fn key(&self) -> GroupKey {
        GroupKey::new(&self.algorithm, &self.operation)
    }
}

/// (algorithm, operation) pair used to group benchmark records
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    pub algorithm: String,
    pub operation: String,
}

impl GroupKey {
    pub fn new(algorithm: &str, operation: &str) -> Self {
        Self { algorithm: algorithm.to_owned(), operation: operation.to_owned() }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.algorithm, self.operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_to_ms_rounds_to_two_places() {
        let clock = ClockHz(216_000_000);
        assert!((clock.cycles_to_ms(6_264_054) - 29.0).abs() < f64::EPSILON);
        assert!((clock.cycles_to_ms(5_152_020) - 23.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_clock_does_not_divide() {
        assert_eq!(ClockHz(0).cycles_to_ms(1234), 0.0);
    }

    #[test]
    fn test_section_kind_prefixes() {
        assert_eq!(SectionKind::from_section_name(".text.poly_ntt"), SectionKind::Code);
        assert_eq!(SectionKind::from_section_name(".rodata.zetas"), SectionKind::Code);
        assert_eq!(SectionKind::from_section_name(".isr_vector"), SectionKind::Code);
        assert_eq!(SectionKind::from_section_name(".data.SystemCoreClock"), SectionKind::InitData);
        assert_eq!(SectionKind::from_section_name(".bss.huart1"), SectionKind::ZeroData);
        assert_eq!(SectionKind::from_section_name(".debug_info"), SectionKind::Ignored);
    }

    #[test]
    fn test_isr_vector_must_match_exactly() {
        assert_eq!(SectionKind::from_section_name(".isr_vector_extra"), SectionKind::Ignored);
    }

    #[test]
    fn test_init_data_counts_both() {
        let kind = SectionKind::InitData;
        assert!(kind.counts_rom());
        assert!(kind.counts_ram());
        assert!(!SectionKind::ZeroData.counts_rom());
        assert!(!SectionKind::Ignored.counts_ram());
    }

    #[test]
    fn test_clock_display() {
        assert_eq!(ClockHz(216_000_000).to_string(), "216 MHz");
    }
}
