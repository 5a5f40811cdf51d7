//! Static memory footprint per module.
//!
//! Consumes [`MapEntry`] records and charges each one to a module category
//! under a fixed accounting rule keyed on the section name:
//!
//! | Section                                 | Flash | RAM |
//! |-----------------------------------------|:-----:|:---:|
//! | `.text*`, `.rodata*`, `.isr_vector`     |   ✓   |     |
//! | `.data*` (image in flash, copy in RAM)  |   ✓   |  ✓  |
//! | `.bss*`                                 |       |  ✓  |
//! | anything else (debug, comments, ...)    |       |     |
//!
//! Totals only ever grow. Zero-size entries are rejected before the rule is
//! applied, and an entry that would overflow a module total is dropped whole.

// Utilization percentages intentionally convert u64 to f64
#![allow(clippy::cast_precision_loss)]

use crate::classification::Catalog;
use crate::domain::{InputError, MapEntry, SectionKind};
use crate::mapfile::MapEntryParser;
use log::debug;
use serde::Serialize;
use std::io::BufRead;

/// Flash and RAM bytes attributed to one module category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleUsage {
    pub name: String,
    pub rom_bytes: u64,
    pub ram_bytes: u64,
}

/// Accumulates per-module totals for one map file
///
/// Owns the accumulators for the lifetime of a run; one instance per input.
#[derive(Debug)]
pub struct ResourceAggregator<'c> {
    catalog: &'c Catalog,
    usage: Vec<ModuleUsage>,
    zero_sized: u64,
    ignored: u64,
    overflowed: u64,
}

impl<'c> ResourceAggregator<'c> {
    /// Create zeroed accumulators, one per catalog category, in catalog order.
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        let usage = catalog
            .names()
            .map(|name| ModuleUsage { name: name.to_owned(), rom_bytes: 0, ram_bytes: 0 })
            .collect();
        Self { catalog, usage, zero_sized: 0, ignored: 0, overflowed: 0 }
    }

    /// Classify the entry's path and accumulate it.
    pub fn record(&mut self, entry: &MapEntry) {
        let category = self.catalog.classify(&entry.symbol_path);
        let index = self.slot(category);
        self.add(index, entry);
    }

    /// Accumulate an entry under an already-chosen category.
    ///
    /// Unknown category names are charged to the catch-all.
    pub fn accumulate(&mut self, entry: &MapEntry, category: &str) {
        let index = self.slot(category);
        self.add(index, entry);
    }

    fn slot(&self, category: &str) -> usize {
        self.catalog.index_of(category).unwrap_or_else(|| {
            debug!("Unknown module category \"{category}\", charging to catch-all");
            self.usage.len() - 1
        })
    }

    fn add(&mut self, index: usize, entry: &MapEntry) {
        if entry.size_bytes == 0 {
            self.zero_sized += 1;
            return;
        }

        let kind = SectionKind::from_section_name(&entry.section);
        if kind == SectionKind::Ignored {
            self.ignored += 1;
            return;
        }

        let module = &mut self.usage[index];
        let grow = |total: u64, counts: bool| {
            if counts {
                total.checked_add(entry.size_bytes)
            } else {
                Some(total)
            }
        };
        match (grow(module.rom_bytes, kind.counts_rom()), grow(module.ram_bytes, kind.counts_ram())) {
            (Some(rom_bytes), Some(ram_bytes)) => {
                module.rom_bytes = rom_bytes;
                module.ram_bytes = ram_bytes;
            }
            _ => {
                self.overflowed += 1;
                debug!(
                    "{} bytes from {} would overflow the {} total, entry dropped",
                    entry.size_bytes, entry.symbol_path, module.name
                );
            }
        }
    }

    /// Entries dropped because they would overflow a module total
    #[must_use]
    pub fn overflowed(&self) -> u64 {
        self.overflowed
    }

    /// Current totals in catalog order
    #[must_use]
    pub fn usage(&self) -> &[ModuleUsage] {
        &self.usage
    }

    /// Freeze the accumulators into a report.
    #[must_use]
    pub fn finish(self) -> ResourceReport {
        debug!(
            "resource aggregation: {} zero-size entries, {} entries in non-footprint sections, {} overflowing entries",
            self.zero_sized, self.ignored, self.overflowed
        );
        ResourceReport::new(self.usage)
    }
}

/// Final per-module footprint of one firmware image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceReport {
    pub modules: Vec<ModuleUsage>,
    pub total_rom_bytes: u64,
    pub total_ram_bytes: u64,
}

impl ResourceReport {
    /// Build a report; grand totals saturate at `u64::MAX`.
    #[must_use]
    pub fn new(modules: Vec<ModuleUsage>) -> Self {
        let total_rom_bytes = modules.iter().fold(0u64, |sum, m| sum.saturating_add(m.rom_bytes));
        let total_ram_bytes = modules.iter().fold(0u64, |sum, m| sum.saturating_add(m.ram_bytes));
        Self { modules, total_rom_bytes, total_ram_bytes }
    }

    /// Usage of one module by name
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&ModuleUsage> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Flash utilization in percent of `capacity_bytes`
    #[must_use]
    pub fn rom_utilization(&self, capacity_bytes: u64) -> f64 {
        percent(self.total_rom_bytes, capacity_bytes)
    }

    /// RAM utilization in percent of `capacity_bytes`
    #[must_use]
    pub fn ram_utilization(&self, capacity_bytes: u64) -> f64 {
        percent(self.total_ram_bytes, capacity_bytes)
    }
}

fn percent(used: u64, capacity: u64) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    used as f64 / capacity as f64 * 100.0
}

/// Parse a map listing and aggregate it in one pass.
///
/// # Errors
/// Returns an error only if reading from `reader` fails; malformed lines are
/// skipped.
pub fn aggregate_map<R: BufRead>(reader: R, catalog: &Catalog) -> Result<ResourceReport, InputError> {
    let mut aggregator = ResourceAggregator::new(catalog);
    for entry in MapEntryParser::new(reader) {
        aggregator.record(&entry?);
    }
    Ok(aggregator.finish())
}
