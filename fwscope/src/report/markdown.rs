//! Markdown table rendering for the report document.
//!
//! Each function returns a complete table block without surrounding blank
//! lines; the substitution step places it between its markers.

// Means and utilizations are display values
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use super::format_thousands;
use super::speedup::Speedup;
use crate::analysis::{GroupStats, ResourceReport};
use crate::config::BaselineTable;
use crate::domain::{BenchmarkRecord, ClockHz};

/// Mean cycles as the integer shown in tables
pub(crate) fn rounded_cycles(mean: f64) -> u64 {
    if mean.is_finite() && mean > 0.0 {
        mean.round() as u64
    } else {
        0
    }
}

/// Cycles, wall time and speedup per (algorithm, operation).
#[must_use]
pub fn performance_table(
    groups: &[GroupStats],
    baselines: &BaselineTable,
    reference_prefix: &str,
    clock: ClockHz,
) -> String {
    let mut out = String::from(
        "| Algorithm | Operation | Baseline (cycles) | Measured (cycles) | Time (ms) | Speedup |\n\
         | :--- | :--- | ---: | ---: | ---: | :--- |",
    );

    for group in groups {
        let measured = rounded_cycles(group.mean_cycles);
        let speedup =
            Speedup::compute(baselines, reference_prefix, &group.algorithm, &group.operation, measured);
        let baseline = baselines
            .get(&group.algorithm, &group.operation)
            .map_or_else(|| "-".to_owned(), format_thousands);
        let measured_cell = match speedup {
            Speedup::Ratio(_) => format!("**{}**", format_thousands(measured)),
            Speedup::Reference | Speedup::NoBaseline => format_thousands(measured),
        };

        out.push_str(&format!(
            "\n| {} | {} | {baseline} | {measured_cell} | {:.2} | {speedup} |",
            group.algorithm,
            group.operation,
            clock.cycles_to_ms(measured),
        ));
    }
    out
}

/// Peak stack per (algorithm, operation) from the first-seen records.
#[must_use]
pub fn stack_table(records: &[BenchmarkRecord]) -> String {
    let mut out = String::from("| Algorithm | Operation | Peak Stack (Bytes) |\n| :--- | :--- | ---: |");
    for record in records {
        out.push_str(&format!(
            "\n| {} | {} | {} |",
            record.algorithm,
            record.operation,
            format_thousands(record.stack_bytes)
        ));
    }
    out
}

/// Per-module footprint followed by a utilization summary.
#[must_use]
pub fn resource_table(report: &ResourceReport, flash_capacity_bytes: u64, ram_capacity_bytes: u64) -> String {
    let mut out = String::from("| Module | Flash (Bytes) | RAM (Bytes) |\n| :--- | ---: | ---: |");
    for module in &report.modules {
        out.push_str(&format!(
            "\n| {} | {} | {} |",
            module.name,
            format_thousands(module.rom_bytes),
            format_thousands(module.ram_bytes)
        ));
    }
    out.push_str(&format!(
        "\n| **TOTAL** | **{}** | **{}** |",
        format_thousands(report.total_rom_bytes),
        format_thousands(report.total_ram_bytes)
    ));

    out.push_str(
        "\n\n| Resource | Size (Bytes) | Size (KB) | Capacity | Utilization |\n\
         | :--- | :--- | :--- | :--- | :--- |",
    );
    out.push_str(&format!(
        "\n| **Flash (ROM)** | **{}** | **~{:.1} KB** | {} KB | ~{:.1}% |",
        format_thousands(report.total_rom_bytes),
        report.total_rom_bytes as f64 / 1024.0,
        format_thousands(flash_capacity_bytes / 1024),
        report.rom_utilization(flash_capacity_bytes),
    ));
    out.push_str(&format!(
        "\n| **RAM (Static)** | **{}** | **~{:.1} KB** | {} KB | ~{:.1}% |",
        format_thousands(report.total_ram_bytes),
        report.total_ram_bytes as f64 / 1024.0,
        format_thousands(ram_capacity_bytes / 1024),
        report.ram_utilization(ram_capacity_bytes),
    ));
    out
}
