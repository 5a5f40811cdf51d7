//! Fixed-width text tables for terminal output

use super::format_thousands;
use super::markdown::rounded_cycles;
use crate::analysis::{GroupStats, ResourceReport};
use crate::domain::BenchmarkRecord;

const RULE_WIDTH: usize = 80;

/// Every parsed record, in log order.
#[must_use]
pub fn records_table(records: &[BenchmarkRecord]) -> String {
    let mut out = format!(
        "{:<20} | {:<20} | {:>13} | {:>10} | {:>10}\n{}",
        "Algorithm",
        "Operation",
        "Cycles",
        "Time (ms)",
        "Stack (B)",
        "-".repeat(RULE_WIDTH)
    );
    for r in records {
        out.push_str(&format!(
            "\n{:<20} | {:<20} | {:>13} | {:>10.2} | {:>10}",
            r.algorithm,
            r.operation,
            format_thousands(r.cycles),
            r.time_ms,
            format_thousands(r.stack_bytes)
        ));
    }
    out
}

/// Per-group means with sample counts and cycle range.
#[must_use]
pub fn groups_table(groups: &[GroupStats]) -> String {
    let mut out = format!(
        "{:<20} | {:<16} | {:>4} | {:>13} | {:>13} | {:>13} | {:>10}\n{}",
        "Algorithm",
        "Operation",
        "Runs",
        "Mean Cycles",
        "Min",
        "Max",
        "Mean Stack",
        "-".repeat(RULE_WIDTH + 25)
    );
    for g in groups {
        out.push_str(&format!(
            "\n{:<20} | {:<16} | {:>4} | {:>13} | {:>13} | {:>13} | {:>10}",
            g.algorithm,
            g.operation,
            g.sample_count,
            format_thousands(rounded_cycles(g.mean_cycles)),
            format_thousands(g.min_cycles),
            format_thousands(g.max_cycles),
            format_thousands(rounded_cycles(g.mean_stack_bytes)),
        ));
    }
    out
}

/// Per-module flash / RAM with a total row.
#[must_use]
pub fn resources_table(report: &ResourceReport) -> String {
    let rule = "-".repeat(60);
    let mut out = format!("{:<25} | {:<15} | {:<15}\n{rule}", "Module", "Flash (Bytes)", "RAM (Bytes)");
    for module in &report.modules {
        out.push_str(&format!(
            "\n{:<25} | {:<15} | {:<15}",
            module.name,
            format_thousands(module.rom_bytes),
            format_thousands(module.ram_bytes)
        ));
    }
    out.push_str(&format!(
        "\n{rule}\n{:<25} | {:<15} | {:<15}",
        "TOTAL",
        format_thousands(report.total_rom_bytes),
        format_thousands(report.total_ram_bytes)
    ));
    out
}
