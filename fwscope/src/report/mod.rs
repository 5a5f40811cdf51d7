//! Report rendering
//!
//! Turns aggregated tables into text:
//!
//! - [`markdown`]: tables for the report document
//! - [`console`]: fixed-width tables for the terminal
//! - [`substitute`]: idempotent marker-delimited replacement in a document
//! - [`speedup`]: ratio against the baseline cycle table

pub mod console;
pub mod markdown;
pub mod speedup;
pub mod substitute;

pub use speedup::Speedup;
pub use substitute::{end_marker, start_marker, substitute, Substitution};

use crate::analysis::{PerformanceAggregator, ResourceReport};
use crate::config::Config;
use fwscope_common::TABLE_MARKERS;

/// Format an integer with `,` thousands separators.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The Markdown tables of one run, keyed by marker name
///
/// A table is absent when its input file is missing, so the corresponding
/// report section keeps its previous content. An input that exists but
/// yields nothing still renders a header-only table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTables {
    pub performance: Option<String>,
    pub stack: Option<String>,
    pub resources: Option<String>,
}

impl ReportTables {
    /// Render every table whose input was available.
    #[must_use]
    pub fn render(
        config: &Config,
        performance: Option<&PerformanceAggregator>,
        resources: Option<&ResourceReport>,
    ) -> Self {
        let prefix = config.reference_prefix.as_str();
        Self {
            performance: performance.map(|agg| {
                markdown::performance_table(
                    &agg.groups(prefix),
                    &config.baseline_table(),
                    prefix,
                    config.clock(),
                )
            }),
            stack: performance.map(|agg| markdown::stack_table(&agg.first_seen(prefix))),
            resources: resources.map(|report| {
                markdown::resource_table(report, config.flash_capacity_bytes, config.ram_capacity_bytes)
            }),
        }
    }

    /// (marker name, table) pairs in render order, absent tables skipped
    #[must_use]
    pub fn named(&self) -> Vec<(&'static str, &str)> {
        let tables = [self.performance.as_deref(), self.stack.as_deref(), self.resources.as_deref()];
        TABLE_MARKERS
            .into_iter()
            .zip(tables)
            .filter_map(|(name, table)| table.map(|t| (name, t)))
            .collect()
    }

    /// Substitute into a document.
    #[must_use]
    pub fn apply(&self, document: &str) -> Substitution {
        substitute(document, &self.named())
    }
}
