//! Speedup against the baseline cycle table.

use crate::config::BaselineTable;
use std::fmt;

/// Speedup cell of the performance table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Speedup {
    /// `baseline / measured`
    Ratio(f64),
    /// Row belongs to the reference scheme itself
    Reference,
    /// No usable baseline (missing entry, or a zero on either side)
    NoBaseline,
}

impl Speedup {
    /// Compare a measured cycle count against the table.
    ///
    /// Never divides by zero: a zero measurement or a zero baseline yields
    /// [`Speedup::NoBaseline`].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(
        baselines: &BaselineTable,
        reference_prefix: &str,
        algorithm: &str,
        operation: &str,
        measured_cycles: u64,
    ) -> Self {
        match baselines.get(algorithm, operation) {
            Some(baseline) if baseline > 0 && measured_cycles > 0 => {
                Speedup::Ratio(baseline as f64 / measured_cycles as f64)
            }
            Some(_) => Speedup::NoBaseline,
            None if !reference_prefix.is_empty() && algorithm.starts_with(reference_prefix) => {
                Speedup::Reference
            }
            None => Speedup::NoBaseline,
        }
    }
}

impl fmt::Display for Speedup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speedup::Ratio(ratio) => write!(f, "**{ratio:.2}x**"),
            Speedup::Reference => f.write_str("*Baseline*"),
            Speedup::NoBaseline => f.write_str("*No baseline*"),
        }
    }
}
