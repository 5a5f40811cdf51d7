//! Benchmark aggregation by (algorithm, operation).
//!
//! Two views over the same records:
//!
//! - **Statistical** ([`PerformanceAggregator::groups`]): mean cycles and mean
//!   stack per key across every run in the log. Feeds the performance table
//!   and the plotting dataset.
//! - **First-seen** ([`PerformanceAggregator::first_seen`]): the first record
//!   per key, later repeats discarded. Feeds the stack table, which reports
//!   the peak observed in one representative run rather than a blend.
//!
//! Both views come out in the same deterministic order, see [`compare_keys`].

// Means intentionally convert u64/u128 sums to f64
#![allow(clippy::cast_precision_loss)]

use crate::domain::{BenchmarkRecord, GroupKey};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Aggregated statistics for one (algorithm, operation) group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub algorithm: String,
    pub operation: String,
    pub mean_cycles: f64,
    pub mean_stack_bytes: f64,
    pub min_cycles: u64,
    pub max_cycles: u64,
    pub sample_count: u32,
}

/// Running sums for one group
#[derive(Debug, Clone)]
struct GroupAccum {
    cycles_sum: u128,
    stack_sum: u128,
    min_cycles: u64,
    max_cycles: u64,
    count: u32,
}

impl GroupAccum {
    fn new(record: &BenchmarkRecord) -> Self {
        Self {
            cycles_sum: 0,
            stack_sum: 0,
            min_cycles: record.cycles,
            max_cycles: record.cycles,
            count: 0,
        }
    }

    fn add(&mut self, record: &BenchmarkRecord) {
        self.cycles_sum += u128::from(record.cycles);
        self.stack_sum += u128::from(record.stack_bytes);
        self.min_cycles = self.min_cycles.min(record.cycles);
        self.max_cycles = self.max_cycles.max(record.cycles);
        self.count += 1;
    }
}

/// Ordering used for every rendered performance view.
///
/// Algorithms starting with `reference_prefix` (the classical scheme) sort
/// first, then by algorithm name, then by operation name.
#[must_use]
pub fn compare_keys(reference_prefix: &str, a: (&str, &str), b: (&str, &str)) -> Ordering {
    let rank = |algorithm: &str| !algorithm.starts_with(reference_prefix);
    rank(a.0)
        .cmp(&rank(b.0))
        .then_with(|| a.0.cmp(b.0))
        .then_with(|| a.1.cmp(b.1))
}

/// Groups benchmark records as they are parsed
#[derive(Debug, Default)]
pub struct PerformanceAggregator {
    groups: HashMap<GroupKey, GroupAccum>,
    first_seen: Vec<BenchmarkRecord>,
    seen: HashSet<GroupKey>,
    total: u64,
}

impl PerformanceAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an aggregator from a batch of records.
    #[must_use]
    pub fn from_records(records: &[BenchmarkRecord]) -> Self {
        let mut aggregator = Self::new();
        for record in records {
            aggregator.record(record);
        }
        aggregator
    }

    /// Add one record to both views.
    pub fn record(&mut self, record: &BenchmarkRecord) {
        let key = record.key();
        self.total += 1;

        self.groups
            .entry(key.clone())
            .or_insert_with(|| GroupAccum::new(record))
            .add(record);

        if self.seen.insert(key) {
            self.first_seen.push(record.clone());
        }
    }

    /// Number of records seen, duplicates included
    #[must_use]
    pub fn total_records(&self) -> u64 {
        self.total
    }

    /// Number of distinct (algorithm, operation) keys
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Statistical view, sorted by [`compare_keys`].
    #[must_use]
    pub fn groups(&self, reference_prefix: &str) -> Vec<GroupStats> {
        let mut groups: Vec<GroupStats> = self
            .groups
            .iter()
            .map(|(key, acc)| {
                let n = f64::from(acc.count.max(1));
                GroupStats {
                    algorithm: key.algorithm.clone(),
                    operation: key.operation.clone(),
                    mean_cycles: acc.cycles_sum as f64 / n,
                    mean_stack_bytes: acc.stack_sum as f64 / n,
                    min_cycles: acc.min_cycles,
                    max_cycles: acc.max_cycles,
                    sample_count: acc.count,
                }
            })
            .collect();

        groups.sort_by(|a, b| {
            compare_keys(
                reference_prefix,
                (a.algorithm.as_str(), a.operation.as_str()),
                (b.algorithm.as_str(), b.operation.as_str()),
            )
        });
        groups
    }

    /// First-seen view, sorted by [`compare_keys`].
    #[must_use]
    pub fn first_seen(&self, reference_prefix: &str) -> Vec<BenchmarkRecord> {
        let mut records = self.first_seen.clone();
        records.sort_by(|a, b| {
            compare_keys(
                reference_prefix,
                (a.algorithm.as_str(), a.operation.as_str()),
                (b.algorithm.as_str(), b.operation.as_str()),
            )
        });
        records
    }
}
