//! Analysis logic for parsed map entries and benchmark records
//!
//! This module contains the pure aggregation logic, separated from parsing
//! and from the report presentation layer.

pub mod performance;
pub mod resources;

pub use performance::{compare_keys, GroupStats, PerformanceAggregator};
pub use resources::{aggregate_map, ModuleUsage, ResourceAggregator, ResourceReport};
