//! Dataset export
//!
//! This module writes the aggregated results in machine-readable form.
//! Currently supports a JSON dataset consumed by the external plotting step.

pub mod json;

pub use json::{Dataset, DatasetExporter};
