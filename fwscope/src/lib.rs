//! # fwscope - Firmware Benchmark & Footprint Report Engine
//!
//! fwscope turns two build artifacts of an embedded benchmark project into
//! report tables: the UART capture of the benchmark firmware (cycle counts and
//! peak stack per cryptographic operation) and the linker map of the image
//! (flash and RAM per library).
//!
//! ## Architecture Overview
//!
//! ```text
//!   uart.log (bytes)                     firmware.map (text)
//!         │                                     │
//!         ▼                                     ▼
//! ┌──────────────────┐              ┌──────────────────────┐
//! │ LogRecordParser  │              │   MapEntryParser     │
//! │   (uart_log)     │              │ cursor + classifier  │
//! └────────┬─────────┘              └──────────┬───────────┘
//!          │ BenchmarkRecord                   │ MapEntry
//!          ▼                                   ▼
//! ┌──────────────────┐              ┌──────────────────────┐
//! │  Performance     │              │ Catalog +            │
//! │  Aggregator      │              │ ResourceAggregator   │
//! └────────┬─────────┘              └──────────┬───────────┘
//!          └──────────────┬────────────────────┘
//!                         ▼
//!          ┌──────────────────────────────┐
//!          │ report: markdown / console   │──▶ REPORT.md (marker substitution)
//!          │ export: JSON dataset         │──▶ dataset.json (plotting)
//!          └──────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`mapfile`]: line-shape classifier and streaming map parser
//! - [`uart_log`]: benchmark record extraction, tolerant of repeated tags
//!   and invalid UTF-8
//! - [`classification`]: ordered, first-match-wins module catalog
//! - [`analysis`]: resource (flash/RAM) and performance (cycles/stack)
//!   aggregation
//! - [`report`]: Markdown and console tables, speedup, marker substitution
//! - [`export`]: JSON dataset for external plotting
//! - [`config`]: overridable constants, catalog and baselines (TOML)
//! - [`pipeline`]: file-level steps used by the binary
//! - [`cli`]: command-line argument parsing
//! - [`domain`]: core types and structured errors
//!
//! ## Typical Usage
//!
//! ```bash
//! # Print benchmark and footprint tables
//! fwscope uart.log build/firmware.map
//!
//! # Refresh the marked tables of a report
//! fwscope uart.log build/firmware.map --report docs/FINAL_REPORT.md
//!
//! # Export the dataset for plotting
//! fwscope uart.log --json benchmark.json
//! ```

pub mod analysis;
pub mod classification;
pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod mapfile;
pub mod pipeline;
pub mod report;
pub mod uart_log;
