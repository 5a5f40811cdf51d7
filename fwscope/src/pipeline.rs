//! End-to-end steps shared by the binary and the integration tests
//!
//! Each step owns its own state: inputs are read whole, parsed in a single
//! pass, and aggregated into fresh accumulators. Missing inputs degrade to
//! empty results with a warning; only problems with the report document
//! itself (or an unreadable required input) surface as errors.

use crate::analysis::{aggregate_map, ResourceReport};
use crate::classification::Catalog;
use crate::domain::{BenchmarkRecord, InputError, ReportError};
use crate::report::{ReportTables, Substitution};
use crate::uart_log::LogRecordParser;
use log::{info, warn};
use std::io::ErrorKind;
use std::path::Path;

/// How a read failure on an input is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    /// Missing file → warning; any other read error is fatal
    Required,
    /// Any read error → warning
    Optional,
}

/// Read an input file.
///
/// Returns `Ok(None)` when the file is absent (or unreadable and optional).
///
/// # Errors
/// Returns an error when a required input exists but cannot be read.
pub fn read_input(path: &Path, role: InputRole) -> Result<Option<Vec<u8>>, InputError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("{} not found, continuing without it", path.display());
            Ok(None)
        }
        Err(e) if role == InputRole::Optional => {
            warn!("Failed to read {}: {e}, continuing without it", path.display());
            Ok(None)
        }
        Err(source) => Err(InputError::ReadFailed { path: path.to_path_buf(), source }),
    }
}

/// Parse benchmark records from a UART capture.
///
/// Returns `Ok(None)` when the log is absent, and `Ok(Some(vec![]))` when it
/// exists but holds no result lines.
///
/// # Errors
/// Returns an error if the log exists but cannot be read.
pub fn load_benchmarks(
    path: &Path,
    parser: &LogRecordParser,
) -> Result<Option<Vec<BenchmarkRecord>>, InputError> {
    let Some(bytes) = read_input(path, InputRole::Required)? else {
        return Ok(None);
    };
    let records = parser.parse_bytes(&bytes);
    info!("Parsed {} benchmark records from {}", records.len(), path.display());
    Ok(Some(records))
}

/// Aggregate the module footprint of a linker map.
///
/// Returns `Ok(None)` when the map is unavailable.
///
/// # Errors
/// Propagates read errors from the in-memory parse (none in practice).
pub fn load_resources(path: &Path, catalog: &Catalog) -> Result<Option<ResourceReport>, InputError> {
    let Some(bytes) = read_input(path, InputRole::Optional)? else {
        return Ok(None);
    };
    let report = aggregate_map(bytes.as_slice(), catalog)?;
    info!(
        "Aggregated {} bytes flash / {} bytes RAM from {}",
        report.total_rom_bytes,
        report.total_ram_bytes,
        path.display()
    );
    Ok(Some(report))
}

/// Substitute rendered tables into a report document in place.
///
/// The file is only rewritten when its content changes.
///
/// # Errors
/// Returns an error if the report cannot be read or written.
pub fn update_report(path: &Path, tables: &ReportTables) -> Result<Substitution, ReportError> {
    let original = std::fs::read_to_string(path)
        .map_err(|source| ReportError::ReadFailed { path: path.to_path_buf(), source })?;

    let result = tables.apply(&original);
    if result.changed(&original) {
        std::fs::write(path, &result.text)
            .map_err(|source| ReportError::WriteFailed { path: path.to_path_buf(), source })?;
        info!("Updated {}", path.display());
    } else {
        info!("{} already up to date", path.display());
    }
    Ok(result)
}
