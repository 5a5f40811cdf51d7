use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::{GroupStats, PerformanceAggregator, ResourceReport};
use crate::domain::{BenchmarkRecord, ReportError};

/// Everything a plotting script needs from one run
#[derive(Debug, Clone, Serialize)]
pub struct Dataset<'a> {
    /// Clock the `time_ms` fields were derived with
    pub clock_hz: u64,
    /// Raw records, in log order
    pub records: &'a [BenchmarkRecord],
    /// Per (algorithm, operation) means, in report order
    pub groups: Vec<GroupStats>,
    /// Per-module footprint, absent without a map file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<&'a ResourceReport>,
}

/// JSON exporter for the plotting dataset
pub struct DatasetExporter<'a> {
    dataset: Dataset<'a>,
}

impl<'a> DatasetExporter<'a> {
    /// Collect the dataset for one run
    pub fn new(
        clock_hz: u64,
        reference_prefix: &str,
        records: &'a [BenchmarkRecord],
        performance: &PerformanceAggregator,
        resources: Option<&'a ResourceReport>,
    ) -> Self {
        Self {
            dataset: Dataset {
                clock_hz,
                records,
                groups: performance.groups(reference_prefix),
                resources,
            },
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset<'a> {
        &self.dataset
    }

    /// Write pretty-printed JSON to any writer
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn export<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(writer, &self.dataset)?;
        Ok(())
    }

    /// Write the dataset to `path`, replacing any existing file
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|source| ReportError::WriteFailed { path: path.to_path_buf(), source })?;
        let mut writer = BufWriter::new(file);
        self.export(&mut writer)?;
        writer
            .flush()
            .map_err(|source| ReportError::WriteFailed { path: path.to_path_buf(), source })?;
        Ok(())
    }
}
