//! Benchmark record extraction from captured UART output
//!
//! The firmware prints one line per timed operation:
//!
//! ```text
//! UART >> ML-KEM-512: Keygen took 5152020 cycles, Stack: 4096 bytes
//! ```
//!
//! Captures are messy. The serial bridge sometimes repeats the tag
//! (`UART >> UART >> ...`), progress lines (`Starting Keygen...`) are mixed
//! in, and line noise can leave bytes that are not valid UTF-8. The parser
//! treats any run of tags as one prefix, ignores everything that is not a
//! result line, and decodes bytes lossily so one bad byte never costs the
//! whole file.

use crate::domain::{BenchmarkRecord, ClockHz, ConfigError, InputError};
use log::debug;
use regex::Regex;
use std::path::Path;

/// Extracts [`BenchmarkRecord`]s from log text
#[derive(Debug, Clone)]
pub struct LogRecordParser {
    pattern: Regex,
    clock: ClockHz,
}

impl LogRecordParser {
    /// Build a parser for lines prefixed by `tag`.
    ///
    /// # Errors
    /// Returns an error if the tag is empty or the resulting pattern is
    /// rejected by the regex engine.
    pub fn new(tag: &str, clock: ClockHz) -> Result<Self, ConfigError> {
        if tag.trim().is_empty() {
            return Err(ConfigError::EmptyLogTag);
        }

        // Algorithm and operation are the shortest runs up to ": " and " took ".
        // `.` stops at newlines, so a match never spans two log lines.
        let source = format!(
            r"(?:{}\s*)+(.*?): (.*?) took ([0-9]+) cycles, Stack: ([0-9]+) bytes",
            regex::escape(tag)
        );
        let pattern = Regex::new(&source)
            .map_err(|e| ConfigError::InvalidLogTag { tag: tag.to_owned(), error: e.to_string() })?;

        Ok(Self { pattern, clock })
    }

    /// Clock used to derive `time_ms`
    #[must_use]
    pub fn clock(&self) -> ClockHz {
        self.clock
    }

    /// Extract every non-overlapping record from `text`, in input order.
    #[must_use]
    pub fn parse_str(&self, text: &str) -> Vec<BenchmarkRecord> {
        let mut records = Vec::new();
        let mut dropped = 0usize;

        for caps in self.pattern.captures_iter(text) {
            let (Some(algorithm), Some(operation), Some(cycles), Some(stack)) =
                (caps.get(1), caps.get(2), caps.get(3), caps.get(4))
            else {
                continue;
            };

            match (cycles.as_str().parse::<u64>(), stack.as_str().parse::<u64>()) {
                (Ok(cycles), Ok(stack_bytes)) => records.push(BenchmarkRecord::new(
                    algorithm.as_str().trim(),
                    operation.as_str().trim(),
                    cycles,
                    stack_bytes,
                    self.clock,
                )),
                _ => {
                    dropped += 1;
                    debug!("numeric field out of range in {:?}, record dropped", &caps[0]);
                }
            }
        }

        debug!("log parse: {} records, {} dropped", records.len(), dropped);
        records
    }

    /// Extract records from raw bytes, replacing invalid UTF-8.
    #[must_use]
    pub fn parse_bytes(&self, bytes: &[u8]) -> Vec<BenchmarkRecord> {
        self.parse_str(&String::from_utf8_lossy(bytes))
    }

    /// Read and parse a log file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<BenchmarkRecord>, InputError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|source| InputError::ReadFailed { path: path.to_path_buf(), source })?;
        Ok(self.parse_bytes(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> LogRecordParser {
        LogRecordParser::new("UART >>", ClockHz(216_000_000)).unwrap()
    }

    #[test]
    fn test_repeated_tags_are_noise() {
        let records =
            parser().parse_str("UART >> UART >> ML-KEM-512: Keygen took 5152020 cycles, Stack: 4096 bytes");
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.algorithm, "ML-KEM-512");
        assert_eq!(r.operation, "Keygen");
        assert_eq!(r.cycles, 5_152_020);
        assert_eq!(r.stack_bytes, 4096);
    }

    #[test]
    fn test_one_tag_and_three_tags_agree() {
        let payload = "ML-DSA-44: Sign took 57625468 cycles, Stack: 49152 bytes";
        let one = parser().parse_str(&format!("UART >> {payload}"));
        let three = parser().parse_str(&format!("UART >> UART >> UART >> {payload}"));
        assert_eq!(one, three);
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn test_progress_lines_are_ignored() {
        let log = "\r\n--- RSA-2048 (mbedTLS Baseline) ---\r\n\
                   UART >> RSA: Starting KeyGen...\r\n\
                   UART >> RSA: KeyGen took 1200000000 cycles, Stack: 2100 bytes\r\n\
                   UART >> RSA: Public Op took 2100000 cycles, Stack: 900 bytes\r\n";
        let records = parser().parse_str(log);
        let ops: Vec<_> = records.iter().map(|r| r.operation.as_str()).collect();
        assert_eq!(ops, vec!["KeyGen", "Public Op"]);
    }

    #[test]
    fn test_time_is_derived_from_cycles() {
        let records =
            parser().parse_str("UART >> ML-KEM-512: Encaps took 6264054 cycles, Stack: 3000 bytes");
        assert!((records[0].time_ms - 29.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overflowing_cycles_drop_only_that_record() {
        let log = "UART >> A: X took 99999999999999999999999 cycles, Stack: 1 bytes\n\
                   UART >> B: Y took 10 cycles, Stack: 2 bytes\n";
        let records = parser().parse_str(log);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].algorithm, "B");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut bytes = b"\xff\xfe garbage UART >> Falcon-512: Verify took 480000 cycles, Stack: 800 bytes\n".to_vec();
        bytes.extend_from_slice(b"\x80UART >> Falcon-512: Sign took 900000 cycles, Stack: 1900 bytes\n");
        let records = parser().parse_bytes(&bytes);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].operation, "Sign");
    }

    #[test]
    fn test_custom_tag_is_escaped() {
        let parser = LogRecordParser::new("[bench]", ClockHz(100_000_000)).unwrap();
        let records = parser.parse_str("[bench] [bench] AES: Encrypt took 100000 cycles, Stack: 64 bytes");
        assert_eq!(records.len(), 1);
        assert!((records[0].time_ms - 1.0).abs() < f64::EPSILON);
        // Brackets are literal, not a character class
        assert!(parser.parse_str("b AES: Encrypt took 1 cycles, Stack: 1 bytes").is_empty());
    }

    #[test]
    fn test_empty_tag_is_rejected() {
        assert!(matches!(
            LogRecordParser::new("  ", ClockHz(1)),
            Err(ConfigError::EmptyLogTag)
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = parser().parse_file("does/not/exist.log");
        assert!(matches!(result, Err(InputError::ReadFailed { .. })));
    }
}
