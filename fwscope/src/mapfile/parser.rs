//! Streaming map-file parser.
//!
//! [`MapEntryParser`] wraps any `BufRead` and yields one [`MapEntry`] per
//! full-entry or continuation line. Nothing is buffered beyond the current
//! line, and the "current section" lives in a [`ParserCursor`] owned by the
//! parser instance, so two parses never share state.
//!
//! Map files are read as bytes and decoded lossily: a stray non-UTF-8 byte in
//! a path costs nothing but a replacement character.

use super::classifier::{classify_line, parse_hex_size, MapLine};
use crate::domain::{InputError, MapEntry};
use log::debug;
use std::io::BufRead;

/// Per-parse state threaded through the line loop
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParserCursor {
    current_section: Option<String>,
}

/// What one line contributed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Entry(MapEntry),
    /// Data-bearing line whose size was not valid hex
    MalformedSize,
    /// Continuation seen before any section name
    Orphan,
    /// Header, noise, or section-only line
    Nothing,
}

impl ParserCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Section that continuation lines are attributed to
    #[must_use]
    pub fn current_section(&self) -> Option<&str> {
        self.current_section.as_deref()
    }

    /// Feed one line, updating the current section as a side effect.
    pub fn advance(&mut self, line: &str) -> LineOutcome {
        match classify_line(line) {
            MapLine::Full { section, size_hex, path } => {
                self.current_section = Some(section.to_owned());
                make_entry(section, size_hex, path)
            }
            MapLine::Section { section } => {
                self.current_section = Some(section.to_owned());
                LineOutcome::Nothing
            }
            MapLine::Continuation { size_hex, path } => match self.current_section.as_deref() {
                Some(section) => make_entry(section, size_hex, path),
                None => LineOutcome::Orphan,
            },
            MapLine::Unrecognized => LineOutcome::Nothing,
        }
    }
}

fn make_entry(section: &str, size_hex: &str, path: &str) -> LineOutcome {
    match parse_hex_size(size_hex) {
        Some(size_bytes) => LineOutcome::Entry(MapEntry {
            section: section.to_owned(),
            size_bytes,
            symbol_path: path.to_owned(),
        }),
        None => LineOutcome::MalformedSize,
    }
}

/// Counters reported once the input is exhausted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: u64,
    pub entries: u64,
    pub malformed: u64,
    pub orphans: u64,
}

/// Iterator over the section contributions of a map file
pub struct MapEntryParser<R> {
    reader: R,
    cursor: ParserCursor,
    stats: ParseStats,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> MapEntryParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            cursor: ParserCursor::new(),
            stats: ParseStats::default(),
            buf: Vec::new(),
            done: false,
        }
    }

    /// Counters so far (final once the iterator returned `None`)
    #[must_use]
    pub fn stats(&self) -> ParseStats {
        self.stats
    }
}

impl<'a> MapEntryParser<&'a [u8]> {
    /// Parse an in-memory map listing.
    #[must_use]
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl<R: BufRead> Iterator for MapEntryParser<R> {
    type Item = Result<MapEntry, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    debug!(
                        "map parse finished: {} lines, {} entries, {} malformed sizes, {} orphan continuations",
                        self.stats.lines, self.stats.entries, self.stats.malformed, self.stats.orphans
                    );
                }
                Ok(_) => {
                    self.stats.lines += 1;
                    let line = String::from_utf8_lossy(&self.buf);
                    match self.cursor.advance(&line) {
                        LineOutcome::Entry(entry) => {
                            self.stats.entries += 1;
                            return Some(Ok(entry));
                        }
                        LineOutcome::MalformedSize => {
                            self.stats.malformed += 1;
                            debug!("line {}: size is not valid hex, skipped", self.stats.lines);
                        }
                        LineOutcome::Orphan => self.stats.orphans += 1,
                        LineOutcome::Nothing => {}
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(InputError::Io(e)));
                }
            }
        }
        None
    }
}
