//! Line shape recognition for linker map listings.
//!
//! # Shapes
//!
//! Tried in priority order; the first one that matches wins:
//!
//! 1. **Full entry** - `.text.keygen  0x08001234  0x1a4  build/ml-kem-512/kem.o`
//! 2. **Section header** - `.text.crypto_kem_keypair_with_a_long_name` alone on a line
//! 3. **Continuation** - `  0x08001234  0x1a4  build/ml-kem-512/kem.o`
//!
//! A full entry also starts like a section header, so it has to be tried
//! first. Everything else (memory map tables, `*(.text*)` input patterns,
//! `LOAD` lines, symbol assignments, blank lines) is [`MapLine::Unrecognized`].

use once_cell::sync::Lazy;
use regex::Regex;

macro_rules! static_regex {
    ($name:ident, $str:expr) => {
        static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($str).expect(concat!("invalid regex ", stringify!($name))));
    };
}

static_regex!(
    FULL_ENTRY,
    r"^\s*(?P<section>\.[a-zA-Z0-9_.]+)\s+0x[0-9a-fA-F]+\s+(?P<size>0x[0-9a-fA-F]+)\s+(?P<path>.+)$"
);
static_regex!(SECTION_HEADER, r"^\s*(?P<section>\.[a-zA-Z0-9_.]+)\s*$");
static_regex!(
    CONTINUATION,
    r"^\s+0x[0-9a-fA-F]+\s+(?P<size>0x[0-9a-fA-F]+)\s+(?P<path>.+)$"
);

/// Result of classifying one map line
///
/// Borrowed from the line; sizes are still hex text so that a malformed
/// value only costs the one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapLine<'a> {
    /// Section, address, size and path on one line
    Full { section: &'a str, size_hex: &'a str, path: &'a str },
    /// Section name alone; the numbers follow on the next line
    Section { section: &'a str },
    /// Address, size and path belonging to the current section
    Continuation { size_hex: &'a str, path: &'a str },
    /// Anything else
    Unrecognized,
}

/// Classify a single map line.
///
/// Trailing whitespace (including a stray `\r`) is ignored.
#[must_use]
pub fn classify_line(line: &str) -> MapLine<'_> {
    let line = line.trim_end();

    if let Some(caps) = FULL_ENTRY.captures(line) {
        if let (Some(section), Some(size), Some(path)) =
            (caps.name("section"), caps.name("size"), caps.name("path"))
        {
            return MapLine::Full {
                section: section.as_str(),
                size_hex: size.as_str(),
                path: path.as_str(),
            };
        }
    }

    if let Some(section) = SECTION_HEADER.captures(line).and_then(|caps| caps.name("section")) {
        return MapLine::Section { section: section.as_str() };
    }

    if let Some(caps) = CONTINUATION.captures(line) {
        if let (Some(size), Some(path)) = (caps.name("size"), caps.name("path")) {
            return MapLine::Continuation { size_hex: size.as_str(), path: path.as_str() };
        }
    }

    MapLine::Unrecognized
}

/// Decode a `0x`-prefixed hex size.
///
/// Returns `None` for values that do not fit in a `u64`.
#[must_use]
pub fn parse_hex_size(size_hex: &str) -> Option<u64> {
    let digits = size_hex
        .strip_prefix("0x")
        .or_else(|| size_hex.strip_prefix("0X"))
        .unwrap_or(size_hex);
    u64::from_str_radix(digits, 16).ok()
}
