//! Linker map parsing
//!
//! A GNU ld map listing mixes headers, memory configuration, discarded input
//! sections and symbol tables with the lines we care about: section
//! contributions of the form `section address size path`. Long section names
//! push the numbers onto a continuation line, so the parser keeps the last
//! seen section name in a small cursor.
//!
//! - [`classifier`]: recognizes the three data-bearing line shapes
//! - [`parser`]: streams a map file and yields [`MapEntry`](crate::domain::MapEntry) records

pub mod classifier;
pub mod parser;

pub use classifier::{classify_line, parse_hex_size, MapLine};
pub use parser::{LineOutcome, MapEntryParser, ParseStats, ParserCursor};
