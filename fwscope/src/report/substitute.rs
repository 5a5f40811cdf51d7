//! Marker-delimited substitution into an existing report.
//!
//! A report marks each generated section with a pair of HTML comments:
//!
//! ```text
//! <!-- STACK_TABLE_START -->
//! ...anything, regenerated on every run...
//! <!-- STACK_TABLE_END -->
//! ```
//!
//! The whole span, markers included, is replaced by
//! `start + "\n" + table + "\n" + end`. Running twice with the same tables is
//! a byte-for-byte no-op. A section whose pair is missing (no start, or a
//! start with no end after it) is left untouched.

use log::{debug, warn};

#[must_use]
pub fn start_marker(name: &str) -> String {
    format!("<!-- {name}_START -->")
}

#[must_use]
pub fn end_marker(name: &str) -> String {
    format!("<!-- {name}_END -->")
}

/// Outcome of a substitution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    /// The updated document
    pub text: String,
    /// Sections that were found and replaced
    pub replaced: Vec<String>,
    /// Sections whose marker pair is absent
    pub missing: Vec<String>,
}

impl Substitution {
    /// Returns true if the text differs from `original`.
    #[must_use]
    pub fn changed(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Replace every marked span of one section.
///
/// Returns `None` when the document has no complete marker pair for `name`.
#[must_use]
pub fn replace_section(document: &str, name: &str, table: &str) -> Option<String> {
    let start = start_marker(name);
    let end = end_marker(name);

    let mut out = String::with_capacity(document.len() + table.len());
    let mut rest = document;
    let mut found = false;

    while let Some(start_at) = rest.find(&start) {
        let body_at = start_at + start.len();
        let Some(end_offset) = rest[body_at..].find(&end) else {
            break;
        };
        let span_end = body_at + end_offset + end.len();

        out.push_str(&rest[..start_at]);
        out.push_str(&start);
        out.push('\n');
        out.push_str(table);
        out.push('\n');
        out.push_str(&end);

        rest = &rest[span_end..];
        found = true;
    }

    if !found {
        return None;
    }
    out.push_str(rest);
    Some(out)
}

/// Substitute several named tables, in the order given.
#[must_use]
pub fn substitute(document: &str, tables: &[(&str, &str)]) -> Substitution {
    let mut result = Substitution { text: document.to_owned(), ..Substitution::default() };

    for &(name, table) in tables {
        if let Some(text) = replace_section(&result.text, name, table) {
            debug!("Marker {name}: replaced");
            result.text = text;
            result.replaced.push(name.to_owned());
        } else {
            warn!("Marker {name}: not found in report, section skipped");
            result.missing.push(name.to_owned());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Report\n\n<!-- STACK_TABLE_START -->\nold table\nmore old\n<!-- STACK_TABLE_END -->\n\nTrailer\n";

    #[test]
    fn test_replaces_span_including_markers() {
        let text = replace_section(DOC, "STACK_TABLE", "| a | b |").unwrap();
        assert_eq!(
            text,
            "# Report\n\n<!-- STACK_TABLE_START -->\n| a | b |\n<!-- STACK_TABLE_END -->\n\nTrailer\n"
        );
    }

    #[test]
    fn test_idempotent() {
        let tables = [("STACK_TABLE", "| x |\n| y |")];
        let once = substitute(DOC, &tables);
        let twice = substitute(&once.text, &tables);
        assert_eq!(once.text, twice.text);
        assert!(!twice.changed(&once.text));
    }

    #[test]
    fn test_adjacent_markers() {
        let doc = "<!-- RESOURCE_TABLE_START --><!-- RESOURCE_TABLE_END -->";
        let text = replace_section(doc, "RESOURCE_TABLE", "T").unwrap();
        assert_eq!(text, "<!-- RESOURCE_TABLE_START -->\nT\n<!-- RESOURCE_TABLE_END -->");
    }

    #[test]
    fn test_missing_pair_is_skipped() {
        let result = substitute(DOC, &[("PERFORMANCE_TABLE", "T"), ("STACK_TABLE", "S")]);
        assert_eq!(result.missing, vec!["PERFORMANCE_TABLE".to_string()]);
        assert_eq!(result.replaced, vec!["STACK_TABLE".to_string()]);
    }

    #[test]
    fn test_start_without_end_is_untouched() {
        let doc = "<!-- STACK_TABLE_START -->\nunterminated\n";
        assert_eq!(replace_section(doc, "STACK_TABLE", "T"), None);
        assert_eq!(substitute(doc, &[("STACK_TABLE", "T")]).text, doc);
    }

    #[test]
    fn test_end_before_start_is_not_a_pair() {
        let doc = "<!-- STACK_TABLE_END -->\n<!-- STACK_TABLE_START -->\n";
        assert_eq!(replace_section(doc, "STACK_TABLE", "T"), None);
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let doc = "<!-- STACK_TABLE_START -->a<!-- STACK_TABLE_END -->\nmid\n<!-- STACK_TABLE_START -->b<!-- STACK_TABLE_END -->";
        let text = replace_section(doc, "STACK_TABLE", "T").unwrap();
        assert_eq!(text.matches("\nT\n").count(), 2);
        assert!(text.contains("\nmid\n"));
    }
}
