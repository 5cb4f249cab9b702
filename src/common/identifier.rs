//! Identifier normalization for matching labels across a document.
//!
//! Two labels refer to the same construct iff their normalized forms are
//! equal. Normalization operates on the raw source slice of the label:
//! character escapes and character references inside it are *not* resolved
//! first, so `a\+b` and `a+b` stay distinct identifiers.

use once_cell::sync::Lazy;
use regex::Regex;

// Only these four characters count as collapsible whitespace; Unicode
// whitespace outside this set is part of the identifier.
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\n\r]+").unwrap());

/// Normalize a label's raw source text into an identifier.
///
/// Runs of space, tab, carriage return, and line feed collapse to a single
/// space, the result is trimmed, and case is folded by lowercasing then
/// uppercasing (the double pass maps characters like `ß` and `ſ` onto the
/// same form a single conversion would miss).
///
/// ```
/// use mdhtml::common::identifier::normalize_identifier;
///
/// assert_eq!(normalize_identifier("a"), "A");
/// assert_eq!(normalize_identifier("  a\t\nb  "), "A B");
/// assert_eq!(normalize_identifier("ẞ"), normalize_identifier("ß"));
/// ```
pub fn normalize_identifier(value: &str) -> String {
    WHITESPACE_RE
        .replace_all(value, " ")
        .trim()
        .to_lowercase()
        .to_uppercase()
}
