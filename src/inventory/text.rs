//! Free-text normalization for form input.
//!
//! Labels (names, brands, models, cable lengths) are single-line; the
//! description keeps line breaks. Control characters never reach the
//! document.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Any whitespace run, including newlines and tabs.
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    /// Control characters other than newline.
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\p{Cc}&&[^\n]]").unwrap();
}

/// Collapse a label to one trimmed line.
pub fn clean_label(input: &str) -> String {
    WHITESPACE_RUN.replace_all(input, " ").trim().to_string()
}

/// Strip control characters from multi-line text and trim the ends.
pub fn clean_text(input: &str) -> String {
    CONTROL_CHARS.replace_all(input, "").trim().to_string()
}
