//! Sanitizer functions for text that ends up inside generated source
//!
//! Summaries and descriptions from the input document are written into `///`
//! doc comments of the generated module, so they must be collapsed to a
//! single clean line first.

use once_cell::sync::Lazy;
use regex::Regex;

static UNICODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}\u{2014}]").expect("valid regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Sanitizes a document summary or description for use in a doc comment.
///
/// Replaces smart quotes and em-dashes with their ASCII equivalents, collapses
/// all whitespace runs (including newlines) into single spaces and trims the
/// edges.
pub fn sanitize_doc(input: &str) -> String {
    let replaced = UNICODE_RE.replace_all(input, |caps: &regex::Captures| match &caps[0] {
        "\u{2018}" | "\u{2019}" => "'",
        "\u{201C}" | "\u{201D}" => "\"",
        "\u{2014}" => "-",
        _ => "",
    });

    WHITESPACE_RE.replace_all(replaced.trim(), " ").to_string()
}
