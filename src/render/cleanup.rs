//! Whitespace and markup normalization for assembled resume text.
//!
//! The pass is idempotent: running it over its own output changes
//! nothing. Several fixes interact (punctuation spacing can split an
//! email address that the email repair then rejoins), so the step order
//! below is load-bearing.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

static EXCESS_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

static SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,:;!?])").unwrap());

static MISSING_SPACE_AFTER_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.,:;!?])([A-Za-z])").unwrap());

static HEADING_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(#+)[ \t]*([^#\n])").unwrap());

static OCR_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*e[ \t]+").unwrap());

static SPLIT_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([A-Za-z0-9_%+-]+)\s*\.\s*([A-Za-z0-9_%+-]+)\s*@\s*([A-Za-z0-9-]+)\s*\.\s*([A-Za-z]{2,})",
    )
    .unwrap()
});

static PIPE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]*\|[ \t]*").unwrap());

static DATE_RANGE_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})\s*[-–]\s*(\d{4}|(?i:present|current))").unwrap());

static SPACE_AFTER_OPEN_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s+").unwrap());

static SPACE_BEFORE_CLOSE_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\)").unwrap());

/// Normalize assembled text.
///
/// Collapses blank-line and space runs, fixes spacing around punctuation
/// and markup delimiters, repairs the `e`-for-bullet OCR misread and
/// emails split around their separators, and standardizes date-range
/// dashes. Idempotent up to whitespace: `normalize(normalize(s)) ==
/// normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mut result: String = text.nfc().collect();

    result = EXCESS_NEWLINES.replace_all(&result, "\n\n").to_string();
    result = EXCESS_SPACES.replace_all(&result, " ").to_string();

    result = SPACE_BEFORE_PUNCT.replace_all(&result, "$1").to_string();
    result = MISSING_SPACE_AFTER_PUNCT
        .replace_all(&result, "$1 $2")
        .to_string();

    result = HEADING_SPACING.replace_all(&result, "$1 $2").to_string();
    result = OCR_BULLET.replace_all(&result, "• ").to_string();

    // Must run after the punctuation fixes, which can split addresses.
    result = SPLIT_EMAIL.replace_all(&result, "$1.$2@$3.$4").to_string();

    result = PIPE_SEPARATOR.replace_all(&result, " | ").to_string();
    result = DATE_RANGE_SPACING
        .replace_all(&result, "$1 – $2")
        .to_string();

    result = SPACE_AFTER_OPEN_PAREN.replace_all(&result, "(").to_string();
    result = SPACE_BEFORE_CLOSE_PAREN.replace_all(&result, ")").to_string();

    result = EXCESS_NEWLINES.replace_all(&result, "\n\n").to_string();

    result.trim().to_string()
}
