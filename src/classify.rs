//! Per-fragment content role classification from typographic and textual
//! cues.
//!
//! Works on any resume layout without per-document templates: each check is
//! a cheap regex or character-class probe against static tables, and the
//! check order is a fixed tie-break policy. A bold, colon-terminated line
//! that also looks like a date range is a date range, because dates are
//! checked first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::Fragment;

/// Content role assigned to a fragment during assembly.
///
/// Produced as a parallel annotation; never stored on the fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Top-level section heading
    SectionHeader,
    /// Nested heading such as `Responsibilities:`
    SubsectionHeader,
    /// Bulleted or numbered list entry
    BulletPoint,
    /// Employer name
    CompanyName,
    /// Employment or education date span
    DateRange,
    /// Role title
    JobTitle,
    /// Everything else
    Content,
}

/// Longest text still considered a candidate section header.
const SECTION_HEADER_MAX_LEN: usize = 50;

/// Longest text still considered a candidate subsection header.
const SUBSECTION_HEADER_MAX_LEN: usize = 30;

/// Longest all-caps string still considered a company name.
const ALL_CAPS_COMPANY_MAX_LEN: usize = 40;

/// Font size above which a short line reads as a heading. Calibrated to
/// the partitioner's coordinate scale; see the assembler options for the
/// matching gap thresholds.
const HEADER_FONT_SIZE: f32 = 12.0;

static BULLET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^[•·▪▫◦‣⁃]\s+",  // Unicode bullets
        r"^[-*+]\s+",       // Markdown bullets
        r"^[a-z]\)\s+",     // Letter bullets
        r"^[0-9]+\.\s+",    // Numbered bullets
        r"^e\s+",           // OCR artifact for •
        r"^¢\s+",           // OCR artifact for •
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static DATE_RANGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\d{4}\s*[-–]\s*\d{4}",
        r"(?i)\d{4}\s*[-–]\s*(?:present|current)",
        r"(?i)[A-Za-z]+\s+\d{4}\s*[-–]\s*[A-Za-z]+\s+\d{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static TWO_CAPITALIZED_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+\s+[A-Z][a-z]+").unwrap());

static ALL_CAPS_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z&\s]+$").unwrap());

static LEGAL_ENTITY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:Inc|Corp|LLC|Ltd)\.?$").unwrap());

static JOB_TITLE_NOUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:engineer|developer|programmer|architect|manager|director|analyst|consultant|specialist|coordinator|supervisor|administrator|designer|lead)\b",
    )
    .unwrap()
});

/// Descriptive vocabulary that marks a line as prose rather than a header.
const CONTENT_INDICATORS: &[&str] = &[
    "experience",
    "experienced",
    "developed",
    "implemented",
    "managed",
    "created",
    "designed",
    "worked",
    "used",
    "utilized",
    "skilled",
    "proficient",
    "expertise",
    "responsible",
    "involved",
    "participated",
    "collaborated",
    "led",
    "maintained",
    "configured",
    "deployed",
    "integrated",
    "optimized",
    "demonstrated",
    "professional",
    "extensive",
    "delivered",
    "supported",
    "facilitated",
    "leveraged",
];

/// Function words whose presence marks running prose.
const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
];

const TERMINAL_PUNCTUATION: &[char] = &['.', ':', ';', '!', '?'];

/// Classify a fragment's content role.
///
/// First match wins, in this order: bullet point, date range, company
/// name, job title, section header, subsection header, content. Anything
/// ambiguous falls through to [`ContentType::Content`].
pub fn classify_fragment(fragment: &Fragment) -> ContentType {
    let text = fragment.text.trim();

    if text.is_empty() {
        return ContentType::Content;
    }
    if is_bullet_point(text) {
        return ContentType::BulletPoint;
    }
    if is_date_range(text) {
        return ContentType::DateRange;
    }
    if is_company_name(text) {
        return ContentType::CompanyName;
    }
    if is_job_title(text) {
        return ContentType::JobTitle;
    }
    if is_section_header(text, fragment) {
        return ContentType::SectionHeader;
    }
    if is_subsection_header(text, fragment) {
        return ContentType::SubsectionHeader;
    }
    ContentType::Content
}

fn is_bullet_point(text: &str) -> bool {
    BULLET_PATTERNS.iter().any(|p| p.is_match(text))
}

fn is_date_range(text: &str) -> bool {
    DATE_RANGE_PATTERNS.iter().any(|p| p.is_match(text))
}

fn is_company_name(text: &str) -> bool {
    if TWO_CAPITALIZED_WORDS.is_match(text) {
        return true;
    }
    if text.chars().count() <= ALL_CAPS_COMPANY_MAX_LEN && ALL_CAPS_LINE.is_match(text) {
        return true;
    }
    LEGAL_ENTITY_SUFFIX.is_match(text)
}

fn is_job_title(text: &str) -> bool {
    JOB_TITLE_NOUN.is_match(text)
}

fn is_section_header(text: &str, fragment: &Fragment) -> bool {
    if text.chars().count() > SECTION_HEADER_MAX_LEN {
        return false;
    }

    if text.ends_with(':') {
        return true;
    }

    if starts_uppercase(text) && !contains_content_indicator(text) {
        return true;
    }

    if fragment.is_bold() {
        return true;
    }

    if fragment.font_size().map(|s| s > HEADER_FONT_SIZE).unwrap_or(false) {
        return true;
    }

    is_standalone(text)
}

fn is_subsection_header(text: &str, fragment: &Fragment) -> bool {
    let short = text.chars().count() < SUBSECTION_HEADER_MAX_LEN;
    short && (text.ends_with(':') || fragment.is_bold())
}

/// All-caps, or begins with an uppercase letter.
fn starts_uppercase(text: &str) -> bool {
    text.chars()
        .find(|c| c.is_alphabetic())
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

fn contains_content_indicator(text: &str) -> bool {
    let lower = text.to_lowercase();
    CONTENT_INDICATORS.iter().any(|word| lower.contains(word))
}

/// Short text that does not read as part of a sentence.
fn is_standalone(text: &str) -> bool {
    let len = text.chars().count();

    if len < 20 && !text.ends_with(TERMINAL_PUNCTUATION) {
        return true;
    }

    let is_all_caps = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(|c| c.is_uppercase())
        && text.chars().any(|c| c.is_alphabetic());
    if is_all_caps && len < 30 {
        return true;
    }

    let lower = text.to_lowercase();
    let has_stop_word = STOP_WORDS.iter().any(|w| lower.contains(w));
    !has_stop_word && len < 40
}
