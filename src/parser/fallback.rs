//! Degraded extraction paths used when the partitioning capability fails.
//!
//! Plain text is split into lines and each line gets a trivial keyword
//! classification, enough for the section detector to do its work
//! downstream. Byte content that is not valid UTF-8 is decoded through a
//! single-byte fallback chain rather than rejected.

use crate::model::{Fragment, FragmentCategory};

/// Heading vocabulary for the trivial line classifier.
const HEADING_KEYWORDS: &[&str] = &[
    "summary",
    "objective",
    "profile",
    "about",
    "experience",
    "work",
    "employment",
    "career",
    "education",
    "academic",
    "degree",
    "university",
    "skills",
    "competencies",
    "expertise",
    "technologies",
    "certifications",
    "certificates",
    "licenses",
];

/// Split text into per-line fragments with keyword classification.
///
/// Every non-blank line becomes one fragment on page 1, in input order,
/// with no coordinates — the assembler then falls back to pure document
/// order, which for line-split text is already correct.
pub(crate) fn fragments_from_lines(text: &str) -> Vec<Fragment> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Fragment::new(line, classify_line(line)).with_page(1))
        .collect()
}

/// Trivial per-line category assignment.
fn classify_line(line: &str) -> FragmentCategory {
    let lower = line.to_lowercase();

    if HEADING_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return FragmentCategory::Title;
    }
    if line.starts_with('•') || line.starts_with('-') || line.starts_with('*') {
        return FragmentCategory::ListItem;
    }
    if line.contains('@') && line.contains('.') {
        return FragmentCategory::EmailAddress;
    }
    if line.chars().any(|c| c.is_ascii_digit()) && line.chars().any(|c| "()-".contains(c)) {
        return FragmentCategory::PhoneNumber;
    }
    FragmentCategory::NarrativeText
}

/// Decode bytes with an encoding fallback chain.
///
/// UTF-8 first; on failure, Windows-1252 when every byte is defined
/// there, else Latin-1 (which never fails). Returns the text and the
/// encoding name for the fallback warning.
pub(crate) fn decode_with_fallback(bytes: &[u8]) -> (String, &'static str) {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), "utf-8");
    }

    if bytes.iter().all(|b| cp1252_char(*b).is_some()) {
        let text = bytes.iter().map(|b| cp1252_char(*b).unwrap()).collect();
        return (text, "cp1252");
    }

    (bytes.iter().map(|&b| b as char).collect(), "latin-1")
}

/// Windows-1252 byte to char, or `None` for the five undefined bytes.
fn cp1252_char(byte: u8) -> Option<char> {
    match byte {
        0x80 => Some('\u{20AC}'),
        0x82 => Some('\u{201A}'),
        0x83 => Some('\u{0192}'),
        0x84 => Some('\u{201E}'),
        0x85 => Some('\u{2026}'),
        0x86 => Some('\u{2020}'),
        0x87 => Some('\u{2021}'),
        0x88 => Some('\u{02C6}'),
        0x89 => Some('\u{2030}'),
        0x8A => Some('\u{0160}'),
        0x8B => Some('\u{2039}'),
        0x8C => Some('\u{0152}'),
        0x8E => Some('\u{017D}'),
        0x91 => Some('\u{2018}'),
        0x92 => Some('\u{2019}'),
        0x93 => Some('\u{201C}'),
        0x94 => Some('\u{201D}'),
        0x95 => Some('\u{2022}'),
        0x96 => Some('\u{2013}'),
        0x97 => Some('\u{2014}'),
        0x98 => Some('\u{02DC}'),
        0x99 => Some('\u{2122}'),
        0x9A => Some('\u{0161}'),
        0x9B => Some('\u{203A}'),
        0x9C => Some('\u{0153}'),
        0x9E => Some('\u{017E}'),
        0x9F => Some('\u{0178}'),
        0x81 | 0x8D | 0x8F | 0x90 | 0x9D => None,
        _ => Some(byte as char),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_classification() {
        assert_eq!(classify_line("EXPERIENCE"), FragmentCategory::Title);
        assert_eq!(classify_line("Technical Skills"), FragmentCategory::Title);
        assert_eq!(classify_line("• Built the pipeline"), FragmentCategory::ListItem);
        assert_eq!(classify_line("- item"), FragmentCategory::ListItem);
        assert_eq!(
            classify_line("jane@example.com"),
            FragmentCategory::EmailAddress
        );
        assert_eq!(classify_line("(555) 867-5309"), FragmentCategory::PhoneNumber);
        assert_eq!(
            classify_line("Passionate builder of things"),
            FragmentCategory::NarrativeText
        );
    }

    #[test]
    fn test_fragments_from_lines() {
        let text = "Jane Doe\n\njane@example.com\nEXPERIENCE\n• Shipped stuff";
        let fragments = fragments_from_lines(text);

        assert_eq!(fragments.len(), 4); // blank line skipped
        assert_eq!(fragments[0].text, "Jane Doe");
        assert_eq!(fragments[1].category, FragmentCategory::EmailAddress);
        assert_eq!(fragments[2].category, FragmentCategory::Title);
        assert_eq!(fragments[3].category, FragmentCategory::ListItem);
        assert!(fragments.iter().all(|f| f.page == Some(1)));
    }

    #[test]
    fn test_decode_utf8() {
        let (text, encoding) = decode_with_fallback("héllo".as_bytes());
        assert_eq!(text, "héllo");
        assert_eq!(encoding, "utf-8");
    }

    #[test]
    fn test_decode_cp1252() {
        // 0x93/0x94 are curly quotes in Windows-1252 and invalid UTF-8
        let (text, encoding) = decode_with_fallback(&[0x93, b'h', b'i', 0x94]);
        assert_eq!(text, "\u{201C}hi\u{201D}");
        assert_eq!(encoding, "cp1252");
    }

    #[test]
    fn test_decode_latin1_last_resort() {
        // 0x81 is undefined in Windows-1252, forcing the Latin-1 path
        let (text, encoding) = decode_with_fallback(&[0x81, b'o', b'k']);
        assert_eq!(encoding, "latin-1");
        assert!(text.ends_with("ok"));
    }
}
