//! Section detection: grouping fragments under resume section headings.
//!
//! A single pass over the fragment sequence drives a small state machine:
//! any fragment that reads as a canonical section heading switches the
//! running section, and every fragment is appended to the running
//! section's group. Contact fields are the one exception — they route to
//! the contact group no matter where they appear, because resumes
//! routinely interleave them with other content spatially.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Fragment, FragmentCategory, ParsedDocument, ResumeSection, SectionGroup};

/// Longest narrative-text fragment still considered a heading candidate.
/// Long paragraphs are never headings even when they contain a matching
/// word.
const HEADER_CANDIDATE_MAX_LEN: usize = 50;

/// Groups below this confidence are reported in a warning.
const LOW_CONFIDENCE: f32 = 0.6;

/// Anchored heading phrases per section, checked in a fixed order.
static SECTION_PATTERNS: Lazy<Vec<(ResumeSection, Vec<Regex>)>> = Lazy::new(|| {
    fn build(patterns: &[&str]) -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i)^{}$", p)).unwrap())
            .collect()
    }

    vec![
        (
            ResumeSection::Contact,
            build(&[
                r"contact\s*(?:information|info|details)?",
                r"personal\s*(?:information|info|details)",
                r"contact\s*me",
            ]),
        ),
        (
            ResumeSection::Summary,
            build(&[
                r"(?:professional\s*)?summary",
                r"(?:career\s*)?summary",
                r"profile",
                r"overview",
                r"about\s*(?:me)?",
                r"executive\s*summary",
            ]),
        ),
        (
            ResumeSection::Objective,
            build(&[r"(?:career\s*)?objective", r"goal", r"career\s*goal"]),
        ),
        (
            ResumeSection::Skills,
            build(&[
                r"(?:technical\s*)?skills",
                r"core\s*competencies",
                r"competencies",
                r"expertise",
                r"technologies",
                r"programming\s*languages",
                r"tools\s*(?:and\s*technologies)?",
            ]),
        ),
        (
            ResumeSection::Experience,
            build(&[
                r"(?:work\s*|professional\s*)?experience",
                r"employment\s*history",
                r"career\s*history",
                r"work\s*history",
                r"professional\s*background",
            ]),
        ),
        (
            ResumeSection::Education,
            build(&[
                r"education",
                r"academic\s*background",
                r"educational\s*background",
                r"qualifications",
                r"academic\s*qualifications",
            ]),
        ),
        (
            ResumeSection::Certifications,
            build(&[
                r"certifications?",
                r"certificates?",
                r"professional\s*certifications?",
                r"licenses?\s*(?:and\s*certifications?)?",
            ]),
        ),
        (
            ResumeSection::Projects,
            build(&[
                r"projects?",
                r"key\s*projects?",
                r"notable\s*projects?",
                r"selected\s*projects?",
            ]),
        ),
        (
            ResumeSection::Awards,
            build(&[
                r"awards?",
                r"honors?\s*(?:and\s*awards?)?",
                r"achievements?",
                r"recognition",
            ]),
        ),
        (
            ResumeSection::References,
            build(&[
                r"references?",
                r"professional\s*references?",
                r"references?\s*available\s*upon\s*request",
            ]),
        ),
    ]
});

/// Patterns that mark contact information inside arbitrary text.
static CONTACT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b", // email
        r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",                      // US phone
        r"\(\d{3}\)\s*\d{3}[-.]?\d{4}",                        // US phone with parens
        r"\+\d{1,3}[-.\s]?\d{1,14}",                           // international phone
        r"(?i)\b\d{1,5}\s+\w+\s+(?:street|st|avenue|ave|road|rd|drive|dr|lane|ln|boulevard|blvd)\b",
        r"(?i)\b(?:linkedin\.com/in/|github\.com/|twitter\.com/)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Group fragments into sections and report detection warnings.
///
/// Every fragment lands in exactly one group; groups are emitted in
/// first-appearance order. Identical input always yields identical
/// groupings and confidence scores.
pub fn group_fragments(fragments: &[Fragment]) -> (Vec<SectionGroup>, Vec<String>) {
    let mut groups: Vec<SectionGroup> = Vec::new();
    let mut current = ResumeSection::Unknown;

    for fragment in fragments {
        if let Some(section) = detect_section_header(fragment) {
            current = section;
        }

        let target = if is_contact_fragment(fragment) {
            ResumeSection::Contact
        } else {
            current
        };

        push_to_group(&mut groups, target, fragment.clone());
    }

    for group in &mut groups {
        group.confidence = confidence_for(group);
    }

    let warnings = collect_warnings(&groups);
    (groups, warnings)
}

/// Group fragments into an existing document, appending warnings.
pub fn group_into_document(document: &mut ParsedDocument, fragments: &[Fragment]) {
    let (groups, warnings) = group_fragments(fragments);
    document.grouped_sections = groups;
    document.parsing_warnings.extend(warnings);
}

/// Detect whether a fragment reads as a canonical section heading.
///
/// Only Title/Header fragments and short narrative text qualify; the
/// pattern tables are anchored so a heading word buried in prose never
/// matches.
pub fn detect_section_header(fragment: &Fragment) -> Option<ResumeSection> {
    let text = fragment.text.trim();

    let candidate = match fragment.category {
        FragmentCategory::Title | FragmentCategory::Header => true,
        FragmentCategory::NarrativeText => text.chars().count() <= HEADER_CANDIDATE_MAX_LEN,
        _ => false,
    };
    if !candidate {
        return None;
    }

    // Heading phrases tolerate trailing colons ("Skills:").
    let text = text.trim_end_matches(':').trim();

    for (section, patterns) in SECTION_PATTERNS.iter() {
        if patterns.iter().any(|p| p.is_match(text)) {
            return Some(*section);
        }
    }
    None
}

/// Whether a fragment carries contact information, by category or by
/// content pattern.
pub fn is_contact_fragment(fragment: &Fragment) -> bool {
    if fragment.category.is_contact() {
        return true;
    }
    CONTACT_PATTERNS.iter().any(|p| p.is_match(&fragment.text))
}

fn push_to_group(groups: &mut Vec<SectionGroup>, section: ResumeSection, fragment: Fragment) {
    if let Some(group) = groups.iter_mut().find(|g| g.section == section) {
        group.push(fragment);
    } else {
        let mut group = SectionGroup::new(section);
        group.push(fragment);
        groups.push(group);
    }
}

/// Heuristic quality score for a grouping, clamped to `[0, 1]`.
fn confidence_for(group: &SectionGroup) -> f32 {
    if group.is_empty() {
        return 0.0;
    }

    let mut confidence: f32 = 0.5;

    if group.has_heading() {
        confidence += 0.3;
    }

    if group.section == ResumeSection::Contact
        && (group.has_category(FragmentCategory::EmailAddress)
            || group.has_category(FragmentCategory::PhoneNumber))
    {
        confidence += 0.2;
    }

    if group.section == ResumeSection::Skills && group.has_category(FragmentCategory::ListItem) {
        confidence += 0.2;
    }

    confidence.min(1.0)
}

fn collect_warnings(groups: &[SectionGroup]) -> Vec<String> {
    let mut warnings = Vec::new();

    if !groups.iter().any(|g| g.section == ResumeSection::Contact) {
        warnings.push("No contact information section detected".to_string());
    }
    if !groups.iter().any(|g| g.section == ResumeSection::Experience) {
        warnings.push("No work experience section detected".to_string());
    }

    let low: Vec<&str> = groups
        .iter()
        .filter(|g| g.confidence < LOW_CONFIDENCE)
        .map(|g| g.section.name())
        .collect();
    if !low.is_empty() {
        log::debug!("low-confidence sections: {:?}", low);
        warnings.push(format!(
            "Low confidence in section classification: {}",
            low.join(", ")
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(text: &str) -> Fragment {
        Fragment::new(text, FragmentCategory::Title)
    }

    fn narrative(text: &str) -> Fragment {
        Fragment::new(text, FragmentCategory::NarrativeText)
    }

    #[test]
    fn test_detect_section_header() {
        assert_eq!(
            detect_section_header(&title("Work Experience")),
            Some(ResumeSection::Experience)
        );
        assert_eq!(
            detect_section_header(&title("TECHNICAL SKILLS")),
            Some(ResumeSection::Skills)
        );
        assert_eq!(
            detect_section_header(&narrative("Education:")),
            Some(ResumeSection::Education)
        );
        assert_eq!(detect_section_header(&title("Jane Doe")), None);
    }

    #[test]
    fn test_long_narrative_never_a_header() {
        let prose = narrative(
            "My experience spans ten years of building distributed systems at scale, \
             including education initiatives for new hires.",
        );
        assert_eq!(detect_section_header(&prose), None);
    }

    #[test]
    fn test_header_match_is_anchored() {
        // A heading word inside a short phrase is not a heading phrase.
        assert_eq!(detect_section_header(&narrative("skills matter here")), None);
    }

    #[test]
    fn test_contact_fragment_detection() {
        assert!(is_contact_fragment(&Fragment::new(
            "jane@example.com",
            FragmentCategory::EmailAddress
        )));
        assert!(is_contact_fragment(&narrative("jane@example.com")));
        assert!(is_contact_fragment(&narrative("(555) 867-5309")));
        assert!(is_contact_fragment(&narrative("linkedin.com/in/janedoe")));
        assert!(!is_contact_fragment(&narrative("Built internal tooling")));
    }

    #[test]
    fn test_state_machine_grouping() {
        let fragments = vec![
            title("Summary"),
            narrative("Engineer with a decade of systems work."),
            title("Work Experience"),
            narrative("Acme Corp"),
            narrative("Built the billing platform."),
            title("Skills"),
            Fragment::new("Rust", FragmentCategory::ListItem),
        ];

        let (groups, _) = group_fragments(&fragments);

        let sections: Vec<ResumeSection> = groups.iter().map(|g| g.section).collect();
        assert_eq!(
            sections,
            vec![
                ResumeSection::Summary,
                ResumeSection::Experience,
                ResumeSection::Skills
            ]
        );
        assert_eq!(groups[1].len(), 3); // header + two body fragments
    }

    #[test]
    fn test_contact_override_mid_section() {
        let fragments = vec![
            title("Work Experience"),
            narrative("Senior Engineer at Initech"),
            Fragment::new("jane@example.com", FragmentCategory::EmailAddress),
            narrative("Shipped the TPS reporting suite."),
        ];

        let (groups, _) = group_fragments(&fragments);

        let contact = groups
            .iter()
            .find(|g| g.section == ResumeSection::Contact)
            .expect("contact group");
        assert_eq!(contact.len(), 1);
        assert_eq!(contact.fragments[0].text, "jane@example.com");

        let experience = groups
            .iter()
            .find(|g| g.section == ResumeSection::Experience)
            .expect("experience group");
        assert_eq!(experience.len(), 3);
    }

    #[test]
    fn test_every_fragment_in_exactly_one_group() {
        let fragments = vec![
            narrative("Jane Doe"),
            narrative("jane@example.com"),
            title("Experience"),
            narrative("Engineer at Acme, 2020-2022"),
            title("Skills"),
            Fragment::new("Python", FragmentCategory::ListItem),
        ];

        let (groups, _) = group_fragments(&fragments);
        let total: usize = groups.iter().map(|g| g.len()).sum();
        assert_eq!(total, fragments.len());
    }

    #[test]
    fn test_confidence_scoring() {
        let fragments = vec![
            title("Skills"),
            Fragment::new("Rust", FragmentCategory::ListItem),
        ];
        let (groups, _) = group_fragments(&fragments);
        // Base 0.5 + 0.3 heading + 0.2 list item
        assert!((groups[0].confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_skills_confidence_floor_without_heading() {
        // List items under a narrative "skills" line: no Title/Header
        // bonus, but the list-item bonus still applies.
        let fragments = vec![
            narrative("skills"),
            Fragment::new("Rust", FragmentCategory::ListItem),
        ];
        let (groups, _) = group_fragments(&fragments);
        let skills = groups
            .iter()
            .find(|g| g.section == ResumeSection::Skills)
            .unwrap();
        assert!(skills.confidence >= 0.7 - f32::EPSILON);
        assert!(skills.confidence < 0.8);
    }

    #[test]
    fn test_missing_section_warnings() {
        let fragments = vec![title("Skills"), narrative("Rust and Python")];
        let (_, warnings) = group_fragments(&fragments);

        assert!(warnings
            .iter()
            .any(|w| w.contains("No contact information")));
        assert!(warnings.iter().any(|w| w.contains("No work experience")));
    }

    #[test]
    fn test_low_confidence_warning_lists_sections() {
        // Unknown-section prose with no heading stays at base confidence.
        let fragments = vec![narrative("Assorted prose with no heading to anchor it")];
        let (groups, warnings) = group_fragments(&fragments);

        assert!(groups[0].confidence < 0.6);
        assert!(warnings
            .iter()
            .any(|w| w.contains("Low confidence") && w.contains("unknown")));
    }

    #[test]
    fn test_grouping_is_deterministic() {
        let fragments = vec![
            narrative("jane@example.com"),
            title("Experience"),
            narrative("Acme Corp"),
            title("Skills"),
            Fragment::new("Rust", FragmentCategory::ListItem),
            narrative("555-867-5309"),
        ];

        let (first_groups, first_warnings) = group_fragments(&fragments);
        for _ in 0..10 {
            let (groups, warnings) = group_fragments(&fragments);
            assert_eq!(groups, first_groups);
            assert_eq!(warnings, first_warnings);
        }
    }
}
