//! Integration tests for the full extraction pipeline.

use std::path::Path;

use unresume::{
    assemble_markup, parse_resume, AssembleOptions, DocumentPartitioner, EntityKind,
    FragmentCategory, ParseOptions, PartitionRequest, RawElement, Result, ResumeInput,
    ResumeSection, Unresume,
};

/// Partitioner replaying a canned element list, standing in for the
/// external layout engine.
struct CannedPartitioner {
    elements: Vec<RawElement>,
}

impl CannedPartitioner {
    fn new(elements: Vec<RawElement>) -> Self {
        Self { elements }
    }
}

impl DocumentPartitioner for CannedPartitioner {
    fn partition(&self, _path: &Path, _request: &PartitionRequest) -> Result<Vec<RawElement>> {
        Ok(self.elements.clone())
    }
}

/// A realistic single-page resume as positioned elements.
fn resume_elements() -> Vec<RawElement> {
    vec![
        RawElement::new("Jane Doe", "Title").with_page(1).with_bbox(50.0, 40.0, 300.0, 70.0),
        RawElement::new("jane.doe@example.com", "EmailAddress")
            .with_page(1)
            .with_bbox(50.0, 80.0, 250.0, 95.0),
        RawElement::new("(555) 867-5309", "PhoneNumber")
            .with_page(1)
            .with_bbox(300.0, 80.0, 420.0, 95.0),
        RawElement::new("Summary", "Title").with_page(1).with_bbox(50.0, 200.0, 160.0, 220.0),
        RawElement::new(
            "Platform engineer with nine years of experience running large fleets.",
            "NarrativeText",
        )
        .with_page(1)
        .with_bbox(50.0, 230.0, 500.0, 250.0),
        RawElement::new("Work experience", "Title")
            .with_page(1)
            .with_bbox(50.0, 360.0, 250.0, 380.0),
        RawElement::new("Acme Corporation", "NarrativeText")
            .with_page(1)
            .with_bbox(50.0, 390.0, 250.0, 405.0),
        RawElement::new("2019 - 2021", "NarrativeText")
            .with_page(1)
            .with_bbox(400.0, 390.0, 500.0, 405.0),
        RawElement::new("• Led the migration to a multi-region control plane.", "ListItem")
            .with_page(1)
            .with_bbox(60.0, 420.0, 500.0, 435.0),
        RawElement::new("• Cut deploy times from hours to minutes.", "ListItem")
            .with_page(1)
            .with_bbox(60.0, 440.0, 500.0, 455.0),
        RawElement::new("Skills", "Title").with_page(1).with_bbox(50.0, 560.0, 140.0, 580.0),
        RawElement::new("Rust, Python, Kubernetes", "ListItem")
            .with_page(1)
            .with_bbox(50.0, 590.0, 400.0, 605.0),
    ]
}

#[test]
fn test_every_fragment_lands_in_exactly_one_group() {
    let partitioner = CannedPartitioner::new(resume_elements());
    let (document, fragments) = parse_resume(&partitioner, b"pdf bytes", "jane.pdf");

    assert_eq!(document.grouped_fragment_count(), fragments.len());

    // No fragment text is duplicated across groups
    let mut all_texts: Vec<&str> = document
        .grouped_sections
        .iter()
        .flat_map(|g| g.fragments.iter().map(|f| f.text.as_str()))
        .collect();
    all_texts.sort_unstable();
    let before = all_texts.len();
    all_texts.dedup();
    assert_eq!(all_texts.len(), before);
}

#[test]
fn test_expected_sections_detected() {
    let partitioner = CannedPartitioner::new(resume_elements());
    let (document, _) = parse_resume(&partitioner, b"pdf bytes", "jane.pdf");

    assert!(document.has_section(ResumeSection::Contact));
    assert!(document.has_section(ResumeSection::Summary));
    assert!(document.has_section(ResumeSection::Experience));
    assert!(document.has_section(ResumeSection::Skills));

    let experience = document.get_section(ResumeSection::Experience).unwrap();
    assert!(experience.combined_text().contains("Acme Corporation"));
    assert!(experience.combined_text().contains("multi-region"));
}

#[test]
fn test_contact_override_pulls_email_out_of_experience() {
    let elements = vec![
        RawElement::new("WORK EXPERIENCE", "Title").with_page(1),
        RawElement::new("Senior Engineer at Initech from then until now", "NarrativeText")
            .with_page(1),
        RawElement::new("jane@example.com", "EmailAddress").with_page(1),
        RawElement::new("Shipped the TPS reporting suite to production", "NarrativeText")
            .with_page(1),
    ];
    let partitioner = CannedPartitioner::new(elements);
    let (document, _) = parse_resume(&partitioner, b"pdf bytes", "jane.pdf");

    let contact = document.get_section(ResumeSection::Contact).unwrap();
    assert_eq!(contact.len(), 1);
    assert_eq!(contact.fragments[0].text, "jane@example.com");

    let experience = document.get_section(ResumeSection::Experience).unwrap();
    assert!(experience
        .fragments
        .iter()
        .all(|f| f.category != FragmentCategory::EmailAddress));
}

#[test]
fn test_confidence_scores_and_bounds() {
    let partitioner = CannedPartitioner::new(resume_elements());
    let (document, _) = parse_resume(&partitioner, b"pdf bytes", "jane.pdf");

    for group in &document.grouped_sections {
        assert!((0.0..=1.0).contains(&group.confidence));
    }

    // Skills has a heading and a list item: 0.5 + 0.3 + 0.2
    let skills = document.get_section(ResumeSection::Skills).unwrap();
    assert!((skills.confidence - 1.0).abs() < f32::EPSILON);

    // Contact has structured email/phone fragments
    let contact = document.get_section(ResumeSection::Contact).unwrap();
    assert!(contact.confidence >= 0.7);
}

#[test]
fn test_missing_contact_produces_warning() {
    let elements = vec![
        RawElement::new("WORK EXPERIENCE", "Title").with_page(1),
        RawElement::new("Built many fine systems over the course of a career", "NarrativeText")
            .with_page(1),
    ];
    let partitioner = CannedPartitioner::new(elements);
    let (document, _) = parse_resume(&partitioner, b"pdf bytes", "jane.pdf");

    assert!(!document.has_section(ResumeSection::Contact));
    assert!(document
        .parsing_warnings
        .iter()
        .any(|w| w.contains("No contact information")));
}

#[test]
fn test_determinism_across_runs() {
    let partitioner = CannedPartitioner::new(resume_elements());
    let options = ParseOptions::default();

    let (first_doc, first_fragments) =
        unresume::parse_resume_with_options(&partitioner, b"pdf bytes", "jane.pdf", &options);
    let first_markup = assemble_markup(&first_fragments, &AssembleOptions::default());

    for _ in 0..5 {
        let (doc, fragments) =
            unresume::parse_resume_with_options(&partitioner, b"pdf bytes", "jane.pdf", &options);
        assert_eq!(doc, first_doc);
        let markup = assemble_markup(&fragments, &AssembleOptions::default());
        assert_eq!(markup, first_markup);
    }
}

#[test]
fn test_assembled_markup_structure() {
    let result = Unresume::new().parse(
        &CannedPartitioner::new(resume_elements()),
        b"pdf bytes",
        "jane.pdf",
    );
    let markup = result.to_markup();

    // Section headings become markdown headings
    assert!(markup.contains("## Summary"));
    assert!(markup.contains("## Work experience"));
    // Company bold, date italic (with normalized dash), bullets preserved
    assert!(markup.contains("**Acme Corporation**"));
    assert!(markup.contains("*2019 – 2021*"));
    assert!(markup.contains("• Led the migration"));
    // Vertical reading order holds
    assert!(markup.find("Summary").unwrap() < markup.find("Work experience").unwrap());
    assert!(markup.find("Work experience").unwrap() < markup.find("Skills").unwrap());
}

#[test]
fn test_spatial_order_beats_extraction_order() {
    // Elements arrive bottom-up; assembly must re-sort by position.
    let elements = vec![
        RawElement::new("the bottom of the page.", "NarrativeText")
            .with_page(1)
            .with_bbox(50.0, 700.0, 400.0, 715.0),
        RawElement::new("the top of the page.", "NarrativeText")
            .with_page(1)
            .with_bbox(50.0, 40.0, 400.0, 55.0),
    ];
    let result =
        Unresume::new().parse(&CannedPartitioner::new(elements), b"pdf bytes", "jane.pdf");
    let markup = result.to_markup();

    assert!(markup.find("the top of the page.").unwrap() < markup.find("the bottom of the page.").unwrap());
}

#[test]
fn test_entities_from_grouped_document() {
    let result = Unresume::new().parse(
        &CannedPartitioner::new(resume_elements()),
        b"pdf bytes",
        "jane.pdf",
    );
    let entities = result.entities();

    assert_eq!(entities[&EntityKind::Email], vec!["jane.doe@example.com"]);
    assert_eq!(entities[&EntityKind::Phone], vec!["(555) 867-5309"]);
    assert!(entities[&EntityKind::ProgrammingLanguage].contains(&"Rust".to_string()));
    assert!(entities[&EntityKind::Salary].is_empty());
}

#[test]
fn test_batch_parsing_matches_sequential() {
    let partitioner = CannedPartitioner::new(resume_elements());
    let inputs = vec![
        ResumeInput::new(b"a".to_vec(), "one.pdf"),
        ResumeInput::new(b"b".to_vec(), "two.pdf"),
    ];

    let batch = unresume::parse_batch(&partitioner, &inputs, &ParseOptions::default());
    let (sequential, _) = parse_resume(&partitioner, b"a", "one.pdf");

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].grouped_sections, sequential.grouped_sections);
    assert_eq!(batch[1].filename, "two.pdf");
}

#[test]
fn test_document_json_surface() {
    let partitioner = CannedPartitioner::new(resume_elements());
    let (document, _) = parse_resume(&partitioner, b"pdf bytes", "jane.pdf");

    let json = document.to_json(true).unwrap();
    assert!(json.contains("\"experience\""));
    assert!(json.contains("\"grouped_sections\""));
}
