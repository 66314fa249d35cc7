//! # unresume
//!
//! Layout-aware resume structure extraction for Rust.
//!
//! This library takes the flat list of positioned text fragments an
//! external document-partitioning capability produces and reconstructs
//! the semantic structure of a resume: which lines are section headers,
//! job titles, companies, date ranges, bullets, or narrative prose —
//! with no per-document templates, purely from typographic, spatial, and
//! textual heuristics.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unresume::{parse_resume, DocumentPartitioner, PartitionRequest, RawElement, ResumeSection};
//! # struct MyLayoutEngine;
//! # impl DocumentPartitioner for MyLayoutEngine {
//! #     fn partition(&self, _: &std::path::Path, _: &PartitionRequest) -> unresume::Result<Vec<RawElement>> {
//! #         Ok(vec![])
//! #     }
//! # }
//!
//! let partitioner = MyLayoutEngine; // your layout engine
//! let bytes = std::fs::read("resume.pdf").unwrap();
//!
//! let (document, _fragments) = parse_resume(&partitioner, &bytes, "resume.pdf");
//! for group in &document.grouped_sections {
//!     println!("{}: {} fragments ({:.2})", group.section, group.len(), group.confidence);
//! }
//! if let Some(experience) = document.get_section(ResumeSection::Experience) {
//!     println!("{}", experience.combined_text());
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Extraction adapter**: wraps the partitioning capability, degrades
//!   gracefully through fallback paths, always returns a document
//! - **Classifier**: per-fragment content roles from formatting cues
//! - **Section detector**: state-machine grouping with confidence scores
//! - **Assembler**: spatial re-linearization into formatted markup
//! - **Entity extraction**: regex mining of contact, education, and
//!   skill candidates

pub mod classify;
pub mod detect;
pub mod entities;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod sections;

pub use classify::{classify_fragment, ContentType};
pub use detect::FileKind;
pub use entities::{
    contact_profile, extract_document_entities, extract_entities, ContactProfile, EntityKind,
    EntityMatches,
};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, Fragment, FragmentCategory, ParsedDocument, ResumeSection, SectionGroup,
    StyleHint,
};
pub use parser::{
    DocumentPartitioner, Extraction, ExtractionAdapter, ExtractionStrategy, ParseOptions,
    PartitionRequest, RawElement,
};
pub use render::{assemble_markup, normalize, AssembleOptions, MarkupAssembler};

use rayon::prelude::*;

/// Parse a resume with default options.
///
/// Returns the grouped document plus the raw fragment list in extraction
/// order, for callers that also want to assemble a flat document view.
pub fn parse_resume(
    partitioner: &dyn DocumentPartitioner,
    bytes: &[u8],
    filename: &str,
) -> (ParsedDocument, Vec<Fragment>) {
    parse_resume_with_options(partitioner, bytes, filename, &ParseOptions::default())
}

/// Parse a resume with custom options.
pub fn parse_resume_with_options(
    partitioner: &dyn DocumentPartitioner,
    bytes: &[u8],
    filename: &str,
    options: &ParseOptions,
) -> (ParsedDocument, Vec<Fragment>) {
    let extraction = ExtractionAdapter::new(options).extract(partitioner, bytes, filename);
    let mut document = extraction.document;
    sections::group_into_document(&mut document, &extraction.fragments);
    (document, extraction.fragments)
}

/// One document for batch parsing.
#[derive(Debug, Clone)]
pub struct ResumeInput {
    /// Raw file bytes
    pub bytes: Vec<u8>,
    /// Original filename
    pub filename: String,
}

impl ResumeInput {
    /// Create a batch input.
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
        }
    }
}

/// Parse many resumes in parallel.
///
/// The per-document pipeline holds no shared mutable state (the pattern
/// tables are immutable statics), so documents fan out across the Rayon
/// pool with no locking. Output order matches input order.
pub fn parse_batch<P: DocumentPartitioner + Sync>(
    partitioner: &P,
    inputs: &[ResumeInput],
    options: &ParseOptions,
) -> Vec<ParsedDocument> {
    inputs
        .par_iter()
        .map(|input| {
            let (document, _) =
                parse_resume_with_options(partitioner, &input.bytes, &input.filename, options);
            document
        })
        .collect()
}

/// Builder for configuring and running the full pipeline.
///
/// # Example
///
/// ```no_run
/// use unresume::{Unresume, DocumentPartitioner, PartitionRequest, RawElement};
/// # struct MyLayoutEngine;
/// # impl DocumentPartitioner for MyLayoutEngine {
/// #     fn partition(&self, _: &std::path::Path, _: &PartitionRequest) -> unresume::Result<Vec<RawElement>> {
/// #         Ok(vec![])
/// #     }
/// # }
///
/// let partitioner = MyLayoutEngine;
/// let bytes = std::fs::read("resume.pdf").unwrap();
///
/// let result = Unresume::new()
///     .fast()
///     .parse(&partitioner, &bytes, "resume.pdf");
/// println!("{}", result.to_markup());
/// ```
pub struct Unresume {
    parse_options: ParseOptions,
    assemble_options: AssembleOptions,
}

impl Unresume {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            assemble_options: AssembleOptions::default(),
        }
    }

    /// Use the fast extraction strategy.
    pub fn fast(mut self) -> Self {
        self.parse_options = self.parse_options.fast();
        self
    }

    /// Use the high-fidelity extraction strategy.
    pub fn high_fidelity(mut self) -> Self {
        self.parse_options = self.parse_options.high_fidelity();
        self
    }

    /// Replace the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Replace the assembly options.
    pub fn with_assemble_options(mut self, options: AssembleOptions) -> Self {
        self.assemble_options = options;
        self
    }

    /// Disable the normalization pass on assembled markup.
    pub fn raw_markup(mut self) -> Self {
        self.assemble_options = self.assemble_options.with_normalize(false);
        self
    }

    /// Run the pipeline over document bytes.
    pub fn parse(
        self,
        partitioner: &dyn DocumentPartitioner,
        bytes: &[u8],
        filename: &str,
    ) -> UnresumeResult {
        let (document, fragments) =
            parse_resume_with_options(partitioner, bytes, filename, &self.parse_options);
        UnresumeResult {
            document,
            fragments,
            assemble_options: self.assemble_options,
        }
    }
}

impl Default for Unresume {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a pipeline run, with lazy access to the flat views.
pub struct UnresumeResult {
    /// The grouped document
    pub document: ParsedDocument,
    /// Fragments in extraction order
    pub fragments: Vec<Fragment>,
    assemble_options: AssembleOptions,
}

impl UnresumeResult {
    /// The grouped document.
    pub fn document(&self) -> &ParsedDocument {
        &self.document
    }

    /// Fragments in extraction order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Assemble the flat formatted view of the document.
    pub fn to_markup(&self) -> String {
        assemble_markup(&self.fragments, &self.assemble_options)
    }

    /// Mine entities from the grouped sections.
    pub fn entities(&self) -> EntityMatches {
        extract_document_entities(&self.document)
    }

    /// Pre-populate contact fields from the assembled view.
    pub fn contact_profile(&self) -> ContactProfile {
        contact_profile(&self.to_markup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct StubPartitioner;

    impl DocumentPartitioner for StubPartitioner {
        fn partition(
            &self,
            _path: &Path,
            _request: &PartitionRequest,
        ) -> Result<Vec<RawElement>> {
            Ok(vec![
                RawElement::new("Summary", "Title").with_page(1),
                RawElement::new(
                    "Platform engineer focused on reliability and developer speed.",
                    "NarrativeText",
                )
                .with_page(1),
            ])
        }
    }

    #[test]
    fn test_builder_defaults() {
        let builder = Unresume::new();
        assert_eq!(
            builder.parse_options.strategy,
            ExtractionStrategy::HighFidelity
        );
        assert!(builder.assemble_options.normalize);
    }

    #[test]
    fn test_builder_fast_and_raw() {
        let builder = Unresume::new().fast().raw_markup();
        assert_eq!(builder.parse_options.strategy, ExtractionStrategy::Fast);
        assert!(!builder.assemble_options.normalize);
    }

    #[test]
    fn test_parse_resume_end_to_end() {
        let (document, fragments) = parse_resume(&StubPartitioner, b"bytes", "cv.pdf");

        assert_eq!(fragments.len(), 2);
        assert!(document.has_section(ResumeSection::Summary));
        assert_eq!(document.grouped_fragment_count(), 2);
    }

    #[test]
    fn test_parse_batch_preserves_order() {
        let inputs = vec![
            ResumeInput::new(b"a".to_vec(), "first.pdf"),
            ResumeInput::new(b"b".to_vec(), "second.pdf"),
            ResumeInput::new(b"c".to_vec(), "third.pdf"),
        ];

        let documents = parse_batch(&StubPartitioner, &inputs, &ParseOptions::default());

        assert_eq!(documents.len(), 3);
        assert_eq!(documents[0].filename, "first.pdf");
        assert_eq!(documents[2].filename, "third.pdf");
    }

    #[test]
    fn test_result_accessors() {
        let result = Unresume::new().parse(&StubPartitioner, b"bytes", "cv.pdf");

        assert!(result.document().has_section(ResumeSection::Summary));
        assert_eq!(result.fragments().len(), 2);
        assert!(result.to_markup().contains("## Summary"));
        assert!(result.entities()[&EntityKind::Email].is_empty());
    }
}
