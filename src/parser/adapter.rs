//! Adapter over the external document-partitioning capability.
//!
//! The partitioner is a collaborator, not part of this crate: given a
//! file path it returns positioned elements or fails. This adapter stages
//! bytes into a scoped temp file, converts raw elements into the crate's
//! fragment model with a skip-with-count policy, and degrades through the
//! fallback chain on any failure. It always produces a `ParsedDocument` —
//! extraction trouble becomes warnings, never errors.

use std::io::Write;
use std::path::Path;

use crate::detect::{file_extension, FileKind};
use crate::error::{Error, Result};
use crate::model::{BoundingBox, Fragment, FragmentCategory, ParsedDocument, StyleHint};

use super::fallback;
use super::options::{ParseOptions, PartitionRequest};

/// Shortest joined text considered meaningful partitioner output.
/// Anything below this re-routes through the fallback chain.
const MEANINGFUL_TEXT_LEN: usize = 50;

/// Ratio used to estimate font size from element height.
const FONT_SIZE_FROM_HEIGHT: f32 = 0.8;

/// One positioned element as reported by the partitioning capability.
#[derive(Debug, Clone, PartialEq)]
pub struct RawElement {
    /// Extracted text
    pub text: String,
    /// Category label in the partitioner's vocabulary
    pub category: String,
    /// 1-indexed page number, if known
    pub page: Option<u32>,
    /// Bounding box corners `(x1, y1, x2, y2)`, if known
    pub bbox: Option<(f32, f32, f32, f32)>,
    /// Bold emphasis reported by the partitioner
    pub bold: bool,
    /// Italic emphasis reported by the partitioner
    pub italic: bool,
}

impl RawElement {
    /// Create a raw element with just text and a category label.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            page: None,
            bbox: None,
            bold: false,
            italic: false,
        }
    }

    /// Set the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the bounding box corners.
    pub fn with_bbox(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = Some((x1, y1, x2, y2));
        self
    }

    /// Mark the element bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Mark the element italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// The external document-partitioning capability.
///
/// Implementations wrap whatever layout-analysis engine is available.
/// The adapter only needs elements back in document order; everything
/// else (category vocabulary, coordinate scale) is advisory.
pub trait DocumentPartitioner {
    /// Partition a staged document file into positioned elements.
    fn partition(&self, path: &Path, request: &PartitionRequest) -> Result<Vec<RawElement>>;

    /// Secondary plain-text extraction used by the fallback path.
    ///
    /// Partitioners without one keep the default, which reports
    /// [`Error::PlainTextUnavailable`].
    fn extract_plain_text(&self, _path: &Path) -> Result<String> {
        Err(Error::PlainTextUnavailable)
    }
}

/// Result of running the extraction adapter.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Document shell with metadata and warnings; sections not yet grouped
    pub document: ParsedDocument,
    /// Fragments in extraction order
    pub fragments: Vec<Fragment>,
}

/// Extraction adapter. See the module docs for the contract.
pub struct ExtractionAdapter<'a> {
    options: &'a ParseOptions,
}

impl<'a> ExtractionAdapter<'a> {
    /// Create an adapter with the given options.
    pub fn new(options: &'a ParseOptions) -> Self {
        Self { options }
    }

    /// Extract fragments from document bytes.
    ///
    /// Never fails: partitioner errors activate the fallback chain, and
    /// if every fallback comes up empty the result is a single synthetic
    /// fragment plus a warning.
    pub fn extract(
        &self,
        partitioner: &dyn DocumentPartitioner,
        bytes: &[u8],
        filename: &str,
    ) -> Extraction {
        let kind = FileKind::from_filename(filename);
        let mut document =
            ParsedDocument::new(filename, file_extension(filename), kind.display_name());

        let fragments = match self.partition_bytes(partitioner, bytes, kind, &mut document) {
            Ok(fragments) if has_meaningful_content(&fragments) => fragments,
            Ok(_) => {
                document.add_warning(
                    "Partitioner returned no meaningful content; using fallback extraction",
                );
                self.fallback_fragments(partitioner, bytes, kind, &mut document)
            }
            Err(err) => {
                log::warn!("partitioning failed for {}: {}", filename, err);
                document.add_warning(format!("Partitioning failed: {}; using fallback extraction", err));
                self.fallback_fragments(partitioner, bytes, kind, &mut document)
            }
        };

        Extraction {
            document,
            fragments,
        }
    }

    /// Stage bytes to a temp file and run the partitioner over it.
    fn partition_bytes(
        &self,
        partitioner: &dyn DocumentPartitioner,
        bytes: &[u8],
        kind: FileKind,
        document: &mut ParsedDocument,
    ) -> Result<Vec<Fragment>> {
        // NamedTempFile cleans up on drop, on every exit path.
        let mut staged = tempfile::Builder::new()
            .prefix("unresume-")
            .suffix(kind.extension())
            .tempfile()?;
        staged.write_all(bytes)?;

        let request = PartitionRequest::for_options(self.options);
        let elements = partitioner.partition(staged.path(), &request)?;

        Ok(self.convert_elements(elements, document))
    }

    /// Convert raw elements to fragments, skipping and counting the ones
    /// with no usable text.
    fn convert_elements(
        &self,
        elements: Vec<RawElement>,
        document: &mut ParsedDocument,
    ) -> Vec<Fragment> {
        document.total_elements = elements.len();

        let mut fragments = Vec::with_capacity(elements.len());
        for element in elements {
            if element.text.trim().is_empty() {
                document.dropped_elements += 1;
                continue;
            }

            let mut fragment = Fragment::new(
                element.text,
                FragmentCategory::from_label(&element.category),
            );

            if let Some(page) = element.page {
                fragment = fragment.with_page(page);
            }

            // Non-finite coordinates mean "no spatial information", not a
            // dropped fragment.
            let bbox = element
                .bbox
                .and_then(|(x1, y1, x2, y2)| BoundingBox::checked(x1, y1, x2, y2));
            if let Some(bbox) = bbox {
                fragment = fragment.with_bbox(bbox);
            }

            let style = StyleHint {
                is_bold: element.bold,
                is_italic: element.italic,
                font_size: bbox.map(|b| b.height * FONT_SIZE_FROM_HEIGHT),
            };
            if !style.is_empty() {
                fragment = fragment.with_style(style);
            }

            fragments.push(fragment);
        }

        if document.dropped_elements > 0 {
            log::debug!(
                "dropped {} empty or malformed elements out of {}",
                document.dropped_elements,
                document.total_elements
            );
        }

        fragments
    }

    /// The fallback chain: plain-text line splitting, secondary
    /// extraction, raw decode, synthetic fragment.
    fn fallback_fragments(
        &self,
        partitioner: &dyn DocumentPartitioner,
        bytes: &[u8],
        kind: FileKind,
        document: &mut ParsedDocument,
    ) -> Vec<Fragment> {
        // Counters from a discarded partitioner attempt would be
        // misleading next to line-split fragments.
        document.dropped_elements = 0;

        // (a) plain text: decode and line-split directly
        if kind.is_plain_text() {
            let (text, encoding) = fallback::decode_with_fallback(bytes);
            if !text.trim().is_empty() {
                document.add_warning(format!(
                    "Parsed with plain-text line extraction ({})",
                    encoding
                ));
                let fragments = fallback::fragments_from_lines(&text);
                document.total_elements = fragments.len();
                return fragments;
            }
        }

        // (b) secondary text-extraction capability, if the partitioner
        // has one
        if let Ok(text) = self.secondary_text(partitioner, bytes, kind) {
            if !text.trim().is_empty() {
                document.add_warning("Parsed with secondary plain-text extraction");
                let fragments = fallback::fragments_from_lines(&text);
                document.total_elements = fragments.len();
                return fragments;
            }
        }

        // (c) raw decode with the encoding chain
        let (text, encoding) = fallback::decode_with_fallback(bytes);
        if !text.trim().is_empty() {
            document.add_warning(format!("Parsed with raw byte decoding ({})", encoding));
            let fragments = fallback::fragments_from_lines(&text);
            document.total_elements = fragments.len();
            return fragments;
        }

        // (d) nothing yielded text
        document.add_warning("All extraction paths failed; document content is empty");
        document.total_elements = 1;
        vec![Fragment::new(
            "[no extractable content]",
            FragmentCategory::NarrativeText,
        )
        .with_page(1)]
    }

    fn secondary_text(
        &self,
        partitioner: &dyn DocumentPartitioner,
        bytes: &[u8],
        kind: FileKind,
    ) -> Result<String> {
        let mut staged = tempfile::Builder::new()
            .prefix("unresume-")
            .suffix(kind.extension())
            .tempfile()?;
        staged.write_all(bytes)?;
        partitioner.extract_plain_text(staged.path())
    }
}

/// Whether the fragments carry enough text to skip the fallback chain.
fn has_meaningful_content(fragments: &[Fragment]) -> bool {
    let joined: String = fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let trimmed = joined.trim();

    trimmed.len() > MEANINGFUL_TEXT_LEN && !trimmed.chars().all(|c| " .\n\t".contains(c))
}
