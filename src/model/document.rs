//! Document-level types: sections, groupings, and the parsed result.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Fragment, FragmentCategory};
use crate::error::Result;

/// Named resume sections.
///
/// Closed enumeration; anything the detector cannot place lands in
/// `Unknown`. Multiple disjoint runs of the same section are legal in a
/// grouping output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeSection {
    Contact,
    Summary,
    Objective,
    Skills,
    Experience,
    Education,
    Certifications,
    Projects,
    Awards,
    References,
    Unknown,
}

impl ResumeSection {
    /// Lowercase name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Summary => "summary",
            Self::Objective => "objective",
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Certifications => "certifications",
            Self::Projects => "projects",
            Self::Awards => "awards",
            Self::References => "references",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResumeSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One run of fragments assigned to a resume section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionGroup {
    /// The section this group belongs to
    pub section: ResumeSection,
    /// Member fragments in document order
    pub fragments: Vec<Fragment>,
    /// Heuristic quality score in `[0, 1]`
    pub confidence: f32,
}

impl SectionGroup {
    /// Create an empty group for a section.
    pub fn new(section: ResumeSection) -> Self {
        Self {
            section,
            fragments: Vec::new(),
            confidence: 0.0,
        }
    }

    /// Append a fragment, preserving document order.
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// All member text joined by line breaks. Computed on demand.
    pub fn combined_text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the group has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of member fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether any member carries the given category.
    pub fn has_category(&self, category: FragmentCategory) -> bool {
        self.fragments.iter().any(|f| f.category == category)
    }

    /// Whether any member is a Title or Header element.
    pub fn has_heading(&self) -> bool {
        self.fragments.iter().any(|f| f.category.is_heading())
    }
}

/// Complete parsed document with grouped sections.
///
/// Created by the extraction adapter with empty `grouped_sections`,
/// populated in place by the section detector, then handed read-only to
/// downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Original filename
    pub filename: String,
    /// Lowercase extension including the dot (e.g. `.pdf`)
    pub file_extension: String,
    /// Human-readable file type
    pub file_type: String,
    /// Count of elements ever extracted, including ones later dropped
    pub total_elements: usize,
    /// Count of elements skipped during conversion (empty or malformed)
    pub dropped_elements: usize,
    /// Section groupings in first-appearance order
    pub grouped_sections: Vec<SectionGroup>,
    /// Non-fatal issues accumulated during parsing
    pub parsing_warnings: Vec<String>,
}

impl ParsedDocument {
    /// Create a new document shell with no sections or warnings.
    pub fn new(
        filename: impl Into<String>,
        file_extension: impl Into<String>,
        file_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            file_extension: file_extension.into(),
            file_type: file_type.into(),
            total_elements: 0,
            dropped_elements: 0,
            grouped_sections: Vec::new(),
            parsing_warnings: Vec::new(),
        }
    }

    /// First group for a section, if one exists.
    pub fn get_section(&self, section: ResumeSection) -> Option<&SectionGroup> {
        self.grouped_sections.iter().find(|g| g.section == section)
    }

    /// Combined text of a section, or empty string if absent.
    pub fn section_text(&self, section: ResumeSection) -> String {
        self.get_section(section)
            .map(|g| g.combined_text())
            .unwrap_or_default()
    }

    /// Whether a grouping for the section exists.
    pub fn has_section(&self, section: ResumeSection) -> bool {
        self.get_section(section).is_some()
    }

    /// Record a non-fatal issue.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.parsing_warnings.push(warning.into());
    }

    /// Number of warnings recorded so far.
    pub fn warning_count(&self) -> usize {
        self.parsing_warnings.len()
    }

    /// Total fragments across all groups.
    pub fn grouped_fragment_count(&self) -> usize {
        self.grouped_sections.iter().map(|g| g.len()).sum()
    }

    /// Serialize to JSON for downstream consumers.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
