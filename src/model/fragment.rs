//! Fragment-level types: positioned text units from document extraction.

use serde::{Deserialize, Serialize};

/// Category assigned to a fragment by the extraction capability.
///
/// Advisory only. The classifier and section detector treat these as hints
/// and never as ground truth; many partitioners tag resume section headers
/// as plain narrative text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentCategory {
    /// A title or prominent heading
    Title,
    /// Running prose
    NarrativeText,
    /// A bulleted or numbered list item
    ListItem,
    /// Tabular content
    Table,
    /// Page header region
    Header,
    /// Page footer region
    Footer,
    /// A recognized email address
    EmailAddress,
    /// A recognized postal address
    Address,
    /// A recognized phone number
    PhoneNumber,
}

impl FragmentCategory {
    /// Map a partitioner category label to a category.
    ///
    /// Unknown labels (including `UncategorizedText` and `Text`) fall back
    /// to [`FragmentCategory::NarrativeText`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "Title" => Self::Title,
            "NarrativeText" => Self::NarrativeText,
            "ListItem" => Self::ListItem,
            "Table" => Self::Table,
            "Header" => Self::Header,
            "Footer" => Self::Footer,
            "EmailAddress" => Self::EmailAddress,
            "Address" => Self::Address,
            "PhoneNumber" => Self::PhoneNumber,
            _ => Self::NarrativeText,
        }
    }

    /// Whether the category is one of the structured contact types.
    pub fn is_contact(&self) -> bool {
        matches!(
            self,
            Self::EmailAddress | Self::Address | Self::PhoneNumber
        )
    }

    /// Whether the category marks a heading-like element.
    pub fn is_heading(&self) -> bool {
        matches!(self, Self::Title | Self::Header)
    }
}

/// Axis-aligned bounding box in the extraction capability's page units.
///
/// Derived fields are computed once at construction; fragments are
/// immutable, so they can never go stale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
    /// Right edge
    pub x2: f32,
    /// Bottom edge
    pub y2: f32,
    /// Cached width (`x2 - x1`)
    pub width: f32,
    /// Cached height (`y2 - y1`)
    pub height: f32,
    /// Cached horizontal center
    pub center_x: f32,
    /// Cached vertical center
    pub center_y: f32,
    /// Cached area
    pub area: f32,
}

impl BoundingBox {
    /// Create a bounding box, normalizing inverted coordinates.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let width = x2 - x1;
        let height = y2 - y1;
        Self {
            x1,
            y1,
            x2,
            y2,
            width,
            height,
            center_x: (x1 + x2) / 2.0,
            center_y: (y1 + y2) / 2.0,
            area: width * height,
        }
    }

    /// Build from corner coordinates, rejecting non-finite values.
    ///
    /// Malformed coordinates mean "no spatial information available", per
    /// the assembler's degradation policy, so this returns `None` rather
    /// than an error.
    pub fn checked(x1: f32, y1: f32, x2: f32, y2: f32) -> Option<Self> {
        if [x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            Some(Self::new(x1, y1, x2, y2))
        } else {
            None
        }
    }
}

/// Style cues attached to a fragment when the extraction capability
/// reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleHint {
    /// Bold text
    pub is_bold: bool,
    /// Italic text
    pub is_italic: bool,
    /// Estimated font size in the partitioner's units
    pub font_size: Option<f32>,
}

impl StyleHint {
    /// Whether any style information is actually set.
    pub fn is_empty(&self) -> bool {
        !self.is_bold && !self.is_italic && self.font_size.is_none()
    }
}

/// One positioned text unit produced by document extraction.
///
/// Created once per extracted element and never mutated; the classifier,
/// section detector, and assembler all consume it read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Text content, trimmed and non-empty
    pub text: String,
    /// Advisory category from the extraction capability
    pub category: FragmentCategory,
    /// 1-indexed page number, if known
    pub page: Option<u32>,
    /// Position on the page, if known
    pub bbox: Option<BoundingBox>,
    /// Typographic style cues, if known
    pub style: Option<StyleHint>,
}

impl Fragment {
    /// Create a new fragment. Text is trimmed; callers are expected to
    /// skip empty elements before construction.
    pub fn new(text: impl Into<String>, category: FragmentCategory) -> Self {
        Self {
            text: text.into().trim().to_string(),
            category,
            page: None,
            bbox: None,
            style: None,
        }
    }

    /// Set the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Set the style hint.
    pub fn with_style(mut self, style: StyleHint) -> Self {
        self.style = Some(style);
        self
    }

    /// Page number, defaulting to 0 when unknown.
    pub fn page_or_zero(&self) -> u32 {
        self.page.unwrap_or(0)
    }

    /// Vertical center, defaulting to 0.0 when no position is known.
    pub fn center_y(&self) -> f32 {
        self.bbox.map(|b| b.center_y).unwrap_or(0.0)
    }

    /// Horizontal center, defaulting to 0.0 when no position is known.
    pub fn center_x(&self) -> f32 {
        self.bbox.map(|b| b.center_x).unwrap_or(0.0)
    }

    /// Whether the fragment carries a bold style hint.
    pub fn is_bold(&self) -> bool {
        self.style.map(|s| s.is_bold).unwrap_or(false)
    }

    /// Estimated font size, if known.
    pub fn font_size(&self) -> Option<f32> {
        self.style.and_then(|s| s.font_size)
    }
}
