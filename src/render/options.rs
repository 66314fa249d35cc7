//! Assembly options and spacing thresholds.

/// Options controlling spatial reconstruction.
///
/// The gap thresholds are calibrated against the partitioning
/// capability's coordinate scale. The defaults match a typical page-unit
/// scale; swap them when the partitioner emits normalized or DPI-scaled
/// coordinates. The tiered policy (section > paragraph > line > flow) is
/// the portable part, not the literal numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembleOptions {
    /// Vertical delta that reads as a section break (blank line)
    pub section_break_gap: f32,

    /// Vertical delta that reads as a paragraph break
    pub paragraph_break_gap: f32,

    /// Vertical delta that reads as a line break
    pub line_break_gap: f32,

    /// Horizontal delta that reads as a column jump (wide spacing)
    pub column_gap: f32,

    /// Horizontal delta that reads as an indent or tab stop
    pub indent_gap: f32,

    /// Marker emitted between pages
    pub page_break_marker: String,

    /// Run the whitespace normalization pass over the assembled output
    pub normalize: bool,
}

impl AssembleOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the section-break threshold.
    pub fn with_section_break_gap(mut self, gap: f32) -> Self {
        self.section_break_gap = gap;
        self
    }

    /// Set the paragraph-break threshold.
    pub fn with_paragraph_break_gap(mut self, gap: f32) -> Self {
        self.paragraph_break_gap = gap;
        self
    }

    /// Set the line-break threshold.
    pub fn with_line_break_gap(mut self, gap: f32) -> Self {
        self.line_break_gap = gap;
        self
    }

    /// Set the column-jump threshold.
    pub fn with_column_gap(mut self, gap: f32) -> Self {
        self.column_gap = gap;
        self
    }

    /// Set the indent threshold.
    pub fn with_indent_gap(mut self, gap: f32) -> Self {
        self.indent_gap = gap;
        self
    }

    /// Set the page-break marker.
    pub fn with_page_break_marker(mut self, marker: impl Into<String>) -> Self {
        self.page_break_marker = marker.into();
        self
    }

    /// Enable or disable the normalization pass.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            section_break_gap: 80.0,
            paragraph_break_gap: 40.0,
            line_break_gap: 15.0,
            column_gap: 150.0,
            indent_gap: 50.0,
            page_break_marker: "\n\n---\n\n".to_string(),
            normalize: true,
        }
    }
}
