//! Spatial reconstruction: re-linearizing positioned fragments into
//! formatted text.
//!
//! Fragments are put back into reading order by (page, vertical center,
//! horizontal center), then inter-fragment spacing is inferred from the
//! magnitude of the positional deltas between neighbors. Content roles
//! from the classifier decide the markup each fragment is emitted with.

use crate::classify::{classify_fragment, ContentType};
use crate::model::Fragment;

use super::cleanup;
use super::options::AssembleOptions;

/// Punctuation that ends a fragment cleanly, suppressing the trailing
/// space that otherwise prevents run-on concatenation.
const TERMINAL_PUNCTUATION: &[char] = &['.', ':', ';', '!', '?'];

/// Assemble fragments into a single formatted text stream.
///
/// The output preserves the document's visual structure as linear markup:
/// `##`/`###` headings, `•` bullets, bold company and title spans, italic
/// date ranges. Reading order is stable — ties in the spatial sort keep
/// the original extraction order.
pub fn assemble_markup(fragments: &[Fragment], options: &AssembleOptions) -> String {
    let assembler = MarkupAssembler::new(options.clone());
    assembler.assemble(fragments)
}

/// Markup assembler.
pub struct MarkupAssembler {
    options: AssembleOptions,
}

impl MarkupAssembler {
    /// Create an assembler with the given options.
    pub fn new(options: AssembleOptions) -> Self {
        Self { options }
    }

    /// Assemble fragments into formatted text.
    pub fn assemble(&self, fragments: &[Fragment]) -> String {
        let ordered = sort_spatially(fragments);

        let mut out = String::new();
        let mut current_page: Option<u32> = None;
        let mut current_y: Option<f32> = None;
        let mut current_x: Option<f32> = None;

        for fragment in &ordered {
            let page = fragment.page_or_zero();
            let y = fragment.center_y();
            let x = fragment.center_x();

            if let Some(prev_page) = current_page {
                if page != prev_page {
                    out.push_str(&self.options.page_break_marker);
                    current_y = None;
                    current_x = None;
                }
            }

            if let Some(prev_y) = current_y {
                let dy = (y - prev_y).abs();
                if dy > self.options.section_break_gap {
                    out.push_str("\n\n");
                } else if dy > self.options.paragraph_break_gap {
                    out.push('\n');
                } else if dy > self.options.line_break_gap {
                    out.push('\n');
                }
            }

            if let Some(prev_x) = current_x {
                let dx = (x - prev_x).abs();
                if dx > self.options.column_gap {
                    out.push_str("    ");
                } else if dx > self.options.indent_gap {
                    out.push_str("  ");
                }
            }

            self.emit(&mut out, fragment);

            current_page = Some(page);
            current_y = Some(y);
            current_x = Some(x);
        }

        if self.options.normalize {
            cleanup::normalize(&out)
        } else {
            out.trim().to_string()
        }
    }

    fn emit(&self, out: &mut String, fragment: &Fragment) {
        let text = fragment.text.trim();
        if text.is_empty() {
            return;
        }

        match classify_fragment(fragment) {
            ContentType::SectionHeader => {
                if !out.is_empty() && !out.ends_with("\n\n") {
                    out.push('\n');
                }
                out.push_str("## ");
                out.push_str(text);
                out.push('\n');
            }
            ContentType::SubsectionHeader => {
                if !out.is_empty() && !out.ends_with("\n\n") {
                    out.push('\n');
                }
                out.push_str("### ");
                out.push_str(text);
                out.push('\n');
            }
            ContentType::BulletPoint => {
                out.push_str("• ");
                out.push_str(strip_bullet_marker(text));
                self.trailing_space(out, text);
            }
            ContentType::CompanyName | ContentType::JobTitle => {
                out.push_str("**");
                out.push_str(text);
                out.push_str("**");
                self.trailing_space(out, text);
            }
            ContentType::DateRange => {
                out.push('*');
                out.push_str(text);
                out.push('*');
                self.trailing_space(out, text);
            }
            ContentType::Content => {
                out.push_str(text);
                self.trailing_space(out, text);
            }
        }
    }

    fn trailing_space(&self, out: &mut String, text: &str) {
        if !text.ends_with(TERMINAL_PUNCTUATION) {
            out.push(' ');
        }
    }
}

/// Sort fragments into reading order: page ascending, vertical center
/// ascending, horizontal center ascending. The sort is stable, so
/// fragments without coordinates (keys default to zero) and exact ties
/// keep their extraction order.
fn sort_spatially(fragments: &[Fragment]) -> Vec<&Fragment> {
    let mut ordered: Vec<&Fragment> = fragments.iter().collect();
    ordered.sort_by(|a, b| {
        a.page_or_zero()
            .cmp(&b.page_or_zero())
            .then(a.center_y().total_cmp(&b.center_y()))
            .then(a.center_x().total_cmp(&b.center_x()))
    });
    ordered
}

/// Drop a leading bullet glyph so the canonical `•` marker is not doubled.
fn strip_bullet_marker(text: &str) -> &str {
    let trimmed = text.trim_start_matches(['•', '·', '▪', '▫', '◦', '‣', '⁃', '-', '*', '+']);
    if trimmed.len() < text.len() {
        trimmed.trim_start()
    } else {
        text
    }
}
