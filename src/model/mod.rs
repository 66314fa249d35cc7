//! Data model for resume structure extraction.
//!
//! This module defines the intermediate representation that bridges
//! document extraction and downstream consumers: positioned text
//! fragments, named section groupings, and the top-level parsed document.

mod document;
mod fragment;

pub use document::{ParsedDocument, ResumeSection, SectionGroup};
pub use fragment::{BoundingBox, Fragment, FragmentCategory, StyleHint};
