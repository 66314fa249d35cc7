//! Element extraction: the adapter over the external partitioning
//! capability, plus the degraded fallback paths.

mod adapter;
mod fallback;
mod options;

pub use adapter::{DocumentPartitioner, Extraction, ExtractionAdapter, RawElement};
pub use options::{ExtractionStrategy, ParseOptions, PartitionRequest};
