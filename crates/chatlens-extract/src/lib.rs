//! Extraction layer: typed insight parsing plus best-effort heuristics.
//!
//! Two very different contracts live here and should not be confused:
//! - [`parse_insight`] locates and deserializes an embedded JSON payload
//!   against a closed discriminator set. What it returns is exactly what was
//!   in the text.
//! - the [`patterns`] heuristics are shape-matching over prose. They are
//!   non-authoritative, accept false positives (any 24-hex substring counts
//!   as an object id), and carry no correctness guarantee.

pub mod insight;
pub mod patterns;

pub use insight::parse_insight;
pub use patterns::{
    ModelRow, ProjectRef, extract_key_values, extract_model_rows, extract_project_refs,
};
