//! Data model for extraction results.
//!
//! [`DocumentInfo`] carries the metadata and heuristics; [`StructTree`] is
//! the reconstructed logical structure of a tagged PDF.

mod info;
mod tree;

pub use info::{DocumentInfo, ImageRecord, MetaInfo};
pub use tree::{NodeContent, NodeId, PreOrder, StructNode, StructTree};
