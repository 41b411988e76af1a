//! Max-tree construction and per-node attributes
//!
//! The max-tree represents every connected component of every upper level
//! set of a grid as one node, ordered by inclusion. Building it is the
//! expensive step; attribute computation and filtering are linear passes
//! over the finished tree.

mod area;
mod build;

pub use area::compute_area;
pub use build::{build_max_tree, max_tree, sorted_indices, MaxTree, MaxTreeParams};
