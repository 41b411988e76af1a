//! # Maxtree Algorithms
//!
//! Max-tree construction and attribute filtering for N-dimensional grids.
//!
//! ## Available Algorithm Categories
//!
//! - **maxtree**: Tree construction (descending union-find sweep plus
//!   canonization) and the area attribute
//! - **filters**: Direct and cut-first attribute filters, area opening,
//!   area closing
//! - **extrema**: Regional maxima labelling

pub mod extrema;
pub mod filters;
pub mod maxtree;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::extrema::{max_tree_local_maxima, LocalMaxima, LocalMaximaParams};
    pub use crate::filters::{
        area_closing, area_opening, cut_first_filter, direct_filter, AreaClosing,
        AreaClosingParams, AreaOpening, AreaOpeningParams,
    };
    pub use crate::maxtree::{
        build_max_tree, compute_area, max_tree, sorted_indices, MaxTree, MaxTreeParams,
    };
    pub use maxtree_core::prelude::*;
}
