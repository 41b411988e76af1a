//! Attribute-based filtering of the max-tree
//!
//! Two pruning strategies over a built tree:
//! - **direct**: per-node decision, exact for increasing attributes (area)
//! - **cut-first**: monotone pruning from the root, safe for any attribute
//!
//! plus the classical area opening/closing built on top of them.

mod area_filter;
mod cut_first;
mod direct;

pub use area_filter::{
    area_closing, area_opening, AreaClosing, AreaClosingParams, AreaOpening,
    AreaOpeningParams,
};
pub use cut_first::cut_first_filter;
pub use direct::direct_filter;
