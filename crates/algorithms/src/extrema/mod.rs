//! Extrema detection on the max-tree

mod local_maxima;

pub use local_maxima::{max_tree_local_maxima, LocalMaxima, LocalMaximaParams};
