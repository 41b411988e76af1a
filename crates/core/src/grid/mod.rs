//! Grid data structures and neighborhood operations

mod connectivity;
mod element;
#[allow(clippy::module_inception)]
mod grid;

pub use connectivity::{
    is_valid, offsets_to_points, strides_of, unravel_index, Connectivity,
};
pub use element::GridElement;
pub use grid::Grid;
