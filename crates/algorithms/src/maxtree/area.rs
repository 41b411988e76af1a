//! Area attribute
//!
//! Pixel counts of max-tree components, accumulated children-first over the
//! traversal order. Area grows from leaves to root, which makes it an
//! increasing attribute: the direct filter rule is exact for it.

use maxtree_core::grid::{Grid, GridElement};
use maxtree_core::{Error, Result};

/// Number of pixels in the component rooted at each canonical node.
///
/// Every pixel starts at 1; sweeping the traversal order in reverse adds each
/// node's count to its parent, so a count is final before it is consumed.
/// The root accumulates the total reachable pixel count. Values at
/// non-canonical pixels have been absorbed into their representative and
/// carry no meaning of their own.
///
/// # Arguments
/// * `image` - Input grid (shape reference for validation)
/// * `parent` - Canonical parent array from the tree builder
/// * `sorted_indices` - The traversal order the tree was built from
pub fn compute_area<T: GridElement>(
    image: &Grid<T>,
    parent: &[i64],
    sorted_indices: &[i64],
) -> Result<Vec<f64>> {
    let len = image.len();
    if parent.len() != len {
        return Err(Error::LengthMismatch {
            name: "parent",
            expected: len,
            actual: parent.len(),
        });
    }
    if sorted_indices.len() != len {
        return Err(Error::LengthMismatch {
            name: "sorted_indices",
            expected: len,
            actual: sorted_indices.len(),
        });
    }
    if parent.iter().any(|&q| q < 0 || q as usize >= len) {
        return Err(Error::Precondition(
            "parent contains unset or out-of-range entries".to_string(),
        ));
    }

    let mut area = vec![1.0f64; len];
    for &p in sorted_indices.iter().rev() {
        let q = parent[p as usize];
        if q == p {
            continue;
        }
        area[q as usize] += area[p as usize];
    }
    Ok(area)
}
