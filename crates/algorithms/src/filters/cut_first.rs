//! Cut-first attribute filter
//!
//! Like the direct filter, but pruning is monotone from the root: once an
//! ancestor has been cut, no descendant is reinstated at a higher level.
//! This makes the result well-defined for non-increasing attributes, whose
//! value can dip below the threshold in the middle of a branch and recover
//! further up.

use maxtree_core::grid::{Grid, GridElement};
use maxtree_core::{Error, Result};

fn validate_tree_arrays(
    len: usize,
    parent: &[i64],
    sorted_indices: &[i64],
    attribute: &[f64],
) -> Result<()> {
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
    if attribute.len() != len {
        return Err(Error::LengthMismatch {
            name: "attribute",
            expected: len,
            actual: attribute.len(),
        });
    }
    if parent.iter().any(|&q| q < 0 || q as usize >= len) {
        return Err(Error::Precondition(
            "parent contains unset or out-of-range entries".to_string(),
        ));
    }
    if sorted_indices.iter().any(|&s| s < 0 || s as usize >= len) {
        return Err(Error::Precondition(
            "sorted_indices contains out-of-range entries".to_string(),
        ));
    }
    Ok(())
}

/// Reconstruct the image, cutting every branch at the first node whose
/// attribute falls below the threshold.
///
/// A pixel keeps its level only if its own attribute passes **and** its
/// parent was reconstructed at full level (`out[q] == I[q]`); otherwise it
/// inherits the parent's output. For increasing attributes this coincides
/// with the direct filter; for non-increasing ones it prunes at least as
/// much.
pub fn cut_first_filter<T: GridElement>(
    image: &Grid<T>,
    parent: &[i64],
    sorted_indices: &[i64],
    attribute: &[f64],
    threshold: f64,
) -> Result<Grid<T>> {
    validate_tree_arrays(image.len(), parent, sorted_indices, attribute)?;

    let pixels = image.as_slice();
    let mut output = image.like(T::zero());
    if image.is_empty() {
        return Ok(output);
    }

    let out = output.as_slice_mut();
    let root = sorted_indices[0] as usize;
    out[root] = if attribute[root] < threshold {
        T::zero()
    } else {
        pixels[root]
    };

    for &p in sorted_indices {
        let pu = p as usize;
        let q = parent[pu] as usize;
        if pu == q {
            continue;
        }
        if pixels[pu] == pixels[q] {
            out[pu] = out[q];
        } else if attribute[pu] < threshold || out[q] < pixels[q] {
            // Failed here, or an ancestor was already cut.
            out[pu] = out[q];
        } else {
            out[pu] = pixels[pu];
        }
    }
    Ok(output)
}
