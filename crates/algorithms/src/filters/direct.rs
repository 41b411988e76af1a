//! Direct attribute filter
//!
//! Prunes every max-tree branch whose attribute falls below a threshold and
//! reconstructs the image from the surviving nodes. The per-node decision
//! looks at that node alone, which is exact when the attribute is increasing
//! along root-to-leaf paths (child attribute <= parent attribute), as area
//! is. For non-increasing attributes use the cut-first filter.

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

/// Reconstruct the image, keeping components whose attribute reaches the
/// threshold.
///
/// The root is resolved first; the ascending sweep then guarantees that each
/// pixel's parent is already written, so flat zones copy their
/// representative and pruned branches flood down to the parent level.
/// Pruning writes the scalar type's zero.
///
/// # Arguments
/// * `image` - Input grid
/// * `parent` - Canonical parent array
/// * `sorted_indices` - Traversal order the tree was built from
/// * `attribute` - Per-node attribute, canonical nodes meaningful
/// * `threshold` - Components with `attribute < threshold` are removed
pub fn direct_filter<T: GridElement>(
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
            // Non-canonical pixel: stay with the flat-zone representative.
            out[pu] = out[q];
        } else if attribute[pu] < threshold {
            // Branch pruned: the parent level floods down.
            out[pu] = out[q];
        } else {
            out[pu] = pixels[pu];
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maxtree::{compute_area, max_tree, MaxTreeParams};

    fn filtered(values: Vec<u8>, threshold: f64) -> Vec<u8> {
        let image = Grid::from_vec(&[values.len()], values).unwrap();
        let tree = max_tree(&image, MaxTreeParams::default()).unwrap();
        let area = compute_area(&image, tree.parent(), tree.traverser()).unwrap();
        direct_filter(&image, tree.parent(), tree.traverser(), &area, threshold)
            .unwrap()
            .into_vec()
    }

    #[test]
    fn test_two_peaks_pruned_to_supporting_level() {
        // Both two-pixel peaks die at threshold 3; the three-pixel
        // component at level 2 survives and catches the left peak.
        let out = filtered(vec![1, 3, 3, 2, 1, 4, 4, 1], 3.0);
        assert_eq!(out, vec![1, 2, 2, 2, 1, 1, 1, 1]);
    }

    #[test]
    fn test_two_peaks_kept() {
        let out = filtered(vec![1, 3, 3, 2, 1, 4, 4, 1], 2.0);
        assert_eq!(out, vec![1, 3, 3, 2, 1, 4, 4, 1]);
    }

    #[test]
    fn test_single_bright_pixel() {
        let image =
            Grid::from_vec(&[3, 3], vec![0u8, 0, 0, 0, 5, 0, 0, 0, 0]).unwrap();
        let tree = max_tree(&image, MaxTreeParams::default()).unwrap();
        let area = compute_area(&image, tree.parent(), tree.traverser()).unwrap();
        let keep =
            direct_filter(&image, tree.parent(), tree.traverser(), &area, 1.0).unwrap();
        assert_eq!(keep.as_slice(), image.as_slice());
        let gone =
            direct_filter(&image, tree.parent(), tree.traverser(), &area, 2.0).unwrap();
        assert_eq!(gone.as_slice(), &[0u8; 9]);
    }

    #[test]
    fn test_ramp_floods_from_cut() {
        // Chain tree over 0..8: components of area < 3 are the top two
        // pixels, which flood down to the level that still satisfies it.
        let out = filtered((0..8).collect(), 3.0);
        assert_eq!(out, vec![0, 1, 2, 3, 4, 5, 5, 5]);
    }

    #[test]
    fn test_zero_threshold_is_identity() {
        let values = vec![1u8, 3, 3, 2, 1, 4, 4, 1];
        let out = filtered(values.clone(), 0.0);
        assert_eq!(out, values);
    }

    #[test]
    fn test_threshold_above_root_clears_image() {
        let out = filtered(vec![1, 3, 3, 2, 1, 4, 4, 1], 9.0);
        assert_eq!(out, vec![0; 8]);
    }

    #[test]
    fn test_signed_pixels_prune_to_zero() {
        // Zero, not the minimum representable value, marks removed pixels.
        let image = Grid::from_vec(&[4], vec![-3i8, -1, 7, -3]).unwrap();
        let tree = max_tree(&image, MaxTreeParams::default()).unwrap();
        let area = compute_area(&image, tree.parent(), tree.traverser()).unwrap();
        let out =
            direct_filter(&image, tree.parent(), tree.traverser(), &area, 5.0).unwrap();
        assert_eq!(out.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let image = Grid::from_vec(&[4], vec![0u8, 1, 2, 3]).unwrap();
        let tree = max_tree(&image, MaxTreeParams::default()).unwrap();
        let short = vec![1.0; 3];
        let err = direct_filter(&image, tree.parent(), tree.traverser(), &short, 1.0);
        assert!(matches!(err, Err(Error::LengthMismatch { .. })));
    }
}
