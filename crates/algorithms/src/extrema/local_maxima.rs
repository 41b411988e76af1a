//! Regional maxima via the max-tree
//!
//! A regional maximum is a flat zone with no strictly brighter neighbor
//! component: a leaf of the max-tree. Leaves fall out of the tree structure
//! directly, so detection costs two linear sweeps once the tree is built.

use maxtree_core::grid::{Grid, GridElement};
use maxtree_core::{Algorithm, Error, Result};

use crate::maxtree::{max_tree, MaxTreeParams};

/// Parameters for regional maxima detection
#[derive(Debug, Clone)]
pub struct LocalMaximaParams {
    /// Neighborhood order: 1 connects faces, `ndim` the full hypercube
    pub connectivity: usize,
}

impl Default for LocalMaximaParams {
    fn default() -> Self {
        Self { connectivity: 1 }
    }
}

/// Regional maxima detection algorithm
#[derive(Debug, Clone, Default)]
pub struct LocalMaxima;

impl Algorithm for LocalMaxima {
    type Input = Grid<f64>;
    type Output = Grid<u64>;
    type Params = LocalMaximaParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Local Maxima"
    }

    fn description(&self) -> &'static str {
        "Label regional maxima with distinct positive ids"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        max_tree_local_maxima(&input, params)
    }
}

/// Label every regional maximum with a distinct positive id.
///
/// Non-maximum pixels get 0. The descending sweep marks each canonical node
/// that heads a strictly brighter component, clearing its parent's candidate
/// mark; whatever is still marked when its turn comes is a leaf and receives
/// a fresh label. The ascending sweep then spreads each representative's
/// verdict across its flat zone. A constant image is one all-covering
/// maximum labelled 1.
pub fn max_tree_local_maxima<T: GridElement>(
    image: &Grid<T>,
    params: LocalMaximaParams,
) -> Result<Grid<u64>> {
    let tree = max_tree(
        image,
        MaxTreeParams {
            connectivity: params.connectivity,
        },
    )?;
    let pixels = image.as_slice();
    let parent = tree.parent();

    let mut output: Grid<u64> = Grid::filled(image.shape(), 1);
    if image.is_empty() {
        return Ok(output);
    }
    let out = output.as_slice_mut();

    let mut next_label: u64 = 1;
    for &p in tree.traverser().iter().rev() {
        let pu = p as usize;
        let q = parent[pu] as usize;
        if pixels[pu] != pixels[q] {
            // p heads a strictly brighter component, so the parent zone
            // cannot be a maximum.
            out[q] = 0;
            if out[pu] == 1 {
                out[pu] = next_label;
                next_label += 1;
            }
        }
    }

    for &p in tree.traverser() {
        let pu = p as usize;
        let q = parent[pu] as usize;
        if pu != q && pixels[pu] == pixels[q] {
            out[pu] = out[q];
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_peaks_get_distinct_labels() {
        let image = Grid::from_vec(&[8], vec![1u8, 3, 3, 2, 1, 4, 4, 1]).unwrap();
        let out = max_tree_local_maxima(&image, LocalMaximaParams::default()).unwrap();
        let labels = out.as_slice();
        // Background and the value-2 saddle are not maxima.
        assert_eq!(labels[0], 0);
        assert_eq!(labels[3], 0);
        assert_eq!(labels[4], 0);
        assert_eq!(labels[7], 0);
        // Each peak is one plateau with one label.
        assert_ne!(labels[1], 0);
        assert_eq!(labels[1], labels[2]);
        assert_ne!(labels[5], 0);
        assert_eq!(labels[5], labels[6]);
        assert_ne!(labels[1], labels[5]);
    }

    #[test]
    fn test_constant_image_is_one_maximum() {
        let image: Grid<u8> = Grid::filled(&[3, 3], 42);
        let out = max_tree_local_maxima(&image, LocalMaximaParams::default()).unwrap();
        assert_eq!(out.as_slice(), &[1; 9]);
    }

    #[test]
    fn test_plateau_maximum_labelled_whole() {
        let image = Grid::from_vec(&[3, 3], vec![2, 2, 1, 2, 2, 1, 1, 1, 1]).unwrap();
        let out = max_tree_local_maxima(&image, LocalMaximaParams::default()).unwrap();
        let labels = out.as_slice();
        let plateau = labels[0];
        assert_ne!(plateau, 0);
        for &i in &[0usize, 1, 3, 4] {
            assert_eq!(labels[i], plateau);
        }
        for &i in &[2usize, 5, 6, 7, 8] {
            assert_eq!(labels[i], 0);
        }
    }

    #[test]
    fn test_connectivity_merges_diagonal_maxima() {
        let image =
            Grid::from_vec(&[3, 3], vec![5u8, 0, 0, 0, 5, 0, 0, 0, 0]).unwrap();
        let faces =
            max_tree_local_maxima(&image, LocalMaximaParams { connectivity: 1 }).unwrap();
        assert_ne!(faces.as_slice()[0], faces.as_slice()[4]);
        let full =
            max_tree_local_maxima(&image, LocalMaximaParams { connectivity: 2 }).unwrap();
        assert_eq!(full.as_slice()[0], full.as_slice()[4]);
        assert_ne!(full.as_slice()[0], 0);
    }

    #[test]
    fn test_ramp_single_maximum_at_top() {
        let image = Grid::from_vec(&[8], (0..8u8).collect()).unwrap();
        let out = max_tree_local_maxima(&image, LocalMaximaParams::default()).unwrap();
        let labels = out.as_slice();
        assert_eq!(&labels[0..7], &[0; 7]);
        assert_eq!(labels[7], 1);
    }
}
