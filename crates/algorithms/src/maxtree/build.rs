//! Max-tree construction
//!
//! Builds the max-tree of an N-dimensional grid: a rooted tree in which every
//! connected component of every upper level set {x : I(x) >= h} is one node.
//! Pixels are swept in descending intensity order and attached to the growing
//! forest with a union-find, then the parent array is canonized so that every
//! flat zone keeps a single representative.
//!
//! Reference:
//! Berger, C., Geraud, T., Levillain, R., Widynski, N., Baillard, A., &
//! Bertin, E. (2007). Effective component tree computation with application
//! to pattern recognition in astronomical imaging. *IEEE ICIP*, 41-44.

use std::cmp::Ordering;

use maxtree_core::grid::{is_valid, Connectivity, Grid, GridElement};
use maxtree_core::{Error, Result};
use ndarray::Array2;

/// Sentinel for pixels the sweep has not introduced yet.
const UNSET: i64 = -1;

/// Stable ascending argsort of the grid's pixels.
///
/// Ties break by linear index, which makes trees reproducible across
/// platforms. Callers wanting a different tie policy can hand their own
/// permutation to [`build_max_tree`].
pub fn sorted_indices<T: GridElement>(image: &Grid<T>) -> Vec<i64> {
    let pixels = image.as_slice();
    let mut order: Vec<i64> = (0..pixels.len() as i64).collect();
    order.sort_by(|&a, &b| {
        pixels[a as usize]
            .partial_cmp(&pixels[b as usize])
            .unwrap_or(Ordering::Equal)
    });
    order
}

/// Follow the union-find parents to the set's root, compressing the path on
/// the way back.
///
/// Iterative two-pass variant: the natural recursion is linear in the path
/// length on the call stack, which large flat images can exhaust.
fn find_root(zpar: &mut [i64], start: i64) -> i64 {
    let mut root = start;
    while zpar[root as usize] != root {
        root = zpar[root as usize];
    }
    let mut walk = start;
    while walk != root {
        let next = zpar[walk as usize];
        zpar[walk as usize] = root;
        walk = next;
    }
    root
}

/// Point every pixel at the canonical representative of its level.
///
/// After this pass a pixel's parent either represents the pixel's own flat
/// zone (equal intensity) or the parent flat zone (strictly lower intensity).
/// Downstream attribute and filter passes rely on this form.
fn canonize<T: GridElement>(pixels: &[T], parent: &mut [i64], sorted_indices: &[i64]) {
    for &p in sorted_indices {
        let q = parent[p as usize];
        if pixels[q as usize] == pixels[parent[q as usize] as usize] {
            parent[p as usize] = parent[q as usize];
        }
    }
}

fn validate_inputs<T: GridElement>(
    image: &Grid<T>,
    mask: &[bool],
    connectivity: &Connectivity,
    sorted_indices: &[i64],
    parent: &[i64],
) -> Result<Array2<i64>> {
    let len = image.len();
    if mask.len() != len {
        return Err(Error::LengthMismatch {
            name: "mask",
            expected: len,
            actual: mask.len(),
        });
    }
    if sorted_indices.len() != len {
        return Err(Error::LengthMismatch {
            name: "sorted_indices",
            expected: len,
            actual: sorted_indices.len(),
        });
    }
    if parent.len() != len {
        return Err(Error::LengthMismatch {
            name: "parent",
            expected: len,
            actual: parent.len(),
        });
    }

    let mut seen = vec![false; len];
    for &s in sorted_indices {
        if s < 0 || s as usize >= len || seen[s as usize] {
            return Err(Error::Precondition(format!(
                "sorted_indices is not a permutation of 0..{len}"
            )));
        }
        seen[s as usize] = true;
    }

    let points = connectivity.points(image.shape())?;

    // Every pixel the mask declares interior must really reach all of its
    // neighbors; a stale mask would otherwise send the sweep to wrapped
    // pixels on the far side of the grid.
    for (index, &interior) in mask.iter().enumerate() {
        if !interior {
            continue;
        }
        for k in 0..connectivity.len() {
            if !is_valid(index as i64, points.row(k), image.shape()) {
                return Err(Error::Precondition(format!(
                    "mask marks pixel {index} interior but offset {} leaves the grid",
                    connectivity.offsets()[k]
                )));
            }
        }
    }

    Ok(points)
}

/// Build the canonical max-tree into `parent`.
///
/// Sweeps the pixels in descending intensity (`sorted_indices` reversed).
/// Each pixel starts as a singleton root and adopts the union-find roots of
/// its already-visited neighbors; a final canonization pass fixes flat-zone
/// representatives.
///
/// # Arguments
/// * `image` - Input grid
/// * `mask` - `true` for pixels whose whole neighborhood is in bounds; border
///   pixels must be `false` and get a per-neighbor bounds check
/// * `connectivity` - Neighborhood as raveled offsets
/// * `sorted_indices` - Permutation of the pixel indices in ascending
///   intensity order, ties resolved by the caller's policy
/// * `parent` - Output parent array, overwritten
pub fn build_max_tree<T: GridElement>(
    image: &Grid<T>,
    mask: &[bool],
    connectivity: &Connectivity,
    sorted_indices: &[i64],
    parent: &mut [i64],
) -> Result<()> {
    let points = validate_inputs(image, mask, connectivity, sorted_indices, parent)?;
    let pixels = image.as_slice();
    let shape = image.shape();
    let offsets = connectivity.offsets();

    parent.fill(UNSET);
    let mut zpar = vec![UNSET; pixels.len()];

    for &p in sorted_indices.iter().rev() {
        let pu = p as usize;
        parent[pu] = p;
        zpar[pu] = p;

        for (k, &offset) in offsets.iter().enumerate() {
            if !mask[pu] && !is_valid(p, points.row(k), shape) {
                continue;
            }
            let q = p + offset;
            if parent[q as usize] < 0 {
                // Unvisited neighbor: lower intensity, or equal with a
                // later position in the tie order.
                continue;
            }
            let root = find_root(&mut zpar, q);
            if root != p {
                zpar[root as usize] = p;
                parent[root as usize] = p;
            }
        }
    }

    canonize(pixels, parent, sorted_indices);
    Ok(())
}

/// A canonical max-tree together with the traversal order it was built from.
#[derive(Debug, Clone)]
pub struct MaxTree {
    parent: Vec<i64>,
    traverser: Vec<i64>,
}

impl MaxTree {
    /// Parent index per pixel; the root points at itself.
    pub fn parent(&self) -> &[i64] {
        &self.parent
    }

    /// Pixels in ascending intensity order.
    pub fn traverser(&self) -> &[i64] {
        &self.traverser
    }

    /// The root pixel (lowest intensity, first in the tie order).
    pub fn root(&self) -> Option<i64> {
        self.traverser.first().copied()
    }

    /// Consume the tree and return `(parent, traverser)`.
    pub fn into_parts(self) -> (Vec<i64>, Vec<i64>) {
        (self.parent, self.traverser)
    }
}

/// Parameters for max-tree construction
#[derive(Debug, Clone)]
pub struct MaxTreeParams {
    /// Neighborhood order: 1 connects faces, `ndim` the full hypercube
    pub connectivity: usize,
}

impl Default for MaxTreeParams {
    fn default() -> Self {
        Self { connectivity: 1 }
    }
}

/// Build the max-tree of a grid.
///
/// Convenience wrapper over [`build_max_tree`]: sorts the pixels (stable,
/// ties by linear index), derives the interior mask and the order-k
/// neighborhood from the grid shape, and runs the builder.
pub fn max_tree<T: GridElement>(image: &Grid<T>, params: MaxTreeParams) -> Result<MaxTree> {
    let connectivity = Connectivity::of_order(image.shape(), params.connectivity)?;
    let mask = image.interior_mask();
    let traverser = sorted_indices(image);
    let mut parent = vec![UNSET; image.len()];
    build_max_tree(image, &mask, &connectivity, &traverser, &mut parent)?;
    Ok(MaxTree { parent, traverser })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_1d() -> Grid<u8> {
        Grid::from_vec(&[8], (0..8).collect()).unwrap()
    }

    fn two_peaks_1d() -> Grid<u8> {
        Grid::from_vec(&[8], vec![1, 3, 3, 2, 1, 4, 4, 1]).unwrap()
    }

    #[test]
    fn test_sorted_indices_stable() {
        let image = two_peaks_1d();
        let order = sorted_indices(&image);
        // Equal values keep their linear order.
        assert_eq!(order, vec![0, 4, 7, 3, 1, 2, 5, 6]);
    }

    #[test]
    fn test_ramp_builds_chain() {
        let image = ramp_1d();
        let tree = max_tree(&image, MaxTreeParams::default()).unwrap();
        // Strictly increasing 1-D image: each pixel's parent is the one below.
        assert_eq!(tree.parent(), &[0, 0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(tree.root(), Some(0));
    }

    #[test]
    fn test_two_peaks_canonical_parents() {
        let image = two_peaks_1d();
        let tree = max_tree(&image, MaxTreeParams::default()).unwrap();
        let parent = tree.parent();
        // One flat zone per value; representatives are the earliest pixels.
        assert_eq!(parent[0], 0); // root
        assert_eq!(parent[4], 0); // other background pixels join the root zone
        assert_eq!(parent[7], 0);
        assert_eq!(parent[3], 0); // value-2 zone hangs off the background
        assert_eq!(parent[1], 3); // value-3 peak hangs off the value-2 zone
        assert_eq!(parent[2], 1); // second peak pixel points at its representative
        assert_eq!(parent[5], 0); // value-4 peak hangs off the background
        assert_eq!(parent[6], 5);
    }

    #[test]
    fn test_parent_intensity_monotone() {
        let image = two_peaks_1d();
        let tree = max_tree(&image, MaxTreeParams::default()).unwrap();
        let pixels = image.as_slice();
        for (p, &q) in tree.parent().iter().enumerate() {
            assert!(
                pixels[q as usize] <= pixels[p],
                "parent of {} has higher intensity",
                p
            );
        }
    }

    #[test]
    fn test_canonical_form() {
        let image = two_peaks_1d();
        let tree = max_tree(&image, MaxTreeParams::default()).unwrap();
        let pixels = image.as_slice();
        let parent = tree.parent();
        for p in 0..image.len() {
            let q = parent[p] as usize;
            if pixels[p] == pixels[q] && p != q {
                let qq = parent[q] as usize;
                assert!(
                    pixels[qq] < pixels[p] || q == qq,
                    "representative of {} is not canonical",
                    p
                );
            }
        }
    }

    #[test]
    fn test_plateau_single_zone() {
        // 2-D plateau of value 2 in a value-1 frame
        let image = Grid::from_vec(&[3, 3], vec![2, 2, 1, 2, 2, 1, 1, 1, 1]).unwrap();
        let tree = max_tree(&image, MaxTreeParams::default()).unwrap();
        let parent = tree.parent();
        // All four plateau pixels collapse onto one representative.
        let rep = parent[4];
        assert_eq!(parent[1], rep);
        assert_eq!(parent[3], rep);
        // The representative itself points into the background zone.
        assert_eq!(image.as_slice()[parent[rep as usize] as usize], 1);
    }

    #[test]
    fn test_connectivity_order_changes_topology() {
        // Two bright pixels touching only diagonally
        let image =
            Grid::from_vec(&[3, 3], vec![5u8, 0, 0, 0, 5, 0, 0, 0, 0]).unwrap();
        let faces = max_tree(&image, MaxTreeParams { connectivity: 1 }).unwrap();
        let full = max_tree(&image, MaxTreeParams { connectivity: 2 }).unwrap();
        // With face connectivity the two bright pixels are separate leaves,
        // each hanging off the background zone.
        let fp = faces.parent();
        assert_ne!(fp[0], 4);
        assert_ne!(fp[4], 0);
        assert_eq!(image.as_slice()[fp[0] as usize], 0);
        assert_eq!(image.as_slice()[fp[4] as usize], 0);
        // With the full hypercube they merge into one flat zone whose
        // representative is the earlier pixel.
        let qp = full.parent();
        assert_eq!(qp[4], 0);
    }

    #[test]
    fn test_build_rejects_bad_permutation() {
        let image = ramp_1d();
        let conn = Connectivity::from_offsets(vec![-1, 1]).unwrap();
        let mask = image.interior_mask();
        let mut parent = vec![UNSET; 8];
        let twice = vec![0i64, 0, 1, 2, 3, 4, 5, 6];
        let err = build_max_tree(&image, &mask, &conn, &twice, &mut parent);
        assert!(matches!(err, Err(Error::Precondition(_))));
    }

    #[test]
    fn test_build_rejects_lying_mask() {
        let image = ramp_1d();
        let conn = Connectivity::from_offsets(vec![-1, 1]).unwrap();
        // Claim every pixel is interior; the first and last are not.
        let mask = vec![true; 8];
        let sorted: Vec<i64> = (0..8).collect();
        let mut parent = vec![UNSET; 8];
        let err = build_max_tree(&image, &mask, &conn, &sorted, &mut parent);
        assert!(matches!(err, Err(Error::Precondition(_))));
    }

    #[test]
    fn test_build_rejects_length_mismatch() {
        let image = ramp_1d();
        let conn = Connectivity::from_offsets(vec![-1, 1]).unwrap();
        let mask = image.interior_mask();
        let sorted: Vec<i64> = (0..8).collect();
        let mut short = vec![UNSET; 7];
        let err = build_max_tree(&image, &mask, &conn, &sorted, &mut short);
        assert!(matches!(err, Err(Error::LengthMismatch { .. })));
    }

    #[test]
    fn test_custom_tie_order_changes_representative() {
        // Constant image: the whole grid is one flat zone and the tie order
        // alone decides the representative.
        let image: Grid<u8> = Grid::filled(&[4], 7);
        let conn = Connectivity::from_offsets(vec![-1, 1]).unwrap();
        let mask = image.interior_mask();
        let mut parent = vec![UNSET; 4];
        let reversed: Vec<i64> = vec![3, 2, 1, 0];
        build_max_tree(&image, &mask, &conn, &reversed, &mut parent).unwrap();
        assert_eq!(parent, vec![3, 3, 3, 3]);
    }
}
