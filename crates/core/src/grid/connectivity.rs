//! Neighborhoods as raveled pixel offsets
//!
//! A connectivity is an ordered list of signed raveled offsets describing the
//! neighbors of a pixel in a row-major grid. Interior pixels reach a neighbor
//! by adding an offset to their linear index. Pixels on the grid border must
//! additionally check the per-dimension displacement against the bounds,
//! because a raveled offset applied near an edge wraps into the next row.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1};

/// Row-major strides for a shape (innermost dimension has stride 1).
pub fn strides_of(shape: &[usize]) -> Vec<i64> {
    let ndim = shape.len();
    let mut strides = vec![1i64; ndim];
    for d in (0..ndim.saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * shape[d + 1] as i64;
    }
    strides
}

/// Unravel a non-negative linear index into per-dimension coordinates.
pub fn unravel_index(index: i64, shape: &[usize]) -> Vec<i64> {
    let mut coords = vec![0i64; shape.len()];
    let mut rest = index;
    for d in (0..shape.len()).rev() {
        coords[d] = rest % shape[d] as i64;
        rest /= shape[d] as i64;
    }
    coords
}

/// Translate raveled offsets into a K×D table of per-dimension displacements.
///
/// A signed raveled offset is ambiguous on its own: unravelling it directly
/// can wrap across dimensions. Shifting every offset into the non-negative
/// range and subtracting the unravelled shift recovers the displacement.
pub fn offsets_to_points(offsets: &[i64], shape: &[usize]) -> Result<Array2<i64>> {
    let len = shape.iter().product::<usize>() as i64;
    let min = offsets.iter().copied().min().unwrap_or(0);
    let neg_shift = (-min).max(0);
    if neg_shift >= len {
        return Err(Error::OffsetOutOfRange {
            offset: min,
            len: len as usize,
        });
    }

    let center = unravel_index(neg_shift, shape);
    let mut points = Array2::zeros((offsets.len(), shape.len()));
    for (k, &offset) in offsets.iter().enumerate() {
        let shifted = offset + neg_shift;
        if shifted < 0 || shifted >= len {
            return Err(Error::OffsetOutOfRange {
                offset,
                len: len as usize,
            });
        }
        let coords = unravel_index(shifted, shape);
        for d in 0..shape.len() {
            points[[k, d]] = coords[d] - center[d];
        }
    }
    Ok(points)
}

/// Whether the neighbor of `index` displaced by `delta` stays inside the grid.
///
/// Only needed for border pixels; interior pixels reach every neighbor of the
/// offset list by construction.
pub fn is_valid(index: i64, delta: ArrayView1<'_, i64>, shape: &[usize]) -> bool {
    let coords = unravel_index(index, shape);
    coords
        .iter()
        .zip(delta.iter())
        .zip(shape.iter())
        .all(|((&c, &d), &extent)| {
            let target = c + d;
            target >= 0 && target < extent as i64
        })
}

/// An ordered set of raveled neighbor offsets for a row-major grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectivity {
    offsets: Vec<i64>,
}

impl Connectivity {
    /// Build a connectivity from an explicit offset list.
    ///
    /// Zero offsets (a pixel adjacent to itself) are rejected. A symmetric
    /// set (`o` present whenever `-o` is) is recommended; asymmetric sets
    /// are accepted and left to the caller's judgement.
    pub fn from_offsets(offsets: Vec<i64>) -> Result<Self> {
        if offsets.is_empty() {
            return Err(Error::InvalidParameter {
                name: "offsets",
                value: "[]".to_string(),
                reason: "a neighborhood needs at least one offset".to_string(),
            });
        }
        if offsets.contains(&0) {
            return Err(Error::InvalidParameter {
                name: "offsets",
                value: "0".to_string(),
                reason: "a pixel cannot neighbor itself".to_string(),
            });
        }
        Ok(Self { offsets })
    }

    /// The order-`order` neighborhood of a grid of the given shape.
    ///
    /// Contains every pixel of the surrounding 3^D hypercube whose
    /// coordinates differ from the center along at most `order` axes:
    /// order 1 connects faces (4 neighbors in 2-D, 6 in 3-D), order D
    /// connects the full hypercube (8 in 2-D, 26 in 3-D).
    pub fn of_order(shape: &[usize], order: usize) -> Result<Self> {
        let ndim = shape.len();
        if order == 0 || order > ndim {
            return Err(Error::InvalidParameter {
                name: "order",
                value: order.to_string(),
                reason: format!("must be between 1 and the dimensionality ({ndim})"),
            });
        }

        let strides = strides_of(shape);
        let mut offsets = Vec::new();
        for code in 0..3usize.pow(ndim as u32) {
            let mut rest = code;
            let mut offset = 0i64;
            let mut nonzero = 0usize;
            let mut degenerate = false;
            for d in (0..ndim).rev() {
                let digit = (rest % 3) as i64 - 1;
                rest /= 3;
                if digit != 0 {
                    // Axes of extent 1 have no neighbors along them.
                    if shape[d] == 1 {
                        degenerate = true;
                    }
                    nonzero += 1;
                    offset += digit * strides[d];
                }
            }
            if !degenerate && nonzero >= 1 && nonzero <= order {
                offsets.push(offset);
            }
        }
        Self::from_offsets(offsets)
    }

    /// The raveled offsets, in construction order.
    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    /// Number of neighbors.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the neighborhood is empty (never true for a constructed value).
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Per-dimension displacement table for a grid of the given shape.
    pub fn points(&self, shape: &[usize]) -> Result<Array2<i64>> {
        offsets_to_points(&self.offsets, shape)
    }
}
