//! Main N-dimensional grid type

use crate::error::{Error, Result};
use crate::grid::connectivity::unravel_index;
use crate::grid::GridElement;
use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, IxDyn};

/// An N-dimensional scalar image on a regular grid.
///
/// `Grid<T>` stores values of type `T` in row-major (C) order and addresses
/// pixels by their linear index, which is the form the tree algorithms
/// consume. `ndarray` views are available for coordinate-wise access.
///
/// # Type Parameters
///
/// - `T`: The pixel value type, must implement [`GridElement`]
///
/// # Example
///
/// ```ignore
/// use maxtree_core::Grid;
///
/// // Create a 100x100 grid filled with zeros
/// let mut grid: Grid<f32> = Grid::new(&[100, 100]);
///
/// // Set a value by linear index
/// grid.set(1020, 42.0)?;
///
/// // Get a value
/// let value = grid.get(1020)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: GridElement> {
    /// Dimension extents, outermost first
    shape: Vec<usize>,
    /// Pixel data in row-major order
    data: Vec<T>,
}

impl<T: GridElement> Grid<T> {
    /// Create a new grid filled with zeros
    pub fn new(shape: &[usize]) -> Self {
        Self::filled(shape, T::zero())
    }

    /// Create a new grid filled with a specific value
    pub fn filled(shape: &[usize], value: T) -> Self {
        let len = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            data: vec![value; len],
        }
    }

    /// Create a grid from existing row-major data
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(Error::InvalidDimensions {
                shape: shape.to_vec(),
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            shape: shape.to_vec(),
            data,
        })
    }

    /// Create a grid from an ndarray, copying into standard layout if needed
    pub fn from_array(array: ArrayD<T>) -> Self {
        let shape = array.shape().to_vec();
        let data = array.as_standard_layout().iter().copied().collect();
        Self { shape, data }
    }

    /// Create a grid with the same shape, filled with a value
    pub fn like(&self, fill_value: T) -> Self {
        Self::filled(&self.shape, fill_value)
    }

    /// Create a zeroed grid with the same shape but a different pixel type
    pub fn with_same_shape<U: GridElement>(&self) -> Grid<U> {
        Grid::new(&self.shape)
    }

    // Dimensions

    /// Dimension extents, outermost first
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of pixels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid has no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get the value at a linear index
    pub fn get(&self, index: usize) -> Result<T> {
        self.data.get(index).copied().ok_or(Error::IndexOutOfBounds {
            index,
            len: self.data.len(),
        })
    }

    /// Set the value at a linear index
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.data.len();
        match self.data.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds { index, len }),
        }
    }

    /// The pixel data as a flat row-major slice
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The pixel data as a mutable flat row-major slice
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// A coordinate-indexed view of the data
    pub fn view(&self) -> ArrayViewD<'_, T> {
        ArrayViewD::from_shape(IxDyn(&self.shape), &self.data)
            .expect("shape and buffer length agree by construction")
    }

    /// A mutable coordinate-indexed view of the data
    pub fn view_mut(&mut self) -> ArrayViewMutD<'_, T> {
        ArrayViewMutD::from_shape(IxDyn(&self.shape), &mut self.data)
            .expect("shape and buffer length agree by construction")
    }

    /// Consume the grid and return the underlying buffer
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    // Derived grids

    /// Range complement of every pixel, turning maxima into minima.
    ///
    /// `a <= b` in the input implies `inverted(b) <= inverted(a)` in the
    /// output, and inverting twice restores the original grid.
    pub fn inverted(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            data: self.data.iter().map(|v| v.invert()).collect(),
        }
    }

    /// Mask of pixels whose entire neighborhood is guaranteed in bounds.
    ///
    /// `true` marks interior pixels; the outermost ring along every axis is
    /// `false` and must stay so for any neighbor sweep that trusts the mask.
    pub fn interior_mask(&self) -> Vec<bool> {
        (0..self.len())
            .map(|index| {
                unravel_index(index as i64, &self.shape)
                    .iter()
                    .zip(&self.shape)
                    .all(|(&c, &extent)| c > 0 && (c as usize) + 1 < extent)
            })
            .collect()
    }
}
