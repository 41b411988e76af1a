//! # Maxtree Core
//!
//! Core types and traits for the maxtree workspace.
//!
//! This crate provides:
//! - `Grid<T>`: Generic N-dimensional image grid
//! - `GridElement`: Trait bounding the supported pixel scalar types
//! - `Connectivity`: Neighborhoods as raveled pixel offsets
//! - Algorithm trait for a consistent API
//! - Error types shared across the workspace

pub mod error;
pub mod grid;

pub use error::{Error, Result};
pub use grid::{Connectivity, Grid, GridElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Connectivity, Grid, GridElement};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in the maxtree workspace.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
