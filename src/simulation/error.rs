//! Error taxonomy for the simulation and training core.
//!
//! Every variant is fatal to the caller: malformed construction data,
//! mismatched dimensions, degenerate statistics input and requests for more
//! unique samples than exist all indicate a wiring or configuration problem
//! that has to be fixed before a run.

use thiserror::Error;

/// Errors raised by the cave, the networks and the genetic operators.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// The radius, offset and x coordinate sequences differ in length.
    #[error("coordinates differ in length: {radiuses} radiuses, {dys} dys, {xs} xs")]
    CoordinateLengthMismatch {
        /// Number of radiuses.
        radiuses: usize,
        /// Number of vertical offsets.
        dys: usize,
        /// Number of x coordinates.
        xs: usize,
    },
    /// No coordinates were supplied.
    #[error("coordinates have zero length")]
    EmptyCoordinates,
    /// The cave needs at least two samples to interpolate between.
    #[error("cave needs at least 2 samples, got {count}")]
    TooFewSamples {
        /// Number of samples supplied.
        count: usize,
    },
    /// A sample would push the ceiling or floor outside the field.
    #[error("sample {index} is invalid: radius {radius} with offset {dy}")]
    InvalidSample {
        /// Index of the offending sample.
        index: usize,
        /// Sample radius.
        radius: f32,
        /// Sample vertical offset.
        dy: f32,
    },
    /// Sample x coordinates must be strictly increasing.
    #[error("sample {index} does not lie to the right of its predecessor")]
    NonIncreasingX {
        /// Index of the offending sample.
        index: usize,
    },
    /// Rejection sampling of a new cave sample gave up.
    #[error("no valid cave sample found after {attempts} attempts")]
    RegenerationExhausted {
        /// Number of attempts made.
        attempts: usize,
    },
    /// A network needs at least two layer sizes, all of them non-zero.
    #[error("invalid layer sizes {sizes:?}")]
    InvalidLayerSizes {
        /// The rejected layer sizes.
        sizes: Vec<usize>,
    },
    /// A configuration value is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// Vector or matrix dimensions do not line up.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
    /// A genome does not have as many genes as its shapes require.
    #[error("genome has {actual} genes but shapes require {expected}")]
    GenomeLength {
        /// Number of genes required by the shapes.
        expected: usize,
        /// Number of genes supplied.
        actual: usize,
    },
    /// Consecutive weight matrices do not chain.
    #[error("matrix {index} has {actual} columns, previous layer requires {expected}")]
    BrokenMatrixChain {
        /// Index of the offending matrix.
        index: usize,
        /// Columns required by the previous matrix.
        expected: usize,
        /// Columns found.
        actual: usize,
    },
    /// Statistics were requested on an empty vector.
    #[error("statistics of an empty vector are undefined")]
    EmptyInput,
    /// A single value cannot be normalized against itself.
    #[error("cannot normalize a single-element vector")]
    SingleElement,
    /// Normalization range has zero width.
    #[error("range [{min}, {max}] has zero width")]
    ZeroWidthRange {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
    /// More unique pairs were requested than exist.
    #[error("requested {requested} unique pairs, only {available} exist")]
    NotEnoughPairs {
        /// Number of pairs requested.
        requested: usize,
        /// Number of pairs available.
        available: usize,
    },
    /// More distinct elements were requested than exist.
    #[error("requested {requested} distinct elements, only {available} exist")]
    NotEnoughElements {
        /// Number of elements requested.
        requested: usize,
        /// Number of elements available.
        available: usize,
    },
}
