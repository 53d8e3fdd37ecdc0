//! Flat genome encoding of weight matrices.
//!
//! A genome is the row-major concatenation of all weight matrices of a
//! network, in transition order. A matrix for the transition `n_in -> n_out`
//! has shape `(n_out, n_in + 1)`; its last column holds the bias weights.

use ndarray::{Array1, Array2, s};

use crate::simulation::error::SimulationError;

/// Matrix shape as `(rows, cols)`.
pub type Shape = (usize, usize);

/// Checks that a layer size vector describes at least one transition and that
/// every layer has at least one unit.
pub fn validate_layer_sizes(layer_sizes: &[usize]) -> Result<(), SimulationError> {
    if layer_sizes.len() < 2 || layer_sizes.contains(&0) {
        return Err(SimulationError::InvalidLayerSizes {
            sizes: layer_sizes.to_vec(),
        });
    }
    Ok(())
}

/// Matrix shapes for a layer size vector.
pub fn layer_sizes_to_shapes(layer_sizes: &[usize]) -> Result<Vec<Shape>, SimulationError> {
    validate_layer_sizes(layer_sizes)?;
    Ok(layer_sizes
        .windows(2)
        .map(|pair| (pair[1], pair[0] + 1))
        .collect())
}

/// Layer size vector for a chain of matrix shapes.
pub fn shapes_to_layer_sizes(shapes: &[Shape]) -> Result<Vec<usize>, SimulationError> {
    check_shape_chain(shapes)?;
    let mut sizes = Vec::with_capacity(shapes.len() + 1);
    sizes.push(shapes[0].1 - 1);
    sizes.extend(shapes.iter().map(|&(rows, _)| rows));
    Ok(sizes)
}

/// Checks that shapes form a chain: each matrix takes the previous matrix's
/// outputs plus one bias input.
pub fn check_shape_chain(shapes: &[Shape]) -> Result<(), SimulationError> {
    let Some(&(_, first_cols)) = shapes.first() else {
        return Err(SimulationError::InvalidLayerSizes { sizes: Vec::new() });
    };
    if first_cols < 2 {
        return Err(SimulationError::BrokenMatrixChain {
            index: 0,
            expected: 2,
            actual: first_cols,
        });
    }
    for (index, &(rows, _)) in shapes.iter().enumerate() {
        if rows == 0 {
            return Err(SimulationError::InvalidLayerSizes {
                sizes: shapes.iter().map(|&(r, _)| r).collect(),
            });
        }
        if let Some(&(_, next_cols)) = shapes.get(index + 1) {
            if rows + 1 != next_cols {
                return Err(SimulationError::BrokenMatrixChain {
                    index: index + 1,
                    expected: rows + 1,
                    actual: next_cols,
                });
            }
        }
    }
    Ok(())
}

/// Checks that a set of matrices forms a consistent chain.
pub fn check_matrix_shapes(matrices: &[Array2<f32>]) -> Result<(), SimulationError> {
    check_shape_chain(&shapes_of(matrices))
}

/// Shapes of a set of matrices.
pub fn shapes_of(matrices: &[Array2<f32>]) -> Vec<Shape> {
    matrices.iter().map(|m| m.dim()).collect()
}

/// Layer size vector of a chain of matrices.
pub fn matrices_to_layer_sizes(matrices: &[Array2<f32>]) -> Result<Vec<usize>, SimulationError> {
    shapes_to_layer_sizes(&shapes_of(matrices))
}

/// Number of genes needed for the given shapes.
pub fn shapes_len(shapes: &[Shape]) -> usize {
    shapes.iter().map(|&(rows, cols)| rows * cols).sum()
}

/// Genome length of a network with the given layer sizes.
pub fn genome_len(layer_sizes: &[usize]) -> Result<usize, SimulationError> {
    Ok(shapes_len(&layer_sizes_to_shapes(layer_sizes)?))
}

/// Concatenates matrices row-major into a genome.
pub fn flatten(matrices: &[Array2<f32>]) -> Array1<f32> {
    matrices.iter().flat_map(|m| m.iter().copied()).collect()
}

/// Splits a genome back into matrices of the given shapes.
///
/// Only the element count is checked; use [`check_shape_chain`] to make sure
/// the shapes form a usable network.
pub fn unflatten(genome: &Array1<f32>, shapes: &[Shape]) -> Result<Vec<Array2<f32>>, SimulationError> {
    let expected = shapes_len(shapes);
    if genome.len() != expected {
        return Err(SimulationError::GenomeLength {
            expected,
            actual: genome.len(),
        });
    }

    let mut offset = 0;
    let mut matrices = Vec::with_capacity(shapes.len());
    for &(rows, cols) in shapes {
        let len = rows * cols;
        let genes = genome.slice(s![offset..offset + len]).to_vec();
        let matrix = Array2::from_shape_vec((rows, cols), genes).map_err(|_| {
            SimulationError::DimensionMismatch {
                expected: len,
                actual: rows * cols,
            }
        })?;
        matrices.push(matrix);
        offset += len;
    }
    Ok(matrices)
}
