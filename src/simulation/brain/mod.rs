//! Feed-forward controller network.
//!
//! Fully-connected layers with a bias column, ReLU on hidden layers and a
//! logistic sigmoid on the output layer. Networks convert to and from flat
//! genomes for the genetic algorithm.

use ndarray::{Array1, Array2, s};
use ndarray_rand::RandomExt;
use ndarray_rand::rand::SeedableRng as _;
use ndarray_rand::rand::rngs::StdRng as InitRng;
use ndarray_rand::rand_distr::Normal;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::SimulationError;

pub mod genome;

pub use genome::Shape;

/// Fully-connected feed-forward network, one weight matrix per transition.
///
/// Deserialized networks go through [`Network::from_matrices`], so a
/// malformed matrix chain is rejected while parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    /// Weight matrices of shape `(outputs, inputs + 1)`.
    layers: Vec<Array2<f32>>,
}

/// Unchecked serialized form of [`Network`].
#[derive(Deserialize)]
struct RawNetwork {
    layers: Vec<Array2<f32>>,
}

impl TryFrom<RawNetwork> for Network {
    type Error = SimulationError;

    fn try_from(raw: RawNetwork) -> Result<Self, Self::Error> {
        Self::from_matrices(raw.layers)
    }
}

impl Network {
    /// Creates a network with weights drawn from `N(0, 2 / (inputs + 1))`.
    pub fn new<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Self, SimulationError> {
        let shapes = genome::layer_sizes_to_shapes(layer_sizes)?;
        // ndarray-rand draws from its own rand version, seeded from ours.
        let mut init_rng = InitRng::seed_from_u64(rng.random());

        let mut layers = Vec::with_capacity(shapes.len());
        for (rows, cols) in shapes {
            let std_dev = (2.0 / cols as f32).sqrt();
            let normal = Normal::new(0.0, std_dev).map_err(|e| SimulationError::InvalidParameter {
                name: "weight_std_dev",
                reason: e.to_string(),
            })?;
            layers.push(Array2::random_using((rows, cols), normal, &mut init_rng));
        }
        Ok(Self { layers })
    }

    /// Wraps a chain of weight matrices after checking their shapes.
    pub fn from_matrices(layers: Vec<Array2<f32>>) -> Result<Self, SimulationError> {
        genome::check_matrix_shapes(&layers)?;
        Ok(Self { layers })
    }

    /// Decodes a genome for the given layer sizes.
    pub fn from_genome(genes: &Array1<f32>, layer_sizes: &[usize]) -> Result<Self, SimulationError> {
        let shapes = genome::layer_sizes_to_shapes(layer_sizes)?;
        Self::from_matrices(genome::unflatten(genes, &shapes)?)
    }

    /// Weight matrices in transition order.
    pub fn layers(&self) -> &[Array2<f32>] {
        &self.layers
    }

    /// Matrix shapes in transition order.
    pub fn shapes(&self) -> Vec<Shape> {
        genome::shapes_of(&self.layers)
    }

    /// Layer size vector `[inputs, hidden.., outputs]`.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.layers.len() + 1);
        sizes.push(self.input_size());
        sizes.extend(self.layers.iter().map(|m| m.nrows()));
        sizes
    }

    /// Number of inputs.
    pub fn input_size(&self) -> usize {
        self.layers[0].ncols() - 1
    }

    /// Number of outputs.
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].nrows()
    }

    /// Flattens all weights into a genome.
    pub fn flatten(&self) -> Array1<f32> {
        genome::flatten(&self.layers)
    }

    /// Runs a forward pass.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Result<Array1<f32>, SimulationError> {
        let last = self.layers.len() - 1;
        let mut activation = inputs.clone();
        for (i, weights) in self.layers.iter().enumerate() {
            if activation.len() + 1 != weights.ncols() {
                return Err(SimulationError::DimensionMismatch {
                    expected: weights.ncols() - 1,
                    actual: activation.len(),
                });
            }
            let mut output = weights.dot(&with_bias(&activation));
            if i == last {
                output.mapv_inplace(sigmoid);
            } else {
                output.mapv_inplace(relu);
            }
            activation = output;
        }
        Ok(activation)
    }
}

/// Appends the constant bias input `1`.
fn with_bias(values: &Array1<f32>) -> Array1<f32> {
    let mut augmented = Array1::ones(values.len() + 1);
    augmented.slice_mut(s![..values.len()]).assign(values);
    augmented
}

/// Rectified linear unit.
#[inline]
pub fn relu(x: f32) -> f32 {
    x.max(0.0)
}

/// Logistic sigmoid, clamped so that f32 rounding never reaches 0 or 1.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    (1.0 / (1.0 + (-x).exp())).clamp(f32::EPSILON, 1.0 - f32::EPSILON)
}
