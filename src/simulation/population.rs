//! Fixed-size genome population and its genetic operators.
//!
//! One generation step is truncation selection, single-point crossover to
//! refill the population, then per-gene mutation of every individual.

use ndarray::{Array1, s};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::brain::Network;
use super::error::SimulationError;
use super::params::GeneticParams;
use super::sampling;

/// Half-width of the uniform mutation perturbation.
pub const MUTATION_RANGE: f32 = 0.1;

/// A genome paired with its fitness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Flat network weights.
    pub genome: Array1<f32>,
    /// Fitness from the last evaluation, 0 for fresh offspring.
    pub fitness: f32,
}

impl Individual {
    /// Creates an unevaluated individual.
    pub fn new(genome: Array1<f32>) -> Self {
        Self {
            genome,
            fitness: 0.0,
        }
    }
}

/// Rejects values outside `[0, 1]`, NaN included.
fn unit_fraction(name: &'static str, value: f32) -> Result<(), SimulationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter {
            name,
            reason: format!("{value} is outside [0, 1]"),
        })
    }
}

/// Fixed-size set of individuals plus the operator hyperparameters.
#[derive(Debug, Clone, Serialize)]
pub struct Population {
    individuals: Vec<Individual>,
    retained_fraction: f32,
    crossover_fraction: f32,
    mutation_probability: f32,
}

impl Population {
    /// Creates a population from equally long genomes.
    ///
    /// The retained and crossover fractions and the mutation probability must
    /// lie in `[0, 1]`.
    pub fn new(genomes: Vec<Array1<f32>>, params: &GeneticParams) -> Result<Self, SimulationError> {
        unit_fraction("genetic.retained_fraction", params.retained_fraction)?;
        unit_fraction("genetic.crossover_fraction", params.crossover_fraction)?;
        unit_fraction("genetic.mutation_probability", params.mutation_probability)?;
        let Some(first) = genomes.first() else {
            return Err(SimulationError::EmptyInput);
        };
        let expected = first.len();
        if let Some(bad) = genomes.iter().find(|g| g.len() != expected) {
            return Err(SimulationError::DimensionMismatch {
                expected,
                actual: bad.len(),
            });
        }

        Ok(Self {
            individuals: genomes.into_iter().map(Individual::new).collect(),
            retained_fraction: params.retained_fraction,
            crossover_fraction: params.crossover_fraction,
            mutation_probability: params.mutation_probability,
        })
    }

    /// Creates `params.population_size` freshly initialized networks.
    pub fn random<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        params: &GeneticParams,
        rng: &mut R,
    ) -> Result<Self, SimulationError> {
        let genomes = (0..params.population_size)
            .map(|_| Network::new(layer_sizes, rng).map(|network| network.flatten()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(genomes, params)
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population has no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Individuals in their current order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Number of genes per genome.
    pub fn genome_len(&self) -> usize {
        self.individuals[0].genome.len()
    }

    /// Number of individuals kept by selection.
    pub fn retained_count(&self) -> usize {
        ((self.individuals.len() as f32 * self.retained_fraction).floor() as usize)
            .min(self.individuals.len())
    }

    /// Gene index at which crossover switches parents.
    pub fn crossover_point(&self) -> usize {
        ((self.crossover_fraction * self.genome_len() as f32).floor() as usize)
            .min(self.genome_len())
    }

    /// Individual with the highest fitness.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
    }

    /// Overwrites fitnesses in individual order.
    pub fn set_fitnesses(&mut self, fitnesses: &[f32]) -> Result<(), SimulationError> {
        if fitnesses.len() != self.individuals.len() {
            return Err(SimulationError::DimensionMismatch {
                expected: self.individuals.len(),
                actual: fitnesses.len(),
            });
        }
        for (individual, &fitness) in self.individuals.iter_mut().zip(fitnesses) {
            individual.fitness = fitness;
        }
        Ok(())
    }

    /// Decodes every genome into a network, in parallel.
    pub fn decode(&self, layer_sizes: &[usize]) -> Result<Vec<Network>, SimulationError> {
        self.individuals
            .par_iter()
            .map(|individual| Network::from_genome(&individual.genome, layer_sizes))
            .collect()
    }

    /// Sorts by fitness, best first, and keeps the retained fraction.
    ///
    /// The sort is stable: individuals with equal fitness keep their current
    /// relative order, so the earlier one ranks higher.
    pub fn selection(&mut self) {
        let retained = self.retained_count();
        self.individuals
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        self.individuals.truncate(retained);
    }

    /// Refills the population to `target_size` with offspring of unique
    /// ordered parent pairs drawn from the current individuals.
    ///
    /// The child takes parent A's genes before the crossover point and parent
    /// B's from it onward. `(A, B)` and `(B, A)` are distinct pairs since they
    /// produce different children.
    pub fn crossover<R: Rng + ?Sized>(
        &mut self,
        target_size: usize,
        rng: &mut R,
    ) -> Result<(), SimulationError> {
        let parents = self.individuals.len();
        let needed = target_size.saturating_sub(parents);
        let pairs = sampling::k_unique_ordered_pairs(parents, needed, rng)?;
        let cut = self.crossover_point();

        let offspring: Vec<Individual> = pairs
            .into_iter()
            .map(|(a, b)| {
                let mut genome = self.individuals[b].genome.clone();
                genome
                    .slice_mut(s![..cut])
                    .assign(&self.individuals[a].genome.slice(s![..cut]));
                Individual::new(genome)
            })
            .collect();
        self.individuals.extend(offspring);
        Ok(())
    }

    /// Perturbs every gene with probability `mutation_probability` by a
    /// uniform value in `[-0.1, 0.1]`.
    pub fn mutation<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let probability = f64::from(self.mutation_probability);
        for individual in &mut self.individuals {
            for gene in individual.genome.iter_mut() {
                if rng.random_bool(probability) {
                    *gene += rng.random_range(-MUTATION_RANGE..=MUTATION_RANGE);
                }
            }
        }
    }

    /// Runs selection, crossover and mutation. The population size is
    /// unchanged; nothing is modified if crossover cannot find enough pairs.
    pub fn generation_step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SimulationError> {
        let size = self.individuals.len();
        let retained = self.retained_count();
        let needed = size - retained;
        let available = retained * retained.saturating_sub(1);
        if needed > available {
            return Err(SimulationError::NotEnoughPairs {
                requested: needed,
                available,
            });
        }

        self.selection();
        self.crossover(size, rng)?;
        self.mutation(rng);
        Ok(())
    }
}
