//! Evolution loop: evaluate a generation in one episode, feed the fitnesses
//! back into the population and breed the next generation.
//!
//! A single seeded generator drives cave generation, weight initialization and
//! the genetic operators, so a run is reproducible from its seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::episode::Episode;
use super::error::SimulationError;
use super::params::Params;
use super::pilot::{HumanInput, NetworkPilot, Pilot, RandomPilot};
use super::population::Population;
use super::stats::{FitnessHistory, GenerationReport};

/// Drives generations of training.
#[derive(Debug, Clone)]
pub struct Trainer {
    params: Params,
    layer_sizes: Vec<usize>,
    population: Population,
    history: FitnessHistory,
    generation: u32,
    rng: SmallRng,
}

impl Trainer {
    /// Creates a trainer with a randomly initialized population.
    pub fn new(params: Params, seed: u64) -> Result<Self, SimulationError> {
        params.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let layer_sizes = params.layer_sizes();
        let population = Population::random(&layer_sizes, &params.genetic, &mut rng)?;
        Ok(Self::assemble(params, layer_sizes, population, rng))
    }

    /// Creates a trainer around an existing population.
    pub fn with_population(
        params: Params,
        population: Population,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        params.validate()?;
        let layer_sizes = params.layer_sizes();
        let expected = super::brain::genome::genome_len(&layer_sizes)?;
        if population.genome_len() != expected {
            return Err(SimulationError::GenomeLength {
                expected,
                actual: population.genome_len(),
            });
        }
        Ok(Self::assemble(
            params,
            layer_sizes,
            population,
            SmallRng::seed_from_u64(seed),
        ))
    }

    fn assemble(
        params: Params,
        layer_sizes: Vec<usize>,
        population: Population,
        rng: SmallRng,
    ) -> Self {
        Self {
            params,
            layer_sizes,
            population,
            history: FitnessHistory::default(),
            generation: 0,
            rng,
        }
    }

    /// Parameters in use.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Layer sizes of the controller networks.
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// The current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Fitness history of the finished generations.
    pub fn history(&self) -> &FitnessHistory {
        &self.history
    }

    /// Index of the generation being evaluated next.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Decodes the population and sets up a fresh episode, one network copter
    /// per genome followed by the human copter if enabled.
    pub fn begin_episode(&mut self) -> Result<Episode, SimulationError> {
        let mut pilots = self
            .population
            .decode(&self.layer_sizes)?
            .into_iter()
            .map(|network| NetworkPilot::new(network).map(Pilot::Network))
            .collect::<Result<Vec<_>, _>>()?;
        if self.params.has_human_player {
            pilots.push(Pilot::Human(HumanInput::default()));
        }
        Episode::new(&self.params, pilots)
    }

    /// Advances an episode by `dt` milliseconds using the trainer's generator.
    pub fn step_episode(&mut self, episode: &mut Episode, dt: f32) -> Result<(), SimulationError> {
        episode.step(dt, &mut self.rng)
    }

    /// Harvests fitnesses from a finished episode, records statistics and
    /// breeds the next generation.
    pub fn finish_episode(&mut self, episode: &Episode) -> Result<GenerationReport, SimulationError> {
        let fitnesses = episode.network_fitnesses();
        self.population.set_fitnesses(&fitnesses)?;
        let report = self
            .history
            .record(self.generation, &fitnesses, episode.ticks())?;
        info!(
            generation = report.generation,
            best = report.best,
            average = report.average,
            moving_average = report.moving_average,
            ticks = report.ticks,
            "generation finished"
        );

        self.population.generation_step(&mut self.rng)?;
        self.generation += 1;
        Ok(report)
    }

    /// Runs one full generation with the fixed tick length from the params.
    pub fn run_generation(&mut self) -> Result<GenerationReport, SimulationError> {
        let mut episode = self.begin_episode()?;
        episode.run(self.params.tick_ms, &mut self.rng)?;
        self.finish_episode(&episode)
    }

    /// Runs `generations` generations.
    pub fn run(&mut self, generations: u32) -> Result<Vec<GenerationReport>, SimulationError> {
        (0..generations).map(|_| self.run_generation()).collect()
    }
}

/// Flies `count` random-thrust copters through one episode and returns their
/// distances. Serves as a baseline for trained controllers.
pub fn run_baseline(params: &Params, count: usize, seed: u64) -> Result<Vec<f32>, SimulationError> {
    params.validate()?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let pilots = (0..count)
        .map(|_| Pilot::Random(RandomPilot::new(rng.random())))
        .collect();
    let mut episode = Episode::new(params, pilots)?;
    episode.run(params.tick_ms, &mut rng)?;
    Ok(episode.distances())
}
