//! # Copter - Neuroevolution for a Side-Scrolling Cave Flyer
//!
//! A population of small neural networks learns to fly a copter through an
//! endless, randomly generated cave. Each network sees the cave ahead and its
//! own height and speed, and decides every tick whether to thrust. Distance
//! flown is the fitness; a genetic algorithm breeds the next generation.
//!
//! ## Features
//!
//! - Scrolling cave built from a ring of radius / center-offset samples
//! - Gravity and thrust physics with collision probes
//! - Feed-forward networks (ReLU hidden layers, sigmoid output)
//! - Truncation selection, single-point crossover and uniform mutation
//! - Parallel per-copter decisions and physics with rayon
//! - Optional human-controlled copter and random baseline pilots
//! - Real-time visualization with egui/macroquad
//!
//! ## Core Modules
//!
//! - [`simulation::cave`] - Cave geometry, scrolling and collisions
//! - [`simulation::copter`] - Copter physics
//! - [`simulation::brain`] - Neural network and genome encoding
//! - [`simulation::population`] - Genetic operators
//! - [`simulation::episode`] - One simulation run
//! - [`simulation::trainer`] - The evolution loop

/// Core simulation logic and data structures.
pub mod simulation {
    /// Neural network implementation for copter controllers.
    pub mod brain;
    /// Scrolling cave made of radius / center-offset samples.
    pub mod cave;
    /// Copter physics and collision probes.
    pub mod copter;
    /// One simulation run over a cave and a cohort of copters.
    ///
    /// Decisions and physics are computed in parallel with the cave updated
    /// once in between, see [`episode::Episode::step`].
    pub mod episode;
    /// Error type shared by the simulation.
    pub mod error;
    /// Simulation parameters.
    pub mod params;
    /// Thrust decision sources and sensor encoding.
    pub mod pilot;
    /// Fixed-size population and genetic operators.
    pub mod population;
    /// Unique index and pair sampling.
    pub mod sampling;
    /// Fitness statistics and normalization.
    pub mod stats;
    /// Generation loop tying episodes and the population together.
    pub mod trainer;
}
