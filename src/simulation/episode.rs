//! One simulation run: a cave and a cohort of piloted copters.
//!
//! A tick has three phases. Every live copter's pilot decides on thrust from
//! the same cave snapshot, in parallel. The cave then recycles samples and
//! scrolls, once. Finally every copter is tested against the updated cave
//! and integrates its physics, again in parallel. Copters never read each
//! other's state, so the parallel phases need no synchronization beyond the
//! join at their end.

use ndarray::Array1;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::cave::{Cave, Sample};
use super::copter::Copter;
use super::error::SimulationError;
use super::params::Params;
use super::pilot::{self, Decide, HumanInput, Pilot};

/// A copter together with its control source.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Physical state.
    pub copter: Copter,
    /// Control source.
    pub pilot: Pilot,
}

/// Read-only view of one copter for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopterSnapshot {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// Alive flag.
    pub alive: bool,
    /// Where the copter crashed.
    pub death_point: Option<(f32, f32)>,
    /// Distance flown.
    pub distance: f32,
    /// Whether thrust is engaged.
    pub thrust: bool,
    /// Whether a human flies this copter.
    pub human: bool,
}

/// Read-only view of an episode for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSnapshot {
    /// Ticks run so far.
    pub ticks: u64,
    /// Milliseconds simulated so far.
    pub elapsed: f32,
    /// Field height.
    pub height: f32,
    /// Field width.
    pub width: f32,
    /// Cave samples from left to right.
    pub samples: Vec<Sample>,
    /// Every copter in agent order.
    pub copters: Vec<CopterSnapshot>,
}

/// A running simulation episode.
#[derive(Debug, Clone)]
pub struct Episode {
    cave: Cave,
    agents: Vec<Agent>,
    look_ahead: usize,
    max_ticks: u64,
    ticks: u64,
    elapsed: f32,
}

impl Episode {
    /// Creates a fresh cave and one copter per pilot.
    pub fn new(params: &Params, pilots: Vec<Pilot>) -> Result<Self, SimulationError> {
        let cave = Cave::from_params(&params.cave)?;
        let agents = pilots
            .into_iter()
            .map(|pilot| Agent {
                copter: Copter::new(&params.copter, params.cave.height, params.cave.scroll_speed),
                pilot,
            })
            .collect::<Vec<_>>();
        debug!(agents = agents.len(), "starting episode");

        Ok(Self {
            cave,
            agents,
            look_ahead: params.genetic.look_ahead_points,
            max_ticks: params.max_ticks,
            ticks: 0,
            elapsed: 0.0,
        })
    }

    /// The cave.
    pub fn cave(&self) -> &Cave {
        &self.cave
    }

    /// All agents in creation order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Milliseconds simulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether every copter is dead.
    pub fn all_dead(&self) -> bool {
        self.agents.iter().all(|agent| !agent.copter.is_alive())
    }

    /// Whether the episode has finished, either because every copter died or
    /// because the tick cap was reached.
    pub fn is_over(&self) -> bool {
        self.all_dead() || self.ticks >= self.max_ticks
    }

    /// Sets the thrust signal of every human-controlled copter.
    pub fn set_human_thrust(&mut self, engaged: bool) {
        for agent in &mut self.agents {
            if let Pilot::Human(input) = &mut agent.pilot {
                *input = HumanInput { engaged };
            }
        }
    }

    /// Advances the episode by `dt` milliseconds.
    pub fn step<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Result<(), SimulationError> {
        if self.is_over() {
            return Ok(());
        }

        let cave = &self.cave;
        let look_ahead = self.look_ahead;
        self.agents
            .par_iter_mut()
            .filter(|agent| agent.copter.is_alive())
            .try_for_each(|agent| -> Result<(), SimulationError> {
                let inputs = if agent.pilot.uses_sensors() {
                    pilot::encode_inputs(cave, &agent.copter, look_ahead)?
                } else {
                    Array1::zeros(0)
                };
                if agent.pilot.decide(&inputs)? {
                    agent.copter.thrust_on();
                } else {
                    agent.copter.thrust_off();
                }
                Ok(())
            })?;

        self.cave.update_coords(rng)?;
        self.cave.scroll(dt);

        let cave = &self.cave;
        self.agents.par_iter_mut().for_each(|agent| {
            let hit = if agent.copter.is_alive() {
                agent
                    .copter
                    .collision_points()
                    .find(|&(x, y)| cave.collides(x, y))
            } else {
                None
            };
            agent.copter.update(dt, hit);
        });

        self.ticks += 1;
        self.elapsed += dt;
        if self.ticks >= self.max_ticks && !self.all_dead() {
            warn!(
                ticks = self.ticks,
                alive = self.agents.iter().filter(|a| a.copter.is_alive()).count(),
                "episode reached its tick cap"
            );
        }
        Ok(())
    }

    /// Runs fixed `dt` steps until the episode is over.
    pub fn run<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Result<u64, SimulationError> {
        while !self.is_over() {
            self.step(dt, rng)?;
        }
        Ok(self.ticks)
    }

    /// Distances of the network-driven copters, in agent order.
    pub fn network_fitnesses(&self) -> Vec<f32> {
        self.agents
            .iter()
            .filter(|agent| matches!(agent.pilot, Pilot::Network(_)))
            .map(|agent| agent.copter.distance)
            .collect()
    }

    /// Distances of all copters, in agent order.
    pub fn distances(&self) -> Vec<f32> {
        self.agents.iter().map(|agent| agent.copter.distance).collect()
    }

    /// Read-only snapshot for rendering.
    pub fn snapshot(&self) -> EpisodeSnapshot {
        EpisodeSnapshot {
            ticks: self.ticks,
            elapsed: self.elapsed,
            height: self.cave.height(),
            width: self.cave.width(),
            samples: self.cave.samples().collect(),
            copters: self
                .agents
                .iter()
                .map(|agent| CopterSnapshot {
                    x: agent.copter.x,
                    y: agent.copter.y,
                    alive: agent.copter.is_alive(),
                    death_point: agent.copter.death_point(),
                    distance: agent.copter.distance,
                    thrust: agent.copter.thrust_engaged,
                    human: agent.pilot.is_human(),
                })
                .collect(),
        }
    }
}
