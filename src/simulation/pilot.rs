//! Control sources that decide whether a copter thrusts.
//!
//! Every control source has one capability, [`Decide::decide`], which maps a
//! sensor vector to a thrust decision. [`Pilot`] is the tagged variant stored
//! next to each copter.

use ndarray::Array1;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::brain::Network;
use super::cave::Cave;
use super::copter::Copter;
use super::error::SimulationError;
use super::stats::normalize;

/// Probability that the random baseline thrusts on a given tick.
pub const RANDOM_THRUST_PROBABILITY: f64 = 0.2;

/// Values encoded per look-ahead sample: relative x, ceiling and floor.
pub const VALUES_PER_SAMPLE: usize = 3;

/// Maps a sensor vector to a thrust decision.
pub trait Decide {
    /// Returns `true` to engage thrust this tick.
    fn decide(&mut self, input: &Array1<f32>) -> Result<bool, SimulationError>;
}

/// Thrust signal supplied by an external input collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanInput {
    /// Whether the player currently holds thrust.
    pub engaged: bool,
}

impl Decide for HumanInput {
    fn decide(&mut self, _input: &Array1<f32>) -> Result<bool, SimulationError> {
        Ok(self.engaged)
    }
}

/// How network outputs become a thrust decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readout {
    /// Single output, thrust when it exceeds 0.5.
    Threshold,
    /// Two outputs, thrust when the first exceeds the second.
    Compare,
}

impl Readout {
    /// Readout matching a network's output count.
    pub fn for_outputs(outputs: usize) -> Result<Self, SimulationError> {
        match outputs {
            1 => Ok(Self::Threshold),
            2 => Ok(Self::Compare),
            _ => Err(SimulationError::InvalidParameter {
                name: "outputs",
                reason: format!("a decision network needs 1 or 2 outputs, got {outputs}"),
            }),
        }
    }

    /// Thresholds network outputs.
    pub fn apply(self, outputs: &Array1<f32>) -> bool {
        match self {
            Self::Threshold => outputs[0] > 0.5,
            Self::Compare => outputs[0] > outputs[1],
        }
    }
}

/// A controller network bound to one copter.
#[derive(Debug, Clone)]
pub struct NetworkPilot {
    /// Decoded controller network.
    pub network: Network,
    readout: Readout,
}

impl NetworkPilot {
    /// Binds a network, choosing the readout from its output count.
    pub fn new(network: Network) -> Result<Self, SimulationError> {
        let readout = Readout::for_outputs(network.output_size())?;
        Ok(Self { network, readout })
    }

    /// Readout in use.
    pub fn readout(&self) -> Readout {
        self.readout
    }
}

impl Decide for NetworkPilot {
    fn decide(&mut self, input: &Array1<f32>) -> Result<bool, SimulationError> {
        let outputs = self.network.forward(input)?;
        Ok(self.readout.apply(&outputs))
    }
}

/// Baseline that thrusts at random, ignoring its sensors.
#[derive(Debug, Clone)]
pub struct RandomPilot {
    rng: SmallRng,
}

impl RandomPilot {
    /// Creates a random pilot with its own seeded generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Decide for RandomPilot {
    fn decide(&mut self, _input: &Array1<f32>) -> Result<bool, SimulationError> {
        Ok(self.rng.random_bool(RANDOM_THRUST_PROBABILITY))
    }
}

/// Control source of one copter.
#[derive(Debug, Clone)]
pub enum Pilot {
    /// Driven by the external input collaborator.
    Human(HumanInput),
    /// Driven by a controller network.
    Network(NetworkPilot),
    /// Random baseline.
    Random(RandomPilot),
}

impl Pilot {
    /// Whether this pilot reads the sensor vector.
    pub fn uses_sensors(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Whether this pilot is a human player.
    pub fn is_human(&self) -> bool {
        matches!(self, Self::Human(_))
    }
}

impl Decide for Pilot {
    fn decide(&mut self, input: &Array1<f32>) -> Result<bool, SimulationError> {
        match self {
            Self::Human(human) => human.decide(input),
            Self::Network(network) => network.decide(input),
            Self::Random(random) => random.decide(input),
        }
    }
}

/// Number of sensor values for `look_ahead` samples.
pub fn sensor_size(look_ahead: usize) -> usize {
    VALUES_PER_SAMPLE * look_ahead + 2
}

/// Encodes what a copter senses.
///
/// For each of the next `look_ahead` samples, starting at the segment under
/// the copter's tail: horizontal distance from the copter relative to the
/// field width, and ceiling and floor relative to the field height. Then the
/// copter's own height and its speed mapped from `[-max, max]` onto `[0, 1]`.
pub fn encode_inputs(
    cave: &Cave,
    copter: &Copter,
    look_ahead: usize,
) -> Result<Array1<f32>, SimulationError> {
    let mut inputs = Array1::zeros(sensor_size(look_ahead));
    let height = cave.height();

    for (i, sample) in cave.upcoming(copter.tail_x(), look_ahead).iter().enumerate() {
        let offset = i * VALUES_PER_SAMPLE;
        inputs[offset] = normalize(sample.x - copter.x, 0.0, cave.width())?;
        inputs[offset + 1] = normalize(cave.ceiling_y(sample), 0.0, height)?;
        inputs[offset + 2] = normalize(cave.floor_y(sample), 0.0, height)?;
    }

    let offset = VALUES_PER_SAMPLE * look_ahead;
    inputs[offset] = normalize(copter.y, 0.0, copter.max_y)?;
    inputs[offset + 1] = normalize(copter.y_speed, -copter.max_y_speed, copter.max_y_speed)?;
    Ok(inputs)
}
