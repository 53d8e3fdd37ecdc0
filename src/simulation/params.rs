use serde::{Deserialize, Serialize};

use super::error::SimulationError;
use super::pilot;

/// Geometry and scrolling of the cave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaveParams {
    /// Field height in pixels.
    pub height: f32,
    /// Field width in pixels.
    pub width: f32,
    /// Smallest half-gap of a generated sample.
    pub min_radius: f32,
    /// Generated radiuses are `min_radius + U(0, radius_variation)`.
    pub radius_variation: f32,
    /// Generated offsets move by `U(-dy_variation / 2, dy_variation / 2)`.
    pub dy_variation: f32,
    /// Horizontal distance between generated samples.
    pub x_spacing: f32,
    /// Scroll speed in pixels per millisecond.
    pub scroll_speed: f32,
    /// Radiuses of the initial samples.
    pub initial_radiuses: Vec<f32>,
    /// Vertical offsets of the initial samples.
    pub initial_dys: Vec<f32>,
    /// X coordinates of the initial samples.
    pub initial_xs: Vec<f32>,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            height: 800.0,
            width: 1200.0,
            min_radius: 70.0,
            radius_variation: 80.0,
            dy_variation: 160.0,
            x_spacing: 100.0,
            scroll_speed: 0.5,
            initial_radiuses: vec![
                100.0, 200.0, 300.0, 350.0, 250.0, 270.0, 220.0, 200.0, 300.0, 240.0, 150.0, 250.0,
                50.0, 120.0, 100.0, 60.0,
            ],
            initial_dys: vec![
                0.0, 50.0, -50.0, 10.0, 20.0, 100.0, 40.0, 0.0, 50.0, -50.0, 10.0, 20.0, 100.0,
                40.0, 60.0, 120.0,
            ],
            initial_xs: (0..16).map(|i| (i as f32 - 1.0) * 100.0).collect(),
        }
    }
}

impl CaveParams {
    /// Checks the geometry and generator ranges.
    ///
    /// Non-positive spacing would keep new samples left of the field and
    /// recycle forever; negative variations leave nothing to sample from.
    pub fn validate(&self) -> Result<(), SimulationError> {
        check(
            self.height.is_finite() && self.height > 0.0,
            "cave.height",
            "must be positive",
        )?;
        check(
            self.width.is_finite() && self.width > 0.0,
            "cave.width",
            "must be positive",
        )?;
        check(
            self.min_radius >= 0.0 && self.min_radius < self.height / 2.0,
            "cave.min_radius",
            "must lie in [0, height / 2)",
        )?;
        check(
            self.radius_variation.is_finite() && self.radius_variation >= 0.0,
            "cave.radius_variation",
            "must not be negative",
        )?;
        check(
            self.dy_variation.is_finite() && self.dy_variation >= 0.0,
            "cave.dy_variation",
            "must not be negative",
        )?;
        check(
            self.x_spacing.is_finite() && self.x_spacing > 0.0,
            "cave.x_spacing",
            "must be positive",
        )?;
        check(
            self.scroll_speed.is_finite() && self.scroll_speed >= 0.0,
            "cave.scroll_speed",
            "must not be negative",
        )
    }
}

/// Copter dynamics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopterParams {
    /// Fixed horizontal position of every copter.
    pub x: f32,
    /// Vertical start position.
    pub start_y: f32,
    /// Vertical start speed.
    pub start_y_speed: f32,
    /// Absolute vertical speed limit.
    pub max_y_speed: f32,
    /// Downward acceleration.
    pub gravity: f32,
    /// Upward acceleration while thrust is engaged.
    pub thrust: f32,
    /// Local `(dx, dy)` probes tested against the cave, in order.
    pub collision_offsets: Vec<(f32, f32)>,
}

impl Default for CopterParams {
    fn default() -> Self {
        Self {
            x: 500.0,
            start_y: 300.0,
            start_y_speed: 0.0,
            max_y_speed: 5.0,
            gravity: 0.3,
            thrust: 1.6,
            collision_offsets: vec![
                (-1.0, -4.0),
                (0.0, -30.0),
                (-52.0, -30.0),
                (-63.0, -23.0),
                (-44.0, -3.0),
            ],
        }
    }
}

/// Genetic algorithm and controller topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticParams {
    /// Number of genomes per generation.
    pub population_size: usize,
    /// Fraction of the ranked population kept each generation.
    pub retained_fraction: f32,
    /// Relative position of the single crossover point.
    pub crossover_fraction: f32,
    /// Per-gene mutation probability.
    pub mutation_probability: f32,
    /// Number of upcoming cave samples fed to each network.
    pub look_ahead_points: usize,
    /// Hidden layer sizes of the controller network.
    pub hidden_layers: Vec<usize>,
    /// Output count: 1 (threshold) or 2 (compare).
    pub outputs: usize,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            retained_fraction: 0.2,
            crossover_fraction: 0.5,
            mutation_probability: 0.05,
            look_ahead_points: 5,
            hidden_layers: vec![8],
            outputs: 1,
        }
    }
}

/// Simulation parameters, immutable for the duration of an episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Cave geometry.
    pub cave: CaveParams,
    /// Copter dynamics.
    pub copter: CopterParams,
    /// Genetic algorithm settings.
    pub genetic: GeneticParams,
    /// Adds a human-controlled copter that is not part of the population.
    pub has_human_player: bool,
    /// Tick cap per episode.
    pub max_ticks: u64,
    /// Fixed time step in milliseconds used for headless training.
    pub tick_ms: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            cave: CaveParams::default(),
            copter: CopterParams::default(),
            genetic: GeneticParams::default(),
            has_human_player: false,
            max_ticks: 20_000,
            tick_ms: 16.0,
        }
    }
}

impl Params {
    /// Network input size: three values per look-ahead sample plus the copter's
    /// own height and vertical speed.
    pub fn input_size(&self) -> usize {
        pilot::sensor_size(self.genetic.look_ahead_points)
    }

    /// Full layer size vector of the controller networks.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.genetic.hidden_layers.len() + 2);
        sizes.push(self.input_size());
        sizes.extend(self.genetic.hidden_layers.iter().copied());
        sizes.push(self.genetic.outputs);
        sizes
    }

    /// Checks every parameter range.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.cave.validate()?;

        let cave = &self.cave;
        let copter = &self.copter;
        check(copter.max_y_speed > 0.0, "copter.max_y_speed", "must be positive")?;
        check(
            (0.0..=cave.height).contains(&copter.start_y),
            "copter.start_y",
            "must lie inside the field",
        )?;
        check(
            !copter.collision_offsets.is_empty(),
            "copter.collision_offsets",
            "must not be empty",
        )?;

        let genetic = &self.genetic;
        check(genetic.population_size > 0, "genetic.population_size", "must be positive")?;
        check(
            (0.0..=1.0).contains(&genetic.retained_fraction),
            "genetic.retained_fraction",
            "must lie in [0, 1]",
        )?;
        check(
            (0.0..=1.0).contains(&genetic.crossover_fraction),
            "genetic.crossover_fraction",
            "must lie in [0, 1]",
        )?;
        check(
            (0.0..=1.0).contains(&genetic.mutation_probability),
            "genetic.mutation_probability",
            "must lie in [0, 1]",
        )?;
        check(genetic.look_ahead_points > 0, "genetic.look_ahead_points", "must be positive")?;
        check(
            genetic.outputs == 1 || genetic.outputs == 2,
            "genetic.outputs",
            "must be 1 or 2",
        )?;
        check(
            genetic.hidden_layers.iter().all(|&size| size > 0),
            "genetic.hidden_layers",
            "sizes must be positive",
        )?;

        let retained =
            (genetic.population_size as f32 * genetic.retained_fraction).floor() as usize;
        let offspring = genetic.population_size - retained.min(genetic.population_size);
        let pairs = retained * retained.saturating_sub(1);
        if offspring > pairs {
            return Err(SimulationError::InvalidParameter {
                name: "genetic.retained_fraction",
                reason: format!(
                    "{retained} retained genomes give {pairs} parent pairs, {offspring} offspring needed"
                ),
            });
        }

        check(self.tick_ms > 0.0, "tick_ms", "must be positive")?;
        check(self.max_ticks > 0, "max_ticks", "must be positive")?;
        Ok(())
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads parameters from a JSON file and validates them.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}

fn check(condition: bool, name: &'static str, reason: &str) -> Result<(), SimulationError> {
    if condition {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter {
            name,
            reason: reason.to_owned(),
        })
    }
}
