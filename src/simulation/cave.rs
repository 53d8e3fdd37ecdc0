//! Scrolling cave made of tunnel cross-sections.
//!
//! The cave is a fixed-size window of samples stored in a ring buffer. Each
//! sample describes the half-gap (`radius`) and vertical offset (`dy`) of the
//! tunnel at one horizontal position. Ceiling and floor between two samples
//! are linear interpolations, which makes collision tests exact.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::SimulationError;
use super::params::CaveParams;

/// Upper bound on rejection-sampling attempts for one new sample.
pub const MAX_REGENERATION_ATTEMPTS: usize = 10_000;

/// One tunnel cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Half the gap between ceiling and floor.
    pub radius: f32,
    /// Vertical offset of the gap's center, positive is up.
    pub dy: f32,
    /// Horizontal position.
    pub x: f32,
}

/// Returns whether a sample keeps its ceiling and floor inside a field of
/// height `height`.
pub fn sample_valid(radius: f32, dy: f32, height: f32) -> bool {
    dy.abs() + radius <= height / 2.0
}

/// Two-point linear interpolation of `y` at `x` between `(x0, y0)` and `(x1, y1)`.
#[inline]
pub fn lerp_y(x: f32, x0: f32, x1: f32, y0: f32, y1: f32) -> f32 {
    (y0 * (x1 - x) + y1 * (x - x0)) / (x1 - x0)
}

/// The scrolling obstacle field.
#[derive(Debug, Clone, Serialize)]
pub struct Cave {
    /// Ring storage, `head` is the leftmost sample.
    samples: Vec<Sample>,
    head: usize,
    height: f32,
    width: f32,
    min_radius: f32,
    radius_variation: f32,
    dy_variation: f32,
    x_spacing: f32,
    scroll_speed: f32,
}

impl Cave {
    /// Creates a cave from explicit sample coordinates.
    ///
    /// Fails if the sequences differ in length, are empty or shorter than two,
    /// if x does not strictly increase, if any sample leaves the field, or if
    /// `params` fails [`CaveParams::validate`].
    pub fn new(
        radiuses: &[f32],
        dys: &[f32],
        xs: &[f32],
        params: &CaveParams,
    ) -> Result<Self, SimulationError> {
        if radiuses.len() != dys.len() || dys.len() != xs.len() {
            return Err(SimulationError::CoordinateLengthMismatch {
                radiuses: radiuses.len(),
                dys: dys.len(),
                xs: xs.len(),
            });
        }
        if radiuses.is_empty() {
            return Err(SimulationError::EmptyCoordinates);
        }
        if radiuses.len() < 2 {
            return Err(SimulationError::TooFewSamples {
                count: radiuses.len(),
            });
        }
        params.validate()?;

        let mut samples = Vec::with_capacity(radiuses.len());
        for (index, ((&radius, &dy), &x)) in radiuses.iter().zip(dys).zip(xs).enumerate() {
            if !sample_valid(radius, dy, params.height) {
                return Err(SimulationError::InvalidSample { index, radius, dy });
            }
            if index > 0 && x <= xs[index - 1] {
                return Err(SimulationError::NonIncreasingX { index });
            }
            samples.push(Sample { radius, dy, x });
        }

        Ok(Self {
            samples,
            head: 0,
            height: params.height,
            width: params.width,
            min_radius: params.min_radius,
            radius_variation: params.radius_variation,
            dy_variation: params.dy_variation,
            x_spacing: params.x_spacing,
            scroll_speed: params.scroll_speed,
        })
    }

    /// Creates a cave from the initial samples stored in `params`.
    pub fn from_params(params: &CaveParams) -> Result<Self, SimulationError> {
        Self::new(
            &params.initial_radiuses,
            &params.initial_dys,
            &params.initial_xs,
            params,
        )
    }

    /// Number of samples in the window.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Field height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Field width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Sample `i`, counted from the left edge of the window.
    #[inline]
    pub fn sample(&self, i: usize) -> Sample {
        self.samples[(self.head + i) % self.samples.len()]
    }

    /// Samples from left to right.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.samples.len()).map(move |i| self.sample(i))
    }

    /// Rightmost sample.
    pub fn last(&self) -> Sample {
        self.sample(self.samples.len() - 1)
    }

    /// Ceiling height of a sample.
    #[inline]
    pub fn ceiling_y(&self, sample: &Sample) -> f32 {
        self.height / 2.0 - sample.radius - sample.dy
    }

    /// Floor height of a sample.
    #[inline]
    pub fn floor_y(&self, sample: &Sample) -> f32 {
        self.height / 2.0 + sample.radius - sample.dy
    }

    /// Moves every sample left by `scroll_speed * dt`.
    pub fn scroll(&mut self, dt: f32) {
        let offset = self.scroll_speed * dt;
        for sample in &mut self.samples {
            sample.x -= offset;
        }
    }

    /// Whether the leading segment has fully left the field.
    pub fn update_required(&self) -> bool {
        self.sample(1).x < 0.0
    }

    /// Recycles leading samples while the second sample lies left of the
    /// origin, appending freshly generated samples on the right.
    ///
    /// Returns the number of recycled samples.
    pub fn update_coords<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, SimulationError> {
        let mut recycled = 0;
        while self.update_required() {
            let last = self.last();
            let (radius, dy) = self.new_radius_and_dy(last.dy, rng)?;
            let n = self.samples.len();
            self.samples[self.head] = Sample {
                radius,
                dy,
                x: last.x + self.x_spacing,
            };
            self.head = (self.head + 1) % n;
            recycled += 1;
        }
        Ok(recycled)
    }

    fn new_radius_and_dy<R: Rng + ?Sized>(
        &self,
        previous_dy: f32,
        rng: &mut R,
    ) -> Result<(f32, f32), SimulationError> {
        let half_dy = self.dy_variation / 2.0;
        for attempt in 1..=MAX_REGENERATION_ATTEMPTS {
            let radius = self.min_radius + rng.random_range(0.0..=self.radius_variation);
            let dy = previous_dy + rng.random_range(-half_dy..=half_dy);
            if sample_valid(radius, dy, self.height) {
                debug!(attempt, radius, dy, "generated cave sample");
                return Ok((radius, dy));
            }
        }
        Err(SimulationError::RegenerationExhausted {
            attempts: MAX_REGENERATION_ATTEMPTS,
        })
    }

    /// Index `i` of the segment `(i, i + 1)` bracketing `x`.
    ///
    /// Points left of the window map to the first segment and points right
    /// of it to the last one, so lookups extrapolate from the nearest edge.
    pub fn segment_index(&self, x: f32) -> usize {
        let n = self.samples.len();
        let first_right = (0..n).find(|&i| self.sample(i).x > x).unwrap_or(n);
        first_right.saturating_sub(1).min(n - 2)
    }

    /// Interpolated ceiling and floor at `x`.
    pub fn bounds_at(&self, x: f32) -> (f32, f32) {
        let i = self.segment_index(x);
        let s0 = self.sample(i);
        let s1 = self.sample(i + 1);
        let ceiling = lerp_y(x, s0.x, s1.x, self.ceiling_y(&s0), self.ceiling_y(&s1));
        let floor = lerp_y(x, s0.x, s1.x, self.floor_y(&s0), self.floor_y(&s1));
        (ceiling, floor)
    }

    /// Whether `(x, y)` touches or lies beyond the ceiling or floor.
    pub fn collides(&self, x: f32, y: f32) -> bool {
        let (ceiling, floor) = self.bounds_at(x);
        y <= ceiling || y >= floor
    }

    /// `count` consecutive samples starting with the left end of the segment
    /// that contains `x`. The last sample is repeated if the window runs out.
    pub fn upcoming(&self, x: f32, count: usize) -> Vec<Sample> {
        let start = self.segment_index(x);
        let n = self.samples.len();
        (0..count)
            .map(|k| self.sample((start + k).min(n - 1)))
            .collect()
    }
}
