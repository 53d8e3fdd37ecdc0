//! Copter state and vertical dynamics.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::params::CopterParams;

/// Milliseconds that make up one unit of the speed and acceleration constants.
pub const TIME_SCALE: f32 = 15.0;
/// Distance credited per elapsed millisecond while alive.
pub const DISTANCE_RATE: f32 = 0.02;

/// Number of exhaust points kept in a trail.
pub const TRAIL_LENGTH: usize = 11;
/// Shortest time step, in milliseconds, that adds a trail point.
pub const TRAIL_INTERVAL: f32 = 10.0;
/// Exhaust position relative to the copter.
pub const TRAIL_OFFSET: (f32, f32) = (-40.0, -5.0);

/// Exhaust trail behind a copter, oldest point first.
///
/// Points are left where they were emitted and scroll with the cave.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<(f32, f32)>,
}

impl Trail {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Points in field coordinates, oldest first.
    pub fn points(&self) -> impl ExactSizeIterator<Item = (f32, f32)> + '_ {
        self.points.iter().copied()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trail has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Scrolls the existing points by `scroll_speed * dt` and emits a new one
    /// behind `(x, y)`. Steps shorter than [`TRAIL_INTERVAL`] are ignored.
    pub fn update(&mut self, x: f32, y: f32, dt: f32, scroll_speed: f32) {
        if dt < TRAIL_INTERVAL {
            return;
        }
        if self.points.len() == TRAIL_LENGTH {
            self.points.pop_front();
        }
        let offset = scroll_speed * dt;
        for (px, _) in self.points.iter_mut() {
            *px -= offset;
        }
        self.points.push_back((x + TRAIL_OFFSET.0, y + TRAIL_OFFSET.1));
    }
}

/// A copter flying at a fixed `x`, controlled only by thrust.
///
/// Death is a one-way latch: once `alive` is false the copter stops
/// integrating physics and only drifts left with the scrolling cave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Copter {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position, 0 is the top of the field.
    pub y: f32,
    /// Lower clamp for `y`.
    pub max_y: f32,
    /// Vertical speed, positive is down.
    pub y_speed: f32,
    /// Absolute vertical speed limit.
    pub max_y_speed: f32,
    /// Downward acceleration.
    pub gravity: f32,
    /// Upward acceleration while thrust is engaged.
    pub thrust: f32,
    /// Fitness: distance accrued while alive.
    pub distance: f32,
    /// Whether thrust is engaged this tick.
    pub thrust_engaged: bool,
    alive: bool,
    death_point: Option<(f32, f32)>,
    collision_offsets: Vec<(f32, f32)>,
    scroll_speed: f32,
    trail: Trail,
}

impl Copter {
    /// Creates a live copter at its start position.
    pub fn new(params: &CopterParams, max_y: f32, scroll_speed: f32) -> Self {
        Self {
            x: params.x,
            y: params.start_y,
            max_y,
            y_speed: params.start_y_speed,
            max_y_speed: params.max_y_speed,
            gravity: params.gravity,
            thrust: params.thrust,
            distance: 0.0,
            thrust_engaged: false,
            alive: true,
            death_point: None,
            collision_offsets: params.collision_offsets.clone(),
            scroll_speed,
            trail: Trail::new(),
        }
    }

    /// Checks if the copter is alive.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Where the copter hit the cave, if it did.
    pub fn death_point(&self) -> Option<(f32, f32)> {
        self.death_point
    }

    /// Exhaust trail, frozen once the copter dies.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Local collision probe offsets, in test order.
    pub fn collision_offsets(&self) -> &[(f32, f32)] {
        &self.collision_offsets
    }

    /// Collision probes in field coordinates, in test order.
    pub fn collision_points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.collision_offsets
            .iter()
            .map(|&(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Leftmost horizontal extent of the collision probes.
    pub fn tail_x(&self) -> f32 {
        self.collision_offsets
            .iter()
            .map(|&(dx, _)| self.x + dx)
            .fold(self.x, f32::min)
    }

    /// Engages thrust.
    pub fn thrust_on(&mut self) {
        self.thrust_engaged = true;
    }

    /// Releases thrust.
    pub fn thrust_off(&mut self) {
        self.thrust_engaged = false;
    }

    /// Applies gravity and thrust, then clamps the speed.
    pub fn update_speed(&mut self, dt: f32) {
        let multiplier = dt / TIME_SCALE;
        self.y_speed += self.gravity * multiplier;
        if self.thrust_engaged {
            self.y_speed -= self.thrust * multiplier;
        }
        self.y_speed = self.y_speed.clamp(-self.max_y_speed, self.max_y_speed);
    }

    /// Integrates the position and clamps it to the field.
    pub fn update_position(&mut self, dt: f32) {
        self.y += self.y_speed * (dt / TIME_SCALE);
        self.y = self.y.clamp(0.0, self.max_y);
    }

    /// Accrues distance for the elapsed time.
    pub fn update_distance(&mut self, dt: f32) {
        self.distance += dt * DISTANCE_RATE;
    }

    /// Moves a dead copter and its death point left with the cave.
    pub fn scroll_with_background(&mut self, dt: f32) {
        let offset = self.scroll_speed * dt;
        self.x -= offset;
        if let Some((x, _)) = self.death_point.as_mut() {
            *x -= offset;
        }
    }

    /// Kills the copter at `point`. Has no effect on a dead copter.
    pub fn kill(&mut self, point: (f32, f32)) {
        if self.alive {
            self.alive = false;
            self.death_point = Some(point);
        }
    }

    /// Advances the copter by `dt` milliseconds given this tick's collision
    /// result.
    pub fn update(&mut self, dt: f32, hit: Option<(f32, f32)>) {
        if let Some(point) = hit {
            self.kill(point);
        }
        if !self.alive {
            self.scroll_with_background(dt);
            return;
        }
        self.update_speed(dt);
        self.update_position(dt);
        self.update_distance(dt);
        self.trail.update(self.x, self.y, dt, self.scroll_speed);
    }
}
