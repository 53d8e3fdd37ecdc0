//! Small statistics helpers and per-generation fitness tracking.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::error::SimulationError;

/// Arithmetic mean.
pub fn mean(values: &[f32]) -> Result<f32, SimulationError> {
    if values.is_empty() {
        return Err(SimulationError::EmptyInput);
    }
    Ok(values.iter().sum::<f32>() / values.len() as f32)
}

/// Population standard deviation.
pub fn std_dev(values: &[f32]) -> Result<f32, SimulationError> {
    let mu = mean(values)?;
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f32>() / values.len() as f32;
    Ok(variance.sqrt())
}

/// Largest value.
pub fn max(values: &[f32]) -> Result<f32, SimulationError> {
    values
        .iter()
        .copied()
        .reduce(f32::max)
        .ok_or(SimulationError::EmptyInput)
}

/// Maps `value` from `[min, max]` onto `[0, 1]`.
pub fn normalize(value: f32, min: f32, max: f32) -> Result<f32, SimulationError> {
    let width = max - min;
    if width == 0.0 {
        return Err(SimulationError::ZeroWidthRange { min, max });
    }
    Ok((value - min) / width)
}

/// Min-max normalizes a vector onto `[0, 1]`.
pub fn min_max_normalize(values: &[f32]) -> Result<Vec<f32>, SimulationError> {
    match values.len() {
        0 => return Err(SimulationError::EmptyInput),
        1 => return Err(SimulationError::SingleElement),
        _ => {}
    }
    let lo = values.iter().copied().fold(f32::INFINITY, f32::min);
    let hi = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    values.iter().map(|&v| normalize(v, lo, hi)).collect()
}

/// Fitness summary of one finished generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generation index, starting at 0.
    pub generation: u32,
    /// Best fitness of the generation.
    pub best: f32,
    /// Average fitness of the generation.
    pub average: f32,
    /// Moving average of the per-generation averages.
    pub moving_average: f32,
    /// Ticks the episode ran for.
    pub ticks: u64,
}

/// Per-generation fitness history with a bounded moving-average window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessHistory {
    /// Every report recorded so far, oldest first.
    pub reports: Vec<GenerationReport>,
    /// Most recent averages used for the moving average.
    window: VecDeque<f32>,
    /// Maximum number of averages in the window.
    window_size: usize,
}

impl Default for FitnessHistory {
    fn default() -> Self {
        Self::new(10)
    }
}

impl FitnessHistory {
    /// Creates an empty history averaging over the last `window_size` generations.
    pub fn new(window_size: usize) -> Self {
        Self {
            reports: Vec::new(),
            window: VecDeque::with_capacity(window_size),
            window_size: window_size.max(1),
        }
    }

    /// Records the fitnesses of one generation and returns its report.
    pub fn record(
        &mut self,
        generation: u32,
        fitnesses: &[f32],
        ticks: u64,
    ) -> Result<GenerationReport, SimulationError> {
        let best = max(fitnesses)?;
        let average = mean(fitnesses)?;

        self.window.push_back(average);
        if self.window.len() > self.window_size {
            self.window.pop_front();
        }
        let moving_average = self.window.iter().sum::<f32>() / self.window.len() as f32;

        let report = GenerationReport {
            generation,
            best,
            average,
            moving_average,
            ticks,
        };
        self.reports.push(report);
        Ok(report)
    }

    /// Most recent report.
    pub fn latest(&self) -> Option<&GenerationReport> {
        self.reports.last()
    }

    /// Best fitness seen over all generations.
    pub fn all_time_best(&self) -> Option<f32> {
        self.reports.iter().map(|r| r.best).reduce(f32::max)
    }
}
