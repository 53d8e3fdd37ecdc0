// UI module - configuration screen and training side panel

mod genesis;
mod stats;

pub use genesis::draw_genesis_screen;
pub use stats::draw_stats_panel;

use copter::simulation::stats::GenerationReport;
use std::collections::VecDeque;

const MAX_HISTORY_POINTS: usize = 500;

/// Width reserved for the side panel when mapping the field onto the screen.
pub const PANEL_WIDTH: f32 = 300.0;

pub struct UIState {
    pub best_history: VecDeque<(f64, f64)>,
    pub average_history: VecDeque<(f64, f64)>,
    pub moving_average_history: VecDeque<(f64, f64)>,
    pub save_requested: bool,
    pub reset_requested: bool,
    pub status_message: Option<String>,
    /// Ticks simulated per frame.
    pub simulation_speed: u32,
    pub rendering_enabled: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            best_history: VecDeque::new(),
            average_history: VecDeque::new(),
            moving_average_history: VecDeque::new(),
            save_requested: false,
            reset_requested: false,
            status_message: None,
            simulation_speed: 1,
            rendering_enabled: true,
        }
    }

    pub fn push_report(&mut self, report: &GenerationReport) {
        let x = report.generation as f64;
        push_bounded(&mut self.best_history, (x, report.best as f64));
        push_bounded(&mut self.average_history, (x, report.average as f64));
        push_bounded(
            &mut self.moving_average_history,
            (x, report.moving_average as f64),
        );
    }
}

fn push_bounded(history: &mut VecDeque<(f64, f64)>, point: (f64, f64)) {
    history.push_back(point);
    if history.len() > MAX_HISTORY_POINTS {
        history.pop_front();
    }
}

pub fn process_egui() {
    egui_macroquad::draw();
}
