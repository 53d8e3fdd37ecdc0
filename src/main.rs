use copter::simulation::episode::Episode;
use copter::simulation::error::SimulationError;
use copter::simulation::params::Params;
use copter::simulation::trainer::Trainer;
use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod graphics;
mod ui;

const PARAMS_FILE: &str = "copter_params.json";
/// Longest frame time fed to the simulation, in milliseconds.
const MAX_FRAME_MS: f32 = 50.0;

struct Session {
    trainer: Trainer,
    episode: Episode,
}

impl Session {
    fn start(params: &Params) -> Result<Self, SimulationError> {
        let seed = ::rand::random::<u64>();
        info!(seed, "starting training");
        let mut trainer = Trainer::new(params.clone(), seed)?;
        let episode = trainer.begin_episode()?;
        Ok(Self { trainer, episode })
    }

    /// Runs up to `ticks` ticks, moving on to the next generation whenever
    /// every copter has crashed.
    fn advance(&mut self, ticks: u32, dt: f32, ui_state: &mut ui::UIState) -> Result<(), SimulationError> {
        for _ in 0..ticks {
            self.trainer.step_episode(&mut self.episode, dt)?;
            if self.episode.is_over() {
                let report = self.trainer.finish_episode(&self.episode)?;
                ui_state.push_report(&report);
                self.episode = self.trainer.begin_episode()?;
                break;
            }
        }
        Ok(())
    }
}

#[macroquad::main("Copter Evolution")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut params = Params::load_from_file(PARAMS_FILE).unwrap_or_else(|_| Params::default());
    let mut ui_state = ui::UIState::new();
    let mut session: Option<Session> = None;

    loop {
        if session.is_none() {
            if ui::draw_genesis_screen(&mut params) {
                match Session::start(&params) {
                    Ok(started) => {
                        ui_state = ui::UIState::new();
                        session = Some(started);
                    }
                    Err(err) => error!(%err, "could not start training"),
                }
            }
            next_frame().await;
            continue;
        }
        let Some(current) = session.as_mut() else {
            continue;
        };

        let thrust = is_key_down(KeyCode::Space) || is_mouse_button_down(MouseButton::Left);
        current.episode.set_human_thrust(thrust);

        let dt = (get_frame_time() * 1000.0).min(MAX_FRAME_MS);
        if let Err(err) = current.advance(ui_state.simulation_speed, dt, &mut ui_state) {
            error!(%err, "training stopped");
            session = None;
            next_frame().await;
            continue;
        }

        clear_background(Color::from_rgba(20, 20, 30, 255));
        if ui_state.rendering_enabled {
            let viewport = graphics::Viewport::new(current.episode.cave(), ui::PANEL_WIDTH);
            graphics::draw_cave(&current.episode, &viewport);
            graphics::draw_copters(&current.episode, &viewport);
        }
        graphics::draw_hud(&current.episode, current.trainer.generation());

        ui::draw_stats_panel(&mut ui_state, &current.trainer, &current.episode);
        ui::process_egui();

        if ui_state.save_requested {
            ui_state.save_requested = false;
            ui_state.status_message = Some(match current.trainer.params().save_to_file(PARAMS_FILE) {
                Ok(()) => format!("Saved parameters to {}", PARAMS_FILE),
                Err(err) => format!("Save failed: {}", err),
            });
        }

        if ui_state.reset_requested {
            ui_state.reset_requested = false;
            session = None;
        }

        next_frame().await
    }
}
