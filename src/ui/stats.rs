use copter::simulation::episode::Episode;
use copter::simulation::trainer::Trainer;
use egui_macroquad::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use super::{PANEL_WIDTH, UIState};

pub fn draw_stats_panel(state: &mut UIState, trainer: &Trainer, episode: &Episode) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        egui_ctx.set_visuals(visuals);

        egui::SidePanel::right("stats_panel")
            .exact_width(PANEL_WIDTH)
            .resizable(false)
            .show(egui_ctx, |ui| {
                ui.heading("Training Stats");
                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("💾 Save Params").clicked() {
                        state.save_requested = true;
                    }
                    if ui.button("🔄 Reset").clicked() {
                        state.reset_requested = true;
                    }
                });

                ui.horizontal(|ui| {
                    let button_text = if state.rendering_enabled {
                        "🎨 Rendering: ON"
                    } else {
                        "🎨 Rendering: OFF"
                    };
                    if ui.button(button_text).clicked() {
                        state.rendering_enabled = !state.rendering_enabled;
                    }
                });

                if let Some(ref msg) = state.status_message {
                    ui.label(msg);
                }

                ui.separator();

                ui.label("Simulation Speed");
                ui.add(egui::Slider::new(&mut state.simulation_speed, 1..=100).text("ticks/frame"));

                ui.separator();

                ui.label(format!("Generation: {}", trainer.generation()));
                ui.label(format!(
                    "Population: {}",
                    trainer.population().len()
                ));
                ui.label(format!("Ticks: {}", episode.ticks()));
                ui.label(format!(
                    "Alive: {}",
                    episode
                        .agents()
                        .iter()
                        .filter(|agent| agent.copter.is_alive())
                        .count()
                ));

                if let Some(report) = trainer.history().latest() {
                    ui.separator();
                    ui.label(format!("Last best: {:.1}", report.best));
                    ui.label(format!("Last average: {:.1}", report.average));
                    ui.label(format!("Moving average: {:.1}", report.moving_average));
                }
                if let Some(best) = trainer.history().all_time_best() {
                    ui.label(format!("All-time best: {:.1}", best));
                }

                ui.separator();
                ui.label("Fitness per Generation");
                draw_fitness_plot(ui, state);
            });
    });
}

fn draw_fitness_plot(ui: &mut egui::Ui, state: &UIState) {
    if state.best_history.is_empty() {
        ui.label("Waiting for the first generation...");
        return;
    }

    let series = [
        ("Best", &state.best_history, egui::Color32::from_rgb(255, 100, 100)),
        ("Average", &state.average_history, egui::Color32::from_rgb(100, 150, 255)),
        (
            "Moving average",
            &state.moving_average_history,
            egui::Color32::from_rgb(255, 255, 100),
        ),
    ];

    Plot::new("fitness_plot")
        .height(200.0)
        .show_axes([true, true])
        .legend(Legend::default())
        .label_formatter(|name, value| {
            format!("{}: Generation {:.0}, Fitness {:.1}", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            for (name, data, color) in series {
                let points: PlotPoints = data.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(Line::new(points).color(color).name(name));
            }
        });
}
