use copter::simulation::params::Params;
use egui_macroquad::egui;
use macroquad::prelude::*;

/// Lets the user tune parameters before the first generation. Returns `true`
/// once the user starts training with valid parameters.
pub fn draw_genesis_screen(params: &mut Params) -> bool {
    clear_background(LIGHTGRAY);

    let mut start_training = false;
    let validation = params.validate();

    egui_macroquad::ui(|egui_ctx| {
        egui::CentralPanel::default().show(egui_ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Copter Evolution - Configuration");
                ui.add_space(10.0);

                ui.collapsing("Population", |ui| {
                    let genetic = &mut params.genetic;
                    ui.add(
                        egui::Slider::new(&mut genetic.population_size, 4..=200)
                            .text("Population Size"),
                    );
                    ui.add(
                        egui::Slider::new(&mut genetic.retained_fraction, 0.05..=0.9)
                            .text("Retained Fraction"),
                    );
                    ui.add(
                        egui::Slider::new(&mut genetic.crossover_fraction, 0.0..=1.0)
                            .text("Crossover Point"),
                    );
                    ui.add(
                        egui::Slider::new(&mut genetic.mutation_probability, 0.0..=0.5)
                            .text("Mutation Probability"),
                    );
                });

                ui.collapsing("Controller Network", |ui| {
                    let genetic = &mut params.genetic;
                    ui.add(
                        egui::Slider::new(&mut genetic.look_ahead_points, 1..=12)
                            .text("Look-ahead Samples"),
                    );
                    if let Some(hidden) = genetic.hidden_layers.first_mut() {
                        ui.add(egui::Slider::new(hidden, 1..=64).text("Hidden Layer Size"));
                    }
                    ui.horizontal(|ui| {
                        ui.label("Outputs:");
                        ui.radio_value(&mut genetic.outputs, 1, "1 (threshold)");
                        ui.radio_value(&mut genetic.outputs, 2, "2 (compare)");
                    });
                });

                ui.collapsing("Cave", |ui| {
                    ui.add(
                        egui::Slider::new(&mut params.cave.scroll_speed, 0.1..=1.5)
                            .text("Scroll Speed"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.cave.min_radius, 30.0..=200.0)
                            .text("Minimum Gap Radius"),
                    );
                });

                ui.checkbox(&mut params.has_human_player, "Fly along (space / mouse)");

                ui.add_space(20.0);
                ui.separator();

                if let Err(err) = &validation {
                    ui.colored_label(egui::Color32::from_rgb(200, 40, 40), err.to_string());
                }

                ui.horizontal(|ui| {
                    if ui.button("Start Training").clicked() {
                        start_training = true;
                    }
                    ui.label("or press Enter");
                });
            });
        });
    });

    egui_macroquad::draw();

    (start_training || is_key_pressed(KeyCode::Enter)) && validation.is_ok()
}
