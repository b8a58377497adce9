// src/ui/input_panel.rs
use eframe::egui;

use crate::state::AppState;

/// Draw the brief form in the side panel. Returns true when the user
/// pressed the submit button and a request may be started; the caller owns
/// the actual state transition and task spawn.
pub fn draw_input_panel(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let analyzing = state.is_analyzing();
    let mut submitted = false;

    ui.add_space(8.0);
    ui.heading("Strata");
    ui.label(
        egui::RichText::new("Parametric design strategy visualizer")
            .small()
            .weak(),
    );
    ui.add_space(12.0);
    ui.separator();
    ui.add_space(12.0);

    egui::ScrollArea::vertical()
        .id_source("input_panel_scroll")
        .show(ui, |ui| {
            ui.add_enabled_ui(!analyzing, |ui| {
                ui.label(egui::RichText::new("Project name").small().strong());
                ui.add_sized(
                    [ui.available_width(), 20.0],
                    egui::TextEdit::singleline(&mut state.form.project_name)
                        .hint_text("e.g. New Future Library"),
                );
                ui.add_space(10.0);

                ui.label(egui::RichText::new("Design requirements").small().strong());
                ui.add_sized(
                    [ui.available_width(), 70.0],
                    egui::TextEdit::multiline(&mut state.form.requirements)
                        .hint_text("Functional needs, aesthetic goals, key activities..."),
                );
                ui.add_space(10.0);

                ui.label(egui::RichText::new("Target users").small().strong());
                ui.add_sized(
                    [ui.available_width(), 70.0],
                    egui::TextEdit::multiline(&mut state.form.target_users)
                        .hint_text("Demographics, behavior patterns, user flows..."),
                );
                ui.add_space(10.0);

                ui.label(
                    egui::RichText::new("Spatial context / constraints")
                        .small()
                        .strong(),
                );
                ui.add_sized(
                    [ui.available_width(), 70.0],
                    egui::TextEdit::multiline(&mut state.form.spatial_context)
                        .hint_text("Site limits, floor area, daylight, existing structure..."),
                );
            });

            ui.add_space(16.0);

            let label = if analyzing {
                "Analyzing..."
            } else {
                "Generate strategy"
            };
            let button = egui::Button::new(egui::RichText::new(label).strong())
                .min_size(egui::vec2(ui.available_width(), 36.0));
            if ui.add_enabled(state.can_submit(), button).clicked() {
                submitted = true;
            }
            if !analyzing && !state.form.is_complete() {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Fill in all four fields to generate a strategy.")
                        .small()
                        .weak(),
                );
            }
        });

    submitted
}
