use eframe::egui;

use crate::app::{self, GraphOxide};
use crate::state::PendingAction;

/// Render the top menu bar
pub fn render_menu(app: &mut GraphOxide, ctx: &egui::Context) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Add data file...").clicked() {
                    ui.close();
                    if let Some(path) = app::data_file_dialog() {
                        app.add_data_file(&path);
                    }
                }
                ui.separator();
                if ui.button("New project").clicked() {
                    ui.close();
                    app.request(PendingAction::NewProject, ctx);
                }
                if ui.button("Open project...").clicked() {
                    ui.close();
                    if let Some(path) = app::open_project_dialog() {
                        app.request(PendingAction::OpenProject(path), ctx);
                    }
                }
                let recent = app.state.config.recent_projects.clone();
                ui.add_enabled_ui(!recent.is_empty(), |ui| {
                    ui.menu_button("Open recent", |ui| {
                        for path in recent {
                            let name = path.display().to_string();
                            if ui.button(name).clicked() {
                                ui.close();
                                app.request(PendingAction::OpenProject(path), ctx);
                            }
                        }
                    });
                });
                if ui.button("Save project").clicked() {
                    ui.close();
                    app.save_project();
                }
                if ui.button("Save project as...").clicked() {
                    ui.close();
                    if let Some(path) = app::save_project_dialog() {
                        app.save_project_as(&path);
                    }
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ui.close();
                    app.request(PendingAction::Quit, ctx);
                }
            });

            ui.menu_button("View", |ui| {
                let config = &mut app.state.config;
                ui.checkbox(&mut config.show_grid, "Grid");
                ui.checkbox(&mut config.show_legend, "Legend");
                ui.checkbox(&mut config.dark_mode, "Dark theme");
                ui.add(
                    egui::Slider::new(
                        &mut config.line_width,
                        crate::constants::plot::MIN_LINE_WIDTH..=crate::constants::plot::MAX_LINE_WIDTH,
                    )
                    .text("Line width"),
                );
            });

            ui.menu_button("Window", |ui| {
                if ui.button("Same size as selected").clicked() {
                    ui.close();
                    let result = app.match_window_sizes();
                    app.report(result);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("Keyboard shortcuts").clicked() {
                    ui.close();
                    app.state.ui.show_help = true;
                }
            });
        });
    });
}
