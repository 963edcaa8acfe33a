use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::app::GraphOxide;
use crate::constants::layout::TABLE_ROW_HEIGHT;

/// Row edits collected while the table borrows the project
enum RowAction {
    Select(usize),
    SetVisible(usize, bool),
    SetScalable(usize, bool),
    Remove(usize),
}

/// Render the list of loaded graphs
pub fn render_project_table(app: &mut GraphOxide, ui: &mut egui::Ui) {
    profiling::scope!("render_project_table");

    let project = &app.state.project;
    if project.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("Add a data file (File menu, Ctrl+D, or drop it here)");
        });
        return;
    }

    let selection = project.selection();
    let mut actions = Vec::new();

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder().at_least(120.0).clip(true))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .sense(egui::Sense::click())
        .header(TABLE_ROW_HEIGHT, |mut header| {
            for title in ["Name", "Rows", "Series", "Show", "Scalable", ""] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(TABLE_ROW_HEIGHT, project.len(), |mut row| {
                let index = row.index();
                let Some(entry) = project.entry(index) else {
                    return;
                };
                row.set_selected(selection == Some(index));

                row.col(|ui| {
                    ui.label(entry.display_name())
                        .on_hover_text(entry.source_path().display().to_string());
                });
                row.col(|ui| {
                    ui.label(entry.data().len().to_string());
                });
                row.col(|ui| {
                    ui.label(entry.data().series_count().to_string());
                });
                row.col(|ui| {
                    let mut visible = entry.visible();
                    if ui.checkbox(&mut visible, "").changed() {
                        actions.push(RowAction::SetVisible(index, visible));
                    }
                });
                row.col(|ui| {
                    let mut scalable = entry.scalable();
                    if ui.checkbox(&mut scalable, "").changed() {
                        actions.push(RowAction::SetScalable(index, scalable));
                    }
                });
                row.col(|ui| {
                    if ui.small_button("🗑").on_hover_text("Remove graph").clicked() {
                        actions.push(RowAction::Remove(index));
                    }
                });

                if row.response().clicked() {
                    actions.push(RowAction::Select(index));
                }
            });
        });

    for action in actions {
        let result = match action {
            RowAction::Select(index) => app.state.project.select(Some(index)),
            RowAction::SetVisible(index, visible) => app.state.project.set_entry_visible(index, visible),
            RowAction::SetScalable(index, scalable) => {
                app.state.project.set_entry_scalable(index, scalable)
            }
            RowAction::Remove(index) => app.state.project.remove_entry(index).map(|_| ()),
        };
        app.report(result);
    }
}
