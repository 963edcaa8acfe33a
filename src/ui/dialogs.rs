use eframe::egui;

use crate::app::GraphOxide;
use crate::state::PendingAction;

/// Modal-style window for the last reported error
pub fn render_error_dialog(app: &mut GraphOxide, ctx: &egui::Context) {
    let Some(notice) = app.state.ui.error.clone() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(format!("⚠ {}", notice.title))
        .id(egui::Id::new("error_dialog"))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&notice.message);
            ui.separator();
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        app.state.ui.clear_error();
    }
}

/// Ask whether to save before an action that would discard unsaved changes
pub fn render_unsaved_dialog(app: &mut GraphOxide, ctx: &egui::Context) {
    let Some(action) = app.state.ui.pending.clone() else {
        return;
    };

    let verb = match action {
        PendingAction::Quit => "quitting",
        PendingAction::NewProject => "starting a new project",
        PendingAction::OpenProject(_) => "opening another project",
    };

    enum Choice {
        Save,
        Discard,
        Cancel,
    }
    let mut choice = None;
    egui::Window::new("Unsaved changes")
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("Save the current project before {}?", verb));
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    choice = Some(Choice::Save);
                }
                if ui.button("Don't save").clicked() {
                    choice = Some(Choice::Discard);
                }
                if ui.button("Cancel").clicked() {
                    choice = Some(Choice::Cancel);
                }
            });
        });

    let Some(choice) = choice else {
        return;
    };
    let Some(action) = app.state.ui.take_pending() else {
        return;
    };
    match choice {
        Choice::Save => {
            if app.save_project() {
                app.run(action, ctx);
            }
        }
        Choice::Discard => app.run(action, ctx),
        Choice::Cancel => tracing::debug!(?action, "Cancelled"),
    }
}

pub fn render_help_dialog(app: &mut GraphOxide, ctx: &egui::Context) {
    if !app.state.ui.show_help {
        return;
    }
    egui::Window::new("⌨ Keyboard Shortcuts")
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .show(ctx, |ui| {
            ui.heading("Project");
            ui.label("Ctrl+D - Add data file");
            ui.label("Ctrl+O - Open project");
            ui.label("Ctrl+S - Save project");
            ui.label("Drop files - .sgr opens, anything else is added");

            ui.separator();
            ui.heading("Plot");
            ui.label("Scroll - Zoom in/out");
            ui.label("Drag - Pan view");
            ui.label("Double-click - Reset view");
            ui.label("Click a series name - Highlight it");

            ui.separator();
            ui.heading("Scale");
            ui.label("Enter in a range field - Apply");
            ui.label("F1 - Toggle this help");
            ui.label("ESC - Close help");

            ui.separator();
            if ui.button("Close").clicked() {
                app.state.ui.show_help = false;
            }
        });
}
