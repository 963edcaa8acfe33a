use eframe::egui;

use crate::app::GraphOxide;
use crate::constants::layout::SCALE_PANEL_WIDTH;
use crate::state::{Axis, RangeBuffers, ScaleTarget};
use crate::widgets::{RangeInput, UnitPicker};

/// Left panel: global scale editor and the editor of the selected entry
pub fn render_scale_panel(app: &mut GraphOxide, ctx: &egui::Context) {
    egui::SidePanel::left("scale_panel")
        .default_width(SCALE_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                render_global_section(app, ui);
                ui.separator();
                render_entry_section(app, ui);
            });
        });
}

fn render_global_section(app: &mut GraphOxide, ui: &mut egui::Ui) {
    ui.heading("Global scale");
    ui.small("Applied to every scalable graph");

    let submitted = RangeInput::new("global_ranges", &mut app.state.ui.global_ranges).show(ui);

    let mut changed = false;
    ui.horizontal(|ui| {
        if ui.button("Apply").clicked() || submitted {
            let b = &app.state.ui.global_ranges;
            if app
                .state
                .project
                .set_global_ranges(&b.x_min, &b.x_max, &b.y_min, &b.y_max)
            {
                changed = true;
            }
        }
        if ui
            .button("Reset")
            .on_hover_text("Fit to the data of all graphs")
            .clicked()
        {
            let result = app.state.project.reset_to_data_extent(ScaleTarget::Global);
            changed |= app.report(result).is_some();
        }
        if ui
            .button("Fit Y")
            .on_hover_text("Fit Y to the data inside the X range")
            .clicked()
        {
            let result = app.state.project.fit_y_to_x_window(ScaleTarget::Global);
            changed |= app.report(result).is_some();
        }
    });

    if changed {
        app.sync_global_buffers();
        app.state.ui.invalidate_entry_ranges();
    }
}

fn render_entry_section(app: &mut GraphOxide, ui: &mut egui::Ui) {
    ui.heading("Selected graph");

    let Some(index) = app.state.project.selection() else {
        ui.label("Select a graph in the table");
        return;
    };
    let Some(entry) = app.state.project.entry(index) else {
        return;
    };

    let id = entry.view().id();
    if app.state.ui.entry_ranges_for != Some(id) {
        app.state.ui.entry_ranges =
            RangeBuffers::from_ranges(Some(entry.scale(Axis::X)), Some(entry.scale(Axis::Y)));
        app.state.ui.entry_ranges_for = Some(id);
    }

    let name = entry.display_name().to_string();
    let (mut visible, mut scalable) = (entry.visible(), entry.scalable());
    let (unit_initial, unit_final) = (entry.unit_initial(), entry.unit_final());

    ui.label(egui::RichText::new(name).strong())
        .on_hover_text(entry.source_path().display().to_string());

    ui.horizontal(|ui| {
        if ui.checkbox(&mut visible, "Show").changed() {
            let result = app.state.project.set_entry_visible(index, visible);
            app.report(result);
        }
        if ui
            .checkbox(&mut scalable, "Scalable")
            .on_hover_text("Follow the global scale")
            .changed()
        {
            let result = app.state.project.set_entry_scalable(index, scalable);
            app.report(result);
        }
    });

    let submitted = RangeInput::new("entry_ranges", &mut app.state.ui.entry_ranges).show(ui);

    ui.horizontal(|ui| {
        if ui.button("Apply").clicked() || submitted {
            let b = app.state.ui.entry_ranges.clone();
            let result = app
                .state
                .project
                .set_entry_ranges(index, &b.x_min, &b.x_max, &b.y_min, &b.y_max);
            app.report(result);
            app.state.ui.invalidate_entry_ranges();
        }
        if ui.button("Reset").on_hover_text("Fit to the data").clicked() {
            let result = app.state.project.reset_to_data_extent(ScaleTarget::Entry(index));
            app.report(result);
            app.state.ui.invalidate_entry_ranges();
        }
        if ui
            .button("Fit Y")
            .on_hover_text("Fit Y to the data inside the X range")
            .clicked()
        {
            let result = app.state.project.fit_y_to_x_window(ScaleTarget::Entry(index));
            app.report(result);
            app.state.ui.invalidate_entry_ranges();
        }
    });

    ui.add_space(4.0);
    if let Some(unit) = UnitPicker::new("Stored as", id, unit_initial).show(ui) {
        let result = app.state.project.set_unit_initial(index, unit.index());
        app.report(result);
    }
    if let Some(unit) = UnitPicker::new("Shown as", id, unit_final).show(ui) {
        let result = app.state.project.set_unit_final(index, unit.index());
        app.report(result);
    }
}
