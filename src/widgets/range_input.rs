//! Text inputs for the min/max bounds of both axes

use egui::{TextEdit, Ui};

use crate::constants::layout::RANGE_FIELD_WIDTH;
use crate::state::RangeBuffers;

/// Min/max text fields for X and Y, edited in place
pub struct RangeInput<'a> {
    id_salt: &'a str,
    buffers: &'a mut RangeBuffers,
}

impl<'a> RangeInput<'a> {
    pub fn new(id_salt: &'a str, buffers: &'a mut RangeBuffers) -> Self {
        Self { id_salt, buffers }
    }

    /// Show the widget; returns true when Enter was pressed in one of the fields
    pub fn show(self, ui: &mut Ui) -> bool {
        let mut submitted = false;
        let mut field = |ui: &mut Ui, text: &mut String, hint: &str| {
            let response = ui.add(TextEdit::singleline(text).hint_text(hint).desired_width(RANGE_FIELD_WIDTH));
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = true;
            }
        };

        egui::Grid::new(self.id_salt)
            .num_columns(3)
            .spacing([6.0, 4.0])
            .show(ui, |ui| {
                ui.label("X");
                field(ui, &mut self.buffers.x_min, "min");
                field(ui, &mut self.buffers.x_max, "max");
                ui.end_row();

                ui.label("Y");
                field(ui, &mut self.buffers.y_min, "min");
                field(ui, &mut self.buffers.y_max, "max");
                ui.end_row();
            });
        submitted
    }
}
