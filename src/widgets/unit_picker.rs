//! Combo box over the fixed unit list

use egui::{ComboBox, Ui};

use crate::units::Unit;

pub struct UnitPicker<'a> {
    label: &'a str,
    id_salt: (&'a str, u64),
    current: Unit,
}

impl<'a> UnitPicker<'a> {
    /// `id` keeps pickers of different entries apart
    pub fn new(label: &'a str, id: u64, current: Unit) -> Self {
        Self {
            label,
            id_salt: (label, id),
            current,
        }
    }

    /// Show the picker; returns the newly chosen unit, if any
    pub fn show(self, ui: &mut Ui) -> Option<Unit> {
        let mut chosen = self.current;
        ui.horizontal(|ui| {
            ui.label(self.label);
            ComboBox::from_id_salt(self.id_salt)
                .selected_text(self.current.label())
                .show_ui(ui, |ui| {
                    for unit in Unit::ALL {
                        ui.selectable_value(&mut chosen, unit, unit.label());
                    }
                });
        });
        (chosen != self.current).then_some(chosen)
    }
}
