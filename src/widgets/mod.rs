//! Reusable UI widgets for GraphOxide

mod range_input;
mod unit_picker;

pub use range_input::RangeInput;
pub use unit_picker::UnitPicker;
