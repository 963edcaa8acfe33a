mod dialogs;
mod entry_window;
mod menu;
mod project_table;
mod scale_panel;

pub use dialogs::{render_error_dialog, render_help_dialog, render_unsaved_dialog};
pub use entry_window::render_entry_windows;
pub use menu::render_menu;
pub use project_table::render_project_table;
pub use scale_panel::render_scale_panel;
