use eframe::egui;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::constants::data::SUPPORTED_EXTENSIONS;
use crate::constants::project::EXTENSION;
use crate::error::{GraphError, Result};
use crate::state::{AppState, PendingAction, RangeBuffers};
use crate::ui;

pub const APP_NAME: &str = "GraphOxide";

pub struct GraphOxide {
    pub state: AppState,
    /// Title last sent to the viewport
    title: String,
}

impl GraphOxide {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load(cc.storage);
        tracing::debug!(?config, "Loaded preferences");
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
            title: String::new(),
        }
    }

    /// Show the error of a failed operation and discard it
    pub fn report<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.state.ui.set_error(&e);
                None
            }
        }
    }

    /// Load a tabular source as a new entry and select it
    pub fn add_data_file(&mut self, path: &Path) {
        let result = self.state.project.load_tabular_source(path);
        if let Some(index) = self.report(result) {
            let selected = self.state.project.select(Some(index));
            self.report(selected);
            self.state.ui.invalidate_entry_ranges();
            self.sync_global_buffers();
        }
    }

    /// Refill the global range inputs from the project
    pub fn sync_global_buffers(&mut self) {
        let global = self.state.project.global();
        self.state.ui.global_ranges = RangeBuffers::from_ranges(global.x, global.y);
    }

    /// Run `action` now, or ask first if it would discard unsaved changes
    pub fn request(&mut self, action: PendingAction, ctx: &egui::Context) {
        if self.state.project.is_dirty() {
            self.state.ui.request_confirmation(action);
        } else {
            self.run(action, ctx);
        }
    }

    /// Run a confirmed action
    pub fn run(&mut self, action: PendingAction, ctx: &egui::Context) {
        match action {
            PendingAction::Quit => {
                self.state.ui.allow_close = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            PendingAction::NewProject => {
                self.state.project.new_project();
                tracing::info!("Started a new project");
                self.after_project_replaced();
            }
            PendingAction::OpenProject(path) => {
                let result = self.state.project.open(&path);
                match result {
                    Ok(()) => {
                        self.state.config.push_recent(&path);
                        self.after_project_replaced();
                    }
                    Err(e) => {
                        if matches!(e, GraphError::Io(_)) {
                            self.state.config.forget_recent(&path);
                        }
                        self.state.ui.set_error(&e);
                    }
                }
            }
        }
    }

    fn after_project_replaced(&mut self) {
        self.state.ui.invalidate_entry_ranges();
        self.sync_global_buffers();
    }

    /// Save to the current path, asking for one if the project was never saved.
    /// Returns whether the project ended up saved.
    pub fn save_project(&mut self) -> bool {
        match self.state.project.save() {
            Ok(path) => {
                self.state.config.push_recent(&path);
                true
            }
            Err(GraphError::NoProjectPath) => match save_project_dialog() {
                Some(path) => self.save_project_as(&path),
                None => false,
            },
            Err(e) => {
                self.state.ui.set_error(&e);
                false
            }
        }
    }

    pub fn save_project_as(&mut self, path: &Path) -> bool {
        let result = self.state.project.save_as(path);
        match self.report(result) {
            Some(saved) => {
                self.state.config.push_recent(&saved);
                true
            }
            None => false,
        }
    }

    /// Give every dataset window the size of the selected one
    pub fn match_window_sizes(&mut self) -> Result<()> {
        let index = self.state.project.selection().ok_or(GraphError::NoSelection)?;
        let entry = self
            .state
            .project
            .entry(index)
            .ok_or(GraphError::InvalidEntryIndex {
                index,
                len: self.state.project.len(),
            })?;
        let size = entry
            .view()
            .window_size
            .filter(|_| entry.visible())
            .ok_or_else(|| GraphError::Validation(format!("'{}' is not shown", entry.display_name())))?;
        tracing::debug!(index, width = size[0], height = size[1], "Matching window sizes");
        self.state.ui.resize_windows_to = Some(size);
        Ok(())
    }

    /// Window title with an unsaved-changes marker
    pub fn window_title(&self) -> String {
        let name = self
            .state
            .project
            .path()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());
        let marker = if self.state.project.is_dirty() { "*" } else { "" };
        format!("{} - {}{}", APP_NAME, name, marker)
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (save, open, add, help, escape) = ctx.input_mut(|i| {
            (
                i.consume_key(egui::Modifiers::COMMAND, egui::Key::S),
                i.consume_key(egui::Modifiers::COMMAND, egui::Key::O),
                i.consume_key(egui::Modifiers::COMMAND, egui::Key::D),
                i.key_pressed(egui::Key::F1),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if save {
            self.save_project();
        }
        if open {
            if let Some(path) = open_project_dialog() {
                self.request(PendingAction::OpenProject(path), ctx);
            }
        }
        if add {
            if let Some(path) = data_file_dialog() {
                self.add_data_file(&path);
            }
        }
        if help {
            self.state.ui.show_help = !self.state.ui.show_help;
        }
        if escape {
            self.state.ui.show_help = false;
        }
    }

    /// Project files replace the project, anything else is loaded as data
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        for path in dropped {
            if path.extension().is_some_and(|e| e == EXTENSION) {
                self.request(PendingAction::OpenProject(path), ctx);
            } else {
                self.add_data_file(&path);
            }
        }
    }

    fn handle_close_request(&mut self, ctx: &egui::Context) {
        let close_requested = ctx.input(|i| i.viewport().close_requested());
        if close_requested && !self.state.ui.allow_close && self.state.project.is_dirty() {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.state.ui.request_confirmation(PendingAction::Quit);
        }
    }
}

pub fn data_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Data Files", &SUPPORTED_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .pick_file()
}

pub fn open_project_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("GraphOxide Project", &[EXTENSION])
        .pick_file()
}

pub fn save_project_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("GraphOxide Project", &[EXTENSION])
        .set_file_name(format!("project.{}", EXTENSION))
        .save_file()
}

impl eframe::App for GraphOxide {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::finish_frame!();
        profiling::scope!("GraphOxide::update");

        if self.state.config.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        self.handle_close_request(ctx);
        self.handle_shortcuts(ctx);
        self.handle_dropped_files(ctx);

        ui::render_menu(self, ctx);
        ui::render_scale_panel(self, ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::render_project_table(self, ui);
        });
        ui::render_entry_windows(self, ctx);

        ui::render_unsaved_dialog(self, ctx);
        ui::render_error_dialog(self, ctx);
        ui::render_help_dialog(self, ctx);

        let title = self.window_title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.state.config.store(storage);
    }
}
