//! User preferences kept between sessions in eframe storage

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::config::STORAGE_KEY;
use crate::constants::plot::{DEFAULT_LINE_WIDTH, MAX_LINE_WIDTH, MIN_LINE_WIDTH};
use crate::constants::project::MAX_RECENT_PROJECTS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Most recent first
    pub recent_projects: Vec<PathBuf>,
    pub show_grid: bool,
    pub show_legend: bool,
    pub dark_mode: bool,
    pub line_width: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recent_projects: Vec::new(),
            show_grid: true,
            show_legend: false,
            dark_mode: true,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl AppConfig {
    /// Read the stored preferences, falling back to defaults
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let mut config: Self = storage
            .and_then(|s| eframe::get_value(s, STORAGE_KEY))
            .unwrap_or_default();
        config.validate();
        config
    }

    pub fn store(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STORAGE_KEY, self);
    }

    /// Clamp values that may have been edited by hand
    pub fn validate(&mut self) {
        if !self.line_width.is_finite() {
            self.line_width = DEFAULT_LINE_WIDTH;
        }
        self.line_width = self.line_width.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH);

        let mut seen = Vec::with_capacity(self.recent_projects.len());
        self.recent_projects.retain(|p| {
            let fresh = !seen.contains(p);
            if fresh {
                seen.push(p.clone());
            }
            fresh
        });
        self.recent_projects.truncate(MAX_RECENT_PROJECTS);
    }

    /// Move `path` to the front of the recent project list
    pub fn push_recent(&mut self, path: &Path) {
        self.recent_projects.retain(|p| p != path);
        self.recent_projects.insert(0, path.to_path_buf());
        self.recent_projects.truncate(MAX_RECENT_PROJECTS);
    }

    pub fn forget_recent(&mut self, path: &Path) {
        self.recent_projects.retain(|p| p != path);
    }
}
