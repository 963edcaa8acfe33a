//! Application state management
//!
//! The [`Project`] owns every persisted value. Presentation-only state lives in
//! [`UiState`] and in the per-entry [`entry::EntryView`].

mod entry;
mod project;
mod scale;
mod ui;

pub use entry::{Axis, DatasetEntry, Edit};
pub use project::Project;
pub use scale::ScaleTarget;
pub use ui::{PendingAction, RangeBuffers, UiState};

use crate::config::AppConfig;

/// Main application state container
#[derive(Debug, Default)]
pub struct AppState {
    pub project: Project,

    /// UI interaction state
    pub ui: UiState,

    /// Preferences persisted between sessions
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }
}
