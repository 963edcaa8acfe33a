//! UI interaction state

use crate::data::AxisRange;
use crate::error::GraphError;

/// Something that would discard unsaved changes and waits for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Quit,
    NewProject,
    OpenProject(std::path::PathBuf),
}

/// Text of the four bound inputs of one scale editor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeBuffers {
    pub x_min: String,
    pub x_max: String,
    pub y_min: String,
    pub y_max: String,
}

impl RangeBuffers {
    /// Buffers showing the given ranges; unset ranges give empty fields
    pub fn from_ranges(x: Option<AxisRange>, y: Option<AxisRange>) -> Self {
        let fmt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        Self {
            x_min: fmt(x.map(|r| r.min)),
            x_max: fmt(x.map(|r| r.max)),
            y_min: fmt(y.map(|r| r.min)),
            y_max: fmt(y.map(|r| r.max)),
        }
    }
}

/// Error shown in the modal error window
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNotice {
    pub title: String,
    pub message: String,
}

/// UI state: text buffers, error notices and pending confirmations
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Inputs of the global scale editor
    pub global_ranges: RangeBuffers,

    /// Inputs of the selected-entry scale editor
    pub entry_ranges: RangeBuffers,

    /// Entry id the entry buffers were filled from
    pub entry_ranges_for: Option<u64>,

    /// Error to display until dismissed
    pub error: Option<ErrorNotice>,

    /// Action waiting for the unsaved-changes prompt
    pub pending: Option<PendingAction>,

    /// Set once the user confirmed quitting with unsaved changes
    pub allow_close: bool,

    /// Keyboard shortcut help window
    pub show_help: bool,

    /// Size forced on every dataset window for the next frame
    pub resize_windows_to: Option<[f32; 2]>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an error to the user
    pub fn set_error(&mut self, error: &GraphError) {
        tracing::warn!(error = %error, "Reported error");
        self.error = Some(ErrorNotice {
            title: error.title().to_string(),
            message: error.user_message(),
        });
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Ask for confirmation before running `action`
    pub fn request_confirmation(&mut self, action: PendingAction) {
        self.pending = Some(action);
    }

    pub fn take_pending(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    /// Force the entry editor to reload its buffers on the next frame
    pub fn invalidate_entry_ranges(&mut self) {
        self.entry_ranges_for = None;
    }
}
