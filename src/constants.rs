//! Application-wide constants and default values
//!
//! This module centralizes all magic numbers and default values used throughout
//! the application, making them easier to maintain and configure.

/// Unit transform constants
pub mod units {
    /// Value substituted when a logarithm is taken of a non-positive number.
    /// Renders far off-scale instead of failing.
    pub const SENTINEL: f64 = -1e10;
}

/// Scale defaults
pub mod scale {
    /// Y range used when a dataset has no present series values
    pub const DEFAULT_Y_MIN: f64 = 0.0;
    pub const DEFAULT_Y_MAX: f64 = 0.0;

    /// Half-width added around a zero-width range before it reaches the plot
    pub const DEGENERATE_PADDING: f64 = 0.5;
}

/// Project file constants
pub mod project {
    /// Project file extension
    pub const EXTENSION: &str = "sgr";

    /// Format tag written at the top of every project file
    pub const FORMAT_TAG: &str = "graph-oxide/sgr";

    /// Current project format revision
    pub const FORMAT_VERSION: u32 = 1;

    /// Prefix of the temporary sibling file used during atomic saves
    pub const TEMP_PREFIX: &str = ".sgr-save-";

    /// Maximum number of recent projects to track
    pub const MAX_RECENT_PROJECTS: usize = 10;
}

/// Tabular import constants
pub mod data {
    /// Extensions accepted as delimited text tables
    pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

    /// Delimiters considered when sniffing the header line
    pub const DELIMITER_CANDIDATES: [u8; 3] = [b',', b';', b'\t'];

    /// Name given to an index column with an empty header
    pub const DEFAULT_INDEX_NAME: &str = "x";
}

/// Plotting and visualization defaults
pub mod plot {
    use egui::Color32;

    /// Default line width for series curves
    pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

    /// Allowed line width range
    pub const MIN_LINE_WIDTH: f32 = 0.5;
    pub const MAX_LINE_WIDTH: f32 = 8.0;

    /// Curve colors
    pub const SERIES_COLOR: Color32 = Color32::GRAY;
    pub const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(220, 40, 40);
}

/// UI layout defaults
pub mod layout {
    /// Left panel (scale controls) default width
    pub const SCALE_PANEL_WIDTH: f32 = 340.0;

    /// Default size of a dataset window
    pub const ENTRY_WINDOW_SIZE: [f32; 2] = [800.0, 400.0];

    /// Width of each min/max text field
    pub const RANGE_FIELD_WIDTH: f32 = 90.0;

    /// Width of the series checklist inside a dataset window
    pub const SERIES_LIST_WIDTH: f32 = 180.0;

    /// Project table row height
    pub const TABLE_ROW_HEIGHT: f32 = 22.0;

    /// Initial main window size
    pub const MAIN_WINDOW_SIZE: [f32; 2] = [1000.0, 400.0];
}

/// Persistent storage keys
pub mod config {
    /// Key of the preferences blob in eframe storage
    pub const STORAGE_KEY: &str = "graph-oxide-config";
}
