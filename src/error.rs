//! Error types for GraphOxide
//!
//! Every fallible operation in the core returns [`GraphError`]. Failures are
//! contained: a returned error means the in-memory project was left untouched.

use thiserror::Error;

/// Main error type for GraphOxide operations
#[derive(Error, Debug)]
pub enum GraphError {
    /// File I/O error (read or write)
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A range bound typed by the user is not a finite number
    #[error("'{input}' is not a finite number")]
    ParseFailure { input: String },

    /// Project file content does not describe a list of entries
    #[error("Project file is corrupt: {0}")]
    CorruptProject(String),

    /// Project file written by a newer format revision
    #[error("Project format version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Table without a single usable row
    #[error("Dataset is empty or has no rows")]
    EmptyDataset,

    /// Table has an index column but no series columns
    #[error("Dataset has no series columns next to the index column")]
    NoSeries,

    /// Entry index out of range
    #[error("Invalid entry index: {index} (entries: {len})")]
    InvalidEntryIndex { index: usize, len: usize },

    /// Series index out of range
    #[error("Invalid series index: {index} (series: {len})")]
    InvalidSeriesIndex { index: usize, len: usize },

    /// Unit index outside the fixed unit list
    #[error("Invalid unit index: {index}")]
    InvalidUnitIndex { index: usize },

    /// Data validation error
    #[error("Data validation failed: {0}")]
    Validation(String),

    /// Save requested before the project was given a path
    #[error("Project has not been saved yet")]
    NoProjectPath,

    /// An action needs a graph selected in the table
    #[error("No graph selected")]
    NoSelection,
}

/// Result type alias for GraphOxide operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// UI-friendly error message formatting
impl GraphError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            GraphError::Io(e) => format!("File error: {}", e),
            GraphError::Polars(e) => format!("Data error: {}", e),
            GraphError::Json(e) => format!("JSON error: {}", e),
            GraphError::ParseFailure { input } => {
                format!("'{}' is not a number", input)
            }
            GraphError::CorruptProject(msg) => {
                format!("The file is damaged or has the wrong format: {}", msg)
            }
            GraphError::UnsupportedVersion { found, supported } => format!(
                "Project was saved by a newer version (format {}, supported up to {})",
                found, supported
            ),
            GraphError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            GraphError::EmptyDataset => "Dataset is empty".to_string(),
            GraphError::NoSeries => "Dataset has no data columns".to_string(),
            GraphError::InvalidEntryIndex { index, len } => {
                format!("Graph {} does not exist ({} loaded)", index, len)
            }
            GraphError::InvalidSeriesIndex { index, len } => {
                format!("Series {} does not exist ({} available)", index, len)
            }
            GraphError::InvalidUnitIndex { index } => format!("Unknown unit #{}", index),
            GraphError::Validation(msg) => format!("Validation error: {}", msg),
            GraphError::NoProjectPath => "Choose where to save the project first".to_string(),
            GraphError::NoSelection => "Select a graph in the table first".to_string(),
        }
    }

    /// Get a short title for the error (for dialogs)
    pub fn title(&self) -> &'static str {
        match self {
            GraphError::Io(_) => "File Error",
            GraphError::Polars(_) => "Data Error",
            GraphError::Json(_) => "JSON Error",
            GraphError::ParseFailure { .. } => "Invalid Number",
            GraphError::CorruptProject(_) | GraphError::UnsupportedVersion { .. } => {
                "Cannot Open Project"
            }
            GraphError::UnsupportedFormat { .. } => "Unsupported Format",
            GraphError::EmptyDataset | GraphError::NoSeries => "Empty Dataset",
            GraphError::InvalidEntryIndex { .. }
            | GraphError::InvalidSeriesIndex { .. }
            | GraphError::InvalidUnitIndex { .. }
            | GraphError::NoSelection => "Invalid Selection",
            GraphError::Validation(_) => "Validation Error",
            GraphError::NoProjectPath => "Not Saved",
        }
    }
}
