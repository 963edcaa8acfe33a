//! A loaded dataset together with its own scale, units and visibility

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::scale::{DEFAULT_Y_MAX, DEFAULT_Y_MIN};
use crate::data::stats::{self, AxisRange};
use crate::data::DataTable;
use crate::error::{GraphError, Result};
use crate::units::{Transform, Unit};

static NEXT_ENTRY_ID: AtomicU64 = AtomicU64::new(1);

fn next_entry_id() -> u64 {
    NEXT_ENTRY_ID.fetch_add(1, Ordering::Relaxed)
}

/// Plot axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// A single change to the persisted state of one entry
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    SetVisible(bool),
    SetScalable(bool),
    SetSeriesVisible { series: usize, visible: bool },
    SetAllSeriesVisible(bool),
    SetRange { axis: Axis, range: AxisRange },
    SetUnitInitial(Unit),
    SetUnitFinal(Unit),
}

/// Display-ready points of one series
#[derive(Debug, Clone, Default)]
pub struct Curve {
    pub points: Vec<[f64; 2]>,
    pub visible: bool,
}

/// Presentation state that never crosses the serialization boundary
#[derive(Debug, Clone)]
pub struct EntryView {
    id: u64,
    /// Curves keyed by series name, rebuilt lazily
    curves: HashMap<String, Curve>,
    /// Series drawn in the highlight color
    pub highlighted: Option<String>,
    /// Bounds last pushed to the plot widget
    pub applied_bounds: Option<(AxisRange, AxisRange)>,
    /// Size of the window as last drawn
    pub window_size: Option<[f32; 2]>,
}

impl Default for EntryView {
    fn default() -> Self {
        Self {
            id: next_entry_id(),
            curves: HashMap::new(),
            highlighted: None,
            applied_bounds: None,
            window_size: None,
        }
    }
}

impl EntryView {
    /// Process-unique id, stable while the entry lives
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn curve(&self, series: &str) -> Option<&Curve> {
        self.curves.get(series)
    }

    pub fn has_curves(&self) -> bool {
        !self.curves.is_empty()
    }

    fn invalidate(&mut self) {
        self.curves.clear();
    }
}

/// One loaded tabular source
#[derive(Debug, Clone)]
pub struct DatasetEntry {
    data: DataTable,
    source_path: PathBuf,
    display_name: String,
    visible: bool,
    scalable: bool,
    series_visible: Vec<bool>,
    scale_x: AxisRange,
    scale_y: AxisRange,
    unit_initial: Unit,
    unit_final: Unit,
    view: EntryView,
}

/// Equality covers persisted fields only
impl PartialEq for DatasetEntry {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
            && self.source_path == other.source_path
            && self.display_name == other.display_name
            && self.visible == other.visible
            && self.scalable == other.scalable
            && self.series_visible == other.series_visible
            && self.scale_x == other.scale_x
            && self.scale_y == other.scale_y
            && self.unit_initial == other.unit_initial
            && self.unit_final == other.unit_final
    }
}

/// File name without directory and extension
pub fn display_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl DatasetEntry {
    /// Load a tabular source into a fresh entry
    pub fn load(path: &Path) -> Result<Self> {
        let table = DataTable::load(path)?;
        Ok(Self::from_table(table, path.to_path_buf()))
    }

    /// Fresh entry: shown, scalable, all series visible, scale fitted to the data
    pub fn from_table(data: DataTable, source_path: PathBuf) -> Self {
        let (scale_x, scale_y) = data_extent(&data);
        let series_visible = vec![true; data.series_count()];
        Self {
            display_name: display_name_for(&source_path),
            data,
            source_path,
            visible: true,
            scalable: true,
            series_visible,
            scale_x,
            scale_y,
            unit_initial: Unit::Raw,
            unit_final: Unit::Raw,
            view: EntryView::default(),
        }
    }

    /// Reassemble an entry from persisted fields with a fresh view
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        data: DataTable,
        source_path: PathBuf,
        display_name: String,
        visible: bool,
        scalable: bool,
        series_visible: Vec<bool>,
        scale_x: AxisRange,
        scale_y: AxisRange,
        unit_initial: Unit,
        unit_final: Unit,
    ) -> Result<Self> {
        if series_visible.len() != data.series_count() {
            return Err(GraphError::Validation(format!(
                "{} series visibility flags for {} series",
                series_visible.len(),
                data.series_count()
            )));
        }
        Ok(Self {
            data,
            source_path,
            display_name,
            visible,
            scalable,
            series_visible,
            scale_x,
            scale_y,
            unit_initial,
            unit_final,
            view: EntryView::default(),
        })
    }

    pub fn data(&self) -> &DataTable {
        &self.data
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn scalable(&self) -> bool {
        self.scalable
    }

    pub fn series_visible(&self) -> &[bool] {
        &self.series_visible
    }

    pub fn all_series_visible(&self) -> bool {
        self.series_visible.iter().all(|v| *v)
    }

    pub fn scale(&self, axis: Axis) -> AxisRange {
        match axis {
            Axis::X => self.scale_x,
            Axis::Y => self.scale_y,
        }
    }

    pub fn unit_initial(&self) -> Unit {
        self.unit_initial
    }

    pub fn unit_final(&self) -> Unit {
        self.unit_final
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.unit_initial, self.unit_final)
    }

    /// Extent of the index column and of all series values
    pub fn data_extent(&self) -> (AxisRange, AxisRange) {
        data_extent(&self.data)
    }

    /// Y extent of the values whose index lies inside `window`
    pub fn y_extent_within(&self, window: AxisRange) -> Option<AxisRange> {
        stats::y_extent_within(&self.data, window)
    }

    pub fn view(&self) -> &EntryView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut EntryView {
        &mut self.view
    }

    /// Build display curves if a previous edit invalidated them
    pub fn refresh_curves(&mut self) {
        if self.view.has_curves() {
            return;
        }
        profiling::scope!("DatasetEntry::refresh_curves");

        let transform = self.transform();
        let index = self.data.index();
        self.view.curves = self
            .data
            .series()
            .iter()
            .zip(&self.series_visible)
            .map(|(column, &visible)| {
                let curve = Curve {
                    points: transform.points(index, &column.values),
                    visible,
                };
                (column.name.clone(), curve)
            })
            .collect();
    }

    /// Apply one edit. Validation happens before anything is changed.
    pub(crate) fn apply(&mut self, edit: &Edit) -> Result<()> {
        match *edit {
            Edit::SetVisible(visible) => self.visible = visible,
            Edit::SetScalable(scalable) => self.scalable = scalable,
            Edit::SetSeriesVisible { series, visible } => {
                let len = self.series_visible.len();
                let flag = self
                    .series_visible
                    .get_mut(series)
                    .ok_or(GraphError::InvalidSeriesIndex { index: series, len })?;
                *flag = visible;

                let name = &self.data.series()[series].name;
                if let Some(curve) = self.view.curves.get_mut(name) {
                    curve.visible = visible;
                }
            }
            Edit::SetAllSeriesVisible(visible) => {
                self.series_visible.iter_mut().for_each(|v| *v = visible);
                self.view.curves.values_mut().for_each(|c| c.visible = visible);
            }
            Edit::SetRange { axis, range } => {
                if !range.is_finite() {
                    return Err(GraphError::Validation(format!(
                        "range {}..{} is not finite",
                        range.min, range.max
                    )));
                }
                let range = AxisRange::new(range.min, range.max);
                match axis {
                    Axis::X => self.scale_x = range,
                    Axis::Y => self.scale_y = range,
                }
            }
            Edit::SetUnitInitial(unit) => {
                self.unit_initial = unit;
                self.view.invalidate();
            }
            Edit::SetUnitFinal(unit) => {
                self.unit_final = unit;
                self.view.invalidate();
            }
        }
        Ok(())
    }
}

fn data_extent(data: &DataTable) -> (AxisRange, AxisRange) {
    let x = stats::x_extent(data).unwrap_or(AxisRange::new(0.0, 0.0));
    let y = stats::y_extent(data).unwrap_or(AxisRange::new(DEFAULT_Y_MIN, DEFAULT_Y_MAX));
    (x, y)
}
