//! The ordered list of loaded entries and everything shared between them

use std::path::{Path, PathBuf};

use crate::constants::project::EXTENSION;
use crate::data::stats::{self, AxisRange};
use crate::error::{GraphError, Result};
use crate::store;
use crate::units::Unit;

use super::entry::{Axis, DatasetEntry, Edit};

/// Axis bounds shared by every scalable entry; unset until first derived
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlobalScale {
    pub x: Option<AxisRange>,
    pub y: Option<AxisRange>,
}

impl GlobalScale {
    pub(super) fn set(&mut self, axis: Axis, range: AxisRange) {
        match axis {
            Axis::X => self.x = Some(range),
            Axis::Y => self.y = Some(range),
        }
    }

    /// Widen to include an entry's own scale
    fn include(&mut self, entry: &DatasetEntry) {
        self.x = stats::union_all([self.x, Some(entry.scale(Axis::X))]);
        self.y = stats::union_all([self.y, Some(entry.scale(Axis::Y))]);
    }

    /// Union of the own scales of all entries
    fn covering(entries: &[DatasetEntry]) -> Self {
        let mut scale = Self::default();
        entries.iter().for_each(|e| scale.include(e));
        scale
    }
}

/// Process-wide project state
#[derive(Debug, Default)]
pub struct Project {
    pub(super) entries: Vec<DatasetEntry>,
    pub(super) global: GlobalScale,
    selection: Option<usize>,
    dirty: bool,
    path: Option<PathBuf>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&DatasetEntry> {
        self.entries.get(index)
    }

    /// Mutable access for presentation state; persisted fields stay behind [`Edit`]
    pub fn entry_mut(&mut self, index: usize) -> Option<&mut DatasetEntry> {
        self.entries.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when anything persisted changed since the last save or load
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn global(&self) -> GlobalScale {
        self.global
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Change which entry the per-entry controls edit
    pub fn select(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(index) = index {
            self.check_index(index)?;
        }
        self.selection = index;
        Ok(())
    }

    pub(super) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(GraphError::InvalidEntryIndex {
                index,
                len: self.entries.len(),
            })
        }
    }

    /// Apply an edit to one entry. Every persisted mutation funnels through here
    /// or through [`Project::apply_where`].
    pub fn apply(&mut self, index: usize, edit: Edit) -> Result<()> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(GraphError::InvalidEntryIndex { index, len })?;
        entry.apply(&edit)?;
        self.dirty = true;
        tracing::trace!(index, ?edit, "Applied entry edit");
        Ok(())
    }

    /// Apply an edit to every entry matching `filter`; returns how many changed
    pub(super) fn apply_where(&mut self, edit: &Edit, filter: impl Fn(&DatasetEntry) -> bool) -> usize {
        let mut changed = 0;
        for entry in self.entries.iter_mut().filter(|e| filter(e)) {
            if entry.apply(edit).is_ok() {
                changed += 1;
            }
        }
        if changed > 0 {
            self.dirty = true;
        }
        changed
    }

    /// Append an entry and widen the global scale to cover it
    pub fn add_entry(&mut self, entry: DatasetEntry) -> usize {
        self.global.include(&entry);
        self.entries.push(entry);
        self.dirty = true;
        self.entries.len() - 1
    }

    /// Load a tabular source and append it
    pub fn load_tabular_source(&mut self, path: &Path) -> Result<usize> {
        let entry = DatasetEntry::load(path)?;
        Ok(self.add_entry(entry))
    }

    /// Remove an entry. The global scale is left as it was.
    pub fn remove_entry(&mut self, index: usize) -> Result<DatasetEntry> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        self.selection = match self.selection {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        self.dirty = true;
        tracing::debug!(index, name = removed.display_name(), "Removed entry");
        Ok(removed)
    }

    pub fn set_entry_visible(&mut self, index: usize, visible: bool) -> Result<()> {
        self.apply(index, Edit::SetVisible(visible))
    }

    pub fn set_entry_scalable(&mut self, index: usize, scalable: bool) -> Result<()> {
        self.apply(index, Edit::SetScalable(scalable))
    }

    pub fn set_series_visible(&mut self, index: usize, series: usize, visible: bool) -> Result<()> {
        self.apply(index, Edit::SetSeriesVisible { series, visible })
    }

    pub fn set_all_series_visible(&mut self, index: usize, visible: bool) -> Result<()> {
        self.apply(index, Edit::SetAllSeriesVisible(visible))
    }

    pub fn set_unit_initial(&mut self, index: usize, unit_index: usize) -> Result<()> {
        let unit = Unit::from_index(unit_index)?;
        self.apply(index, Edit::SetUnitInitial(unit))
    }

    pub fn set_unit_final(&mut self, index: usize, unit_index: usize) -> Result<()> {
        let unit = Unit::from_index(unit_index)?;
        self.apply(index, Edit::SetUnitFinal(unit))
    }

    /// Discard everything and start over
    pub fn new_project(&mut self) {
        *self = Self::default();
    }

    /// Save under `path`, appending the project extension when it is missing
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf> {
        let path = with_project_extension(path);
        store::save_entries(&path, &self.entries)?;
        self.path = Some(path.clone());
        self.dirty = false;
        Ok(path)
    }

    /// Save to the path of the last save or open
    pub fn save(&mut self) -> Result<PathBuf> {
        let path = self.path.clone().ok_or(GraphError::NoProjectPath)?;
        self.save_as(&path)
    }

    /// Replace the project with the contents of a project file.
    /// On failure the current project is left untouched.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let entries = store::load_entries(path)?;
        self.global = GlobalScale::covering(&entries);
        self.entries = entries;
        self.selection = None;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }
}

fn with_project_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == EXTENSION => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".");
            name.push(EXTENSION);
            PathBuf::from(name)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::{DataTable, SeriesColumn};
    use crate::state::ScaleTarget;

    pub(crate) fn entry_with(name: &str, index: Vec<f64>, values: Vec<f64>) -> DatasetEntry {
        let series = SeriesColumn::new("s", values.into_iter().map(Some).collect());
        let table = DataTable::new("T", index, vec![series]).unwrap();
        DatasetEntry::from_table(table, PathBuf::from(format!("{}.csv", name)))
    }

    fn project_with(n: usize) -> Project {
        let mut project = Project::new();
        for i in 0..n {
            project.add_entry(entry_with(&format!("e{}", i), vec![1.0, 2.0], vec![3.0, 4.0]));
        }
        project
    }

    #[test]
    fn test_every_mutation_sets_dirty() {
        let mut project = project_with(1);
        assert!(project.is_dirty());

        let edits: [fn(&mut Project) -> Result<()>; 7] = [
            |p| p.set_entry_visible(0, false),
            |p| p.set_entry_scalable(0, false),
            |p| p.set_series_visible(0, 0, false),
            |p| p.set_all_series_visible(0, true),
            |p| p.set_unit_initial(0, 1),
            |p| p.set_unit_final(0, 2),
            |p| p.remove_entry(0).map(|_| ()),
        ];
        for edit in edits {
            project.dirty = false;
            edit(&mut project).unwrap();
            assert!(project.is_dirty());
        }
    }

    #[test]
    fn test_scale_mutations_set_dirty() {
        let mut project = project_with(2);
        project.set_entry_scalable(1, false).unwrap();

        let edits: [fn(&mut Project) -> Result<()>; 8] = [
            |p| p.set_entry_range(0, Axis::Y, AxisRange::new(-1.0, 1.0)),
            |p| p.set_entry_ranges(1, "0", "5", "0", "5").map(|_| ()),
            |p| p.set_global_range(Axis::X, AxisRange::new(0.0, 10.0)),
            |p| {
                assert!(p.set_global_x_range("0", "100"));
                Ok(())
            },
            |p| p.reset_to_data_extent(ScaleTarget::Entry(1)),
            |p| p.reset_to_data_extent(ScaleTarget::Global),
            |p| p.fit_y_to_x_window(ScaleTarget::Entry(0)),
            |p| p.fit_y_to_x_window(ScaleTarget::Global),
        ];
        for edit in edits {
            project.dirty = false;
            edit(&mut project).unwrap();
            assert!(project.is_dirty());
        }
    }

    #[test]
    fn test_ignored_scale_edit_keeps_project_clean() {
        let mut project = project_with(1);
        project.dirty = false;

        assert!(!project.set_global_x_range("abc", "1"));
        assert!(!project.set_global_ranges("0", "1", "2", ""));
        assert!(!project.set_entry_ranges(0, "0", "1", "x", "2").unwrap());
        assert!(!project.set_entry_y_range(0, "", "2").unwrap());
        assert!(!project.is_dirty());
    }

    #[test]
    fn test_failed_edit_keeps_project_clean() {
        let mut project = project_with(1);
        project.dirty = false;

        assert!(matches!(
            project.set_entry_visible(4, false),
            Err(GraphError::InvalidEntryIndex { index: 4, len: 1 })
        ));
        assert!(matches!(
            project.set_unit_final(0, 7),
            Err(GraphError::InvalidUnitIndex { index: 7 })
        ));
        assert!(!project.is_dirty());
    }

    #[test]
    fn test_selection_follows_removal() {
        let mut project = project_with(3);
        project.select(Some(2)).unwrap();
        project.remove_entry(0).unwrap();
        assert_eq!(project.selection(), Some(1));

        project.remove_entry(1).unwrap();
        assert_eq!(project.selection(), None);

        assert!(project.select(Some(5)).is_err());
        assert_eq!(project.selection(), None);
    }

    #[test]
    fn test_add_widens_global_scale() {
        let mut project = Project::new();
        project.add_entry(entry_with("a", vec![0.0, 10.0], vec![1.0, 2.0]));
        project.add_entry(entry_with("b", vec![5.0, 20.0], vec![-1.0, 1.5]));

        let global = project.global();
        assert_eq!(global.x, Some(AxisRange::new(0.0, 20.0)));
        assert_eq!(global.y, Some(AxisRange::new(-1.0, 2.0)));
    }

    #[test]
    fn test_project_extension() {
        assert_eq!(with_project_extension(Path::new("/tmp/p")), PathBuf::from("/tmp/p.sgr"));
        assert_eq!(with_project_extension(Path::new("/tmp/p.sgr")), PathBuf::from("/tmp/p.sgr"));
        assert_eq!(
            with_project_extension(Path::new("/tmp/p.json")),
            PathBuf::from("/tmp/p.json.sgr")
        );
    }

    #[test]
    fn test_save_without_path() {
        let mut project = project_with(1);
        assert!(matches!(project.save(), Err(GraphError::NoProjectPath)));
        assert!(project.is_dirty());
    }

    #[test]
    fn test_save_and_open_reset_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = project_with(2);
        project.select(Some(1)).unwrap();

        let saved = project.save_as(&dir.path().join("session")).unwrap();
        assert_eq!(saved, dir.path().join("session.sgr"));
        assert!(!project.is_dirty());

        project.set_entry_scalable(0, false).unwrap();
        assert!(project.is_dirty());
        project.save().unwrap();
        assert!(!project.is_dirty());

        let mut reopened = Project::new();
        reopened.open(&saved).unwrap();
        assert!(!reopened.is_dirty());
        assert_eq!(reopened.selection(), None);
        assert_eq!(reopened.entries(), project.entries());
        assert_eq!(reopened.global(), project.global());
        assert_eq!(reopened.path(), Some(saved.as_path()));
    }

    #[test]
    fn test_failed_open_leaves_project_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.sgr");
        std::fs::write(&bad, "not json").unwrap();

        let mut project = project_with(1);
        project.select(Some(0)).unwrap();
        let err = project.open(&bad).unwrap_err();
        assert!(matches!(err, GraphError::CorruptProject(_)));
        assert_eq!(project.len(), 1);
        assert_eq!(project.selection(), Some(0));
        assert!(project.is_dirty());
    }
}
