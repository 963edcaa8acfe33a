//! Project files: a versioned JSON envelope around the persisted entry fields
//!
//! Only [`EntryRecord`] crosses the serialization boundary. Presentation state
//! (the per-entry view) is rebuilt fresh on load.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::constants::project::{FORMAT_TAG, FORMAT_VERSION, TEMP_PREFIX};
use crate::data::{AxisRange, DataTable};
use crate::error::{GraphError, Result};
use crate::state::{Axis, DatasetEntry};
use crate::units::Unit;

/// Persisted fields of one entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub data: DataTable,
    pub source_path: PathBuf,
    pub display_name: String,
    pub visible: bool,
    pub scalable: bool,
    pub series_visible: Vec<bool>,
    pub scale_x: AxisRange,
    pub scale_y: AxisRange,
    pub unit_initial: usize,
    pub unit_final: usize,
}

/// Top-level document of a project file
#[derive(Debug, Serialize, Deserialize)]
struct ProjectFile {
    format: String,
    version: u32,
    entries: Vec<EntryRecord>,
}

impl From<&DatasetEntry> for EntryRecord {
    fn from(entry: &DatasetEntry) -> Self {
        Self {
            data: entry.data().clone(),
            source_path: entry.source_path().to_path_buf(),
            display_name: entry.display_name().to_string(),
            visible: entry.visible(),
            scalable: entry.scalable(),
            series_visible: entry.series_visible().to_vec(),
            scale_x: entry.scale(Axis::X),
            scale_y: entry.scale(Axis::Y),
            unit_initial: entry.unit_initial().index(),
            unit_final: entry.unit_final().index(),
        }
    }
}

impl TryFrom<EntryRecord> for DatasetEntry {
    type Error = GraphError;

    fn try_from(record: EntryRecord) -> Result<Self> {
        record.data.validate()?;
        let scale = |r: AxisRange| {
            if r.is_finite() {
                Ok(AxisRange::new(r.min, r.max))
            } else {
                Err(GraphError::Validation("scale bound is not finite".to_string()))
            }
        };
        DatasetEntry::from_parts(
            record.data,
            record.source_path,
            record.display_name,
            record.visible,
            record.scalable,
            record.series_visible,
            scale(record.scale_x)?,
            scale(record.scale_y)?,
            Unit::from_index(record.unit_initial)?,
            Unit::from_index(record.unit_final)?,
        )
    }
}

/// Write the entries to `path` atomically.
///
/// The document goes to a temporary file next to `path` which replaces the
/// destination only once fully written and synced. On failure the temporary
/// file is removed and `path` is left as it was.
pub fn save_entries(path: &Path, entries: &[DatasetEntry]) -> Result<()> {
    profiling::scope!("store::save_entries");

    let document = ProjectFile {
        format: FORMAT_TAG.to_string(),
        version: FORMAT_VERSION,
        entries: entries.iter().map(EntryRecord::from).collect(),
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    tracing::info!(path = %path.display(), entries = entries.len(), "Saved project");
    Ok(())
}

/// Read the entries of a project file
pub fn load_entries(path: &Path) -> Result<Vec<DatasetEntry>> {
    profiling::scope!("store::load_entries");

    let content = fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| GraphError::CorruptProject(e.to_string()))?;

    let format = value.get("format").and_then(|v| v.as_str());
    if format != Some(FORMAT_TAG) {
        return Err(GraphError::CorruptProject(
            "not a project file (missing format tag)".to_string(),
        ));
    }
    let version = value
        .get("version")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| GraphError::CorruptProject("missing format version".to_string()))?;
    if version > u64::from(FORMAT_VERSION) {
        return Err(GraphError::UnsupportedVersion {
            found: u32::try_from(version).unwrap_or(u32::MAX),
            supported: FORMAT_VERSION,
        });
    }

    let document: ProjectFile =
        serde_json::from_value(value).map_err(|e| GraphError::CorruptProject(e.to_string()))?;

    let entries = document
        .entries
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            DatasetEntry::try_from(record)
                .map_err(|e| GraphError::CorruptProject(format!("entry {}: {}", i, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(path = %path.display(), entries = entries.len(), "Opened project");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SeriesColumn;
    use crate::state::Edit;

    fn sample_entries() -> Vec<DatasetEntry> {
        let table = DataTable::new(
            "T",
            vec![273.0, 373.0, 473.0],
            vec![
                SeriesColumn::new("a", vec![Some(10.0), None, Some(30.0)]),
                SeriesColumn::new("b", vec![Some(0.5), Some(1.5), Some(2.5)]),
            ],
        )
        .unwrap();
        let mut first = DatasetEntry::from_table(table.clone(), PathBuf::from("/data/first.csv"));
        first.apply(&Edit::SetScalable(false)).unwrap();
        first
            .apply(&Edit::SetSeriesVisible {
                series: 1,
                visible: false,
            })
            .unwrap();
        first.apply(&Edit::SetUnitInitial(Unit::Ln)).unwrap();
        first.apply(&Edit::SetUnitFinal(Unit::Log10)).unwrap();
        first.refresh_curves();

        let mut second = DatasetEntry::from_table(table, PathBuf::from("second.txt"));
        second.apply(&Edit::SetVisible(false)).unwrap();
        second
            .apply(&Edit::SetRange {
                axis: Axis::Y,
                range: AxisRange::new(-2.0, 2.0),
            })
            .unwrap();
        vec![first, second]
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.sgr");
        let entries = sample_entries();

        save_entries(&path, &entries).unwrap();
        let loaded = load_entries(&path).unwrap();

        assert_eq!(loaded, entries);
        assert!(loaded.iter().all(|e| !e.view().has_curves()));
        assert_eq!(loaded[0].series_visible(), &[true, false]);
        assert_eq!(loaded[0].data().series()[0].values[1], None);
    }

    #[test]
    fn test_round_trip_keeps_full_precision() {
        let awkward = [
            1.0715660391465826e-75,
            0.1 + 0.2,
            -1.81996730402717e-179,
            f64::MAX,
            f64::MIN_POSITIVE,
            std::f64::consts::PI,
        ];
        let table = DataTable::new(
            "T",
            awkward.to_vec(),
            vec![SeriesColumn::new("s", awkward.iter().rev().copied().map(Some).collect())],
        )
        .unwrap();
        let mut entry = DatasetEntry::from_table(table, PathBuf::from("precise.csv"));
        entry
            .apply(&Edit::SetRange {
                axis: Axis::X,
                range: AxisRange::new(0.1 + 0.2, 1.0715660391465826e-75),
            })
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("precise.sgr");
        save_entries(&path, std::slice::from_ref(&entry)).unwrap();
        let loaded = load_entries(&path).unwrap();

        assert_eq!(loaded, vec![entry.clone()]);
        let bits = |e: &DatasetEntry| -> Vec<u64> {
            e.data()
                .index()
                .iter()
                .chain(e.data().series()[0].values.iter().flatten())
                .chain([e.scale(Axis::X).min, e.scale(Axis::X).max].iter())
                .map(|v| v.to_bits())
                .collect()
        };
        assert_eq!(bits(&loaded[0]), bits(&entry));
    }

    #[test]
    fn test_empty_project_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.sgr");
        save_entries(&path, &[]).unwrap();
        assert!(load_entries(&path).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.sgr");

        let cases = [
            "definitely not json",
            "[1, 2, 3]",
            r#"{"format": "something-else", "version": 1, "entries": []}"#,
            r#"{"format": "graph-oxide/sgr", "version": 1, "entries": 5}"#,
            r#"{"format": "graph-oxide/sgr", "entries": []}"#,
        ];
        for content in cases {
            fs::write(&path, content).unwrap();
            let err = load_entries(&path).unwrap_err();
            assert!(matches!(err, GraphError::CorruptProject(_)), "{}: {:?}", content, err);
        }
    }

    #[test]
    fn test_inconsistent_record_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.sgr");
        save_entries(&path, &sample_entries()).unwrap();

        let mut value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        value["entries"][0]["unit_final"] = serde_json::json!(9);
        fs::write(&path, value.to_string()).unwrap();
        assert!(matches!(load_entries(&path), Err(GraphError::CorruptProject(_))));

        value["entries"][0]["unit_final"] = serde_json::json!(0);
        value["entries"][0]["series_visible"] = serde_json::json!([true]);
        fs::write(&path, value.to_string()).unwrap();
        assert!(matches!(load_entries(&path), Err(GraphError::CorruptProject(_))));
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.sgr");
        fs::write(
            &path,
            r#"{"format": "graph-oxide/sgr", "version": 99, "entries": []}"#,
        )
        .unwrap();
        assert!(matches!(
            load_entries(&path),
            Err(GraphError::UnsupportedVersion {
                found: 99,
                supported: 1
            })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_entries(&dir.path().join("nope.sgr")).unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.sgr");
        fs::write(&path, "old content").unwrap();

        let entries = sample_entries();
        save_entries(&path, &entries[..1]).unwrap();
        assert_eq!(load_entries(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_failed_save_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked.sgr");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("keep"), "x").unwrap();

        assert!(save_entries(&blocked, &sample_entries()).is_err());

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("blocked.sgr")]);
        assert!(blocked.join("keep").exists());

        let missing_dir = dir.path().join("missing").join("p.sgr");
        assert!(matches!(
            save_entries(&missing_dir, &[]),
            Err(GraphError::Io(_))
        ));
    }
}
