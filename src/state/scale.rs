//! Keeps the global scale and the own scale of each entry consistent

use crate::data::stats::{self, AxisRange};
use crate::error::{GraphError, Result};

use super::entry::{Axis, Edit};
use super::project::Project;

/// What a reset or fit operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleTarget {
    Entry(usize),
    Global,
}

/// Parse one bound typed by the user
pub fn parse_bound(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(GraphError::ParseFailure {
            input: trimmed.to_string(),
        }),
    }
}

fn parse_range(min: &str, max: &str) -> Result<AxisRange> {
    Ok(AxisRange::new(parse_bound(min)?, parse_bound(max)?))
}

fn check_finite(range: AxisRange) -> Result<()> {
    if range.is_finite() {
        Ok(())
    } else {
        Err(GraphError::Validation(format!(
            "range {}..{} is not finite",
            range.min, range.max
        )))
    }
}

impl Project {
    /// Set one global axis and copy it into every scalable entry
    pub fn set_global_range(&mut self, axis: Axis, range: AxisRange) -> Result<()> {
        check_finite(range)?;
        let range = AxisRange::new(range.min, range.max);
        self.global.set(axis, range);
        let changed = self.apply_where(&Edit::SetRange { axis, range }, |e| e.scalable());
        tracing::debug!(?axis, min = range.min, max = range.max, changed, "Set global range");
        Ok(())
    }

    /// Text variant of [`Project::set_global_range`] for X; returns whether it applied
    pub fn set_global_x_range(&mut self, min: &str, max: &str) -> bool {
        self.set_global_text(Axis::X, min, max)
    }

    /// Text variant of [`Project::set_global_range`] for Y; returns whether it applied
    pub fn set_global_y_range(&mut self, min: &str, max: &str) -> bool {
        self.set_global_text(Axis::Y, min, max)
    }

    fn set_global_text(&mut self, axis: Axis, min: &str, max: &str) -> bool {
        match parse_range(min, max) {
            Ok(range) => self.set_global_range(axis, range).is_ok(),
            Err(e) => {
                tracing::debug!(?axis, error = %e, "Ignored global range edit");
                false
            }
        }
    }

    /// Both global axes at once. Nothing is applied unless all four bounds parse.
    pub fn set_global_ranges(&mut self, x_min: &str, x_max: &str, y_min: &str, y_max: &str) -> bool {
        let ranges = parse_range(x_min, x_max).and_then(|x| Ok((x, parse_range(y_min, y_max)?)));
        match ranges {
            Ok((x, y)) => self.set_global_range(Axis::X, x).is_ok() && self.set_global_range(Axis::Y, y).is_ok(),
            Err(e) => {
                tracing::debug!(error = %e, "Ignored global range edit");
                false
            }
        }
    }

    /// Set one axis of one entry, whether or not it is scalable. The global scale is untouched.
    pub fn set_entry_range(&mut self, index: usize, axis: Axis, range: AxisRange) -> Result<()> {
        self.apply(index, Edit::SetRange { axis, range })
    }

    /// Text variant for X. Parse failures are ignored and reported as `Ok(false)`.
    pub fn set_entry_x_range(&mut self, index: usize, min: &str, max: &str) -> Result<bool> {
        self.set_entry_text(index, Axis::X, min, max)
    }

    /// Text variant for Y. Parse failures are ignored and reported as `Ok(false)`.
    pub fn set_entry_y_range(&mut self, index: usize, min: &str, max: &str) -> Result<bool> {
        self.set_entry_text(index, Axis::Y, min, max)
    }

    fn set_entry_text(&mut self, index: usize, axis: Axis, min: &str, max: &str) -> Result<bool> {
        self.check_index(index)?;
        match parse_range(min, max) {
            Ok(range) => {
                self.set_entry_range(index, axis, range)?;
                Ok(true)
            }
            Err(e) => {
                tracing::debug!(index, ?axis, error = %e, "Ignored entry range edit");
                Ok(false)
            }
        }
    }

    /// Both axes of one entry. Nothing is applied unless all four bounds parse.
    pub fn set_entry_ranges(
        &mut self,
        index: usize,
        x_min: &str,
        x_max: &str,
        y_min: &str,
        y_max: &str,
    ) -> Result<bool> {
        self.check_index(index)?;
        let ranges = parse_range(x_min, x_max).and_then(|x| Ok((x, parse_range(y_min, y_max)?)));
        match ranges {
            Ok((x, y)) => {
                self.set_entry_range(index, Axis::X, x)?;
                self.set_entry_range(index, Axis::Y, y)?;
                Ok(true)
            }
            Err(e) => {
                tracing::debug!(index, error = %e, "Ignored entry range edit");
                Ok(false)
            }
        }
    }

    /// Fit the scale back to the data.
    ///
    /// For [`ScaleTarget::Global`] the union of every entry's data extent becomes the
    /// global scale and is copied into the scalable entries.
    pub fn reset_to_data_extent(&mut self, target: ScaleTarget) -> Result<()> {
        match target {
            ScaleTarget::Entry(index) => {
                self.check_index(index)?;
                let (x, y) = self.entries[index].data_extent();
                self.set_entry_range(index, Axis::X, x)?;
                self.set_entry_range(index, Axis::Y, y)
            }
            ScaleTarget::Global => {
                let extents: Vec<_> = self.entries.iter().map(|e| e.data_extent()).collect();
                let x = stats::union_all(extents.iter().map(|(x, _)| Some(*x)));
                let y = stats::union_all(extents.iter().map(|(_, y)| Some(*y)));
                match (x, y) {
                    (Some(x), Some(y)) => {
                        self.set_global_range(Axis::X, x)?;
                        self.set_global_range(Axis::Y, y)
                    }
                    _ => {
                        tracing::debug!("No entries; global reset skipped");
                        Ok(())
                    }
                }
            }
        }
    }

    /// Restrict Y to the values whose X lies inside the current X bounds.
    ///
    /// Entries with no value inside the window keep their Y bounds. For
    /// [`ScaleTarget::Global`] each scalable entry is fitted on its own data within
    /// the global X window, and the union of the results becomes the global Y.
    pub fn fit_y_to_x_window(&mut self, target: ScaleTarget) -> Result<()> {
        match target {
            ScaleTarget::Entry(index) => {
                self.check_index(index)?;
                let entry = &self.entries[index];
                match entry.y_extent_within(entry.scale(Axis::X)) {
                    Some(y) => self.set_entry_range(index, Axis::Y, y),
                    None => {
                        tracing::debug!(index, "No values inside the X window; Y kept");
                        Ok(())
                    }
                }
            }
            ScaleTarget::Global => {
                let Some(window) = self.global.x.filter(|_| !self.entries.is_empty()) else {
                    tracing::debug!("No global X window; global fit skipped");
                    return Ok(());
                };
                let fitted: Vec<(usize, AxisRange)> = self
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.scalable())
                    .filter_map(|(i, e)| e.y_extent_within(window).map(|y| (i, y)))
                    .collect();

                for &(index, y) in &fitted {
                    self.set_entry_range(index, Axis::Y, y)?;
                }
                if let Some(y) = stats::union_all(fitted.iter().map(|(_, y)| Some(*y))) {
                    self.global.set(Axis::Y, y);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::project::tests::entry_with;

    fn scenario() -> Project {
        let mut project = Project::new();
        project.add_entry(entry_with("scenario", vec![273.0, 373.0, 473.0], vec![10.0, 20.0, 30.0]));
        project
    }

    fn scales(project: &Project) -> Vec<(AxisRange, AxisRange)> {
        project
            .entries()
            .iter()
            .map(|e| (e.scale(Axis::X), e.scale(Axis::Y)))
            .collect()
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound(" 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_bound("-1e3").unwrap(), -1000.0);
        assert!(matches!(parse_bound("abc"), Err(GraphError::ParseFailure { input }) if input == "abc"));
        assert!(parse_bound("").is_err());
        assert!(parse_bound("inf").is_err());
        assert!(parse_bound("NaN").is_err());
    }

    #[test]
    fn test_reset_then_fit_scenario() {
        let mut project = scenario();
        project.set_entry_range(0, Axis::Y, AxisRange::new(-1.0, 1.0)).unwrap();

        project.reset_to_data_extent(ScaleTarget::Entry(0)).unwrap();
        let entry = project.entry(0).unwrap();
        assert_eq!(entry.scale(Axis::X), AxisRange::new(273.0, 473.0));
        assert_eq!(entry.scale(Axis::Y), AxisRange::new(10.0, 30.0));

        assert!(project.set_entry_x_range(0, "373", "473").unwrap());
        project.fit_y_to_x_window(ScaleTarget::Entry(0)).unwrap();
        let entry = project.entry(0).unwrap();
        assert_eq!(entry.scale(Axis::X), AxisRange::new(373.0, 473.0));
        assert_eq!(entry.scale(Axis::Y), AxisRange::new(20.0, 30.0));
    }

    #[test]
    fn test_parse_failure_changes_nothing() {
        let mut project = scenario();
        project.add_entry(entry_with("other", vec![0.0, 1.0], vec![5.0, 6.0]));
        let before = scales(&project);
        let global = project.global();

        assert!(!project.set_global_x_range("abc", "100"));
        assert!(!project.set_global_y_range("0", ""));
        assert!(!project.set_global_ranges("0", "100", "low", "high"));
        assert_eq!(project.set_entry_x_range(0, "abc", "1").unwrap(), false);

        assert_eq!(scales(&project), before);
        assert_eq!(project.global(), global);
    }

    #[test]
    fn test_global_range_skips_non_scalable() {
        let mut project = Project::new();
        project.add_entry(entry_with("a", vec![1.0, 2.0], vec![1.0, 2.0]));
        project.add_entry(entry_with("b", vec![5.0, 9.0], vec![1.0, 2.0]));
        project.set_entry_scalable(1, false).unwrap();
        project.select(Some(1)).unwrap();

        assert!(project.set_global_x_range("0", "100"));
        assert_eq!(project.entry(0).unwrap().scale(Axis::X), AxisRange::new(0.0, 100.0));
        assert_eq!(project.entry(1).unwrap().scale(Axis::X), AxisRange::new(5.0, 9.0));
        assert_eq!(project.global().x, Some(AxisRange::new(0.0, 100.0)));
    }

    #[test]
    fn test_set_global_ranges_applies_both_axes() {
        let mut project = scenario();
        assert!(project.set_global_ranges("500", "0", "1", "2"));
        let entry = project.entry(0).unwrap();
        assert_eq!(entry.scale(Axis::X), AxisRange::new(0.0, 500.0));
        assert_eq!(entry.scale(Axis::Y), AxisRange::new(1.0, 2.0));
    }

    #[test]
    fn test_entry_range_ignores_scalable_and_global() {
        let mut project = scenario();
        project.set_entry_scalable(0, false).unwrap();
        let global = project.global();

        assert!(project.set_entry_y_range(0, "-3", "3").unwrap());
        assert_eq!(project.entry(0).unwrap().scale(Axis::Y), AxisRange::new(-3.0, 3.0));
        assert_eq!(project.global(), global);

        assert!(matches!(
            project.set_entry_x_range(3, "0", "1"),
            Err(GraphError::InvalidEntryIndex { index: 3, len: 1 })
        ));
    }

    #[test]
    fn test_entry_ranges_all_or_nothing() {
        let mut project = scenario();
        let before = scales(&project);

        assert_eq!(project.set_entry_ranges(0, "300", "400", "abc", "1").unwrap(), false);
        assert_eq!(scales(&project), before);

        assert!(project.set_entry_ranges(0, "400", "300", "-1", "1").unwrap());
        let entry = project.entry(0).unwrap();
        assert_eq!(entry.scale(Axis::X), AxisRange::new(300.0, 400.0));
        assert_eq!(entry.scale(Axis::Y), AxisRange::new(-1.0, 1.0));

        assert!(matches!(
            project.set_entry_ranges(2, "0", "1", "0", "1"),
            Err(GraphError::InvalidEntryIndex { index: 2, len: 1 })
        ));
    }

    #[test]
    fn test_global_reset_is_idempotent() {
        let mut project = Project::new();
        project.add_entry(entry_with("a", vec![0.0, 10.0], vec![1.0, 2.0]));
        project.add_entry(entry_with("b", vec![5.0, 20.0], vec![-4.0, 3.0]));
        project.set_global_x_range("7", "8");

        project.reset_to_data_extent(ScaleTarget::Global).unwrap();
        let first = (scales(&project), project.global());
        project.reset_to_data_extent(ScaleTarget::Global).unwrap();
        assert_eq!((scales(&project), project.global()), first);

        assert_eq!(project.global().x, Some(AxisRange::new(0.0, 20.0)));
        assert_eq!(project.global().y, Some(AxisRange::new(-4.0, 3.0)));
        assert_eq!(project.entry(0).unwrap().scale(Axis::X), AxisRange::new(0.0, 20.0));
    }

    #[test]
    fn test_reset_after_removing_only_entry_is_noop() {
        let mut project = scenario();
        project.remove_entry(0).unwrap();
        let global = project.global();

        project.reset_to_data_extent(ScaleTarget::Global).unwrap();
        project.fit_y_to_x_window(ScaleTarget::Global).unwrap();
        assert_eq!(project.global(), global);
        assert!(project.is_empty());
    }

    #[test]
    fn test_remove_keeps_global_scale() {
        let mut project = Project::new();
        project.add_entry(entry_with("a", vec![0.0, 10.0], vec![1.0, 2.0]));
        project.add_entry(entry_with("b", vec![5.0, 50.0], vec![1.0, 2.0]));
        project.remove_entry(1).unwrap();
        assert_eq!(project.global().x, Some(AxisRange::new(0.0, 50.0)));
    }

    #[test]
    fn test_global_fit_is_per_entry() {
        let mut project = Project::new();
        project.add_entry(entry_with("a", vec![0.0, 1.0, 2.0, 3.0], vec![100.0, 1.0, 2.0, 100.0]));
        project.add_entry(entry_with("b", vec![0.0, 1.0, 2.0, 3.0], vec![-50.0, 10.0, 20.0, 50.0]));
        project.add_entry(entry_with("c", vec![0.0, 1.0, 2.0, 3.0], vec![7.0, 7.0, 7.0, 7.0]));
        project.set_entry_scalable(2, false).unwrap();
        let fixed = project.entry(2).unwrap().scale(Axis::Y);

        assert!(project.set_global_x_range("1", "2"));
        project.fit_y_to_x_window(ScaleTarget::Global).unwrap();

        assert_eq!(project.entry(0).unwrap().scale(Axis::Y), AxisRange::new(1.0, 2.0));
        assert_eq!(project.entry(1).unwrap().scale(Axis::Y), AxisRange::new(10.0, 20.0));
        assert_eq!(project.entry(2).unwrap().scale(Axis::Y), fixed);
        assert_eq!(project.entry(0).unwrap().scale(Axis::X), AxisRange::new(1.0, 2.0));
        assert_eq!(project.global().y, Some(AxisRange::new(1.0, 20.0)));
    }

    #[test]
    fn test_fit_with_empty_window_keeps_y() {
        let mut project = scenario();
        project.set_entry_x_range(0, "0", "1").unwrap();
        project.fit_y_to_x_window(ScaleTarget::Entry(0)).unwrap();
        assert_eq!(project.entry(0).unwrap().scale(Axis::Y), AxisRange::new(10.0, 30.0));
    }
}
