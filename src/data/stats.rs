//! Extents of table data used to derive axis ranges

use serde::{Deserialize, Serialize};

use super::source::DataTable;

/// Closed interval `[min, max]` on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Create a range, swapping the bounds if they are reversed
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Smallest range containing both
    pub fn union(self, other: AxisRange) -> AxisRange {
        AxisRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Union of optional ranges; `None` only if every input is `None`
pub fn union_all(ranges: impl IntoIterator<Item = Option<AxisRange>>) -> Option<AxisRange> {
    ranges
        .into_iter()
        .flatten()
        .reduce(AxisRange::union)
}

/// Min/max of the finite values, if any
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<AxisRange> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<AxisRange>, v| match acc {
            Some(r) => Some(AxisRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
            None => Some(AxisRange { min: v, max: v }),
        })
}

/// Extent of the index column
pub fn x_extent(table: &DataTable) -> Option<AxisRange> {
    extent(table.index().iter().copied())
}

/// Extent across every present value of every series
pub fn y_extent(table: &DataTable) -> Option<AxisRange> {
    extent(table.series().iter().flat_map(|c| c.present()))
}

/// Extent across every present series value whose index lies inside `window`
pub fn y_extent_within(table: &DataTable, window: AxisRange) -> Option<AxisRange> {
    let index = table.index();
    extent(table.series().iter().flat_map(|c| {
        index
            .iter()
            .zip(&c.values)
            .filter(|(x, _)| window.contains(**x))
            .filter_map(|(_, y)| *y)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::SeriesColumn;

    fn table() -> DataTable {
        DataTable::new(
            "T",
            vec![273.0, 373.0, 473.0],
            vec![
                SeriesColumn::new("a", vec![Some(10.0), Some(20.0), Some(30.0)]),
                SeriesColumn::new("b", vec![None, Some(-5.0), Some(25.0)]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_range_normalizes_bounds() {
        let r = AxisRange::new(5.0, 1.0);
        assert_eq!(r, AxisRange { min: 1.0, max: 5.0 });
        assert_eq!(r.width(), 4.0);
    }

    #[test]
    fn test_extents() {
        let t = table();
        assert_eq!(x_extent(&t), Some(AxisRange::new(273.0, 473.0)));
        assert_eq!(y_extent(&t), Some(AxisRange::new(-5.0, 30.0)));
    }

    #[test]
    fn test_window_extent() {
        let t = table();
        let window = AxisRange::new(373.0, 473.0);
        assert_eq!(y_extent_within(&t, window), Some(AxisRange::new(-5.0, 30.0)));

        let window = AxisRange::new(400.0, 500.0);
        assert_eq!(y_extent_within(&t, window), Some(AxisRange::new(25.0, 30.0)));

        let window = AxisRange::new(0.0, 1.0);
        assert_eq!(y_extent_within(&t, window), None);
    }

    #[test]
    fn test_union_all() {
        let a = Some(AxisRange::new(0.0, 1.0));
        let b = Some(AxisRange::new(-1.0, 0.5));
        assert_eq!(union_all([a, None, b]), Some(AxisRange::new(-1.0, 1.0)));
        assert_eq!(union_all([None, None]), None);
    }
}
