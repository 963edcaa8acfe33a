//! Y-value representations and the transforms between them
//!
//! Stored values are assumed to be in an entry's initial unit; the plotted
//! value is `initial.from_unit(final.to_unit(y))`. Equal units compose to the
//! identity for positive input.

use serde::{Deserialize, Serialize};

use crate::constants::units::SENTINEL;
use crate::error::{GraphError, Result};

/// One of the fixed representations a Y value can be interpreted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Raw,
    Ln,
    Log10,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Raw
    }
}

impl Unit {
    /// All units, in list order
    pub const ALL: [Unit; 3] = [Unit::Raw, Unit::Ln, Unit::Log10];

    /// Position of this unit in [`Unit::ALL`]
    pub fn index(self) -> usize {
        match self {
            Unit::Raw => 0,
            Unit::Ln => 1,
            Unit::Log10 => 2,
        }
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Unit::ALL
            .get(index)
            .copied()
            .ok_or(GraphError::InvalidUnitIndex { index })
    }

    /// Axis label for the unit
    pub fn label(self) -> &'static str {
        match self {
            Unit::Raw => "y",
            Unit::Ln => "ln(y)",
            Unit::Log10 => "lg(y)",
        }
    }

    /// Map a value out of this representation back to raw.
    pub fn to_unit(self, y: f64) -> f64 {
        match self {
            Unit::Raw => y,
            Unit::Ln => y.exp(),
            Unit::Log10 => 10f64.powf(y),
        }
    }

    /// Map a raw value into this representation.
    ///
    /// Logarithms of non-positive input yield [`SENTINEL`].
    pub fn from_unit(self, y: f64) -> f64 {
        match self {
            Unit::Raw => y,
            Unit::Ln if y > 0.0 => y.ln(),
            Unit::Log10 if y > 0.0 => y.log10(),
            Unit::Ln | Unit::Log10 => SENTINEL,
        }
    }
}

/// Composition of an entry's initial and final unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transform {
    pub initial: Unit,
    pub target: Unit,
}

impl Transform {
    pub fn new(initial: Unit, target: Unit) -> Self {
        Self { initial, target }
    }

    pub fn is_identity(&self) -> bool {
        self.initial == self.target
    }

    /// Value to plot for a stored value
    pub fn apply(&self, y: f64) -> f64 {
        if self.is_identity() {
            return y;
        }
        self.initial.from_unit(self.target.to_unit(y))
    }

    /// Plot points for one series; positions with a missing value are dropped
    pub fn points(&self, index: &[f64], values: &[Option<f64>]) -> Vec<[f64; 2]> {
        profiling::scope!("Transform::points");
        index
            .iter()
            .zip(values)
            .filter_map(|(&x, y)| y.map(|y| [x, self.apply(y)]))
            .collect()
    }
}
